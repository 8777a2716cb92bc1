// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! A template provider to copy when adding a new backend.
//!
//! It declares one field of each sort (secret, immutable, defaulted) and
//! implements no provisioning at all: every [`Environ`] operation reports
//! itself as unsupported.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::Config;
use crate::environ::Environ;
use crate::environ_config::EnvironConfig;
use crate::provider::EnvironProvider;
use crate::schema::{FieldDecl, ProviderSchema};
use crate::validate::validate_config;
use crate::value::AttrKind;
use crate::Error;

#[cfg(test)]
#[path = "./skeleton_test.rs"]
mod skeleton_test;

/// Provider type name, as used in the `type` attribute.
pub const PROVIDER_TYPE: &str = "skeleton";

pub const SECRET_FIELD: &str = "skeleton-secret-field";
pub const IMMUTABLE_FIELD: &str = "skeleton-immutable-field";
pub const DEFAULT_FIELD: &str = "skeleton-default-field";

pub const DEFAULT_FIELD_VALUE: &str = "<specific default value>";

/// Shown in help output; keep in step with the schema below.
const BOILERPLATE_CONFIG: &str = "# skeleton environment configuration
name: <environment name>
type: skeleton

# this exists to demonstrate how to deal with sensitive values.
skeleton-secret-field: <cloud credentials, for example>

# this exists to demonstrate how to deal with values that can't change; and
# also how to use prepare to fill in values that don't make sense with
# static defaults but can be chosen at creation time.
# skeleton-immutable-field: <a storage bucket name, for example>

# this exists to demonstrate how to deal with static default values that
# some users may wish to override
# skeleton-default-field: <specific default value>
";

/// The skeleton provider.
#[derive(Debug, Clone)]
pub struct SkeletonProvider {
    schema: Arc<ProviderSchema>,
}

impl SkeletonProvider {
    pub fn new() -> crate::Result<Self> {
        let schema = ProviderSchema::builder()
            .field(FieldDecl::string(SECRET_FIELD))
            .field(FieldDecl::string(IMMUTABLE_FIELD))
            .field(FieldDecl::string(DEFAULT_FIELD).with_default(DEFAULT_FIELD_VALUE))
            .secret(SECRET_FIELD)
            .immutable(IMMUTABLE_FIELD)
            .build()?;
        Ok(Self {
            schema: Arc::new(schema),
        })
    }

    /// Like [`EnvironProvider::open`], keeping the concrete environ type.
    pub fn open_skeleton(&self, cfg: &Config) -> crate::Result<SkeletonEnviron> {
        let env = SkeletonEnviron::new(cfg.name(), Arc::clone(&self.schema));
        env.set_config(cfg)?;
        tracing::debug!(env = %env.name, "opened skeleton environ");
        Ok(env)
    }
}

impl EnvironProvider for SkeletonProvider {
    fn schema(&self) -> &ProviderSchema {
        &self.schema
    }

    fn boilerplate_config(&self) -> String {
        BOILERPLATE_CONFIG.to_string()
    }

    fn open(&self, cfg: &Config) -> crate::Result<Box<dyn Environ>> {
        Ok(Box::new(self.open_skeleton(cfg)?))
    }
}

/// A configured skeleton environment.
///
/// Only [`SkeletonProvider::open_skeleton`] hands these out, and only once
/// [`Environ::set_config`] has accepted a config.
pub struct SkeletonEnviron {
    name: String,
    schema: Arc<ProviderSchema>,
    ecfg: RwLock<Option<EnvironConfig>>,
}

impl SkeletonEnviron {
    fn new<S: Into<String>>(name: S, schema: Arc<ProviderSchema>) -> Self {
        Self {
            name: name.into(),
            schema,
            ecfg: RwLock::new(None),
        }
    }

    fn environ_config(&self) -> Option<EnvironConfig> {
        self.ecfg
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn str_field(&self, field: &str) -> crate::Result<String> {
        match self.environ_config() {
            Some(ecfg) => ecfg.str_field(field).map(String::from),
            None => Err(Error::MissingField {
                field: field.to_string(),
                expected: AttrKind::String,
            }),
        }
    }

    pub fn secret_field(&self) -> crate::Result<String> {
        self.str_field(SECRET_FIELD)
    }

    pub fn immutable_field(&self) -> crate::Result<String> {
        self.str_field(IMMUTABLE_FIELD)
    }

    pub fn default_field(&self) -> crate::Result<String> {
        self.str_field(DEFAULT_FIELD)
    }
}

impl fmt::Debug for SkeletonEnviron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkeletonEnviron")
            .field("name", &self.name)
            .field("ecfg", &self.environ_config())
            .finish_non_exhaustive()
    }
}

impl Environ for SkeletonEnviron {
    fn provider_name(&self) -> &str {
        PROVIDER_TYPE
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> Config {
        self.environ_config()
            .map(EnvironConfig::into_config)
            .unwrap_or_default()
    }

    fn set_config(&self, cfg: &Config) -> crate::Result<()> {
        let mut held = self.ecfg.write().unwrap_or_else(PoisonError::into_inner);
        let next = validate_config(&self.schema, cfg, held.as_ref())?;
        tracing::debug!(env = %self.name, "reconfigured skeleton environ");
        *held = Some(next);
        Ok(())
    }
}
