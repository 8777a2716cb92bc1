// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! The provider facade exposed to the orchestrator.

use std::collections::BTreeMap;

use crate::config::Config;
use crate::environ::Environ;
use crate::error::Phase;
use crate::schema::ProviderSchema;
use crate::token::BootstrapContext;
use crate::validate::validate_config;
use crate::value::AttrValue;
use crate::Error;

#[cfg(test)]
#[path = "./provider_test.rs"]
mod provider_test;

/// A pluggable backend adapter for one kind of infrastructure.
///
/// Implementors declare their fields through [`EnvironProvider::schema`] and
/// construct environs in [`EnvironProvider::open`]; validation, preparation
/// and secret extraction are provided on top of the schema and should not
/// normally be overridden.
pub trait EnvironProvider: Send + Sync + std::fmt::Debug {
    fn schema(&self) -> &ProviderSchema;

    /// A commented YAML template documenting the recognized fields.
    fn boilerplate_config(&self) -> String;

    /// Construct a live environ from `cfg`.
    ///
    /// Implementations must configure the environ through the same path as
    /// [`Environ::set_config`], whether it is new or being reopened.
    fn open(&self, cfg: &Config) -> crate::Result<Box<dyn Environ>>;

    /// Validate `cfg`, and if `old` is given, validate it as a change from `old`.
    ///
    /// Errors are tagged with the [`Phase`] that rejected them.
    fn validate(&self, cfg: &Config, old: Option<&Config>) -> crate::Result<Config> {
        let schema = self.schema();
        let mut ecfg =
            validate_config(schema, cfg, None).map_err(|e| e.in_phase(Phase::Candidate))?;
        if let Some(old) = old {
            let old_ecfg =
                validate_config(schema, old, None).map_err(|e| e.in_phase(Phase::Base))?;
            ecfg = validate_config(schema, cfg, Some(&old_ecfg))
                .map_err(|e| e.in_phase(Phase::Change))?;
        }
        Ok(ecfg.into_config())
    }

    /// Fill every unset immutable field with a fresh token.
    fn prepare_config(&self, ctx: &BootstrapContext, cfg: &Config) -> crate::Result<Config> {
        let mut attrs = cfg.unknown_attrs();
        for field in self.schema().immutable_fields() {
            if attrs.contains_key(field) {
                continue;
            }
            let token = ctx
                .new_token()
                .map_err(|error| Error::IdentifierGenerationFailed {
                    field: field.clone(),
                    error,
                })?;
            tracing::debug!(field = %field, token = %token, "generated immutable field");
            attrs.insert(field.clone(), AttrValue::String(token));
        }
        cfg.apply(&attrs)
    }

    /// Prepare `cfg` for a brand new environment and open it.
    fn prepare(&self, ctx: &BootstrapContext, cfg: &Config) -> crate::Result<Box<dyn Environ>> {
        let cfg = self.prepare_config(ctx, cfg)?;
        let env = self.open(&cfg)?;
        tracing::info!(env = env.name(), provider = cfg.provider_type(), "prepared environment");
        Ok(env)
    }

    /// The values of the secret fields of a valid `cfg`.
    fn secret_attrs(&self, cfg: &Config) -> crate::Result<BTreeMap<String, String>> {
        let schema = self.schema();
        let ecfg = validate_config(schema, cfg, None)?;
        let mut secrets = BTreeMap::new();
        for field in schema.secret_fields() {
            let Some(value) = ecfg.get(field) else {
                continue;
            };
            match value.as_str() {
                Some(s) => {
                    secrets.insert(field.clone(), s.to_string());
                }
                None => {
                    return Err(Error::SecretFieldNotString {
                        field: field.clone(),
                        value: value.to_string(),
                    });
                }
            }
        }
        Ok(secrets)
    }
}
