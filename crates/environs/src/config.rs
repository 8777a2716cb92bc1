// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Generic environment configuration shared by every provider.
//!
//! A [`Config`] holds the universal attributes (`name`, `type`, ...) next to
//! whatever provider-specific attributes the user supplied. Providers only
//! ever see the latter through [`Config::unknown_attrs`] and hand their
//! canonical values back through [`Config::apply`].

use std::path::Path;

use once_cell::sync::Lazy;

use crate::merge::merge;
use crate::schema::{FieldDecl, Schema};
use crate::value::{AttrValue, Attrs};
use crate::Error;

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

pub const NAME_KEY: &str = "name";
pub const TYPE_KEY: &str = "type";
pub const DEFAULT_SERIES_KEY: &str = "default-series";
pub const DEVELOPMENT_KEY: &str = "development";

/// Attributes understood by every environment, regardless of provider.
static GENERIC_SCHEMA: Lazy<Schema> = Lazy::new(|| Schema {
    fields: vec![
        FieldDecl::string(NAME_KEY),
        FieldDecl::string(TYPE_KEY),
        FieldDecl::string(DEFAULT_SERIES_KEY).omittable(),
        FieldDecl::bool(DEVELOPMENT_KEY).with_default(false),
    ],
});

/// A structurally valid environment configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    attrs: Attrs,
}

impl Config {
    /// Create a config, type checking and defaulting the universal attributes.
    pub fn new(attrs: Attrs) -> crate::Result<Self> {
        let attrs = merge(&attrs, &GENERIC_SCHEMA)?;
        Ok(Self { attrs })
    }

    /// Parse a config from a YAML mapping of attributes.
    pub fn from_yaml<S: Into<String>>(yaml: S) -> crate::Result<Self> {
        let yaml = yaml.into();
        let attrs: Attrs = serde_yaml::from_str(&yaml).map_err(|e| Error::InvalidYaml {
            error: e,
            yaml_content: yaml.clone(),
        })?;
        Self::new(attrs)
    }

    /// Load a config from file path.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| Error::ReadFailed {
            path: path.to_path_buf(),
            error: e,
        })?;
        Self::from_yaml(yaml)
    }

    /// Serialize every attribute as a YAML mapping.
    pub fn to_yaml(&self) -> crate::Result<String> {
        serde_yaml::to_string(&self.attrs).map_err(|e| Error::InvalidYaml {
            error: e,
            yaml_content: String::new(),
        })
    }

    pub fn name(&self) -> &str {
        self.str_attr(NAME_KEY)
    }

    /// The provider type this config is meant for.
    pub fn provider_type(&self) -> &str {
        self.str_attr(TYPE_KEY)
    }

    pub fn default_series(&self) -> Option<&str> {
        self.attrs.get(DEFAULT_SERIES_KEY).and_then(AttrValue::as_str)
    }

    pub fn development(&self) -> bool {
        self.attrs
            .get(DEVELOPMENT_KEY)
            .and_then(AttrValue::as_bool)
            .unwrap_or_default()
    }

    pub fn all_attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Attributes that are not universal, i.e. the provider's business.
    pub fn unknown_attrs(&self) -> Attrs {
        self.attrs
            .iter()
            .filter(|(k, _)| !GENERIC_SCHEMA.contains(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Canonicalize the provider-specific attributes against `schema`.
    pub fn validate_unknown_attrs(&self, schema: &Schema) -> crate::Result<Attrs> {
        merge(&self.unknown_attrs(), schema)
    }

    /// Produce a new config with `attrs` overlaid on this one.
    pub fn apply(&self, attrs: &Attrs) -> crate::Result<Self> {
        let mut merged = self.attrs.clone();
        merged.extend(attrs.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self::new(merged)
    }

    fn str_attr(&self, key: &str) -> &str {
        // present and a string after `new`, though possibly empty
        self.attrs
            .get(key)
            .and_then(AttrValue::as_str)
            .unwrap_or_default()
    }
}

/// Structural checks on a config, and on its transition from `old`.
///
/// `name` and `type` must be set, and neither may change once an
/// environment exists.
pub fn validate(new: &Config, old: Option<&Config>) -> crate::Result<()> {
    for (key, value) in [(NAME_KEY, new.name()), (TYPE_KEY, new.provider_type())] {
        if value.is_empty() {
            return Err(Error::GenericConfigInvalid {
                reason: format!("empty {key} in environment configuration"),
            });
        }
    }

    if let Some(old) = old {
        if old.name() != new.name() {
            return Err(Error::GenericConfigInvalid {
                reason: format!(
                    "cannot change name from {:?} to {:?}",
                    old.name(),
                    new.name()
                ),
            });
        }
        if old.provider_type() != new.provider_type() {
            return Err(Error::GenericConfigInvalid {
                reason: format!(
                    "cannot change type from {:?} to {:?}",
                    old.provider_type(),
                    new.provider_type()
                ),
            });
        }
    }

    Ok(())
}
