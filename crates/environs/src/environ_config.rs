// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! The validated configuration handed to provisioning code.

use std::fmt;

use crate::config::Config;
use crate::value::{AttrValue, Attrs};
use crate::Error;

#[cfg(test)]
#[path = "./environ_config_test.rs"]
mod environ_config_test;

/// Shown in place of secret values.
pub const REDACTED: &str = "<redacted>";

/// A generic config together with a provider's canonical attributes.
///
/// Only [`crate::validate::validate_config`] creates these, so every
/// declared field is present with its default applied, and no declared
/// string is empty. Secret values are left out of the `Debug` output.
#[derive(Clone, PartialEq)]
pub struct EnvironConfig {
    config: Config,
    attrs: Attrs,
    secret: Vec<String>,
}

impl EnvironConfig {
    pub(crate) fn new(config: Config, attrs: Attrs, secret: Vec<String>) -> Self {
        Self {
            config,
            attrs,
            secret,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    /// The canonical provider attributes.
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn get(&self, field: &str) -> Option<&AttrValue> {
        self.attrs.get(field)
    }

    /// Extract a string field, failing if it is absent or of another kind.
    pub fn str_field(&self, field: &str) -> crate::Result<&str> {
        match self.attrs.get(field) {
            Some(value) => value.expect_str(field),
            None => Err(Error::MissingField {
                field: field.to_string(),
                expected: crate::value::AttrKind::String,
            }),
        }
    }
}

impl fmt::Debug for EnvironConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironConfig")
            .field("config", &Redacted::new(self.config.all_attrs(), &self.secret))
            .field("attrs", &Redacted::new(&self.attrs, &self.secret))
            .finish()
    }
}

/// Debug view of a mapping with the named fields masked.
struct Redacted<'a> {
    attrs: &'a Attrs,
    secret: &'a [String],
}

impl<'a> Redacted<'a> {
    fn new(attrs: &'a Attrs, secret: &'a [String]) -> Self {
        Self { attrs, secret }
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (field, value) in self.attrs {
            if self.secret.contains(field) {
                map.entry(field, &REDACTED);
            } else {
                map.entry(field, value);
            }
        }
        map.finish()
    }
}
