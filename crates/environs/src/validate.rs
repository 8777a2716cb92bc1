// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Validation of a config against a provider schema and a previous config.

use crate::config::{self, Config};
use crate::environ_config::EnvironConfig;
use crate::schema::ProviderSchema;
use crate::Error;

#[cfg(test)]
#[path = "./validate_test.rs"]
mod validate_test;

/// Validate `cfg` for a provider, optionally as a change from `previous`.
///
/// The generic checks run first and their error is returned unchanged. The
/// provider attributes are then canonicalized, every declared string must be
/// non-empty, and immutable fields must match `previous`. The canonical
/// values are applied back onto the returned config.
pub fn validate_config(
    schema: &ProviderSchema,
    cfg: &Config,
    previous: Option<&EnvironConfig>,
) -> crate::Result<EnvironConfig> {
    config::validate(cfg, previous.map(EnvironConfig::config))?;

    let attrs = cfg.validate_unknown_attrs(schema.schema())?;

    for field in schema.schema().fields() {
        if attrs.get(&field.name).is_some_and(|v| v.is_empty_string()) {
            return Err(Error::EmptyField(field.name.clone()));
        }
    }

    if let Some(previous) = previous {
        for field in schema.immutable_fields() {
            let old = previous.get(field);
            let new = attrs.get(field);
            let unchanged = match (old, new) {
                (Some(old), Some(new)) => old.same_as(new),
                (old, new) => old.is_none() && new.is_none(),
            };
            if !unchanged {
                return Err(Error::ImmutableFieldChanged {
                    field: field.clone(),
                    old: display_opt(old),
                    new: display_opt(new),
                });
            }
        }
    }

    tracing::debug!(
        env = cfg.name(),
        provider = cfg.provider_type(),
        "validated provider attributes"
    );

    let config = cfg.apply(&attrs)?;
    Ok(EnvironConfig::new(
        config,
        attrs,
        schema.secret_fields().to_vec(),
    ))
}

fn display_opt(value: Option<&crate::value::AttrValue>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}
