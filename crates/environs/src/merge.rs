// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Canonicalization of raw attribute mappings against a schema.

use crate::schema::Schema;
use crate::value::Attrs;
use crate::Error;

#[cfg(test)]
#[path = "./merge_test.rs"]
mod merge_test;

/// Merge a raw attribute mapping against a schema.
///
/// Declared fields are type checked, absent fields take their default, and
/// absent fields with neither a default nor an omittable marker fail with
/// [`Error::MissingField`]. Attributes the schema does not declare pass
/// through unchanged.
pub fn merge(raw: &Attrs, schema: &Schema) -> crate::Result<Attrs> {
    let mut canonical = raw.clone();

    for field in schema.fields() {
        match raw.get(&field.name) {
            Some(value) if value.kind() == field.kind => {}
            Some(value) => {
                return Err(Error::TypeMismatch {
                    field: field.name.clone(),
                    expected: field.kind,
                    got: value.describe(),
                });
            }
            None => match &field.default {
                Some(default) => {
                    tracing::debug!(field = %field.name, "applying default");
                    canonical.insert(field.name.clone(), default.clone());
                }
                None if field.omittable => {}
                None => {
                    return Err(Error::MissingField {
                        field: field.name.clone(),
                        expected: field.kind,
                    });
                }
            },
        }
    }

    Ok(canonical)
}
