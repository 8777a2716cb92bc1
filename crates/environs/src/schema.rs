// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Field declarations describing the attributes a provider understands.

use std::collections::HashSet;

use crate::value::{AttrKind, AttrValue, Attrs};
use crate::Error;

#[cfg(test)]
#[path = "./schema_test.rs"]
mod schema_test;

/// Declaration of a single recognized field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub kind: AttrKind,
    /// Value inserted when the field is absent.
    pub default: Option<AttrValue>,
    /// Whether the field may be absent with no default.
    pub omittable: bool,
}

impl FieldDecl {
    pub fn new<S: Into<String>>(name: S, kind: AttrKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            omittable: false,
        }
    }

    pub fn string<S: Into<String>>(name: S) -> Self {
        Self::new(name, AttrKind::String)
    }

    pub fn int<S: Into<String>>(name: S) -> Self {
        Self::new(name, AttrKind::Int)
    }

    pub fn bool<S: Into<String>>(name: S) -> Self {
        Self::new(name, AttrKind::Bool)
    }

    pub fn with_default<V: Into<AttrValue>>(mut self, value: V) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn omittable(mut self) -> Self {
        self.omittable = true;
        self
    }
}

/// An ordered, duplicate-free list of field declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub(crate) fields: Vec<FieldDecl>,
}

impl Schema {
    /// Build a schema, rejecting duplicate names and defaults of the wrong kind.
    pub fn new(fields: Vec<FieldDecl>) -> crate::Result<Self> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "field {:?} is declared more than once",
                    field.name
                )));
            }
            if let Some(default) = &field.default {
                if default.kind() != field.kind {
                    return Err(Error::InvalidSchema(format!(
                        "default for {:?} must be a {}, got {}",
                        field.name,
                        field.kind,
                        default.describe()
                    )));
                }
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The declared default values, keyed by field name.
    pub fn defaults(&self) -> Attrs {
        self.fields
            .iter()
            .filter_map(|f| f.default.clone().map(|d| (f.name.clone(), d)))
            .collect()
    }
}

/// A provider's declared fields plus its secret and immutable field sets.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSchema {
    schema: Schema,
    secret: Vec<String>,
    immutable: Vec<String>,
}

impl ProviderSchema {
    /// Start building a provider schema.
    pub fn builder() -> ProviderSchemaBuilder {
        ProviderSchemaBuilder::default()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn secret_fields(&self) -> &[String] {
        &self.secret
    }

    pub fn immutable_fields(&self) -> &[String] {
        &self.immutable
    }

    pub fn is_secret(&self, name: &str) -> bool {
        self.secret.iter().any(|s| s == name)
    }
}

/// Builder for [`ProviderSchema`].
#[derive(Debug, Clone, Default)]
pub struct ProviderSchemaBuilder {
    fields: Vec<FieldDecl>,
    secret: Vec<String>,
    immutable: Vec<String>,
}

impl ProviderSchemaBuilder {
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    /// Mark a declared field as secret.
    pub fn secret<S: Into<String>>(mut self, name: S) -> Self {
        self.secret.push(name.into());
        self
    }

    /// Mark a declared field as immutable.
    pub fn immutable<S: Into<String>>(mut self, name: S) -> Self {
        self.immutable.push(name.into());
        self
    }

    /// Validate the declarations and produce the schema.
    ///
    /// Secret and immutable names must be declared fields. Immutable fields
    /// are filled with generated tokens, so they must be strings and may not
    /// carry a default.
    pub fn build(self) -> crate::Result<ProviderSchema> {
        let schema = Schema::new(self.fields)?;
        for name in &self.immutable {
            let Some(field) = schema.get(name) else {
                return Err(Error::InvalidSchema(format!(
                    "immutable field {name:?} is not declared"
                )));
            };
            if field.kind != AttrKind::String {
                return Err(Error::InvalidSchema(format!(
                    "immutable field {name:?} must be a string, not {}",
                    field.kind
                )));
            }
            if field.default.is_some() {
                return Err(Error::InvalidSchema(format!(
                    "field {name:?} cannot be both immutable and defaulted"
                )));
            }
        }
        if let Some(name) = self.secret.iter().find(|n| !schema.contains(n)) {
            return Err(Error::InvalidSchema(format!(
                "secret field {name:?} is not declared"
            )));
        }
        Ok(ProviderSchema {
            schema,
            secret: self.secret,
            immutable: self.immutable,
        })
    }
}
