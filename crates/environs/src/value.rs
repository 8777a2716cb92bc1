// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Weakly typed attribute values carried by environment configs.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

#[cfg(test)]
#[path = "./value_test.rs"]
mod value_test;

/// Attribute mapping from field name to value.
///
/// Ordered so that canonical output never depends on input order.
pub type Attrs = BTreeMap<String, AttrValue>;

/// The kind of an [`AttrValue`], as named in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum AttrKind {
    String,
    Int,
    Float,
    Bool,
}

/// A single scalar attribute value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl AttrValue {
    pub fn kind(&self) -> AttrKind {
        match self {
            AttrValue::Bool(_) => AttrKind::Bool,
            AttrValue::Int(_) => AttrKind::Int,
            AttrValue::Float(_) => AttrKind::Float,
            AttrValue::String(_) => AttrKind::String,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// True only for the empty string; other kinds are never empty.
    pub fn is_empty_string(&self) -> bool {
        matches!(self, AttrValue::String(s) if s.is_empty())
    }

    /// Describe the value with its kind, e.g. `int(12345)`.
    pub fn describe(&self) -> String {
        match self {
            AttrValue::String(s) => format!("string({s:?})"),
            other => format!("{}({other})", other.kind()),
        }
    }

    /// Equality that holds for every value and itself, NaN included.
    pub fn same_as(&self, other: &AttrValue) -> bool {
        match (self, other) {
            (AttrValue::Float(a), AttrValue::Float(b)) => a.to_bits() == b.to_bits(),
            (a, b) => a == b,
        }
    }

    /// Extract a string, failing with [`Error::TypeMismatch`] for other kinds.
    pub fn expect_str(&self, field: &str) -> crate::Result<&str> {
        self.as_str().ok_or_else(|| Error::TypeMismatch {
            field: field.to_string(),
            expected: AttrKind::String,
            got: self.describe(),
        })
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Int(i) => write!(f, "{i}"),
            AttrValue::Float(x) => write!(f, "{x}"),
            AttrValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

/// Build an [`Attrs`] mapping from `(name, value)` pairs.
pub fn attrs<K, V, I>(pairs: I) -> Attrs
where
    K: Into<String>,
    V: Into<AttrValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
