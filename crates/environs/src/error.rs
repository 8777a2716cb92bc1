// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for environment provider operations.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::environ::Operation;
use crate::value::AttrKind;

/// Convenience Result type with environs Error.
pub type Result<T> = std::result::Result<T, Error>;

/// The validation phase a wrapped error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Phase {
    /// The candidate config, checked on its own.
    #[strum(serialize = "invalid config")]
    Candidate,
    /// The baseline config the candidate is compared against.
    #[strum(serialize = "invalid base config")]
    Base,
    /// The transition from the baseline to the candidate.
    #[strum(serialize = "invalid config change")]
    Change,
}

/// Errors that can occur while validating, preparing or opening environments.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// A required field is absent and has no default
    #[error("{field}: expected {expected}, got nothing")]
    #[diagnostic(
        code(environs::missing_field),
        help("Add '{field}' to the environment configuration")
    )]
    MissingField { field: String, expected: AttrKind },

    /// A field holds a value of the wrong kind
    #[error("{field}: expected {expected}, got {got}")]
    #[diagnostic(code(environs::type_mismatch))]
    TypeMismatch {
        field: String,
        expected: AttrKind,
        got: String,
    },

    /// A declared field resolved to an empty string
    #[error("{0}: must not be empty")]
    #[diagnostic(code(environs::empty_field))]
    EmptyField(String),

    /// An immutable field differs between the baseline and the candidate
    #[error("{field}: cannot change from {old} to {new}")]
    #[diagnostic(
        code(environs::immutable_field_changed),
        help("'{field}' is fixed when the environment is created")
    )]
    ImmutableFieldChanged {
        field: String,
        old: String,
        new: String,
    },

    /// The universal part of a config failed structural validation
    #[error("{reason}")]
    #[diagnostic(code(environs::generic_config_invalid))]
    GenericConfigInvalid { reason: String },

    /// A secret field holds something other than a string
    #[error("secret {field:?} field must have a string value; got {value}")]
    #[diagnostic(code(environs::secret_not_string))]
    SecretFieldNotString { field: String, value: String },

    /// A unique token for an immutable field could not be generated
    #[error("cannot generate {field}")]
    #[diagnostic(code(environs::identifier_generation_failed))]
    IdentifierGenerationFailed {
        field: String,
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The provider declines to support an operation
    #[error("{operation} not implemented in {provider} provider")]
    #[diagnostic(code(environs::unsupported))]
    Unsupported {
        provider: String,
        operation: Operation,
    },

    /// A provider schema is inconsistent
    #[error("Invalid provider schema: {0}")]
    #[diagnostic(code(environs::invalid_schema))]
    InvalidSchema(String),

    /// No provider registered under the requested name
    #[error("no registered provider for {0:?}")]
    #[diagnostic(
        code(environs::unknown_provider),
        help("Check the 'type' attribute; 'environs providers' lists the known names")
    )]
    UnknownProvider(String),

    /// A provider name was registered twice
    #[error("duplicate provider registration for {0:?}")]
    #[diagnostic(code(environs::duplicate_provider))]
    DuplicateProvider(String),

    /// Invalid YAML in a config file
    #[error("Invalid environment config: {error}")]
    #[diagnostic(
        code(environs::invalid_yaml),
        help("Configs are YAML mappings of scalar attributes")
    )]
    InvalidYaml {
        #[source]
        error: serde_yaml::Error,
        yaml_content: String,
    },

    /// Failed to read file
    #[error("Failed to read file: {path:?}")]
    #[diagnostic(code(environs::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// A lower-level error tagged with the phase that produced it
    #[error("{phase}: {source}")]
    #[diagnostic(code(environs::validation_failed))]
    Phase {
        phase: Phase,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Tag this error with the validation phase it came from.
    pub fn in_phase(self, phase: Phase) -> Self {
        Error::Phase {
            phase,
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through any phase tags.
    pub fn root(&self) -> &Error {
        match self {
            Error::Phase { source, .. } => source.root(),
            other => other,
        }
    }
}
