// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! environs - Pluggable Environment Providers
//!
//! This crate provides the configuration protocol shared by every
//! environment provider: the adapters that let an orchestrator create and
//! reconfigure compute environments on a cloud, a hypervisor or a bare-metal
//! fleet without knowing the backend.
//!
//! # Overview
//!
//! A provider declares its fields in a [`ProviderSchema`]: their kinds and
//! defaults, which of them are secret, and which are immutable once the
//! environment exists. The [`EnvironProvider`] facade then validates user
//! configs against that schema, optionally as a change from a previous
//! config, fills in immutable fields on first creation, and extracts secrets
//! for separate handling.
//!
//! # Example
//!
//! ```yaml
//! # env.yaml
//! name: staging
//! type: skeleton
//!
//! # secret: never stored in general-purpose state
//! skeleton-secret-field: hunter2
//!
//! # immutable: generated by `prepare` when omitted
//! # skeleton-immutable-field: my-bucket
//! ```

pub mod config;
pub mod environ;
pub mod environ_config;
pub mod error;
pub mod merge;
pub mod provider;
pub mod registry;
pub mod schema;
pub mod skeleton;
pub mod token;
pub mod validate;
pub mod value;

pub use config::Config;
pub use environ::{Environ, InstanceId, Operation};
pub use environ_config::{EnvironConfig, REDACTED};
pub use error::{Error, Phase, Result};
pub use merge::merge;
pub use provider::EnvironProvider;
pub use registry::ProviderRegistry;
pub use schema::{FieldDecl, ProviderSchema, Schema};
pub use skeleton::{SkeletonEnviron, SkeletonProvider};
pub use token::{BootstrapContext, TokenSource, UlidTokens};
pub use validate::validate_config;
pub use value::{AttrKind, AttrValue, Attrs};
