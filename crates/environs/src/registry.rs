// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Explicit mapping from provider type names to provider instances.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{self, Config};
use crate::environ::Environ;
use crate::error::Phase;
use crate::provider::EnvironProvider;
use crate::skeleton::{self, SkeletonProvider};
use crate::token::BootstrapContext;
use crate::Error;

#[cfg(test)]
#[path = "./registry_test.rs"]
mod registry_test;

/// Providers known to the orchestrator, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn EnvironProvider>>,
}

impl ProviderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every provider shipped with this crate.
    pub fn builtin() -> crate::Result<Self> {
        let mut registry = Self::new();
        registry.register(skeleton::PROVIDER_TYPE, Arc::new(SkeletonProvider::new()?))?;
        Ok(registry)
    }

    pub fn register<S: Into<String>>(
        &mut self,
        name: S,
        provider: Arc<dyn EnvironProvider>,
    ) -> crate::Result<()> {
        let name = name.into();
        if self.providers.contains_key(&name) {
            return Err(Error::DuplicateProvider(name));
        }
        tracing::debug!(provider = %name, "registered provider");
        self.providers.insert(name, provider);
        Ok(())
    }

    pub fn provider(&self, name: &str) -> crate::Result<Arc<dyn EnvironProvider>> {
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownProvider(name.to_string()))
    }

    /// Registered names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// The provider named by the `type` attribute of a structurally valid `cfg`.
    fn provider_for(&self, cfg: &Config) -> crate::Result<Arc<dyn EnvironProvider>> {
        config::validate(cfg, None)?;
        self.provider(cfg.provider_type())
    }

    /// Open `cfg` with the provider named by its `type` attribute.
    pub fn open(&self, cfg: &Config) -> crate::Result<Box<dyn Environ>> {
        self.provider_for(cfg)?.open(cfg)
    }

    pub fn prepare(&self, ctx: &BootstrapContext, cfg: &Config) -> crate::Result<Box<dyn Environ>> {
        self.provider_for(cfg)?.prepare(ctx, cfg)
    }

    pub fn validate(&self, cfg: &Config, old: Option<&Config>) -> crate::Result<Config> {
        config::validate(cfg, None).map_err(|e| e.in_phase(Phase::Candidate))?;
        self.provider(cfg.provider_type())?.validate(cfg, old)
    }
}
