// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `environs validate` command.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use environs::{Config, ProviderRegistry, REDACTED};
use miette::Result;

/// Validate a configuration, optionally as a change from a base
#[derive(Debug, Args)]
pub struct CmdValidate {
    /// Configuration file to validate
    #[clap(short, long, env = "ENVIRONS_CONFIG")]
    file: PathBuf,

    /// Currently deployed configuration; immutable fields may not differ from it
    #[clap(short, long, env = "ENVIRONS_BASE_CONFIG")]
    base: Option<PathBuf>,

    /// Only report whether the config is valid
    #[clap(long)]
    check: bool,
}

impl CmdValidate {
    pub async fn run(&mut self, registry: &ProviderRegistry) -> Result<i32> {
        let cfg = Config::load(&self.file)?;
        let base = self.base.as_ref().map(Config::load).transpose()?;

        let valid = registry.validate(&cfg, base.as_ref())?;
        tracing::info!(env = valid.name(), "configuration is valid");

        if self.check {
            println!("{} {}", "✓".green(), self.file.display());
            return Ok(0);
        }

        let provider = registry.provider(valid.provider_type())?;
        let mut shown = valid.all_attrs().clone();
        for field in provider.schema().secret_fields() {
            if let Some(value) = shown.get_mut(field) {
                *value = REDACTED.into();
            }
        }
        let yaml = serde_yaml::to_string(&shown)
            .map_err(|e| miette::miette!("Failed to render config: {e}"))?;
        print!("{yaml}");
        Ok(0)
    }
}
