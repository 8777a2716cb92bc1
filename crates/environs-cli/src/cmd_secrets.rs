// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `environs secrets` command.

use std::path::PathBuf;

use clap::Args;
use environs::{Config, ProviderRegistry};
use miette::Result;

/// Show the secret attributes of a configuration
#[derive(Debug, Args)]
pub struct CmdSecrets {
    /// Configuration file to read secrets from
    #[clap(short, long, env = "ENVIRONS_CONFIG")]
    file: PathBuf,
}

impl CmdSecrets {
    pub async fn run(&mut self, registry: &ProviderRegistry) -> Result<i32> {
        let cfg = Config::load(&self.file)?;
        let secrets = registry
            .provider(cfg.provider_type())?
            .secret_attrs(&cfg)?;

        let yaml = serde_yaml::to_string(&secrets)
            .map_err(|e| miette::miette!("Failed to render secrets: {e}"))?;
        print!("{yaml}");
        Ok(0)
    }
}
