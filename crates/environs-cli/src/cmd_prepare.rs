// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `environs prepare` command.

use std::path::PathBuf;

use clap::Args;
use environs::{BootstrapContext, Config, ProviderRegistry};
use miette::Result;

/// Fill in creation-time fields and open a new environment
#[derive(Debug, Args)]
pub struct CmdPrepare {
    /// Configuration file of the new environment
    #[clap(short, long, env = "ENVIRONS_CONFIG")]
    file: PathBuf,

    /// Write the prepared configuration to PATH instead of stdout
    #[clap(short, long)]
    output: Option<PathBuf>,
}

impl CmdPrepare {
    pub async fn run(&mut self, registry: &ProviderRegistry) -> Result<i32> {
        let cfg = Config::load(&self.file)?;
        let env = registry.prepare(&BootstrapContext::new(), &cfg)?;
        let yaml = env.config().to_yaml()?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, yaml)
                    .map_err(|e| miette::miette!("Failed to write {:?}: {e}", path))?;
                println!("Prepared environment {:?} at {:?}", env.name(), path);
            }
            None => print!("{yaml}"),
        }
        Ok(0)
    }
}
