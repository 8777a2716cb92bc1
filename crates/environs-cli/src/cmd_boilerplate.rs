// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `environs boilerplate` command.

use std::path::PathBuf;

use clap::Args;
use environs::ProviderRegistry;
use miette::Result;

/// Print or write a provider's configuration template
#[derive(Debug, Args)]
pub struct CmdBoilerplate {
    /// Provider to show the template for
    #[clap(short, long, default_value = "skeleton")]
    provider: String,

    /// Write the template to PATH instead of stdout
    #[clap(short, long)]
    output: Option<PathBuf>,
}

impl CmdBoilerplate {
    pub async fn run(&mut self, registry: &ProviderRegistry) -> Result<i32> {
        let template = registry.provider(&self.provider)?.boilerplate_config();

        let Some(path) = &self.output else {
            print!("{template}");
            return Ok(0);
        };

        if path.exists() {
            return Err(miette::miette!("{:?} already exists", path));
        }
        std::fs::write(path, template)
            .map_err(|e| miette::miette!("Failed to write {:?}: {e}", path))?;

        println!("Created {} config at {:?}", self.provider, path);
        println!();
        println!("Next steps:");
        println!("  1. Edit the file to fill in the required fields");
        println!("  2. Run 'environs prepare -f {}'", path.display());
        Ok(0)
    }
}
