// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `environs providers` command.

use clap::Args;
use colored::Colorize;
use environs::ProviderRegistry;
use miette::Result;

/// List registered providers
#[derive(Debug, Args)]
pub struct CmdProviders {
    /// Also list each provider's fields
    #[clap(long)]
    fields: bool,
}

impl CmdProviders {
    pub async fn run(&mut self, registry: &ProviderRegistry) -> Result<i32> {
        for name in registry.names() {
            println!("{}", name.bold());
            if !self.fields {
                continue;
            }

            let provider = registry.provider(name)?;
            let schema = provider.schema();
            for field in schema.schema().fields() {
                let mut markers = Vec::new();
                if schema.is_secret(&field.name) {
                    markers.push("secret".red().to_string());
                }
                if schema.immutable_fields().contains(&field.name) {
                    markers.push("immutable".yellow().to_string());
                }
                if let Some(default) = &field.default {
                    markers.push(format!("default: {default}").dimmed().to_string());
                }
                println!(
                    "  {} ({}) {}",
                    field.name.cyan(),
                    field.kind,
                    markers.join(", ")
                );
            }
        }
        Ok(0)
    }
}
