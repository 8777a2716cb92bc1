// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! environs - Environment Provider CLI

use clap::{Parser, Subcommand};
use miette::Result;

mod cmd_boilerplate;
mod cmd_prepare;
mod cmd_providers;
mod cmd_secrets;
mod cmd_validate;

use cmd_boilerplate::CmdBoilerplate;
use cmd_prepare::CmdPrepare;
use cmd_providers::CmdProviders;
use cmd_secrets::CmdSecrets;
use cmd_validate::CmdValidate;

#[derive(Parser)]
#[clap(
    name = "environs",
    about = "Environment Provider Toolkit",
    version,
    long_about = "Validate, prepare and inspect environment configurations for pluggable providers"
)]
struct Opt {
    #[clap(flatten)]
    logging: Logging,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
struct Logging {
    /// Increase verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[clap(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List registered providers
    Providers(CmdProviders),

    /// Print or write a provider's configuration template
    Boilerplate(CmdBoilerplate),

    /// Validate a configuration, optionally as a change from a base
    Validate(CmdValidate),

    /// Fill in creation-time fields and open a new environment
    Prepare(CmdPrepare),

    /// Show the secret attributes of a configuration
    Secrets(CmdSecrets),
}

impl Opt {
    async fn run(self) -> Result<i32> {
        // Setup logging
        let log_level = match (self.logging.quiet, self.logging.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .init();

        let registry = environs::ProviderRegistry::builtin()?;

        // Dispatch to command
        match self.cmd {
            Command::Providers(mut cmd) => cmd.run(&registry).await,
            Command::Boilerplate(mut cmd) => cmd.run(&registry).await,
            Command::Validate(mut cmd) => cmd.run(&registry).await,
            Command::Prepare(mut cmd) => cmd.run(&registry).await,
            Command::Secrets(mut cmd) => cmd.run(&registry).await,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();
    let code = opt.run().await?;
    std::process::exit(code);
}
