//! treenav CLI - browse and print trees
//!
//! Usage: treenav <COMMAND>
//!
//! Commands:
//!   browse  Browse a directory interactively
//!   print   Print a tree built from a JSON array of records

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands};
use commands::browse::BrowseOptions;
use commands::print::PrintOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("cannot read current directory")?;
    let loaded = treenav::config::load(cli.config.as_deref(), &cwd)?;
    treenav::logging::init(cli.verbose, loaded.config.log.level);
    for warning in &loaded.warnings {
        eprintln!("Warning: {warning}");
    }
    if let Some(source) = &loaded.source {
        tracing::debug!(path = %source.display(), "using config");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start runtime")?;
    let config = loaded.config;

    runtime.block_on(async {
        match cli.command {
            Commands::Browse {
                dir,
                hidden,
                multi,
                ascii,
            } => {
                commands::browse::run(
                    &dir,
                    BrowseOptions {
                        hidden,
                        multi,
                        ascii,
                    },
                    &config,
                )
                .await
            }
            Commands::Print {
                file,
                path_key,
                name_key,
                select,
                expand_all,
                json,
                ascii,
            } => {
                commands::print::run(
                    &file,
                    PrintOptions {
                        path_key,
                        name_key,
                        select,
                        expand_all,
                        json,
                        ascii,
                    },
                    &config,
                )
                .await
            }
        }
    })
}
