//! CLI for the BMD batch media downloader.

mod commands;

use anyhow::Result;
use bmd_core::config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_batch, run_rename, run_resolve};

/// Top-level CLI for the BMD batch media downloader.
#[derive(Debug, Parser)]
#[command(name = "bmd")]
#[command(about = "BMD: concurrent batch resolver/downloader for audio and video titles", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve, download, and rename every entry in a work list.
    Run {
        /// Plain-text work list: one `a <title>` or `v <title>` per line.
        list: PathBuf,

        /// Directory downloads land in (wiped and recreated per run).
        #[arg(long, default_value = "downloads", value_name = "DIR")]
        download_dir: PathBuf,

        /// Run up to N concurrent tasks per stage (overrides the config).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Resolve a work list to URLs without downloading anything.
    Resolve {
        /// Plain-text work list: one `a <title>` or `v <title>` per line.
        list: PathBuf,

        /// Run up to N concurrent searches (overrides the config).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Shorten the file names in a directory, collision-safe.
    Rename {
        /// Directory whose files get shortened names.
        dir: PathBuf,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                list,
                download_dir,
                jobs,
            } => {
                if let Some(jobs) = jobs {
                    cfg.max_concurrent_tasks = jobs.max(1);
                }
                run_batch(&cfg, &list, &download_dir).await?;
            }
            CliCommand::Resolve { list, jobs } => {
                if let Some(jobs) = jobs {
                    cfg.max_concurrent_tasks = jobs.max(1);
                }
                run_resolve(&cfg, &list).await?;
            }
            CliCommand::Rename { dir } => run_rename(&cfg, &dir).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
