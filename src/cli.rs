//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use git_fusion_url::defaults::{default_config_path, CONFIG_ENV};

/// Git Fusion URL - Resolve Git Fusion endpoints and their target configuration
#[derive(Parser, Debug)]
#[command(name = "git-fusion-url")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Path to the Git Fusion configuration file
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        env = CONFIG_ENV,
        default_value_os_t = default_config_path()
    )]
    config: PathBuf,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a Git Fusion URL and print its parts
    Parse(commands::parse::ParseArgs),

    /// List the usable entries of the configuration
    List,

    /// Show the effective settings of a configuration entry
    Show(commands::show::ShowArgs),

    /// Run a Git Fusion command against a configuration entry
    Run(commands::run::RunArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // RUST_LOG, when set, wins over --log-level
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&self.log_level))
            .format_timestamp(None)
            .init();

        match self.command {
            Commands::Parse(args) => commands::parse::execute(args, &self.color),
            Commands::List => commands::list::execute(&self.config, &self.color),
            Commands::Show(args) => commands::show::execute(args, &self.config, &self.color),
            Commands::Run(args) => commands::run::execute(args, &self.config),
        }
    }
}
