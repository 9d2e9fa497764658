//! # Run Command Implementation
//!
//! This module implements the `run` subcommand, which sends one of the Git
//! Fusion commands to the service behind a configuration entry and prints
//! the reply as it arrives.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use git_fusion_url::command::Command;
use git_fusion_url::git::{GitRunner, RunOptions, SystemGitRunner};
use git_fusion_url::suggestions;

/// Run a Git Fusion command against a configuration entry
#[derive(Args, Debug)]
pub struct RunArgs {
    /// The command to run: help, info, list, status or wait.
    #[arg(value_parser = parse_command)]
    pub command: Command,

    /// Entry id; defaults to the first usable entry.
    #[arg(short, long, value_name = "ID")]
    pub entry: Option<String>,

    /// Repository the command applies to, replacing the one in the URL.
    #[arg(long, value_name = "REPO")]
    pub repo: Option<String>,

    /// Trailing parameters passed after the repository.
    #[arg(long, value_name = "EXTRA")]
    pub extra: Option<String>,

    /// Do not print the reply; only report failures.
    #[arg(short, long)]
    pub quiet: bool,

    /// Git executable to run.
    #[arg(long, value_name = "PATH", env = "GIT_FUSION_GIT", default_value = "git")]
    pub git: PathBuf,
}

fn parse_command(name: &str) -> std::result::Result<Command, String> {
    name.parse().map_err(|_| suggestions::unknown_command(name))
}

/// Execute the `run` command.
pub fn execute(args: RunArgs, config_path: &Path) -> Result<()> {
    let store = super::load_store(config_path, false)?;
    let entry = super::select_entry(&store, args.entry.as_deref())?;

    let mut url = entry.url()?;
    if let Some(repo) = args.repo {
        url.set_repo(repo);
    }
    if args.extra.is_some() {
        url.set_extra(args.extra);
    }

    let runner = SystemGitRunner::with_git(args.git);
    let reply = runner.run(
        args.command,
        &url,
        RunOptions {
            sink: None,
            echo: !args.quiet,
        },
    )?;
    log::info!("{} returned {} lines", args.command, reply.lines().count());

    Ok(())
}
