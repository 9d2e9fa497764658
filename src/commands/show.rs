//! # Show Command Implementation
//!
//! This module implements the `show` subcommand, which prints the settings
//! an entry resolves to after applying entry, URL and global precedence.
//!
//! Unless `--offline` is given and no `perforce.port` is configured, the
//! Perforce port is discovered by running the `info` command against the
//! service. Passwords are always masked.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use git_fusion_url::output::{emoji, mask_secret, OutputConfig};

/// Show the effective settings of a configuration entry
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Entry id; defaults to the first usable entry.
    pub entry: Option<String>,

    /// Do not contact the service to discover the Perforce port.
    #[arg(long)]
    pub offline: bool,
}

/// Execute the `show` command.
pub fn execute(args: ShowArgs, config_path: &Path, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let store = super::load_store(config_path, !args.offline)?;
    let entry = super::select_entry(&store, args.entry.as_deref())?;

    let url = entry.url()?;
    let perforce_port = entry.perforce_port()?;
    let params = entry.git_config_params();
    let auto_create = if entry.is_auto_create_configured() {
        emoji(&out, "✅ configured", "configured")
    } else {
        emoji(&out, "❌ not configured", "not configured")
    };

    println!("{} Entry: {}", emoji(&out, "🎯", "[ENTRY]"), entry.id());
    println!("  url:               {}", url.to_url_string()?);
    println!("  user:              {}", entry.git_fusion_user()?);
    println!(
        "  password:          {}",
        mask_secret(&entry.git_fusion_password()?)
    );
    println!("  perforce user:     {}", entry.perforce_user()?);
    println!(
        "  perforce password: {}",
        mask_secret(&entry.perforce_password()?)
    );
    println!(
        "  perforce port:     {}",
        perforce_port.as_deref().unwrap_or("(unknown)")
    );
    println!("  auto-create:       {}", auto_create);
    if !params.is_empty() {
        println!("  git config:        {}", params.join(" "));
    }

    Ok(())
}
