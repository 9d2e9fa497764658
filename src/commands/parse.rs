//! # Parse Command Implementation
//!
//! This module implements the `parse` subcommand, which breaks a Git Fusion
//! URL into its parts and prints its canonical form. It reads no
//! configuration and contacts no server.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use git_fusion_url::output::{emoji, OutputConfig};
use git_fusion_url::url::GitFusionUrl;

/// Parse a Git Fusion URL and print its parts
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// The URL to parse (https://host/@command@repo, user@host:repo, ...)
    pub url: String,

    /// Keep an embedded password in the canonical form.
    #[arg(long)]
    pub show_password: bool,

    /// Print the parts as JSON.
    #[arg(long)]
    pub json: bool,
}

/// The parts of a URL as printed by `parse`.
#[derive(Debug, Serialize)]
struct UrlParts {
    canonical: String,
    scheme: String,
    base: String,
    host: String,
    delimiter: String,
    command: Option<String>,
    repo: Option<String>,
    extra: Option<String>,
}

impl UrlParts {
    fn from_url(url: &GitFusionUrl) -> Result<Self> {
        Ok(Self {
            canonical: url.to_url_string()?,
            scheme: url.scheme().to_string(),
            base: url.base().to_string(),
            host: url.host()?,
            delimiter: url.delimiter().to_string(),
            command: url.command().map(|c| c.to_string()),
            repo: url.repo().map(str::to_string),
            extra: url.extra().map(str::to_string),
        })
    }
}

/// Execute the `parse` command.
pub fn execute(args: ParseArgs, color_flag: &str) -> Result<()> {
    let mut url = GitFusionUrl::parse(&args.url)?;
    url.set_strip_password(!args.show_password);
    let parts = UrlParts::from_url(&url)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&parts)?);
        return Ok(());
    }

    let out = OutputConfig::from_env_and_flag(color_flag);
    println!("{} {}", emoji(&out, "🔗", "URL:"), parts.canonical);
    println!("  scheme:    {}", parts.scheme);
    println!("  host:      {}", parts.host);
    println!("  delimiter: {}", parts.delimiter);
    println!("  command:   {}", parts.command.as_deref().unwrap_or("-"));
    println!("  repo:      {}", parts.repo.as_deref().unwrap_or("-"));
    println!("  extra:     {}", parts.extra.as_deref().unwrap_or("-"));

    Ok(())
}
