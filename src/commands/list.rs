//! # List Command Implementation
//!
//! This module implements the `list` subcommand, which prints every usable
//! entry of the configuration with its URL. Embedded passwords are never
//! printed.

use std::path::Path;

use anyhow::Result;
use serde_yaml::Value;

use git_fusion_url::output::{emoji, OutputConfig};

/// Execute the `list` command.
pub fn execute(config_path: &Path, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let store = super::load_store(config_path, false)?;
    let entries = store.entries()?;

    println!(
        "{} Configuration: {}",
        emoji(&out, "📋", "[CONFIG]"),
        config_path.display()
    );
    println!("\nEntries: {}", entries.len());

    for entry in &entries {
        let url = entry.url()?.to_url_string()?;
        let label = entry
            .get("label")?
            .and_then(|label| match label {
                Value::String(label) => Some(format!(" ({})", label)),
                _ => None,
            })
            .unwrap_or_default();
        println!("  • {}{}: {}", entry.id(), label, url);
    }

    Ok(())
}
