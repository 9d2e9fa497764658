//! Perforce port handling.
//!
//! Git Fusion reports the address of its backing Perforce server in the
//! output of its `info` command. That address is usually written from the
//! server's own point of view (`1666`, `localhost:1666`), so it is rewritten
//! against the host the client actually connects to.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static SERVER_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Server address: (.*)$").unwrap());

static SERVER_ENCRYPTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Server encryption: encrypted").unwrap());

static BARE_PORT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(ssl:)?(\d+)$").unwrap());

static LOOPBACK_PORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(ssl:)?(?:localhost(?:\.localdom(?:ain)?)?|127\.0\.0\.1)(:\d+)?$").unwrap()
});

/// What the `info` output says about the Perforce server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerInfo {
    /// Value of the `Server address:` line, if any.
    pub address: Option<String>,
    /// Whether a `Server encryption: encrypted` line is present.
    pub encrypted: bool,
}

/// Scan free-form `info` text for the Perforce server address and
/// encryption flag.
pub fn parse_server_info(text: &str) -> ServerInfo {
    ServerInfo {
        address: SERVER_ADDRESS
            .captures(text)
            .map(|caps| caps[1].trim_end_matches('\r').to_string()),
        encrypted: SERVER_ENCRYPTED.is_match(text),
    }
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// Rewrite a Perforce port so that it points at `host`.
///
/// - a single leading `:` is dropped
/// - a bare port (`1666`, `ssl:1666`) becomes `host:1666` (`ssl:host:1666`)
/// - a loopback address (`localhost`, `127.0.0.1`, `localhost.localdomain`,
///   `localhost.localdom`), with or without a port, has its host replaced
///
/// The rewrites apply in that order, each to the result of the previous one.
/// Absent or empty input is returned unchanged.
pub fn expand_perforce_port(port: Option<&str>, host: &str) -> Option<String> {
    let port = match port {
        Some(port) if !port.is_empty() => port,
        other => return other.map(str::to_string),
    };

    let port = port.strip_prefix(':').unwrap_or(port);
    // Closures keep `$` in the host from being read as a group reference
    let port = BARE_PORT.replace(port, |caps: &Captures| {
        format!("{}{}:{}", group(caps, 1), host, group(caps, 2))
    });
    let port = LOOPBACK_PORT.replace(&port, |caps: &Captures| {
        format!("{}{}{}", group(caps, 1), host, group(caps, 2))
    });
    Some(port.into_owned())
}
