//! The closed set of commands that can be embedded in a Git Fusion URL path
//! (`https://host/@status@repo`).

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A command understood by the Git Fusion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Help,
    Info,
    List,
    Status,
    Wait,
}

impl Command {
    /// Every known command, in display order.
    pub const ALL: [Command; 5] = [
        Command::Help,
        Command::Info,
        Command::List,
        Command::Status,
        Command::Wait,
    ];

    /// The name as it appears in a URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Info => "info",
            Command::List => "list",
            Command::Status => "status",
            Command::Wait => "wait",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Command::ALL
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| Error::UnknownCommand {
                command: s.to_string(),
            })
    }
}

/// Returns true if `name` is a known command.
///
/// Matching is exact: `Info` and ` info` are rejected.
pub fn is_valid_command(name: &str) -> bool {
    Command::ALL.iter().any(|command| command.as_str() == name)
}
