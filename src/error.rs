//! # Error Handling
//!
//! This module defines the centralized error type for `git-fusion-url`. It
//! uses the `thiserror` library to build a single `Error` enum covering every
//! failure mode of URL parsing, serialization and configuration resolution.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all possible failures. Variants carry the
//!   offending value (the raw URL, the command name, the entry id) so the
//!   message is useful without further context.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Parsing and validation errors are returned immediately; no partially
//! parsed URL is ever handed back to the caller. The only failure that is
//! recovered locally is the server info lookup used for Perforce port
//! resolution (see [`crate::config::ConfigEntry::perforce_port`]).

use thiserror::Error;

/// Main error type for git-fusion-url operations
#[derive(Error, Debug)]
pub enum Error {
    /// No URL was supplied (absent or empty string).
    #[error("Missing URL: a Git Fusion URL is required")]
    MissingUrl,

    /// The URL carries an explicit scheme other than `http`, `https` or `ssh`.
    #[error("Invalid scheme '{scheme}' in {url}: expected http, https or ssh")]
    InvalidScheme { scheme: String, url: String },

    /// An scp-style URL (`user@host:path`) was given without a user.
    #[error("Missing user in scp-style URL: {url}")]
    MissingScpUser { url: String },

    /// The URL could not be parsed, or has no host.
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// An embedded command outside the known vocabulary.
    #[error("Unknown command '{command}': expected one of help, info, list, status, wait")]
    UnknownCommand { command: String },

    /// The repository was required but none was parsed or assigned.
    #[error("Missing repository in URL: {url}")]
    MissingRepo { url: String },

    /// `extra` is set while `command` or `repo` is missing.
    #[error("Extra parameters require both a command and a repository")]
    ExtraWithoutCommandAndRepo,

    /// The raw configuration document could not be read as entry settings.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// No usable entry exists in the configuration.
    #[error("No Git Fusion configuration found{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    NoConfigurationFound {
        /// Optional hint for how to fix the configuration
        hint: Option<String>,
    },

    /// The requested entry id does not exist in the configuration.
    #[error("Unknown Git Fusion config entry: {id}")]
    UnknownConfigEntry { id: String },

    /// The requested entry exists but is not a valid connection target.
    #[error("Malformed Git Fusion config entry '{id}': {message}")]
    MalformedConfigEntry { id: String, message: String },

    /// A lookup through the entry key table used a key it does not know.
    #[error("Unknown config key: {key}")]
    UnknownConfigKey { key: String },

    /// Running the external `git` command failed.
    #[error("Git command failed for {url}: {command} - {stderr}")]
    GitCommand {
        command: String,
        url: String,
        stderr: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config_parse_with_hint() {
        let error = Error::ConfigParse {
            message: "expected a mapping of entry ids".to_string(),
            hint: Some("Start the file with 'default:'".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("Configuration parsing error"));
        assert!(display.contains("hint:"));
        assert!(display.contains("'default:'"));
    }

    #[test]
    fn test_error_display_invalid_scheme() {
        let error = Error::InvalidScheme {
            scheme: "ftp".to_string(),
            url: "ftp://host/repo".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid scheme 'ftp'"));
        assert!(display.contains("ftp://host/repo"));
    }

    #[test]
    fn test_error_display_invalid_url() {
        let error = Error::InvalidUrl {
            url: "http://[bad".to_string(),
            message: "invalid IPv6 address".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("http://[bad"));
        assert!(display.contains("invalid IPv6 address"));
    }

    #[test]
    fn test_error_display_unknown_command() {
        let error = Error::UnknownCommand {
            command: "push".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unknown command 'push'"));
        assert!(display.contains("status"));
    }

    #[test]
    fn test_error_display_no_configuration_found() {
        let error = Error::NoConfigurationFound { hint: None };
        assert_eq!(format!("{}", error), "No Git Fusion configuration found");
    }

    #[test]
    fn test_error_display_no_configuration_found_with_hint() {
        let error = Error::NoConfigurationFound {
            hint: Some("Add an entry with a 'url' key".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("hint:"));
        assert!(display.contains("Add an entry"));
    }

    #[test]
    fn test_error_display_malformed_entry() {
        let error = Error::MalformedConfigEntry {
            id: "default".to_string(),
            message: "missing 'url'".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("'default'"));
        assert!(display.contains("missing 'url'"));
    }

    #[test]
    fn test_error_display_git_command() {
        let error = Error::GitCommand {
            command: "clone".to_string(),
            url: "https://gf.example.com/@info".to_string(),
            stderr: "No such file or directory".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Git command failed"));
        assert!(display.contains("clone"));
        assert!(display.contains("No such file or directory"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_yaml_error() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: [unclosed").unwrap_err();
        let error: Error = yaml_error.into();
        assert!(format!("{}", error).contains("YAML parsing error"));
    }
}
