//! Running Git Fusion commands through the system `git`.
//!
//! Git Fusion answers its embedded commands (`@info`, `@status@repo`, ...)
//! during a clone: the text arrives on git's stderr and the clone itself
//! then fails. [`SystemGitRunner`] performs such a clone in a throwaway
//! directory and keeps only the service's reply.
//!
//! This uses the system git command, which automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Any authentication configured in ~/.gitconfig

use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command as Process, Stdio};
use std::sync::Arc;

use log::debug;

use crate::command::Command;
use crate::config::{ConfigEntry, InfoSource};
use crate::error::{Error, Result};
use crate::url::GitFusionUrl;

/// Where the lines of a command's reply go besides the returned string.
#[derive(Default)]
pub struct RunOptions<'a> {
    /// Called with every kept line, as it arrives.
    pub sink: Option<&'a mut dyn FnMut(&str)>,
    /// Print every kept line to stdout.
    pub echo: bool,
}

/// Trait for running Git Fusion commands - allows mocking in tests
pub trait GitRunner: Send + Sync {
    /// Run `command` against `url` and return the service's reply, trailing
    /// whitespace trimmed.
    fn run(&self, command: Command, url: &GitFusionUrl, options: RunOptions<'_>)
        -> Result<String>;
}

/// Decides which lines of git's output belong to the service's reply.
///
/// The leading `Cloning into ...` banner is dropped, and so is everything
/// from the first `fatal: ` line on.
#[derive(Debug, Default)]
pub struct OutputFilter {
    seen_first: bool,
    stopped: bool,
}

impl OutputFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `line` is kept.
    pub fn accept(&mut self, line: &str) -> bool {
        let first = !self.seen_first;
        self.seen_first = true;

        if self.stopped || line.starts_with("fatal: ") {
            self.stopped = true;
            return false;
        }
        !(first && line.starts_with("Cloning into"))
    }
}

/// Filter a complete output, returning the kept lines joined by newlines.
pub fn filter_output_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> String {
    let mut filter = OutputFilter::new();
    let kept: Vec<&str> = lines.into_iter().filter(|line| filter.accept(line)).collect();
    kept.join("\n").trim_end().to_string()
}

/// The default implementation of `GitRunner`, which clones with the
/// system's `git` command inside a temporary directory.
#[derive(Debug, Clone)]
pub struct SystemGitRunner {
    git: PathBuf,
}

impl Default for SystemGitRunner {
    fn default() -> Self {
        Self {
            git: PathBuf::from("git"),
        }
    }
}

impl SystemGitRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific git executable.
    pub fn with_git(git: impl Into<PathBuf>) -> Self {
        Self { git: git.into() }
    }
}

impl GitRunner for SystemGitRunner {
    fn run(
        &self,
        command: Command,
        url: &GitFusionUrl,
        mut options: RunOptions<'_>,
    ) -> Result<String> {
        let url = url.clone().with_command(command);
        let display_url = url.to_url_string()?;
        let target = url.credentialed_url()?;
        let git_error = |stderr: String| Error::GitCommand {
            command: format!("clone ({})", command),
            url: display_url.clone(),
            stderr,
        };

        // Removed with its contents when dropped
        let work_dir = tempfile::TempDir::new()?;

        let mut process = Process::new(&self.git);
        for param in url.git_config_params() {
            process.arg("-c").arg(param);
        }
        process
            .args(["clone", "--"])
            .arg(&target)
            .current_dir(work_dir.path())
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        debug!("Running git clone for {}", display_url);
        let mut child = process.spawn().map_err(|e| git_error(e.to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| git_error("stderr was not captured".to_string()))?;

        let mut kept = Vec::new();
        if let Err(e) = read_reply(stderr, &mut options, &mut kept) {
            // git must not outlive the directory it runs in
            let _ = child.kill();
            let _ = child.wait();
            return Err(e.into());
        }

        // The clone itself is expected to fail once the reply is printed
        let status = child.wait()?;
        debug!("git exited with {} for {}", status, display_url);

        Ok(kept.join("\n").trim_end().to_string())
    }
}

/// Read git's stderr line by line, keeping what the filter accepts.
fn read_reply(
    stderr: impl Read,
    options: &mut RunOptions<'_>,
    kept: &mut Vec<String>,
) -> std::io::Result<()> {
    let mut filter = OutputFilter::new();
    for line in BufReader::new(stderr).lines() {
        let line = line?;
        if !filter.accept(&line) {
            continue;
        }
        if let Some(sink) = options.sink.as_mut() {
            sink(line.as_str());
        }
        if options.echo {
            println!("{}", line);
        }
        kept.push(line);
    }
    Ok(())
}

/// Looks up server info by running the `info` command for an entry.
#[derive(Clone)]
pub struct GitInfoSource {
    runner: Arc<dyn GitRunner>,
}

impl GitInfoSource {
    pub fn new(runner: Arc<dyn GitRunner>) -> Self {
        Self { runner }
    }
}

impl Default for GitInfoSource {
    fn default() -> Self {
        Self::new(Arc::new(SystemGitRunner::new()))
    }
}

impl InfoSource for GitInfoSource {
    fn info(&self, entry: &ConfigEntry) -> Result<String> {
        self.runner
            .run(Command::Info, &entry.url()?, RunOptions::default())
    }
}
