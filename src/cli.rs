//! Command-line interface definitions and the request script runner
//!
//! This module defines the CLI of the `nameplate` binary using the `clap`
//! crate, and the script runner the `exec` command is built on.
//!
//! # Commands
//!
//! - **exec**: replay a JSON-lines request script against a fresh session
//! - **show**: print the seeded catalog and the first table pages
//! - **config**: write, locate or print the configuration file
//!
//! # Script format
//!
//! One [`Request`](crate::session::Request) per line. Blank lines and lines
//! starting with `#` are skipped. Every request produces exactly one JSON
//! response line on the output.
//!
//! # Examples
//!
//! ```
//! use nameplate::cli::run_script;
//! use nameplate::config::EditorConfig;
//! use nameplate::output::BufferedWriter;
//! use nameplate::session::Session;
//!
//! let mut session = Session::new(&EditorConfig::default())?;
//! let script = r#"{"target":"catalog","request":{"op":"add","level":"type","name":"包装机"}}"#;
//! let out = BufferedWriter::new();
//! let summary = run_script(&mut session, script.as_bytes(), &out, true)?;
//! assert_eq!(summary.requests, 1);
//! assert_eq!(summary.failures, 0);
//! # Ok::<(), nameplate::NameplateError>(())
//! ```

use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::Result;
use crate::config::EditorConfig;
use crate::logging::LogFormat;
use crate::output::OutputWriter;
use crate::session::Session;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "nameplate")]
#[command(about = "Cascading device catalog editor for knowledge-base settings", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the user config directory)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format
    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    /// Only print responses; no inline messages, only error logs
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Replay a JSON-lines request script
    #[command(visible_alias = "x")]
    Exec {
        /// Script file, or `-` for stdin
        #[arg(value_name = "FILE")]
        script: PathBuf,
    },

    /// Print the seeded catalog and table pages
    Show,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Write the default configuration
    Init {
        /// Replace an existing file
        #[arg(short = 'f', long = "force")]
        force: bool,
    },

    /// Print the configuration file location
    Path,

    /// Print the effective configuration as TOML
    Show,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Configuration file in effect
    ///
    /// # Errors
    /// Returns an error if no path was given and the user config directory
    /// cannot be determined.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(EditorConfig::config_path()?),
        }
    }
}

/// Load the configuration for a run
///
/// An explicit path must exist; the default location falls back to the
/// built-in defaults when the file is missing.
///
/// # Errors
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    Ok(match path {
        Some(path) => EditorConfig::load_from(path)?,
        None => EditorConfig::load()?,
    })
}

/// Counts of a replayed script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    pub requests: usize,
    pub failures: usize,
}

impl ScriptSummary {
    /// Whether every request succeeded
    #[must_use]
    pub const fn all_ok(&self) -> bool {
        self.failures == 0
    }
}

/// Replay a JSON-lines request script against a session
///
/// Each response is written as one JSON line. Unless `quiet`, failures are
/// also echoed as inline error messages, prefixed with their line number.
///
/// # Errors
/// Returns an error if the script cannot be read or a response cannot be
/// serialized. Failed requests are counted, not returned.
pub fn run_script<R: BufRead>(
    session: &mut Session,
    reader: R,
    output: &dyn OutputWriter,
    quiet: bool,
) -> Result<ScriptSummary> {
    let mut summary = ScriptSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let response = session.handle_line(trimmed);
        summary.requests += 1;
        output.write(&serde_json::to_string(&response)?);

        if !response.ok {
            summary.failures += 1;
            if !quiet {
                let kind = response.kind.map_or("Error", |kind| kind.as_str());
                let message = response.message.as_deref().unwrap_or_default();
                output.error(&format!("line {}: {kind}: {message}", index + 1));
            }
        }
    }

    info!(
        requests = summary.requests,
        failures = summary.failures,
        "script finished"
    );
    Ok(summary)
}
