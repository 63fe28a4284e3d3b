//! Nameplate CLI entry point
//!
//! Drives a settings session from the command line. The session state lives
//! only for the duration of one invocation.
//!
//! # Usage
//!
//! ```bash
//! # Replay a request script (one JSON request per line)
//! nameplate exec requests.jsonl
//! cat requests.jsonl | nameplate exec -
//!
//! # Show the seeded catalog and tables
//! nameplate show
//!
//! # Write the default configuration, then inspect it
//! nameplate config init
//! nameplate config show
//!
//! # Debug logs as JSON on stderr
//! nameplate -vv --log-format json exec requests.jsonl
//! ```
//!
//! # Configuration
//!
//! Read from `--config` or the user's config directory
//! (`~/.config/nameplate/config.toml` on Linux); built-in defaults apply
//! when no file exists.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::Path;
use std::process::ExitCode;

use nameplate::{
    NameplateError, Result,
    cli::{Cli, Commands, ConfigCommands, load_config, run_script},
    config::EditorConfig,
    logging::{LogConfig, init_logging},
    output::{OutputWriter, StdoutWriter, format},
    session::Session,
};

fn handle_exec_command(config: &EditorConfig, script: &Path, quiet: bool) -> Result<bool> {
    let mut session = Session::new(config)?;
    let output = StdoutWriter::new();

    let summary = if script == Path::new("-") {
        run_script(&mut session, io::stdin().lock(), &output, quiet)?
    } else {
        let file = File::open(script)?;
        run_script(&mut session, BufReader::new(file), &output, quiet)?
    };

    if !quiet {
        output.info(&format!(
            "{} requests, {} failed",
            summary.requests, summary.failures
        ));
    }
    Ok(summary.all_ok())
}

fn handle_show_command(config: &EditorConfig) -> Result<()> {
    let session = Session::new(config)?;
    let output = StdoutWriter::new();

    output.write(&format::catalog_tree(&session.editor().store().snapshot()));
    output.write(&format::page_table("Tags", &session.tags().page()));
    output.write(&format::page_table("Document types", &session.doc_types().page()));
    Ok(())
}

fn handle_config_command(cli: &Cli, command: &ConfigCommands, quiet: bool) -> Result<()> {
    let output = StdoutWriter::new();
    let path = cli.config_path()?;

    match command {
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                return Err(NameplateError::InvalidInput(format!(
                    "{} already exists (use --force to replace it)",
                    path.display()
                )));
            }
            EditorConfig::default().save_to(&path)?;
            if !quiet {
                output.success(&format!("Wrote default configuration to {}", path.display()));
            }
        }
        ConfigCommands::Path => output.write(&path.display().to_string()),
        ConfigCommands::Show => {
            let config = load_config(cli.config.as_deref())?;
            output.write(&config.to_toml()?);
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Exec { script } => {
            let config = load_config(cli.config.as_deref())?;
            handle_exec_command(&config, script, cli.quiet)
        }
        Commands::Show => {
            let config = load_config(cli.config.as_deref())?;
            handle_show_command(&config)?;
            Ok(true)
        }
        Commands::Config { command } => {
            handle_config_command(cli, command, cli.quiet)?;
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let log_config = if cli.quiet {
        LogConfig::quiet()
    } else {
        LogConfig::from_verbosity(cli.verbose)
    }
    .with_format(cli.log_format)
    .with_ansi(io::stderr().is_terminal());

    if let Err(e) = init_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            StdoutWriter::new().error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
