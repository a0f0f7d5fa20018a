//! qconf - fetch, edit and re-upload versioned secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use qconf::cli::output;
use qconf::cli::{execute, normalize_args, Cli};
use qconf::core::constants;
use qconf::error::{ConfigError, Error, StoreError, WorkflowError};

fn main() {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    // Logs go to stderr so stdout stays clean for piped secrets
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("qconf=debug")
        } else {
            EnvFilter::new("qconf=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

fn suggestion(e: &Error) -> Option<&'static str> {
    match e.root() {
        Error::Config(ConfigError::ReadFile(_)) => {
            Some("create qconf.toml or pass -conf <path>")
        }
        Error::Config(ConfigError::NotFound(_)) => Some("run: qconf -list"),
        Error::Workflow(WorkflowError::NoEditor) => Some("export EDITOR=vim (or your editor of choice)"),
        Error::Store(StoreError::Unavailable(_)) => {
            Some("install unicreds or set QCONF_UNICREDS to its path")
        }
        Error::Store(StoreError::VersionConflict { .. }) => {
            Some("someone else uploaded a new version; re-run to start from it")
        }
        _ => None,
    }
}
