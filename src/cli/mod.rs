//! Command-line interface.

pub mod completions;
pub mod edit;
pub mod list;
pub mod output;
pub mod pipe;
pub mod pull;
pub mod push;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use crate::core::config::{self, ConfigSet};
use crate::core::session::Session;
use crate::core::store::Unicreds;
use crate::error::{ConfigError, Result};

/// qconf - edit versioned secrets kept in a unicreds credential store.
///
/// Without a mode flag the current secret is written to stdout.
#[derive(Parser, Debug)]
#[command(
    name = "qconf",
    about = "Fetch, edit and re-upload versioned secrets",
    version
)]
pub struct Cli {
    /// TOML config file [default: qconf.toml]
    #[arg(long, value_name = "PATH", env = "QCONF_CONFIG")]
    pub conf: Option<PathBuf>,

    /// Name of the project to use (names from the config file)
    #[arg(long, value_name = "NAME")]
    pub project: Option<String>,

    /// Upload this local file as a new version
    #[arg(long, value_name = "PATH")]
    pub push: Option<PathBuf>,

    /// Download the secret into this new local file
    #[arg(long, value_name = "PATH")]
    pub pull: Option<PathBuf>,

    /// Edit the secret in $EDITOR and upload it once done
    #[arg(long)]
    pub edit: bool,

    /// List the projects in the config file
    #[arg(long)]
    pub list: bool,

    /// Output the project list as JSON
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Show debug output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// What a run does with the selected secret.
///
/// Flags are not exclusive; the first match wins in the order edit, push,
/// pull, pipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Edit,
    Push(PathBuf),
    Pull(PathBuf),
    Pipe,
}

impl Mode {
    pub fn select(cli: &Cli) -> Self {
        if cli.edit {
            Mode::Edit
        } else if let Some(path) = &cli.push {
            Mode::Push(path.clone())
        } else if let Some(path) = &cli.pull {
            Mode::Pull(path.clone())
        } else {
            Mode::Pipe
        }
    }
}

/// Long flags that may also be spelled with a single dash (`-project app`).
const LONG_FLAGS: &[&str] = &[
    "conf",
    "project",
    "push",
    "pull",
    "edit",
    "list",
    "json",
    "completions",
    "verbose",
    "help",
    "version",
];

/// Rewrite single-dash long flags (`-conf x`, `-conf=x`) to `--conf`.
///
/// Everything after a bare `--` is left alone, as is anything that isn't a
/// known long flag.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 || passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split('=').next().unwrap_or(rest);
                    if LONG_FLAGS.contains(&name) {
                        OsString::from(format!("-{text}"))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        return completions::execute(shell);
    }

    let project = cli.project.as_deref().filter(|p| !p.is_empty());
    if project.is_none() && !cli.list {
        return Err(ConfigError::NoProject.into());
    }

    let path = config::locate(cli.conf.as_deref());
    let configs = ConfigSet::load(&path)?;

    if cli.list {
        return list::execute(&configs, cli.json);
    }
    let name = project.ok_or(ConfigError::NoProject)?;

    let session = configs
        .select(name)
        .and_then(|profile| Session::init(name, profile, Unicreds::from_env()))
        .map_err(|e| e.during("init"))?;

    let mode = Mode::select(&cli);
    debug!(project = name, ?mode, "running");
    match mode {
        Mode::Edit => edit::execute(&session).map_err(|e| e.during("edit")),
        Mode::Push(path) => push::execute(&session, &path).map_err(|e| e.during("push")),
        Mode::Pull(path) => pull::execute(&session, &path).map_err(|e| e.during("pull")),
        Mode::Pipe => pipe::execute(&session).map_err(|e| e.during("pipe")),
    }
}
