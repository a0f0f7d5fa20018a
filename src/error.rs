//! Error types for qconf.
//!
//! Errors are grouped by where they originate: loading profiles, talking to
//! the secret store, or driving the local edit/push/pull steps. Everything
//! funnels into [`Error`] so callers can use `?` throughout.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error raised while running one operation, prefixed with its name.
    #[error("{op}: {source}")]
    During {
        op: &'static str,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Tag this error with the operation it interrupted.
    pub fn during(self, op: &'static str) -> Self {
        Error::During {
            op,
            source: Box::new(self),
        }
    }

    /// The innermost error, with any operation prefixes stripped.
    pub fn root(&self) -> &Error {
        match self {
            Error::During { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Problems with the profile configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no configurations loaded, did you prepare a TOML configuration file?")]
    EmptySet,

    #[error("{profile}: missing {field}")]
    MissingField {
        profile: String,
        field: &'static str,
    },

    #[error("selected config not found: {0:?}; check names in configuration file")]
    NotFound(String),

    #[error("argument \"project\" is required")]
    NoProject,

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("decode config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures reported by, or while reaching, the secret store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("secret store unavailable: {0}")]
    Unavailable(String),

    #[error("secret not found: {key}: {reason}")]
    NotFound { key: String, reason: String },

    #[error("empty credentials for {0}")]
    EmptySecret(String),

    #[error("unable to determine version for {0}")]
    VersionUnresolved(String),

    #[error("version {version} of {key} already exists; another write got there first")]
    VersionConflict { key: String, version: String },

    #[error("store rejected the request: {0}")]
    Rejected(String),
}

/// Failures in the local, operator-facing steps.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("EDITOR is not set")]
    NoEditor,

    #[error("failed to launch editor: {0}")]
    EditorLaunch(String),

    #[error("editor exited unsuccessfully: {0}")]
    EditorFailed(String),

    #[error("file is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("file already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("unexpected EOF at the confirmation prompt")]
    NoAnswer,

    #[error("edited file is not valid UTF-8: {}", .0.display())]
    NotUtf8(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
