//! Interactive editor launching.
//!
//! The editor runs as a scoped child process: it's spawned with the
//! operator's terminal attached and always reaped, even when the caller
//! bails out early.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus};
use tracing::debug;

use crate::core::constants;
use crate::error::{Result, WorkflowError};

/// Something that lets the operator change a file in place.
pub trait Editor {
    /// Edit `path`, returning once the operator is done.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::EditorLaunch` if the editor can't be started
    /// or `WorkflowError::EditorFailed` if it exits unsuccessfully.
    fn edit(&self, path: &Path) -> Result<()>;
}

/// The operator's `$EDITOR`.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    program: PathBuf,
}

impl ExternalEditor {
    /// Use the program named by `EDITOR`.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NoEditor` if `EDITOR` is unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_value(std::env::var_os(constants::EDITOR_ENV))
    }

    fn from_value(value: Option<OsString>) -> Result<Self> {
        match value {
            Some(program) if !program.to_string_lossy().trim().is_empty() => {
                Ok(Self::new(program))
            }
            _ => Err(WorkflowError::NoEditor.into()),
        }
    }

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Editor for ExternalEditor {
    fn edit(&self, path: &Path) -> Result<()> {
        let program = which::which(&self.program).map_err(|e| {
            WorkflowError::EditorLaunch(format!("{}: {}", self.program.display(), e))
        })?;
        debug!(editor = %program.display(), path = %path.display(), "launching editor");

        let child = Command::new(&program)
            .arg(path)
            .spawn()
            .map_err(|e| WorkflowError::EditorLaunch(format!("{}: {}", program.display(), e)))?;

        let status = Scoped::new(child).wait().map_err(|e| {
            WorkflowError::EditorFailed(format!("{}: {}", program.display(), e))
        })?;

        debug!(%status, "editor exited");
        if status.success() {
            Ok(())
        } else {
            Err(WorkflowError::EditorFailed(status.to_string()).into())
        }
    }
}

/// A child process that is killed and reaped on drop unless already waited on.
struct Scoped {
    child: Child,
    reaped: bool,
}

impl Scoped {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    fn wait(mut self) -> std::io::Result<ExitStatus> {
        let status = self.child.wait()?;
        self.reaped = true;
        Ok(status)
    }
}

impl Drop for Scoped {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
