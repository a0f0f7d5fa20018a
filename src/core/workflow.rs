//! Edit-confirm-upload workflow.
//!
//! Fetches the current secret, stages it in a scratch file next to a backup
//! copy, lets the operator edit it, and uploads the result only if it
//! changed and the operator confirms.
//!
//! ```text
//! Fetching -> Staged -> EditorRunning -> DiffCheck -> Confirming -> Uploading -> Uploaded
//!                                            |             |
//!                                        Unchanged      Declined
//! ```
//!
//! The backup is never removed. The scratch file is removed after a
//! successful upload, or when the editor fails; in every other outcome it
//! stays behind for recovery.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::constants;
use crate::core::editor::Editor;
use crate::core::session::Session;
use crate::core::store::SecretStore;
use crate::core::transfer::write_new_file;
use crate::error::{Result, WorkflowError};

/// How an edit run ended, when it didn't fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The edited content was uploaded as a new version.
    Uploaded,
    /// The editor exited without changing anything.
    Unchanged,
    /// The operator did not confirm the upload.
    Declined,
}

/// Original content and scratch file of one edit run.
struct EditSession {
    original: Zeroizing<String>,
    scratch: PathBuf,
}

enum State {
    Fetching,
    Staged(Zeroizing<String>),
    EditorRunning(EditSession),
    DiffCheck(EditSession),
    Confirming(EditSession, Zeroizing<String>),
    Uploading(EditSession, Zeroizing<String>),
    Finished(Outcome),
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::Fetching => "fetching",
            State::Staged(_) => "staged",
            State::EditorRunning(_) => "editor-running",
            State::DiffCheck(_) => "diff-check",
            State::Confirming(..) => "confirming",
            State::Uploading(..) => "uploading",
            State::Finished(_) => "finished",
        }
    }
}

/// One run of the edit workflow.
///
/// `input` supplies the confirmation answer and `out` receives progress
/// lines and the prompt.
pub struct EditWorkflow<'a, S, R, W> {
    session: &'a Session<S>,
    editor: &'a dyn Editor,
    input: R,
    out: W,
    scratch_dir: PathBuf,
}

impl<'a, S, R, W> EditWorkflow<'a, S, R, W>
where
    S: SecretStore,
    R: BufRead,
    W: Write,
{
    pub fn new(session: &'a Session<S>, editor: &'a dyn Editor, input: R, out: W) -> Self {
        Self {
            session,
            editor,
            input,
            out,
            scratch_dir: std::env::temp_dir(),
        }
    }

    /// Stage scratch files in `dir` instead of the system temp directory.
    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    /// Drive the workflow to completion.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the store, the editor, or local
    /// file and terminal I/O. Files already staged are left as described in
    /// the module docs.
    pub fn run(mut self) -> Result<Outcome> {
        let mut state = State::Fetching;
        loop {
            debug!(state = state.name(), "edit workflow");
            state = match state {
                State::Finished(outcome) => return Ok(outcome),
                other => self.step(other)?,
            };
        }
    }

    fn step(&mut self, state: State) -> Result<State> {
        match state {
            State::Fetching => Ok(State::Staged(self.session.fetch()?)),

            State::Staged(original) => Ok(State::EditorRunning(self.stage(original)?)),

            State::EditorRunning(edit) => {
                writeln!(self.out, "Waiting for editor to exit...")?;
                self.out.flush()?;
                match self.editor.edit(&edit.scratch) {
                    Ok(()) => Ok(State::DiffCheck(edit)),
                    Err(e) => {
                        if let Err(rm) = fs::remove_file(&edit.scratch) {
                            warn!(path = %edit.scratch.display(), error = %rm, "failed to remove scratch file");
                        }
                        Err(e)
                    }
                }
            }

            State::DiffCheck(edit) => {
                let bytes = Zeroizing::new(fs::read(&edit.scratch)?);
                if bytes.as_slice() == edit.original.as_bytes() {
                    return Ok(State::Finished(Outcome::Unchanged));
                }
                let edited = std::str::from_utf8(&bytes)
                    .map_err(|_| WorkflowError::NotUtf8(edit.scratch.clone()))?;
                Ok(State::Confirming(edit, Zeroizing::new(edited.to_string())))
            }

            State::Confirming(edit, edited) => {
                write!(self.out, "Upload [Y/n]? ")?;
                self.out.flush()?;

                let mut answer = String::new();
                self.input.read_line(&mut answer)?;
                // input closed before a full line arrived
                if !answer.ends_with('\n') {
                    return Err(WorkflowError::NoAnswer.into());
                }
                if answer == "y\n" || answer == "Y\n" {
                    Ok(State::Uploading(edit, edited))
                } else {
                    debug!("upload declined");
                    Ok(State::Finished(Outcome::Declined))
                }
            }

            State::Uploading(edit, edited) => {
                self.session.upload(&edited)?;
                if let Err(e) = fs::remove_file(&edit.scratch) {
                    warn!(path = %edit.scratch.display(), error = %e, "failed to remove scratch file");
                }
                Ok(State::Finished(Outcome::Uploaded))
            }

            State::Finished(outcome) => Ok(State::Finished(outcome)),
        }
    }

    /// Write the original content to a fresh scratch file and its backup.
    fn stage(&mut self, original: Zeroizing<String>) -> Result<EditSession> {
        let prefix = format!("{}_", file_stem(self.session.name()));
        let (mut file, scratch) = tempfile::Builder::new()
            .prefix(&prefix)
            .tempfile_in(&self.scratch_dir)?
            .keep()
            .map_err(|e| e.error)?;
        file.write_all(original.as_bytes())?;
        file.sync_all()?;
        drop(file);
        writeln!(
            self.out,
            "Wrote {} bytes to {}",
            original.len(),
            scratch.display()
        )?;

        let backup = backup_path(&scratch);
        write_new_file(&backup, original.as_bytes())?;
        writeln!(self.out, "Backup created at {}", backup.display())?;

        Ok(EditSession { original, scratch })
    }
}

/// `<scratch>.backup`
pub fn backup_path(scratch: &Path) -> PathBuf {
    let mut path = scratch.as_os_str().to_owned();
    path.push(constants::BACKUP_SUFFIX);
    PathBuf::from(path)
}

/// Profile names can be any TOML key; keep only filename-safe characters.
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
