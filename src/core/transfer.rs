//! Direct transfers between the store and local files.
//!
//! Push uploads a local file as-is, pull writes the current secret to a new
//! local file, and pipe streams it to a writer. None of them stage or ask
//! for confirmation.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::session::Session;
use crate::core::store::SecretStore;
use crate::error::{Error, Result, WorkflowError};

/// Upload the contents of `path` as a new version.
///
/// # Errors
///
/// Returns `WorkflowError::EmptyFile` if the file is empty, in which case the
/// store is never contacted, or any read or upload error.
pub fn push<S: SecretStore>(session: &Session<S>, path: &Path) -> Result<()> {
    let contents = Zeroizing::new(fs::read_to_string(path)?);
    if contents.is_empty() {
        return Err(WorkflowError::EmptyFile(path.to_path_buf()).into());
    }

    debug!(path = %path.display(), len = contents.len(), "pushing file");
    session.upload(&contents)
}

/// Fetch the current secret into a new file at `path`.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns `WorkflowError::DestinationExists` if `path` already exists, in
/// which case the store is never contacted, or any fetch or write error.
pub fn pull<S: SecretStore>(session: &Session<S>, path: &Path) -> Result<usize> {
    if path.try_exists()? {
        return Err(WorkflowError::DestinationExists(path.to_path_buf()).into());
    }

    let contents = session.fetch()?;
    write_new_file(path, contents.as_bytes()).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            Error::from(WorkflowError::DestinationExists(path.to_path_buf()))
        } else {
            Error::from(e)
        }
    })?;

    debug!(path = %path.display(), len = contents.len(), "pulled secret");
    Ok(contents.len())
}

/// Fetch the current secret and write it verbatim to `out`.
pub fn pipe<S: SecretStore, W: Write>(session: &Session<S>, out: &mut W) -> Result<()> {
    let contents = session.fetch()?;
    out.write_all(contents.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Create `path` and write `bytes`, failing if it already exists.
///
/// The file is only readable by the owner on Unix.
pub(crate) fn write_new_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
