//! unicreds store backend.
//!
//! Talks to a DynamoDB + KMS credential table through the `unicreds` CLI,
//! which owns credential resolution, encryption and the table format.
//!
//! ## Requirements
//!
//! - `unicreds` must be on `PATH`, or `QCONF_UNICREDS` must point at it
//! - The caller must be allowed to assume the profile's role
//!
//! Versions are zero-padded decimal strings. A write passes an explicit
//! version, and unicreds refuses to overwrite an existing one, which is
//! reported as `ConditionalCheckFailedException`.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tracing::{debug, trace};

use super::{Put, SecretStore, VersionToken};
use crate::core::constants;
use crate::error::{Error, Result, StoreError};

/// What `unicreds get` reports for a key with no versions.
const SECRET_NOT_FOUND: &str = "Secret Not Found";

/// unicreds CLI store.
#[derive(Debug, Clone)]
pub struct Unicreds {
    program: PathBuf,
    region: String,
    role: String,
}

impl Unicreds {
    /// Use the binary named by `QCONF_UNICREDS`, or `unicreds` on `PATH`.
    pub fn from_env() -> Self {
        let program = std::env::var_os(constants::UNICREDS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(constants::UNICREDS_BIN));
        Self::with_program(program)
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            region: String::new(),
            role: String::new(),
        }
    }

    fn command(&self, table: &str, context: Option<&str>) -> Result<Command> {
        if self.region.is_empty() {
            return Err(StoreError::Unavailable("store not configured".to_string()).into());
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(["-r", &self.region, "--role", &self.role, "-t", table]);
        if let Some(context) = context {
            cmd.args(["-E", context]);
        }
        Ok(cmd)
    }

    fn run(&self, mut cmd: Command, key: &str) -> Result<Output> {
        trace!(program = %self.program.display(), key, "running unicreds");

        let output = cmd.output().map_err(|e| {
            StoreError::Unavailable(format!("failed to run {}: {}", self.program.display(), e))
        })?;

        if output.status.success() {
            Ok(output)
        } else {
            Err(failure(&output))
        }
    }
}

impl SecretStore for Unicreds {
    fn configure(&mut self, region: &str, role: &str) -> Result<()> {
        let resolved = which::which(&self.program).map_err(|e| {
            StoreError::Unavailable(format!("{}: {}", self.program.display(), e))
        })?;
        debug!(program = %resolved.display(), region, role, "configured unicreds");

        self.program = resolved;
        self.region = region.to_string();
        self.role = role.to_string();
        Ok(())
    }

    fn resolve_version(&self, table: &str, key: &str) -> Result<Option<VersionToken>> {
        let mut cmd = self.command(table, None)?;
        cmd.args(["--csv", "list"]);
        let output = self.run(cmd, key)?;

        let listing = String::from_utf8_lossy(&output.stdout);
        let version = next_version(&listing, key);
        debug!(key, version = ?version.as_ref().map(VersionToken::as_str), "resolved version");
        Ok(version)
    }

    fn fetch_secret(&self, table: &str, key: &str, context: &str) -> Result<Option<String>> {
        let mut cmd = self.command(table, Some(context))?;
        cmd.args(["get", key, "-n"]);
        let output = match self.run(cmd, key) {
            Err(Error::Store(StoreError::Rejected(reason))) if reason.contains(SECRET_NOT_FOUND) => {
                return Err(StoreError::NotFound {
                    key: key.to_string(),
                    reason,
                }
                .into());
            }
            other => other?,
        };

        if output.stdout.is_empty() {
            return Ok(None);
        }
        let payload = String::from_utf8(output.stdout)
            .map_err(|_| StoreError::Rejected(format!("{key}: payload is not valid UTF-8")))?;

        trace!(key, payload_len = payload.len(), "fetched secret");
        Ok(Some(payload))
    }

    fn put_secret(&self, put: &Put<'_>) -> Result<()> {
        // unicreds reads the payload from a file so it never shows up in argv
        let mut staged = tempfile::NamedTempFile::new()?;
        staged.write_all(put.payload.as_bytes())?;
        staged.flush()?;

        let mut cmd = self.command(put.table, Some(put.context))?;
        cmd.arg("put-file")
            .arg(put.key)
            .arg(staged.path())
            .arg(put.version.as_str())
            .args(["-k", put.alias]);

        match self.run(cmd, put.key) {
            Err(Error::Store(StoreError::Rejected(reason)))
                if reason.contains("ConditionalCheckFailed") =>
            {
                Err(StoreError::VersionConflict {
                    key: put.key.to_string(),
                    version: put.version.to_string(),
                }
                .into())
            }
            other => {
                other?;
                debug!(key = put.key, version = %put.version, "stored new version");
                Ok(())
            }
        }
    }
}

/// A failed unicreds run, carrying its stderr verbatim.
fn failure(output: &Output) -> Error {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let reason = if stderr.is_empty() {
        format!("unicreds exited with {}", output.status)
    } else {
        stderr
    };
    StoreError::Rejected(reason).into()
}

/// Compute the version following the highest one listed for `key`.
///
/// `listing` is the CSV output of `unicreds list` (name, version, created).
/// A key with no rows starts at version 1. Returns `None` if a row for the
/// key carries a version that isn't a number.
fn next_version(listing: &str, key: &str) -> Option<VersionToken> {
    let mut highest = 0u64;

    for line in listing.lines() {
        let mut columns = line.split(',').map(str::trim);
        if columns.next() != Some(key) {
            continue;
        }
        let version = columns.next()?.parse::<u64>().ok()?;
        highest = highest.max(version);
    }

    let next = highest.checked_add(1)?;
    Some(VersionToken::new(format!(
        "{:0width$}",
        next,
        width = constants::VERSION_WIDTH
    )))
}
