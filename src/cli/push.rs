//! Push command.

use std::path::Path;

use crate::cli::output;
use crate::core::session::Session;
use crate::core::store::SecretStore;
use crate::core::transfer;
use crate::error::Result;

/// Upload a local file without deleting it.
pub fn execute<S: SecretStore>(session: &Session<S>, path: &Path) -> Result<()> {
    transfer::push(session, path)?;
    output::success(&format!("Successfully uploaded {}", session.identify()));
    Ok(())
}
