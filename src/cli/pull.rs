//! Pull command.

use std::path::Path;

use crate::cli::output;
use crate::core::session::Session;
use crate::core::store::SecretStore;
use crate::core::transfer;
use crate::error::Result;

/// Download the secret into a new local file.
pub fn execute<S: SecretStore>(session: &Session<S>, path: &Path) -> Result<()> {
    transfer::pull(session, path)?;
    output::success(&format!("Wrote {}", output::path(&path.display().to_string())));
    Ok(())
}
