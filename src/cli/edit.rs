//! Edit command.
//!
//! Opens the secret in `$EDITOR` and uploads it once the operator confirms.

use std::io;

use crate::cli::output;
use crate::core::editor::ExternalEditor;
use crate::core::session::Session;
use crate::core::store::SecretStore;
use crate::core::workflow::{EditWorkflow, Outcome};
use crate::error::Result;

/// Edit the session's secret interactively.
pub fn execute<S: SecretStore>(session: &Session<S>) -> Result<()> {
    let editor = ExternalEditor::from_env()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = EditWorkflow::new(session, &editor, stdin.lock(), stdout.lock()).run()?;

    match outcome {
        Outcome::Uploaded => {
            output::success(&format!("Successfully uploaded {}", session.identify()))
        }
        Outcome::Unchanged => output::warn("File contents unchanged, aborting!"),
        Outcome::Declined => output::warn("Aborted!"),
    }
    Ok(())
}
