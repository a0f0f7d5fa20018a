//! Default command: write the secret to stdout for piping.

use std::io;

use crate::core::session::Session;
use crate::core::store::SecretStore;
use crate::core::transfer;
use crate::error::Result;

pub fn execute<S: SecretStore>(session: &Session<S>) -> Result<()> {
    transfer::pipe(session, &mut io::stdout().lock())
}
