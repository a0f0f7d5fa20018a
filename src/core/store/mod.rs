//! Secret store access.
//!
//! The store keeps every version of a secret, encrypted, and hands back
//! plaintext for the highest one. qconf never encrypts or stores anything
//! itself; it only talks to a store through the [`SecretStore`] trait.
//!
//! ## Adding a New Store
//!
//! 1. Implement the `SecretStore` trait
//! 2. Add the implementation in a new file (e.g., `vault.rs`)
//! 3. Re-export from this module
//!
//! ## Example
//!
//! ```ignore
//! struct Vault { /* ... */ }
//!
//! impl SecretStore for Vault {
//!     fn configure(&mut self, region: &str, role: &str) -> Result<()> { /* ... */ }
//!     fn resolve_version(&self, table: &str, key: &str) -> Result<Option<VersionToken>> { /* ... */ }
//!     fn fetch_secret(&self, table: &str, key: &str, context: &str) -> Result<Option<String>> { /* ... */ }
//!     fn put_secret(&self, put: &Put<'_>) -> Result<()> { /* ... */ }
//! }
//! ```

use std::fmt;

use crate::error::Result;

mod unicreds;

pub use unicreds::Unicreds;

/// Opaque identifier of a secret revision, issued by the store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionToken(String);

impl VersionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty token carries no baseline and can't be written against.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A request to write a new secret version.
#[derive(Debug, Clone, Copy)]
pub struct Put<'a> {
    pub table: &'a str,
    pub alias: &'a str,
    pub key: &'a str,
    pub payload: &'a str,
    pub version: &'a VersionToken,
    pub context: &'a str,
}

/// Versioned secret store.
///
/// Abstracts the remote credential table so sessions can be driven by
/// the real store or by an in-memory fake.
pub trait SecretStore {
    /// Set up the authorization context for subsequent calls.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store can't be reached.
    fn configure(&mut self, region: &str, role: &str) -> Result<()>;

    /// Resolve the version token the next write of `key` must carry.
    ///
    /// Returns `Ok(None)` when the store can't determine a baseline.
    fn resolve_version(&self, table: &str, key: &str) -> Result<Option<VersionToken>>;

    /// Fetch the decrypted payload of the highest version of `key`.
    ///
    /// Returns `Ok(None)` when the store answered without a payload.
    fn fetch_secret(&self, table: &str, key: &str, context: &str) -> Result<Option<String>>;

    /// Write a new version.
    ///
    /// The write must only succeed if `put.version` does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::VersionConflict` if that version was written
    /// concurrently, or `StoreError::Rejected` for any other refusal.
    fn put_secret(&self, put: &Put<'_>) -> Result<()>;
}
