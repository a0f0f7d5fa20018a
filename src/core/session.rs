//! Active secret session.
//!
//! Binds one selected profile to a store and implements the versioned
//! exchange: fetch the highest version, or resolve a version and write a
//! new one under it.

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::config::Profile;
use crate::core::store::{Put, SecretStore};
use crate::error::{Result, StoreError};

/// One profile bound to a configured store.
///
/// Built once per run and passed by reference to each operation.
#[derive(Debug)]
pub struct Session<S> {
    name: String,
    profile: Profile,
    store: S,
}

impl<S: SecretStore> Session<S> {
    /// Bind `profile` to `store`, configuring the store's authorization
    /// context for the profile's region and role.
    ///
    /// # Errors
    ///
    /// Returns the store's error if it can't be configured.
    pub fn init(name: &str, profile: &Profile, mut store: S) -> Result<Self> {
        debug!(profile = name, region = %profile.region, "initializing session");
        store.configure(&profile.region, &profile.role)?;

        Ok(Self {
            name: name.to_string(),
            profile: profile.clone(),
            store,
        })
    }

    /// Fetch the plaintext of the highest version.
    ///
    /// # Errors
    ///
    /// Returns the store's error, or `StoreError::EmptySecret` when the store
    /// answers with no payload. An empty secret almost always means a wrong
    /// encryption context, so it's never handed back as content.
    pub fn fetch(&self) -> Result<Zeroizing<String>> {
        let p = &self.profile;
        debug!(table = %p.table_name, key = %p.file, "fetching secret");

        let payload = self
            .store
            .fetch_secret(&p.table_name, &p.file, &p.encoding_context)?
            .filter(|payload| !payload.is_empty())
            .ok_or_else(|| StoreError::EmptySecret(p.file.clone()))?;

        debug!(payload_len = payload.len(), "fetched secret");
        Ok(Zeroizing::new(payload))
    }

    /// Upload `contents` as a new version.
    ///
    /// Resolves the version to write first; nothing is written unless that
    /// succeeds. The store refuses the write if the version appeared in the
    /// meantime.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::VersionUnresolved` if no version could be
    /// resolved, `StoreError::VersionConflict` if a concurrent write won, or
    /// the store's error.
    pub fn upload(&self, contents: &str) -> Result<()> {
        let p = &self.profile;

        let version = self
            .store
            .resolve_version(&p.table_name, &p.file)?
            .filter(|version| !version.is_empty())
            .ok_or_else(|| StoreError::VersionUnresolved(p.file.clone()))?;
        debug!(key = %p.file, version = %version, "resolved version");

        self.store.put_secret(&Put {
            table: &p.table_name,
            alias: &p.alias,
            key: &p.file,
            payload: contents,
            version: &version,
            context: &p.encoding_context,
        })?;

        info!(key = %p.file, version = %version, "uploaded new version");
        Ok(())
    }

    /// The secret's key, for messages.
    pub fn identify(&self) -> &str {
        &self.profile.file
    }

    /// The selected profile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
