//! Profile configuration.
//!
//! Reads `qconf.toml`, a table of named profiles, each describing where one
//! secret lives and how it is encrypted:
//!
//! ```toml
//! [production]
//! region = "eu-west-1"
//! role = "arn:aws:iam::123456789012:role/config-editor"
//! table_name = "credential-store"
//! file = "app.toml"
//! alias = "alias/credstash"
//! encoding_context = "app:production"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// One named target: the location and encryption context of a secret.
///
/// Missing keys deserialize as empty strings so that validation, rather
/// than the TOML parser, reports which profile lacks which field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// AWS region of the credential table
    pub region: String,
    /// IAM role assumed for store access
    pub role: String,
    /// Key of the secret within the table
    pub file: String,
    /// KMS key alias used when writing new versions
    pub alias: String,
    /// Credential table the secret is versioned in
    pub table_name: String,
    /// Encryption context bound to every read and write
    pub encoding_context: String,
}

impl Profile {
    /// Required fields in the order they are checked.
    fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("region", &self.region),
            ("role", &self.role),
            ("encoding_context", &self.encoding_context),
            ("table_name", &self.table_name),
            ("file", &self.file),
            ("alias", &self.alias),
        ]
    }
}

/// Validate a set of profiles.
///
/// Checks that at least one profile exists and that every required field of
/// every profile is non-blank. Stops at the first violation.
///
/// # Errors
///
/// Returns `ConfigError::EmptySet` for an empty map, or
/// `ConfigError::MissingField` naming the profile and field.
pub fn validate(profiles: &BTreeMap<String, Profile>) -> Result<()> {
    if profiles.is_empty() {
        return Err(ConfigError::EmptySet.into());
    }

    for (name, profile) in profiles {
        for (field, value) in profile.fields() {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    profile: name.clone(),
                    field,
                }
                .into());
            }
        }
    }

    Ok(())
}

/// A validated, immutable set of named profiles.
#[derive(Debug, Clone)]
pub struct ConfigSet {
    profiles: BTreeMap<String, Profile>,
}

impl ConfigSet {
    /// Build a config set, validating every profile.
    pub fn from_profiles(profiles: BTreeMap<String, Profile>) -> Result<Self> {
        validate(&profiles)?;
        Ok(Self { profiles })
    }

    /// Parse and validate TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let profiles: BTreeMap<String, Profile> =
            toml::from_str(contents).map_err(ConfigError::Parse)?;
        Self::from_profiles(profiles)
    }

    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file can't be read,
    /// `ConfigError::Parse` if the TOML is malformed, or a validation error.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let set = Self::parse(&contents)?;

        debug!(profiles = set.profiles.len(), "config loaded");
        Ok(set)
    }

    /// Look up a profile by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no profile has exactly this name.
    pub fn select(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::NotFound(name.to_string()).into())
    }

    /// Profile names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Find the configuration file to load.
///
/// An explicit path is returned as given. Otherwise `qconf.toml` is looked
/// for in the working directory, next to the running executable, and in the
/// user config directory, in that order. When none exists the working
/// directory candidate is returned so the read error names it.
pub fn locate(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let local = PathBuf::from(constants::CONFIG_FILE);
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(constants::CONFIG_FILE)));
    let user = dirs::config_dir().map(|dir| {
        dir.join(constants::CONFIG_DIR)
            .join(constants::CONFIG_FILE)
    });

    match [Some(local.clone()), beside_exe, user]
        .into_iter()
        .flatten()
        .find(|candidate| candidate.is_file())
    {
        Some(found) => {
            debug!(path = %found.display(), "found config");
            found
        }
        None => local,
    }
}
