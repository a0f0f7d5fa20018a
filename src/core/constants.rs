//! Constants used throughout qconf.
//!
//! Centralizes file names, environment variable names and store formats.

/// Default configuration file name (qconf.toml).
pub const CONFIG_FILE: &str = "qconf.toml";

/// Directory under the user config dir searched for [`CONFIG_FILE`].
pub const CONFIG_DIR: &str = "qconf";

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "QCONF_CONFIG";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "QCONF_LOG";

/// Environment variable naming the editor to launch.
pub const EDITOR_ENV: &str = "EDITOR";

/// Environment variable overriding the unicreds binary.
pub const UNICREDS_ENV: &str = "QCONF_UNICREDS";

/// Default unicreds binary name, resolved on PATH.
pub const UNICREDS_BIN: &str = "unicreds";

/// Suffix appended to the scratch file path for the retained backup.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Width of zero-padded version numbers in the credential table.
pub const VERSION_WIDTH: usize = 19;
