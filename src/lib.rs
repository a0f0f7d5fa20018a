//! qconf - edit versioned secrets kept in a unicreds credential store.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── edit          # Fetch, edit in $EDITOR, confirm, upload
//! │   ├── push          # Upload a local file
//! │   ├── pull          # Download into a new local file
//! │   ├── pipe          # Download to stdout
//! │   ├── list          # List configured profiles
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # qconf.toml profiles
//!     ├── session       # Version protocol for one profile
//!     ├── store/        # Secret store backends
//!     │   ├── mod       # SecretStore trait
//!     │   └── unicreds  # unicreds CLI implementation
//!     ├── editor        # Scoped $EDITOR process
//!     ├── workflow      # Edit-confirm-upload state machine
//!     └── transfer      # Push, pull and pipe
//! ```
//!
//! # Features
//!
//! - Named profiles per environment (region, role, table, key, alias, context)
//! - Uploads always write a fresh version and never overwrite a concurrent one
//! - Edits that don't change anything never reach the store
//! - A backup of the original content is kept for every edit

pub mod cli;
pub mod core;
pub mod error;
