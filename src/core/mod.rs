//! Core library components.
//!
//! Profile configuration, the versioned exchange with the secret store,
//! and the edit/push/pull operations built on top of it.

pub mod config;
pub mod constants;
pub mod editor;
pub mod session;
pub mod store;
pub mod transfer;
pub mod workflow;
