//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR and CLICOLOR, off when not a terminal):
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, hints
//! - Bold: headers
//! - Dimmed: secondary info
//!
//! Status lines go to stdout; errors and hints go to stderr so they never
//! end up in a piped secret.

use console::style;

/// Print a success message with checkmark (green).
///
/// Example: `✓ Successfully uploaded app.toml`
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green(), msg);
}

/// Print an error message to stderr.
///
/// Example: `Error: pull: file already exists: out.toml`
pub fn error(msg: &str) {
    eprintln!("{} {}", style("Error:").for_stderr().red().bold(), msg);
}

/// Print a warning message (yellow).
///
/// Example: `⚠ Aborted!`
pub fn warn(msg: &str) {
    println!("{} {}", style("⚠").yellow(), msg);
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ set EDITOR to your editor of choice`
pub fn hint(msg: &str) {
    eprintln!(
        "{} {}",
        style("→").for_stderr().cyan(),
        style(msg).for_stderr().cyan()
    );
}

/// Print a bold section header.
pub fn header(title: &str) {
    println!("{}", style(title).bold());
}

/// Print a list item with bullet.
///
/// Example: `  • production`
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Format a path string in cyan.
pub fn path(p: &str) -> String {
    style(p).cyan().to_string()
}

/// Format secondary text, dimmed.
pub fn dimmed(text: &str) -> String {
    style(text).dim().to_string()
}
