//! User-facing messages and prompts
//!
//! All interactivity goes through this module so the scripted mode can skip
//! it entirely. Prompt failures (e.g. no usable terminal) surface as IO
//! errors rather than panics.

use std::io::{self, BufRead, Write};

use console::Style;
use inquire::{Confirm, Text};

use crate::error::{InstallerError, Result};

/// Print a highlighted status message
pub fn status(msg: &str) {
    println!("{}", Style::new().yellow().bold().apply_to(msg));
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", Style::new().green().bold().apply_to(msg));
}

/// Ask a yes/no question with a default answer
pub fn confirm(msg: &str, default: bool) -> Result<bool> {
    Confirm::new(msg)
        .with_default(default)
        .with_help_message("Press Enter to accept the default")
        .prompt()
        .map_err(|e| InstallerError::Io {
            message: format!("failed to read confirmation: {e}"),
        })
}

/// Ask for a directory path with a pre-filled default
pub fn directory(msg: &str, default: &str) -> Result<String> {
    Text::new(msg)
        .with_default(default)
        .prompt()
        .map_err(|e| InstallerError::Io {
            message: format!("failed to read directory: {e}"),
        })
}

/// Block until the user presses Enter.
///
/// Used at the end of interactive runs so a double-clicked launch doesn't
/// close its window before the outcome can be read.
pub fn wait_for_enter() {
    print!("Press Enter to exit.");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
