use anyhow::{Context, Result};
use rustyline::DefaultEditor;

use crate::context;

/// Prompts for the passcode and unlocks the studio on a match.
pub fn login() -> Result<()> {
    let mut gate = context::gate()?;

    if gate.resolve()?.is_authenticated() {
        println!("Already logged in.");
        return Ok(());
    }

    let mut editor = DefaultEditor::new().context("Failed to open input")?;
    let candidate = editor
        .readline("Passcode: ")
        .context("Failed to read passcode")?;

    if gate.authenticate(candidate.trim_end_matches(['\r', '\n']))? {
        println!("✅ Unlocked. You can now generate images.");
    } else {
        // Wrong passcode is a normal negative result; exit non-zero without
        // a stack trace.
        println!("Invalid passcode. Please try again.");
        std::process::exit(1);
    }

    Ok(())
}

/// Clears the durable session marker.
pub fn logout() -> Result<()> {
    let mut gate = context::gate()?;
    gate.logout()?;
    println!("Logged out.");
    Ok(())
}
