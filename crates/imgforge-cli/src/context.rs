//! Shared wiring for the CLI commands.
//!
//! The composition root: builds the passcode gate and the history store from
//! the default storage locations and injects them into command handlers.

use anyhow::{bail, Context, Result};
use imgforge_core::auth::PasscodeGate;
use imgforge_core::history::HistoryStore;
use imgforge_infrastructure::storage::{AuthMarkerStorage, HistoryStorage, SecretStorage};
use std::env;

const PASSCODE_ENV: &str = "IMGFORGE_PASSCODE";

/// Reads the configured passcode: secret.json first, then the
/// IMGFORGE_PASSCODE environment variable.
pub fn passcode() -> Result<String> {
    if let Ok(storage) = SecretStorage::new() {
        if let Ok(config) = storage.load() {
            if let Some(passcode) = config.passcode {
                return Ok(passcode);
            }
        }
    }

    match env::var(PASSCODE_ENV) {
        Ok(passcode) => Ok(passcode),
        Err(_) => bail!(
            "No passcode configured. Set \"passcode\" in ~/.config/imgforge/secret.json \
             or the {PASSCODE_ENV} environment variable."
        ),
    }
}

/// Builds the passcode gate over the default marker file.
pub fn gate() -> Result<PasscodeGate<AuthMarkerStorage>> {
    let marker = AuthMarkerStorage::new().context("Failed to resolve session marker path")?;
    Ok(PasscodeGate::new(passcode()?, marker))
}

/// Fails unless the durable authentication marker is present.
pub fn require_auth() -> Result<()> {
    let mut gate = gate()?;
    let state = gate.resolve().context("Failed to check session state")?;
    if !state.is_authenticated() {
        bail!("Not authenticated. Run `imgforge login` first.");
    }
    Ok(())
}

/// Opens the history store over the default history file.
pub fn open_store() -> Result<HistoryStore<HistoryStorage>> {
    let storage = HistoryStorage::new().context("Failed to resolve history path")?;
    HistoryStore::load(storage).context("Failed to load image history")
}

/// Resolves a user-supplied id or id prefix to a full record id.
pub fn resolve_id(store: &HistoryStore<HistoryStorage>, candidate: &str) -> Result<String> {
    if store.get(candidate).is_some() {
        return Ok(candidate.to_string());
    }

    let matches: Vec<&str> = store
        .records()
        .iter()
        .filter(|r| r.id.starts_with(candidate))
        .map(|r| r.id.as_str())
        .collect();

    match matches.as_slice() {
        [id] => Ok(id.to_string()),
        [] => bail!("No image found matching '{candidate}'"),
        _ => bail!("Ambiguous id '{candidate}' ({} matches)", matches.len()),
    }
}

/// Derives a filename slug from a prompt, the way the gallery's download
/// action named files: first 20 chars, lowercased, whitespace collapsed
/// to dashes.
pub fn prompt_slug(prompt: &str) -> String {
    prompt
        .chars()
        .take(20)
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
