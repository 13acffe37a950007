use anyhow::{Context, Result};
use chrono::DateTime;
use colored::Colorize;
use imgforge_core::history::ImageRecord;
use imgforge_core::images::DataUrl;
use std::path::{Path, PathBuf};

use super::modify::short_id;
use crate::context;

/// Prints the gallery, newest first.
pub fn list() -> Result<()> {
    context::require_auth()?;
    let store = context::open_store()?;

    if store.is_empty() {
        println!("No images generated yet. Use `imgforge generate` to create your first image!");
        return Ok(());
    }

    println!("{} ({} images)", "Your Image Gallery".bold(), store.len());
    for record in store.records() {
        let mods = match record.modifications.len() {
            0 => String::new(),
            n => format!(" [{n} modifications]"),
        };
        println!(
            "  {}  {}  {}{}",
            short_id(&record.id).cyan(),
            display_date(&record.created_at).dimmed(),
            excerpt(&record.prompt, 50),
            mods.yellow(),
        );
    }
    Ok(())
}

/// Prints one image's details and its modification history.
pub fn show(id: &str) -> Result<()> {
    context::require_auth()?;
    let store = context::open_store()?;
    let id = context::resolve_id(&store, id)?;
    let record = store
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("No image found matching '{id}'"))?;

    println!("{}", "Image Details".bold());
    println!("  id:      {}", record.id);
    println!("  prompt:  {}", record.prompt);
    println!("  model:   {}", record.model);
    println!("  size:    {}", record.size);
    println!("  created: {}", display_date(&record.created_at));

    if record.modifications.is_empty() {
        println!("  no modifications");
    } else {
        println!("{}", "Modification History".bold());
        for (index, modification) in record.modifications.iter().enumerate() {
            println!(
                "  {}. {}  {}",
                index + 1,
                display_date(&modification.created_at).dimmed(),
                modification.prompt
            );
        }
    }
    Ok(())
}

/// Decodes an image's data URL and writes the bytes to a file.
pub fn export(id: &str, path: Option<&Path>, original: bool) -> Result<()> {
    context::require_auth()?;
    let store = context::open_store()?;
    let id = context::resolve_id(&store, id)?;
    let record = store
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("No image found matching '{id}'"))?;

    let image_url = if original {
        record.image_url.as_str()
    } else {
        record.latest_image_url()
    };
    let decoded = DataUrl::parse(image_url)
        .context("This image is not stored as a data URL and cannot be exported")?;

    let destination = match path {
        Some(path) => path.to_path_buf(),
        None => default_export_path(record, &decoded),
    };
    std::fs::write(&destination, &decoded.bytes)
        .with_context(|| format!("Failed to write {}", destination.display()))?;

    println!(
        "✅ Wrote {} bytes to {}",
        decoded.bytes.len(),
        destination.display()
    );
    Ok(())
}

/// Removes one image from the gallery. Unknown ids are reported but deleting
/// the same image twice is not an error.
pub fn delete(id: &str) -> Result<()> {
    context::require_auth()?;
    let mut store = context::open_store()?;
    let id = context::resolve_id(&store, id)?;

    store.delete_image(&id)?;
    println!("Deleted {}.", short_id(&id));
    Ok(())
}

/// Empties the gallery and removes the persisted history file.
pub fn clear() -> Result<()> {
    context::require_auth()?;
    let mut store = context::open_store()?;

    let count = store.len();
    store.clear()?;
    println!("Cleared {count} images from history.");
    Ok(())
}

fn default_export_path(record: &ImageRecord, decoded: &DataUrl) -> PathBuf {
    PathBuf::from(format!(
        "imgforge-{}-{}.{}",
        context::prompt_slug(&record.prompt),
        chrono::Utc::now().timestamp_millis(),
        decoded.extension()
    ))
}

fn display_date(rfc3339: &str) -> String {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| rfc3339.to_string())
}

fn excerpt(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}…")
    }
}
