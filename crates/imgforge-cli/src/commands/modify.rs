use anyhow::{bail, Context, Result};
use imgforge_api::{first_data_url, OpenAiImagesClient};
use imgforge_core::images::{DataUrl, EditParams, ImageSize, OutputFormat, Quality};
use std::path::Path;

use crate::context;

/// Sends an edit request for a stored image and records the result as a
/// modification on that image.
pub async fn run(
    id: &str,
    prompt: &str,
    size: &str,
    quality: &str,
    mask: Option<&Path>,
) -> Result<()> {
    context::require_auth()?;

    if prompt.trim().is_empty() {
        bail!("Please enter a modification prompt");
    }

    let mut store = context::open_store()?;
    let id = context::resolve_id(&store, id)?;
    // Edit the image currently on display: the latest modification's result
    // if one exists, else the original.
    let source = store
        .get(&id)
        .map(|r| r.latest_image_url().to_string())
        .ok_or_else(|| anyhow::anyhow!("No image found matching '{id}'"))?;

    let mut params = EditParams::new(source, prompt)
        .with_size(ImageSize::from_lenient(size))
        .with_quality(Quality::from_lenient(quality));
    if let Some(mask_path) = mask {
        params = params.with_mask(mask_data_url(mask_path)?);
    }

    let client = OpenAiImagesClient::try_from_env()?;
    println!("🎨 Modifying image {}...", short_id(&id));

    let payloads = match client.edit(&params).await {
        Ok(payloads) => payloads,
        Err(e) => bail!("Error modifying image: {e}. Please try again."),
    };
    // The edits endpoint returns PNG content.
    let image_url = first_data_url(&payloads, OutputFormat::Png)?;

    store.add_modification(&id, prompt, image_url)?;

    println!("✅ Modification saved. See `imgforge show {}`.", short_id(&id));
    Ok(())
}

/// Reads a mask file and encodes it as a data URL, deriving the MIME type
/// from the file extension.
fn mask_data_url(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read mask file {}", path.display()))?;
    let mime = match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "image/png",
    };
    Ok(DataUrl::encode(mime, &bytes))
}

pub(crate) fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_mask_data_url_mime_from_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mask.webp");
        std::fs::write(&path, b"mask bytes").unwrap();

        let url = mask_data_url(&path).unwrap();
        assert!(url.starts_with("data:image/webp;base64,"));
    }
}
