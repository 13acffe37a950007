use anyhow::{bail, Result};
use imgforge_api::{first_data_url, OpenAiImagesClient};
use imgforge_core::images::{Background, GenerateParams, ImageSize, Moderation, OutputFormat, Quality};

use crate::context;

/// Generates an image and stores it at the head of the gallery.
#[allow(clippy::too_many_arguments)]
pub async fn run(
    prompt: &str,
    size: &str,
    quality: &str,
    background: &str,
    moderation: &str,
    format: &str,
    compression: Option<u8>,
) -> Result<()> {
    context::require_auth()?;

    if prompt.trim().is_empty() {
        bail!("Please enter a prompt");
    }

    // Size and quality are deliberately lenient: unknown values fall back
    // to auto instead of failing.
    let size = ImageSize::from_lenient(size);
    let quality = Quality::from_lenient(quality);
    let output_format = parse_format(format)?;

    let mut params = GenerateParams::new(prompt)
        .with_size(size)
        .with_quality(quality)
        .with_background(parse_background(background)?)
        .with_moderation(parse_moderation(moderation)?)
        .with_output_format(output_format);
    if let Some(compression) = compression {
        if !output_format.supports_compression() {
            bail!("--compression only applies to jpeg and webp output");
        }
        params = params.with_output_compression(compression);
    }

    let client = OpenAiImagesClient::try_from_env()?;
    println!("🎨 Generating your image...");

    let payloads = match client.generate(&params).await {
        Ok(payloads) => payloads,
        Err(e) => bail!("Error generating image: {e}. Please try again."),
    };
    let image_url = first_data_url(&payloads, output_format)?;

    let mut store = context::open_store()?;
    let id = store.add_image(prompt, image_url, client.model(), size.as_str())?;

    println!("✅ Image generated and saved to history.");
    println!("   id: {id}");
    Ok(())
}

pub(crate) fn parse_background(value: &str) -> Result<Background> {
    Ok(match value {
        "auto" => Background::Auto,
        "transparent" => Background::Transparent,
        "opaque" => Background::Opaque,
        other => bail!("Unknown background '{other}' (expected auto, transparent or opaque)"),
    })
}

fn parse_moderation(value: &str) -> Result<Moderation> {
    Ok(match value {
        "auto" => Moderation::Auto,
        "low" => Moderation::Low,
        other => bail!("Unknown moderation '{other}' (expected auto or low)"),
    })
}

fn parse_format(value: &str) -> Result<OutputFormat> {
    Ok(match value {
        "png" => OutputFormat::Png,
        "jpeg" => OutputFormat::Jpeg,
        "webp" => OutputFormat::Webp,
        other => bail!("Unknown output format '{other}' (expected png, jpeg or webp)"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_background() {
        assert_eq!(parse_background("transparent").unwrap(), Background::Transparent);
        assert!(parse_background("invisible").is_err());
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("webp").unwrap(), OutputFormat::Webp);
        assert!(parse_format("tiff").is_err());
    }
}
