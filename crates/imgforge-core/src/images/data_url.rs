//! Data-URL codec.
//!
//! Image content travels through the application as opaque
//! `data:<mime>;base64,<payload>` strings. This module decodes them back to
//! raw bytes plus the declared MIME type, tolerating any valid MIME
//! designation, not just PNG.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

use crate::error::ForgeError;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// Decoded content of a data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DataUrl {
    /// Parses a `data:<mime>;base64,<payload>` string.
    pub fn parse(input: &str) -> Result<Self, ForgeError> {
        let rest = input
            .strip_prefix(DATA_PREFIX)
            .ok_or_else(|| ForgeError::DataUrl("missing 'data:' prefix".to_string()))?;

        let (metadata, payload) = rest
            .split_once(',')
            .ok_or_else(|| ForgeError::DataUrl("missing ',' separator".to_string()))?;

        let mime = match metadata.strip_suffix(BASE64_MARKER) {
            Some(mime) => mime,
            None => {
                return Err(ForgeError::DataUrl(
                    "only base64-encoded data URLs are supported".to_string(),
                ))
            }
        };
        let mime = if mime.is_empty() { "image/png" } else { mime };

        let bytes = BASE64_STANDARD
            .decode(payload)
            .map_err(|e| ForgeError::DataUrl(format!("invalid base64 payload: {e}")))?;

        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }

    /// Encodes bytes and a MIME type back into a data-URL string.
    pub fn encode(mime: &str, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", mime, BASE64_STANDARD.encode(bytes))
    }

    /// A filename extension derived from the MIME subtype ("png" for
    /// image/png, etc.); falls back to "bin" for unrecognized types.
    pub fn extension(&self) -> &str {
        match self.mime.as_str() {
            "image/png" => "png",
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "bin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_png_data_url() {
        let url = DataUrl::encode("image/png", b"fake png bytes");
        let parsed = DataUrl::parse(&url).unwrap();
        assert_eq!(parsed.mime, "image/png");
        assert_eq!(parsed.bytes, b"fake png bytes");
        assert_eq!(parsed.extension(), "png");
    }

    #[test]
    fn test_parse_tolerates_non_png_mime() {
        let url = DataUrl::encode("image/webp", b"webp payload");
        let parsed = DataUrl::parse(&url).unwrap();
        assert_eq!(parsed.mime, "image/webp");
        assert_eq!(parsed.extension(), "webp");

        let url = DataUrl::encode("image/jpeg", b"jpeg payload");
        assert_eq!(DataUrl::parse(&url).unwrap().extension(), "jpg");
    }

    #[test]
    fn test_parse_rejects_missing_prefix() {
        let err = DataUrl::parse("image/png;base64,AAAA").unwrap_err();
        assert!(matches!(err, ForgeError::DataUrl(_)));
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let err = DataUrl::parse("data:image/png;base64").unwrap_err();
        assert!(matches!(err, ForgeError::DataUrl(_)));
    }

    #[test]
    fn test_parse_rejects_bad_base64() {
        let err = DataUrl::parse("data:image/png;base64,!!notbase64!!").unwrap_err();
        assert!(matches!(err, ForgeError::DataUrl(_)));
    }

    #[test]
    fn test_round_trip() {
        let bytes: Vec<u8> = (0..=255).collect();
        let url = DataUrl::encode("image/gif", &bytes);
        let parsed = DataUrl::parse(&url).unwrap();
        assert_eq!(parsed.bytes, bytes);
        assert_eq!(parsed.mime, "image/gif");
    }
}
