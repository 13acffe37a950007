//! OpenAI Images REST client.
//!
//! Calls the generations and edits endpoints directly over HTTP. Both
//! operations are fire-once request/response calls: no retry, no pagination,
//! no streaming. Configuration priority: ~/.config/imgforge/secret.json >
//! environment variables.

use imgforge_core::error::ForgeError;
use imgforge_core::images::{DataUrl, EditParams, GenerateParams, OutputFormat, DEFAULT_MODEL};
use imgforge_infrastructure::storage::SecretStorage;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;

const BASE_URL: &str = "https://api.openai.com/v1";

/// Client for the OpenAI image generation and edit endpoints.
#[derive(Clone)]
pub struct OpenAiImagesClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

/// A single generated-image payload from the service.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagePayload {
    /// Base64-encoded image content; absence is treated as a failure.
    pub b64_json: Option<String>,
    /// Prompt rewrite applied by the service, if any.
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    data: Vec<ImagePayload>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    background: &'a str,
    moderation: &'a str,
    quality: &'a str,
    size: &'a str,
    output_format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_compression: Option<u8>,
}

impl OpenAiImagesClient {
    /// Creates a new client with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Loads configuration from ~/.config/imgforge/secret.json or
    /// environment variables.
    ///
    /// Priority:
    /// 1. ~/.config/imgforge/secret.json
    /// 2. `OPENAI_API_KEY` environment variable
    pub fn try_from_env() -> Result<Self, ForgeError> {
        if let Ok(storage) = SecretStorage::new() {
            if let Ok(secret_config) = storage.load() {
                if let Some(openai_config) = secret_config.openai {
                    let mut client = Self::new(openai_config.api_key);
                    if let Some(model) = openai_config.model_name {
                        client.model = model;
                    }
                    return Ok(client);
                }
            }
        }

        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            ForgeError::config(
                "OPENAI_API_KEY not found in ~/.config/imgforge/secret.json or environment",
            )
        })?;
        Ok(Self::new(api_key))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the endpoint base URL (for local proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Model this client sends with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generates images from a text prompt.
    ///
    /// Returns the raw payload sequence; see [`first_data_url`] for turning
    /// it into a displayable image reference.
    pub async fn generate(&self, params: &GenerateParams) -> Result<Vec<ImagePayload>, ForgeError> {
        if params.prompt.trim().is_empty() {
            return Err(ForgeError::InvalidRequest(
                "prompt must not be empty".to_string(),
            ));
        }

        let compression = params
            .output_compression
            .filter(|_| params.output_format.supports_compression());
        let request = GenerateRequest {
            model: &self.model,
            prompt: &params.prompt,
            n: params.n,
            background: params.background.as_str(),
            moderation: params.moderation.as_str(),
            quality: params.quality.as_str(),
            size: params.size.as_str(),
            output_format: params.output_format.as_str(),
            output_compression: compression,
        };

        tracing::debug!(
            model = %self.model,
            size = request.size,
            quality = request.quality,
            "sending generation request"
        );

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| ForgeError::api(format!("generation request failed: {err}")))?;

        Self::parse_response(response).await
    }

    /// Edits one or more existing images according to a text prompt.
    ///
    /// Source images and the optional mask arrive as data-URL strings and
    /// are decoded to raw bytes plus their declared MIME type before being
    /// attached to the outgoing multipart request.
    pub async fn edit(&self, params: &EditParams) -> Result<Vec<ImagePayload>, ForgeError> {
        if params.prompt.trim().is_empty() {
            return Err(ForgeError::InvalidRequest(
                "prompt must not be empty".to_string(),
            ));
        }
        if params.images.is_empty() {
            return Err(ForgeError::InvalidRequest(
                "at least one source image is required".to_string(),
            ));
        }

        let mut form = Form::new()
            .text("model", self.model.clone())
            .text("prompt", params.prompt.clone())
            .text("n", params.n.to_string())
            .text("background", params.background.as_str())
            .text("quality", params.quality.as_str())
            .text("size", params.size.as_str());

        let multiple = params.images.len() > 1;
        for (index, image) in params.images.iter().enumerate() {
            let field = if multiple { "image[]" } else { "image" };
            let part = data_url_part(image, &format!("image_{index}"))?;
            form = form.part(field.to_string(), part);
        }

        if let Some(mask) = &params.mask {
            form = form.part("mask".to_string(), data_url_part(mask, "mask")?);
        }

        tracing::debug!(
            model = %self.model,
            images = params.images.len(),
            has_mask = params.mask.is_some(),
            "sending edit request"
        );

        let response = self
            .client
            .post(format!("{}/images/edits", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|err| ForgeError::api(format!("edit request failed: {err}")))?;

        Self::parse_response(response).await
    }

    async fn parse_response(response: reqwest::Response) -> Result<Vec<ImagePayload>, ForgeError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(ForgeError::api_status(status.as_u16(), body));
        }

        let payload: ImagesResponse = response
            .json()
            .await
            .map_err(|err| ForgeError::api(format!("failed to parse response: {err}")))?;
        Ok(payload.data)
    }
}

/// Builds a multipart part from a data-URL string, carrying the declared
/// MIME type and a filename extension derived from it.
fn data_url_part(data_url: &str, name: &str) -> Result<Part, ForgeError> {
    let decoded = DataUrl::parse(data_url)?;
    let file_name = format!("{name}.{}", decoded.extension());
    let mime = decoded.mime.clone();
    Part::bytes(decoded.bytes)
        .file_name(file_name)
        .mime_str(&mime)
        .map_err(|err| ForgeError::internal(format!("invalid MIME type '{mime}': {err}")))
}

/// Decodes the first payload of a response into a displayable data URL.
///
/// Absence of the base64 payload is a failure, as is an empty sequence.
pub fn first_data_url(
    payloads: &[ImagePayload],
    format: OutputFormat,
) -> Result<String, ForgeError> {
    let payload = payloads
        .first()
        .and_then(|p| p.b64_json.as_deref())
        .ok_or_else(|| ForgeError::api("response contained no image payload"))?;
    Ok(format!("data:{};base64,{}", format.mime(), payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgforge_core::images::{ImageSize, Quality};

    #[tokio::test]
    async fn test_generate_rejects_empty_prompt() {
        let client = OpenAiImagesClient::new("sk-test");
        let err = client
            .generate(&GenerateParams::new("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_edit_rejects_missing_images() {
        let client = OpenAiImagesClient::new("sk-test");
        let mut params = EditParams::new("data:image/png;base64,AAAA", "make it blue");
        params.images.clear();
        let err = client.edit(&params).await.unwrap_err();
        assert!(matches!(err, ForgeError::InvalidRequest(_)));
    }

    #[test]
    fn test_generate_request_serialization_defaults() {
        let params = GenerateParams::new("a red balloon");
        let request = GenerateRequest {
            model: DEFAULT_MODEL,
            prompt: &params.prompt,
            n: params.n,
            background: params.background.as_str(),
            moderation: params.moderation.as_str(),
            quality: params.quality.as_str(),
            size: params.size.as_str(),
            output_format: params.output_format.as_str(),
            output_compression: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-image-1");
        assert_eq!(value["size"], "auto");
        assert_eq!(value["quality"], "auto");
        assert_eq!(value["background"], "auto");
        assert_eq!(value["moderation"], "auto");
        assert_eq!(value["output_format"], "png");
        assert_eq!(value["n"], 1);
        // Compression stays off the wire when unset.
        assert!(value.get("output_compression").is_none());
    }

    #[test]
    fn test_coerced_size_reaches_the_wire_as_auto() {
        let params = GenerateParams::new("p").with_size(ImageSize::from_lenient("999x999"));
        assert_eq!(params.size.as_str(), "auto");
        let params = GenerateParams::new("p").with_quality(Quality::from_lenient("ultra"));
        assert_eq!(params.quality.as_str(), "auto");
    }

    #[test]
    fn test_data_url_part_accepts_any_mime() {
        assert!(data_url_part("data:image/webp;base64,AAAA", "image_0").is_ok());
        assert!(data_url_part("data:image/jpeg;base64,AAAA", "image_0").is_ok());
        assert!(data_url_part("not a data url", "image_0").is_err());
    }

    #[test]
    fn test_first_data_url_decodes_first_payload() {
        let payloads = vec![
            ImagePayload {
                b64_json: Some("Zmlyc3Q=".to_string()),
                revised_prompt: None,
            },
            ImagePayload {
                b64_json: Some("c2Vjb25k".to_string()),
                revised_prompt: None,
            },
        ];
        let url = first_data_url(&payloads, OutputFormat::Png).unwrap();
        assert_eq!(url, "data:image/png;base64,Zmlyc3Q=");

        let url = first_data_url(&payloads, OutputFormat::Webp).unwrap();
        assert!(url.starts_with("data:image/webp;base64,"));
    }

    #[test]
    fn test_first_data_url_missing_payload_is_failure() {
        let empty: Vec<ImagePayload> = Vec::new();
        assert!(first_data_url(&empty, OutputFormat::Png).is_err());

        let absent = vec![ImagePayload {
            b64_json: None,
            revised_prompt: None,
        }];
        let err = first_data_url(&absent, OutputFormat::Png).unwrap_err();
        assert!(err.is_api());
    }
}
