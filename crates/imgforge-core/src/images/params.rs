//! Generation and edit parameters for the image endpoints.
//!
//! Size and quality follow a deliberate lenient-default policy: any value
//! outside the enumerated set is silently coerced to `auto` rather than
//! rejected.

use serde::{Deserialize, Serialize};

/// Model used for both generation and edits.
pub const DEFAULT_MODEL: &str = "gpt-image-1";

/// Background handling for generated images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Auto,
    Transparent,
    Opaque,
}

impl Background {
    pub fn as_str(&self) -> &'static str {
        match self {
            Background::Auto => "auto",
            Background::Transparent => "transparent",
            Background::Opaque => "opaque",
        }
    }
}

/// Content moderation strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Moderation {
    #[default]
    Auto,
    Low,
}

impl Moderation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Moderation::Auto => "auto",
            Moderation::Low => "low",
        }
    }
}

/// Rendering quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Auto,
    High,
    Medium,
    Low,
}

impl Quality {
    /// Parses a quality string, silently coercing anything outside the
    /// enumerated set to `Auto`.
    pub fn from_lenient(value: &str) -> Self {
        match value {
            "high" => Quality::High,
            "medium" => Quality::Medium,
            "low" => Quality::Low,
            _ => Quality::Auto,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Auto => "auto",
            Quality::High => "high",
            Quality::Medium => "medium",
            Quality::Low => "low",
        }
    }
}

/// Output dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1536x1024")]
    Landscape,
    #[serde(rename = "1024x1536")]
    Portrait,
}

impl ImageSize {
    /// Parses a size string, silently coercing anything outside the
    /// enumerated set to `Auto`.
    pub fn from_lenient(value: &str) -> Self {
        match value {
            "1024x1024" => ImageSize::Square,
            "1536x1024" => ImageSize::Landscape,
            "1024x1536" => ImageSize::Portrait,
            _ => ImageSize::Auto,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Auto => "auto",
            ImageSize::Square => "1024x1024",
            ImageSize::Landscape => "1536x1024",
            ImageSize::Portrait => "1024x1536",
        }
    }
}

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Webp => "webp",
        }
    }

    /// MIME type of the encoded output.
    pub fn mime(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Webp => "image/webp",
        }
    }

    /// Compression only applies to lossy/re-encodable formats.
    pub fn supports_compression(&self) -> bool {
        matches!(self, OutputFormat::Jpeg | OutputFormat::Webp)
    }
}

/// Parameters for a generation request.
#[derive(Debug, Clone)]
pub struct GenerateParams {
    pub prompt: String,
    pub background: Background,
    pub moderation: Moderation,
    pub quality: Quality,
    pub size: ImageSize,
    pub output_format: OutputFormat,
    /// Compression level 1-100; only meaningful for jpeg/webp.
    pub output_compression: Option<u8>,
    pub n: u8,
}

impl GenerateParams {
    /// Creates params for the given prompt with every other field at its
    /// default (`auto`, png, n=1).
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            background: Background::default(),
            moderation: Moderation::default(),
            quality: Quality::default(),
            size: ImageSize::default(),
            output_format: OutputFormat::default(),
            output_compression: None,
            n: 1,
        }
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn with_moderation(mut self, moderation: Moderation) -> Self {
        self.moderation = moderation;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_output_compression(mut self, compression: u8) -> Self {
        self.output_compression = Some(compression.clamp(1, 100));
        self
    }

    pub fn with_n(mut self, n: u8) -> Self {
        self.n = n.max(1);
        self
    }
}

/// Parameters for an edit request.
#[derive(Debug, Clone)]
pub struct EditParams {
    /// Source image(s) as data-URL strings.
    pub images: Vec<String>,
    pub prompt: String,
    /// Optional mask as a data-URL string.
    pub mask: Option<String>,
    pub background: Background,
    pub quality: Quality,
    pub size: ImageSize,
    pub n: u8,
}

impl EditParams {
    /// Creates edit params for a single source image.
    pub fn new(image: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            images: vec![image.into()],
            prompt: prompt.into(),
            mask: None,
            background: Background::default(),
            quality: Quality::default(),
            size: ImageSize::default(),
            n: 1,
        }
    }

    pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }
}
