//! HTTP clients for the external image-generation service.

pub mod openai_images;

pub use openai_images::{first_data_url, ImagePayload, OpenAiImagesClient};
