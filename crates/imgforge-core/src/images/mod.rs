//! Image generation domain: request parameters and the data-URL codec.

pub mod data_url;
pub mod params;

pub use data_url::DataUrl;
pub use params::{
    Background, EditParams, GenerateParams, ImageSize, Moderation, OutputFormat, Quality,
    DEFAULT_MODEL,
};
