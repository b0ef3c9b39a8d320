//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the meme pipeline and a remote
//! generation service. Implementations live in `src/adapters/`.

pub mod caption_generator;
pub mod image_generator;

pub use caption_generator::{CaptionGenerator, CaptionRequest, CaptionResponse};
pub use image_generator::{ImageGenerator, ImageRequest, ImageResponse};
