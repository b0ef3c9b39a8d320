//! Background image requests with a blank-canvas fallback.

use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

use super::Sourced;
use crate::error::MemeError;
use crate::ports::{ImageGenerator, ImageRequest};

/// Width and height of requested images and of the blank fallback.
pub const IMAGE_SIZE: u32 = 1024;

/// Build the text-to-image prompt for a topic.
#[must_use]
pub fn image_prompt(topic: &str) -> String {
    format!("A meme template about {topic}. Simple, bold visuals with space for text.")
}

/// A solid white square of [`IMAGE_SIZE`] pixels.
#[must_use]
pub fn blank_canvas() -> RgbaImage {
    RgbaImage::from_pixel(IMAGE_SIZE, IMAGE_SIZE, Rgba([255, 255, 255, 255]))
}

/// Requests a background image for a topic; never fails.
pub struct ImageSource {
    generator: Box<dyn ImageGenerator>,
}

impl ImageSource {
    /// Wrap an image generator port.
    #[must_use]
    pub fn new(generator: Box<dyn ImageGenerator>) -> Self {
        Self { generator }
    }

    /// Request and decode an image for `topic`.
    ///
    /// Any provider or decode failure yields [`blank_canvas`] as a
    /// [`Sourced::Fallback`]. One request per call.
    pub async fn request_image(&self, topic: &str) -> Sourced<RgbaImage> {
        match self.fetch(topic).await {
            Ok(image) => {
                debug!(width = image.width(), height = image.height(), "image generated");
                Sourced::Generated(image)
            }
            Err(e) => {
                warn!(topic, error = %e, "image provider failed, using blank canvas");
                Sourced::Fallback { value: blank_canvas(), reason: e.to_string() }
            }
        }
    }

    async fn fetch(&self, topic: &str) -> Result<RgbaImage, MemeError> {
        let request =
            ImageRequest { prompt: image_prompt(topic), width: IMAGE_SIZE, height: IMAGE_SIZE };
        let response = self.generator.generate(&request).await?;
        let decoded = image::load_from_memory(&response.data)
            .map_err(|e| MemeError::ImageDecode(e.to_string()))?;
        Ok(decoded.to_rgba8())
    }
}
