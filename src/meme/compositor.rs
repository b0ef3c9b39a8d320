//! Meme composition: the single `generate_meme` entry point.

use image::RgbaImage;
use tracing::{debug, info};

use super::{
    CaptionSet, CaptionSource, ImageSource, MemeOutcome, MemeResult, EMPTY_TOPIC_MESSAGE,
};
use crate::render::{draw_outlined_text, MemeFont, TextStyle};

/// Left margin and top offset of the captions.
pub const TEXT_MARGIN: i32 = 50;

/// Distance from the bottom edge to the top of the bottom caption.
pub const BOTTOM_OFFSET: i32 = 124;

/// Draw the top and bottom captions onto `image` in place.
///
/// The top line sits at (50, 50); the bottom line at
/// (50, height - 124), i.e. (50, 900) on a 1024px image.
pub fn compose(image: &mut RgbaImage, captions: &CaptionSet, font: &MemeFont, style: &TextStyle) {
    let height = i32::try_from(image.height()).unwrap_or(i32::MAX);
    let bottom_y = height.saturating_sub(BOTTOM_OFFSET);

    draw_outlined_text(image, font, style, TEXT_MARGIN, TEXT_MARGIN, &captions.top);
    draw_outlined_text(image, font, style, TEXT_MARGIN, bottom_y, &captions.bottom);
}

/// Runs the meme pipeline: image and captions in parallel, then compositing.
pub struct MemeForge {
    images: ImageSource,
    captions: CaptionSource,
    font: MemeFont,
    style: TextStyle,
}

impl MemeForge {
    /// Assemble a pipeline from its sources and rendering settings.
    #[must_use]
    pub fn new(
        images: ImageSource,
        captions: CaptionSource,
        font: MemeFont,
        font_size: f32,
    ) -> Self {
        Self { images, captions, font, style: TextStyle::meme(font_size) }
    }

    /// Generate a meme for `topic`.
    ///
    /// A blank topic returns [`MemeOutcome::EmptyTopic`] without calling
    /// either provider. Otherwise both providers are called once,
    /// concurrently, and the result is always a meme: failures are replaced
    /// by fallbacks and flagged on the [`MemeResult`].
    pub async fn generate_meme(&self, topic: &str) -> MemeOutcome {
        let topic = topic.trim();
        if topic.is_empty() {
            debug!("blank topic, skipping generation");
            return MemeOutcome::EmptyTopic { message: EMPTY_TOPIC_MESSAGE.to_string() };
        }

        let (image, captions) =
            tokio::join!(self.images.request_image(topic), self.captions.request_captions(topic));

        let (mut image, image_fallback) = image.split();
        let (captions, caption_fallback) = captions.split();

        compose(&mut image, &captions, &self.font, &self.style);

        info!(
            topic,
            image_fallback = image_fallback.is_some(),
            caption_fallback = caption_fallback.is_some(),
            width = image.width(),
            height = image.height(),
            font = %self.font.describe(),
            "meme generated"
        );

        MemeOutcome::Meme(MemeResult {
            image,
            caption: captions.display(),
            image_fallback,
            caption_fallback,
        })
    }
}
