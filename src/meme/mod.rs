//! The meme-assembly pipeline.
//!
//! [`ImageSource`] and [`CaptionSource`] wrap the generation ports with
//! prompt templates and a fail-open policy: provider failures are logged and
//! replaced by a safe default, tagged as [`Sourced::Fallback`].
//! [`MemeForge`] runs both and draws the captions onto the image.

pub mod caption_source;
pub mod compositor;
pub mod image_source;

use image::RgbaImage;

pub use caption_source::CaptionSource;
pub use compositor::MemeForge;
pub use image_source::ImageSource;

/// Message returned instead of a meme when the topic is blank.
pub const EMPTY_TOPIC_MESSAGE: &str = "Enter a topic!";

/// A value from a provider, or the default that replaced a failed call.
#[derive(Debug, Clone, PartialEq)]
pub enum Sourced<T> {
    /// The provider's genuine output.
    Generated(T),
    /// The provider failed; `value` is the substitute.
    Fallback {
        /// Substituted default.
        value: T,
        /// Why the provider's output was not used.
        reason: String,
    },
}

impl<T> Sourced<T> {
    /// Split into the usable value and, for a fallback, the reason.
    #[must_use]
    pub fn split(self) -> (T, Option<String>) {
        match self {
            Self::Generated(value) => (value, None),
            Self::Fallback { value, reason } => (value, Some(reason)),
        }
    }
}

/// Top text, bottom text and hashtags for one meme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionSet {
    /// Short line drawn at the top.
    pub top: String,
    /// Punchline drawn at the bottom.
    pub bottom: String,
    /// Free-form hashtag string; shown only in the caption block.
    pub hashtags: String,
}

impl CaptionSet {
    /// The substitute used whenever captions cannot be generated.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            top: "MEME FAILED".to_string(),
            bottom: "TRY AGAIN".to_string(),
            hashtags: "#oops".to_string(),
        }
    }

    /// Human-readable caption block: top, bottom, a blank line, hashtags.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}\n{}\n\n{}", self.top, self.bottom, self.hashtags)
    }
}

/// A finished meme.
#[derive(Debug, Clone)]
pub struct MemeResult {
    /// The image with captions drawn on it.
    pub image: RgbaImage,
    /// The caption block shown alongside the image.
    pub caption: String,
    /// Set when the image is the blank substitute: why generation failed.
    pub image_fallback: Option<String>,
    /// Set when the captions are the fixed substitute: why generation failed.
    pub caption_fallback: Option<String>,
}

/// Result of one `generate_meme` call.
#[derive(Debug, Clone)]
pub enum MemeOutcome {
    /// The topic was blank; nothing was generated.
    EmptyTopic {
        /// Prompt asking the user for a topic.
        message: String,
    },
    /// A meme was produced.
    Meme(MemeResult),
}

impl MemeOutcome {
    /// Split into the caller-facing `(image, caption)` pair.
    #[must_use]
    pub fn into_parts(self) -> (Option<RgbaImage>, String) {
        match self {
            Self::EmptyTopic { message } => (None, message),
            Self::Meme(meme) => (Some(meme.image), meme.caption),
        }
    }
}
