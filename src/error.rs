//! Unified error type for memeforge.

use thiserror::Error;

/// Errors that can occur while generating a meme.
///
/// Provider errors never reach the caller of the pipeline: the fail-open
/// sources in [`crate::meme`] absorb them. They surface only through logs
/// and the fallback reason carried by [`crate::meme::Sourced`].
#[derive(Debug, Error)]
pub enum MemeError {
    /// An API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The image provider returned bytes that are not a decodable image.
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    /// Image format conversion error.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),

    /// A font file could not be read or parsed.
    #[error("Font error: {0}")]
    Font(String),

    /// The caption provider's text did not have the `TOP|BOTTOM|HASHTAGS` shape.
    #[error("Malformed caption response: expected 3 '|'-separated segments, got {segments}")]
    MalformedCaption {
        /// Number of segments found.
        segments: usize,
    },

    /// No API key configured for the provider.
    #[error("No API key for {provider}. Set {env_var} or add it to config file.")]
    MissingApiKey {
        /// The provider name.
        provider: String,
        /// The environment variable name.
        env_var: String,
    },
}
