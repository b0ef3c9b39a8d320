//! Caption generator port for text-generation APIs.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::MemeError;

/// A single-turn instruction sent to a language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionRequest {
    /// The full instruction prompt.
    pub prompt: String,
}

/// The model's raw text answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionResponse {
    /// Response text, unparsed.
    pub text: String,
}

/// Boxed future type returned by [`CaptionGenerator::complete`].
pub type CompleteFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CaptionResponse, MemeError>> + Send + 'a>>;

/// Produces text completions via an external API.
pub trait CaptionGenerator: Send + Sync {
    /// Send the prompt and return the model's text.
    fn complete(&self, request: &CaptionRequest) -> CompleteFuture<'_>;
}
