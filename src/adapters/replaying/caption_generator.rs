//! Replaying adapter for the `CaptionGenerator` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::CAPTION_PORT;
use crate::ports::caption_generator::{CaptionGenerator, CaptionRequest, CompleteFuture};

/// Serves recorded caption results from a cassette.
pub struct ReplayingCaptionGenerator {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingCaptionGenerator {
    /// Create a replaying captioner backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl CaptionGenerator for ReplayingCaptionGenerator {
    fn complete(&self, _request: &CaptionRequest) -> CompleteFuture<'_> {
        let output = next_output(&self.replayer, CAPTION_PORT, "complete");
        Box::pin(async move { replay_result(output?) })
    }
}
