//! Recording adapter for the `CaptionGenerator` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::CAPTION_PORT;
use crate::ports::caption_generator::{CaptionGenerator, CaptionRequest, CompleteFuture};

/// Records caption interactions while delegating to an inner implementation.
pub struct RecordingCaptionGenerator {
    inner: Box<dyn CaptionGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingCaptionGenerator {
    /// Creates a new recording captioner wrapping the given implementation.
    pub fn new(inner: Box<dyn CaptionGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl CaptionGenerator for RecordingCaptionGenerator {
    fn complete(&self, request: &CaptionRequest) -> CompleteFuture<'_> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.complete(&request).await;
            record_result(&recorder, CAPTION_PORT, "complete", &request, &result);
            result
        })
    }
}
