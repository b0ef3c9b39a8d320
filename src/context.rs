//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::adapters::live::gemini::GeminiCaptioner;
use crate::adapters::live::huggingface::HuggingFaceGenerator;
use crate::adapters::recording::caption_generator::RecordingCaptionGenerator;
use crate::adapters::recording::image_generator::RecordingImageGenerator;
use crate::adapters::replaying::caption_generator::ReplayingCaptionGenerator;
use crate::adapters::replaying::image_generator::ReplayingImageGenerator;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::error::MemeError;
use crate::model::Provider;
use crate::ports::{CaptionGenerator, ImageGenerator};

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Image generator port.
    pub images: Box<dyn ImageGenerator>,
    /// Caption generator port.
    pub captions: Box<dyn CaptionGenerator>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette file to disk.
    ///
    /// The context that used this session must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<(PathBuf, usize), String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        let count = recorder.interaction_count();
        let path = recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))?;
        Ok((path, count))
    }
}

impl ServiceContext {
    /// Create a live context from the configuration.
    ///
    /// A missing credential is logged, not fatal: the affected adapter is
    /// built without a key and every call to it fails open.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn live(config: &Config) -> Result<Self, MemeError> {
        let hf_key = config.huggingface_key();
        if hf_key.is_none() {
            warn_missing_key(Provider::HuggingFace);
        }
        let gemini_key = config.gemini_key();
        if gemini_key.is_none() {
            warn_missing_key(Provider::Gemini);
        }

        Ok(Self {
            images: Box::new(HuggingFaceGenerator::new(&config.image, hf_key)?),
            captions: Box::new(GeminiCaptioner::new(&config.caption, gemini_key)?),
        })
    }

    /// Create a recording context that wraps the live adapters with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be built.
    pub fn recording(config: &Config) -> Result<(Self, RecordingSession), MemeError> {
        let live_ctx = Self::live(config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".memeforge/cassettes")
            .join(&timestamp)
            .join("memeforge.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-memeforge"),
            get_commit_hash(),
        )));

        let ctx = Self {
            images: Box::new(RecordingImageGenerator::new(live_ctx.images, Arc::clone(&recorder))),
            captions: Box::new(RecordingCaptionGenerator::new(
                live_ctx.captions,
                Arc::clone(&recorder),
            )),
        };

        Ok((ctx, RecordingSession { recorder }))
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, MemeError> {
        let replayer = load_cassette(path)
            .map_err(|e| MemeError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        Ok(Self {
            images: Box::new(ReplayingImageGenerator::new(Arc::clone(&replayer))),
            captions: Box::new(ReplayingCaptionGenerator::new(replayer)),
        })
    }
}

fn warn_missing_key(provider: Provider) {
    let err = MemeError::MissingApiKey {
        provider: provider.display_name().into(),
        env_var: provider.key_env_var().into(),
    };
    warn!(error = %err, "credential missing; this provider will fall back on every call");
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
