//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::{DEFAULT_CAPTION_MODEL, DEFAULT_IMAGE_MODEL};
use crate::render::text::MAX_TEXT_SIZE;

/// Default Hugging Face Inference API base URL.
pub const HUGGINGFACE_API_BASE: &str = "https://api-inference.huggingface.co/models";

/// Default Gemini API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Top-level configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Image provider settings.
    #[serde(default = "ProviderConfig::image_defaults")]
    pub image: ProviderConfig,

    /// Caption provider settings.
    #[serde(default = "ProviderConfig::caption_defaults")]
    pub caption: ProviderConfig,

    /// Text rendering settings.
    #[serde(default)]
    pub render: RenderConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Hugging Face API token.
    pub huggingface: Option<String>,
    /// Gemini API key.
    pub gemini: Option<String>,
}

/// Endpoint settings for one remote generation service.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Model name or short alias.
    pub model: String,
    /// API base URL; the model id is appended to it.
    pub base_url: String,
    /// Transport timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    fn image_defaults() -> Self {
        Self {
            model: DEFAULT_IMAGE_MODEL.to_string(),
            base_url: HUGGINGFACE_API_BASE.to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }

    fn caption_defaults() -> Self {
        Self {
            model: DEFAULT_CAPTION_MODEL.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    120
}

/// Text rendering settings.
#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    /// Outline font file preferred over the built-in bitmap font.
    pub font: Option<PathBuf>,
    /// Caption font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { font: None, font_size: default_font_size() }
    }
}

fn default_font_size() -> f32 {
    60.0
}

impl RenderConfig {
    /// Check that `font_size` is a finite size in `(0, MAX_TEXT_SIZE]`.
    fn validate(&self) -> Result<(), String> {
        let size = self.font_size;
        if size.is_finite() && size > 0.0 && size <= MAX_TEXT_SIZE {
            Ok(())
        } else {
            Err(format!("font_size must be in (0, {MAX_TEXT_SIZE}], got {size}"))
        }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if it
    /// sets an unusable `font_size`.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::defaults());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
        config
            .render
            .validate()
            .map_err(|e| format!("Invalid config {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Configuration with both providers pointed at their public endpoints.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            keys: KeysConfig::default(),
            image: ProviderConfig::image_defaults(),
            caption: ProviderConfig::caption_defaults(),
            render: RenderConfig::default(),
        }
    }

    /// Get the Hugging Face token, preferring environment variable.
    #[must_use]
    pub fn huggingface_key(&self) -> Option<String> {
        non_empty(std::env::var("HF_API_KEY").ok()).or_else(|| self.keys.huggingface.clone())
    }

    /// Get the Gemini API key, preferring environment variable.
    #[must_use]
    pub fn gemini_key(&self) -> Option<String> {
        non_empty(std::env::var("GEMINI_API_KEY").ok()).or_else(|| self.keys.gemini.clone())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `MEMEFORGE_CONFIG` environment variable
/// 3. `~/.config/memeforge/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("MEMEFORGE_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/memeforge/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/memeforge/config.toml")
    } else {
        PathBuf::from("memeforge.toml")
    }
}
