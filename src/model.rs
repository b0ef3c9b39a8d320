//! Model name resolution for both providers.

/// Supported API providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Hugging Face Inference API (text-to-image).
    HuggingFace,
    /// Google Gemini API (text generation).
    Gemini,
}

impl Provider {
    /// Human-readable provider name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::HuggingFace => "Hugging Face",
            Self::Gemini => "Gemini",
        }
    }

    /// Environment variable that carries this provider's API key.
    #[must_use]
    pub fn key_env_var(self) -> &'static str {
        match self {
            Self::HuggingFace => "HF_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }
}

/// Default text-to-image model.
pub const DEFAULT_IMAGE_MODEL: &str = "sdxl";

/// Default caption model.
pub const DEFAULT_CAPTION_MODEL: &str = "gemini-pro";

/// Short name aliases for image models.
const IMAGE_ALIASES: &[(&str, &str)] = &[
    ("sdxl", "stabilityai/stable-diffusion-xl-base-1.0"),
    ("sd-1.5", "runwayml/stable-diffusion-v1-5"),
];

/// Short name aliases for caption models.
const CAPTION_ALIASES: &[(&str, &str)] =
    &[("gemini-pro", "gemini-pro"), ("gemini-flash", "gemini-1.5-flash")];

fn resolve(aliases: &[(&str, &str)], name: &str) -> String {
    for &(alias, full) in aliases {
        if name == alias {
            return full.to_string();
        }
    }
    name.to_string()
}

/// Resolve an image model name (alias or exact) to the full repository id.
#[must_use]
pub fn resolve_image_model(name: &str) -> String {
    resolve(IMAGE_ALIASES, name)
}

/// Resolve a caption model name (alias or exact) to the full model identifier.
#[must_use]
pub fn resolve_caption_model(name: &str) -> String {
    resolve(CAPTION_ALIASES, name)
}
