//! Record/replay infrastructure for deterministic runs without network I/O.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;

/// Port name used by image generator adapters.
pub const IMAGE_PORT: &str = "image_generator";

/// Port name used by caption generator adapters.
pub const CAPTION_PORT: &str = "caption_generator";
