//! Live adapters that call the real generation services over HTTP.

pub mod gemini;
pub mod huggingface;
