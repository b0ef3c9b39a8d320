//! File naming and image saving.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{DynamicImage, RgbaImage};

use crate::error::MemeError;
use crate::params::{format_extension, image_format};

/// Generate an output filename from a topic and format.
///
/// Sanitizes the first 50 characters of the topic to kebab-case,
/// appends a unix timestamp, and adds the appropriate file extension.
#[must_use]
pub fn auto_filename(topic: &str, format: &str) -> String {
    let sanitized = sanitize_for_filename(topic, 50);
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    let ext = format_extension(format);
    format!("meme-{sanitized}-{timestamp}.{ext}")
}

/// Sanitize a string for use in a filename.
///
/// Converts to lowercase, replaces non-alphanumeric chars with hyphens,
/// collapses consecutive hyphens, and trims to max length.
#[must_use]
pub fn sanitize_for_filename(input: &str, max_len: usize) -> String {
    let mut result = String::with_capacity(max_len);
    let mut last_was_hyphen = true; // Prevents leading hyphen

    for ch in input.chars().take(max_len * 2) {
        if result.len() >= max_len {
            break;
        }
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            result.push('-');
            last_was_hyphen = true;
        }
    }

    while result.ends_with('-') {
        result.pop();
    }

    if result.is_empty() {
        "topic".to_string()
    } else {
        result
    }
}

/// Encode a composited meme and write it to `output_path`.
///
/// JPEG has no alpha channel, so the image is flattened to RGB first.
///
/// # Errors
///
/// Returns an error if the format is unknown or encoding/writing fails.
pub fn save_meme(image: &RgbaImage, format: &str, output_path: &Path) -> Result<(), MemeError> {
    let target = image_format(format)
        .ok_or_else(|| MemeError::ImageConversion(format!("Unsupported format: {format}")))?;

    let result = if target == image::ImageFormat::Jpeg {
        DynamicImage::ImageRgba8(image.clone()).to_rgb8().save_with_format(output_path, target)
    } else {
        image.save_with_format(output_path, target)
    };

    result.map_err(|e| match e {
        image::ImageError::IoError(io) => MemeError::Io(io),
        other => MemeError::ImageConversion(format!("Failed to save as {format}: {other}")),
    })
}

/// Resolve the output path: use explicit path or auto-generate.
#[must_use]
pub fn resolve_output_path(explicit: Option<&str>, topic: &str, format: &str) -> PathBuf {
    match explicit {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(auto_filename(topic, format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn sanitize_basic() {
        assert_eq!(sanitize_for_filename("Zoom Fatigue", 50), "zoom-fatigue");
    }

    #[test]
    fn sanitize_special_chars() {
        assert_eq!(sanitize_for_filename("Python vs. Excel!!", 50), "python-vs-excel");
    }

    #[test]
    fn sanitize_truncates() {
        let long = "a".repeat(100);
        assert!(sanitize_for_filename(&long, 10).len() <= 10);
    }

    #[test]
    fn sanitize_empty() {
        assert_eq!(sanitize_for_filename("", 50), "topic");
        assert_eq!(sanitize_for_filename("!!!", 50), "topic");
    }

    #[test]
    fn auto_filename_format() {
        let name = auto_filename("zoom fatigue", "jpeg");
        assert!(name.starts_with("meme-zoom-fatigue-"));
        assert_eq!(Path::new(&name).extension().unwrap(), "jpg");
    }

    #[test]
    fn resolve_explicit() {
        let path = resolve_output_path(Some("my-meme.png"), "ignored", "png");
        assert_eq!(path, PathBuf::from("my-meme.png"));
    }

    #[test]
    fn save_png_and_jpeg() {
        let dir = std::env::temp_dir().join("memeforge_output_test");
        std::fs::create_dir_all(&dir).unwrap();
        let image = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255]));

        let png = dir.join("m.png");
        save_meme(&image, "png", &png).unwrap();
        assert_eq!(image::open(&png).unwrap().to_rgba8(), image);

        let jpg = dir.join("m.jpg");
        save_meme(&image, "jpeg", &jpg).unwrap();
        let decoded = image::open(&jpg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 8));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_unknown_format_fails() {
        let image = RgbaImage::new(1, 1);
        let err = save_meme(&image, "gif", Path::new("unused.gif")).unwrap_err();
        assert!(matches!(err, MemeError::ImageConversion(_)));
    }
}
