//! Font selection with a built-in fallback.

use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use tracing::{debug, warn};

use crate::error::MemeError;

/// Outline fonts looked up in the working directory when none is configured.
pub const FONT_CANDIDATES: &[&str] = &["impact.ttf", "Impact.ttf", "arial.ttf"];

/// The font captions are drawn with.
pub enum MemeFont {
    /// A TrueType/OpenType font loaded from disk.
    Outline {
        /// Parsed font data.
        font: FontVec,
        /// Where the font was loaded from.
        path: PathBuf,
    },
    /// The built-in 8x8 bitmap font, scaled up to the requested size.
    Bitmap,
}

impl MemeFont {
    /// Load an outline font from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid font.
    pub fn load(path: &Path) -> Result<Self, MemeError> {
        let data = std::fs::read(path)
            .map_err(|e| MemeError::Font(format!("Failed to read {}: {e}", path.display())))?;
        let font = FontVec::try_from_vec(data)
            .map_err(|e| MemeError::Font(format!("Failed to parse {}: {e}", path.display())))?;
        Ok(Self::Outline { font, path: path.to_path_buf() })
    }

    /// Pick the caption font. Never fails.
    ///
    /// Order: `preferred`, then [`FONT_CANDIDATES`] in the working directory,
    /// then [`MemeFont::Bitmap`].
    #[must_use]
    pub fn select(preferred: Option<&Path>) -> Self {
        Self::select_in(preferred, Path::new("."))
    }

    /// [`MemeFont::select`], looking for candidates in `dir`.
    fn select_in(preferred: Option<&Path>, dir: &Path) -> Self {
        if let Some(path) = preferred {
            match Self::load(path) {
                Ok(font) => return font,
                Err(e) => warn!(error = %e, "configured font unusable, trying defaults"),
            }
        }

        for candidate in FONT_CANDIDATES {
            let path = dir.join(candidate);
            if !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(font) => return font,
                Err(e) => warn!(error = %e, "skipping font candidate"),
            }
        }

        debug!("no outline font found, using built-in bitmap font");
        Self::Bitmap
    }

    /// Short description for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Outline { path, .. } => path.display().to_string(),
            Self::Bitmap => "built-in bitmap".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_font_path;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn preferred_font_is_loaded_as_outline() {
        let path = fixture_font_path();
        let font = MemeFont::select(Some(path.as_path()));
        assert!(matches!(&font, MemeFont::Outline { path: p, .. } if *p == path));
        assert!(font.describe().ends_with("DejaVuSans-Bold.ttf"));
    }

    #[test]
    fn preferred_font_wins_over_candidates() {
        let dir = scratch_dir("memeforge_font_preferred");
        std::fs::copy(fixture_font_path(), dir.join("impact.ttf")).unwrap();

        let path = fixture_font_path();
        let font = MemeFont::select_in(Some(path.as_path()), &dir);
        assert!(matches!(&font, MemeFont::Outline { path: p, .. } if *p == path));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn candidate_in_directory_is_used_when_preferred_is_missing() {
        let dir = scratch_dir("memeforge_font_candidate");
        std::fs::copy(fixture_font_path(), dir.join("arial.ttf")).unwrap();

        let font = MemeFont::select_in(Some(Path::new("/nonexistent/impact.ttf")), &dir);
        let expected = dir.join("arial.ttf");
        assert!(matches!(&font, MemeFont::Outline { path, .. } if *path == expected));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn broken_candidate_is_skipped() {
        let dir = scratch_dir("memeforge_font_broken_candidate");
        std::fs::write(dir.join("impact.ttf"), b"not a font").unwrap();
        std::fs::copy(fixture_font_path(), dir.join("arial.ttf")).unwrap();

        let font = MemeFont::select_in(None, &dir);
        assert!(font.describe().ends_with("arial.ttf"));

        let empty = scratch_dir("memeforge_font_no_candidates");
        assert!(matches!(MemeFont::select_in(None, &empty), MemeFont::Bitmap));

        let _ = std::fs::remove_dir_all(&dir);
        let _ = std::fs::remove_dir_all(&empty);
    }

    #[test]
    fn missing_preferred_falls_back_to_bitmap() {
        let font = MemeFont::select(Some(Path::new("/nonexistent/impact.ttf")));
        assert!(matches!(font, MemeFont::Bitmap));
        assert_eq!(font.describe(), "built-in bitmap");
    }

    #[test]
    fn invalid_font_file_is_font_error() {
        let dir = std::env::temp_dir().join("memeforge_font_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let err = MemeFont::load(&path).err().unwrap();
        assert!(matches!(err, MemeError::Font(_)));
        assert!(matches!(MemeFont::select(Some(path.as_path())), MemeFont::Bitmap));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
