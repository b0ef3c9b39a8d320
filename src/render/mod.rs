//! Caption rendering: font selection and outlined text drawing.

pub mod font;
pub mod text;

pub use font::MemeFont;
pub use text::{draw_outlined_text, TextStyle};
