//! MIME type helpers for embedded fonts.

use std::path::Path;

/// Prefix of the media type used in font data URIs.
pub const FONT_PREFIX: &str = "application/x-font-";

/// Media type for a font file, derived from its extension.
///
/// ```ignore
/// font_type(Path::new("out/Roboto.woff")) // "application/x-font-woff"
/// ```
pub fn font_type(path: &Path) -> String {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    format!("{FONT_PREFIX}{ext}")
}
