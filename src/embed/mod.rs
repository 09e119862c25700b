//! Inline font files into the stylesheet as data URIs.
//!
//! Embedding is a move: the font file is deleted once its bytes are in the
//! URI, so only the stylesheet needs deploying.

use crate::debug;
use crate::error::{FontFaceError, Result};
use crate::utils::mime;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fs;
use std::path::Path;

/// Convert `font` into a `data:` URI and remove it from disk.
pub fn embed_font(font: &Path) -> Result<String> {
    let bytes = fs::read(font).map_err(|err| FontFaceError::fs("read", font, err))?;
    let uri = data_uri(font, &bytes);

    fs::remove_file(font).map_err(|err| FontFaceError::fs("remove", font, err))?;
    debug!("embed"; "{} ({} bytes) inlined", font.display(), bytes.len());

    Ok(uri)
}

/// Build the data URI for `bytes`, typed by the extension of `font`.
pub fn data_uri(font: &Path, bytes: &[u8]) -> String {
    format!(
        "data:{};charset=utf-8;base64,{}",
        mime::font_type(font),
        STANDARD.encode(bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_embed_is_destructive_and_lossless() {
        let dir = TempDir::new().unwrap();
        let font = dir.path().join("Roboto.woff");
        let bytes: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        fs::write(&font, &bytes).unwrap();

        let uri = embed_font(&font).unwrap();

        assert!(!font.exists());
        let prefix = "data:application/x-font-woff;charset=utf-8;base64,";
        assert!(uri.starts_with(prefix));
        let decoded = STANDARD.decode(&uri[prefix.len()..]).unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn test_embed_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = embed_font(&dir.path().join("gone.ttf")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Filesystem);
    }

    #[test]
    fn test_data_uri_empty() {
        assert_eq!(
            data_uri(Path::new("x.ttf"), b""),
            "data:application/x-font-ttf;charset=utf-8;base64,"
        );
    }
}
