//! Font metadata extraction.
//!
//! Name, weight and style are read from the font itself through a
//! [`FontQuery`] (FontForge in production) and normalized for CSS.

use super::weight::{normalize_weight, style_from_angle};
use crate::debug;
use crate::error::{FontFaceError, Result};
use std::path::Path;

/// A scalar that can be queried from a font file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    Name,
    Weight,
    ItalicAngle,
}

impl MetaField {
    /// FontForge scripting variable holding this value.
    pub const fn variable(self) -> &'static str {
        match self {
            Self::Name => "$fontname",
            Self::Weight => "$weight",
            Self::ItalicAngle => "$italicangle",
        }
    }

    /// Name used in error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Weight => "weight",
            Self::ItalicAngle => "italic angle",
        }
    }
}

/// Reads single metadata values out of a font file.
pub trait FontQuery {
    /// Raw output for `field`, or `None` if the tool printed nothing.
    fn query(&self, source: &Path, field: MetaField) -> Result<Option<String>>;
}

/// Normalized metadata of one font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontMetadata {
    /// Family name with spaces replaced by underscores.
    pub name: String,
    /// CSS weight (`normal`, `700`, ...).
    pub weight: String,
    /// `normal` or `italic`.
    pub style: String,
}

impl FontMetadata {
    /// Query and normalize name, weight and style of `source`.
    ///
    /// Any query without output fails the whole extraction.
    pub fn extract(source: &Path, query: &dyn FontQuery) -> Result<Self> {
        let raw_name = required(query, source, MetaField::Name)?;
        // FontForge prints `false` when the font carries no PostScript name
        let name = if raw_name == "false" {
            fallback_name(source)
        } else {
            raw_name
        };

        let weight = normalize_weight(&required(query, source, MetaField::Weight)?);
        let style = style_from_angle(&required(query, source, MetaField::ItalicAngle)?).to_string();

        let meta = Self {
            name: name.replace(' ', "_"),
            weight,
            style,
        };
        debug!("meta"; "{}: {} / {} / {}", source.display(), meta.name, meta.weight, meta.style);
        Ok(meta)
    }
}

/// Run one query, treating missing or blank output as a failure.
fn required(query: &dyn FontQuery, source: &Path, field: MetaField) -> Result<String> {
    query
        .query(source, field)?
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| FontFaceError::MetadataExtraction {
            field: field.label(),
            font: source.to_path_buf(),
        })
}

/// Family name derived from the file name: everything before the last dot.
pub fn fallback_name(source: &Path) -> String {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
