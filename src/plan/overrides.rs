//! Field overlays for a [`BuildPlan`](super::BuildPlan).
//!
//! The sidecar JSON next to a font and the caller's explicit options share
//! one shape: every field optional, a present field replaces the plan's
//! value wholesale.
//!
//! ```json
//! {
//!   "name": "Roboto",
//!   "weight": 700,
//!   "css_fontpath": "/static/fonts/",
//!   "embed": ["woff"]
//! }
//! ```

use crate::error::{FontFaceError, Result};
use crate::font::FontFormat;
use crate::log;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

/// Optional replacements for Build Plan fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlanOverrides {
    pub dest_dir: Option<PathBuf>,
    pub collate: Option<bool>,
    pub extension: Option<String>,
    pub basename: Option<String>,
    pub target: Option<PathBuf>,
    pub ttf: Option<PathBuf>,
    pub eot: Option<PathBuf>,
    pub svg: Option<PathBuf>,
    pub woff: Option<PathBuf>,
    pub css: Option<PathBuf>,
    pub css_fontpath: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub weight: Option<String>,
    pub style: Option<String>,
    pub embed: Option<Vec<FontFormat>>,
}

impl PlanOverrides {
    /// Load the sidecar config at `path`, if there is one.
    ///
    /// Unknown keys are reported and ignored.
    pub fn load_sidecar(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(path).map_err(|err| FontFaceError::fs("read", path, err))?;
        let (overrides, ignored) = Self::parse_with_ignored(&content).map_err(|source| {
            FontFaceError::Sidecar {
                path: path.to_path_buf(),
                source,
            }
        })?;

        if !ignored.is_empty() {
            log!("warning"; "unknown fields in {} ignored: {}", path.display(), ignored.join(", "));
        }

        Ok(Some(overrides))
    }

    /// Parse JSON content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> serde_json::Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let mut deserializer = serde_json::Deserializer::from_str(content);
        let overrides = serde_ignored::deserialize(&mut deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        deserializer.end()?;
        Ok((overrides, ignored))
    }
}

/// Accept `"bold"` as well as `700` for weights.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Number(f64),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Number(number) => number.to_string(),
    }))
}
