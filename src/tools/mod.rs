//! External font tools and their resolution.
//!
//! | Tool            | Used for                                  |
//! |-----------------|-------------------------------------------|
//! | `fontforge`     | metadata queries, WOFF and TTF generation |
//! | `ttf2eot`       | EOT generation                            |
//! | `batik-ttf2svg` | SVG generation                            |

mod locator;

pub use locator::{Resolve, ToolLocator, ToolRegistry, WhichResolver};

use crate::font::FontFormat;
use rustc_hash::FxHashMap;
use std::fmt;
use std::path::PathBuf;

/// An external executable the pipeline depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tool {
    FontForge,
    Ttf2Eot,
    BatikTtf2Svg,
}

impl Tool {
    /// Executable name looked up on `PATH`.
    pub const fn command(self) -> &'static str {
        match self {
            Self::FontForge => "fontforge",
            Self::Ttf2Eot => "ttf2eot",
            Self::BatikTtf2Svg => "batik-ttf2svg",
        }
    }

    /// Tools needed to produce `formats`.
    ///
    /// FontForge is always required because metadata is read through it.
    pub fn required_for(formats: &[FontFormat]) -> Vec<Self> {
        let mut tools = vec![Self::FontForge];
        if formats.contains(&FontFormat::Eot) {
            tools.push(Self::Ttf2Eot);
        }
        if formats.contains(&FontFormat::Svg) {
            tools.push(Self::BatikTtf2Svg);
        }
        tools
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// Caller-supplied executable paths that bypass lookup.
#[derive(Debug, Clone, Default)]
pub struct ToolOverrides(FxHashMap<Tool, PathBuf>);

impl ToolOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path for `tool`, replacing any earlier override.
    pub fn set(&mut self, tool: Tool, path: impl Into<PathBuf>) {
        self.0.insert(tool, path.into());
    }

    /// Builder-style [`set`](Self::set) for optional values.
    pub fn with(mut self, tool: Tool, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.set(tool, path);
        }
        self
    }

    pub fn get(&self, tool: Tool) -> Option<&PathBuf> {
        self.0.get(&tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_for_defaults() {
        assert_eq!(
            Tool::required_for(&FontFormat::DEFAULT),
            vec![Tool::FontForge, Tool::Ttf2Eot]
        );
    }

    #[test]
    fn test_required_for_woff_only() {
        assert_eq!(Tool::required_for(&[FontFormat::Woff]), vec![Tool::FontForge]);
    }

    #[test]
    fn test_required_for_all() {
        assert_eq!(
            Tool::required_for(&FontFormat::ALL),
            vec![Tool::FontForge, Tool::Ttf2Eot, Tool::BatikTtf2Svg]
        );
    }

    #[test]
    fn test_overrides_with() {
        let overrides = ToolOverrides::new()
            .with(Tool::FontForge, Some(PathBuf::from("/opt/ff")))
            .with(Tool::Ttf2Eot, None);
        assert_eq!(overrides.get(Tool::FontForge), Some(&PathBuf::from("/opt/ff")));
        assert_eq!(overrides.get(Tool::Ttf2Eot), None);
    }
}
