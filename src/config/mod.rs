//! Project configuration from `fontface.toml`.
//!
//! Every section is optional; CLI flags override whatever is set here.
//!
//! ```toml
//! [build]
//! dest = "public/fonts"      # relative to this file
//! collate = false
//! css_fontpath = "../"
//! embed = ["woff"]
//! formats = ["eot", "woff"]
//! timeout = 60               # seconds per external command
//! keep_going = false
//!
//! [tools]
//! fontforge = "~/bin/fontforge"
//! ttf2eot = "/usr/local/bin/ttf2eot"
//! batik-ttf2svg = "/opt/batik/ttf2svg"
//! ```

mod error;
mod util;

pub use error::ConfigError;

use crate::font::FontFormat;
use crate::log;
use crate::tools::{Tool, ToolOverrides};
use crate::utils::path::{expand_path, normalize_path};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use util::find_config_file;

/// Default config file name.
pub const CONFIG_FILE: &str = "fontface.toml";

/// Root configuration structure representing fontface.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory containing the config file, or cwd without one (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Output settings
    pub build: BuildSection,

    /// Executable paths
    pub tools: ToolsSection,
}

/// `[build]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    pub dest: Option<PathBuf>,
    pub collate: bool,
    pub css_fontpath: Option<String>,
    pub embed: Vec<FontFormat>,
    /// Empty means the default set (eot, woff).
    pub formats: Vec<FontFormat>,
    pub timeout: Option<u64>,
    pub keep_going: bool,
}

/// `[tools]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ToolsSection {
    pub fontforge: Option<PathBuf>,
    pub ttf2eot: Option<PathBuf>,
    pub batik_ttf2svg: Option<PathBuf>,
}

impl ProjectConfig {
    /// Load `config_name`, searching upward from cwd.
    ///
    /// A missing file is not an error: all settings then come from the CLI.
    pub fn load(config_name: &Path) -> Result<Self, ConfigError> {
        let Some(path) = find_config_file(config_name) else {
            let root = std::env::current_dir().unwrap_or_default();
            return Ok(Self {
                root,
                ..Self::default()
            });
        };

        let mut config = Self::from_path(&path)?;
        config.root = path
            .parent()
            .map(normalize_path)
            .unwrap_or_default();
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .map_err(|err| ConfigError::Toml(path.to_path_buf(), err))?;

        if !ignored.is_empty() {
            log!("warning"; "unknown fields in {} ignored: {}", path.display(), ignored.join(", "));
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), toml::de::Error> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Destination directory resolved against the config root.
    pub fn dest(&self) -> Option<PathBuf> {
        self.build.dest.as_ref().map(|dest| expand_path(dest, &self.root))
    }

    /// Tool paths from `[tools]`, resolved against the config root.
    pub fn tool_overrides(&self) -> ToolOverrides {
        let resolve = |path: &Option<PathBuf>| path.as_ref().map(|p| expand_path(p, &self.root));
        ToolOverrides::new()
            .with(Tool::FontForge, resolve(&self.tools.fontforge))
            .with(Tool::Ttf2Eot, resolve(&self.tools.ttf2eot))
            .with(Tool::BatikTtf2Svg, resolve(&self.tools.batik_ttf2svg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> ProjectConfig {
        let (mut config, ignored) = ProjectConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty(), "unexpected unknown fields: {ignored:?}");
        config.root = PathBuf::from("/project");
        config
    }

    #[test]
    fn test_empty_config() {
        let config = parse("");
        assert_eq!(config.dest(), None);
        assert!(!config.build.collate);
        assert!(config.build.formats.is_empty());
        assert!(config.tool_overrides().get(Tool::FontForge).is_none());
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
            [build]
            dest = "public/fonts"
            collate = true
            css_fontpath = "/fonts/"
            embed = ["woff"]
            formats = ["woff", "svg"]
            timeout = 30
            keep_going = true

            [tools]
            fontforge = "/opt/ff/fontforge"
            batik-ttf2svg = "bin/ttf2svg"
            "#,
        );

        assert_eq!(config.dest(), Some(PathBuf::from("/project/public/fonts")));
        assert!(config.build.collate);
        assert_eq!(config.build.css_fontpath.as_deref(), Some("/fonts/"));
        assert_eq!(config.build.embed, vec![FontFormat::Woff]);
        assert_eq!(config.build.formats, vec![FontFormat::Woff, FontFormat::Svg]);
        assert_eq!(config.build.timeout, Some(30));
        assert!(config.build.keep_going);

        let tools = config.tool_overrides();
        assert_eq!(tools.get(Tool::FontForge), Some(&PathBuf::from("/opt/ff/fontforge")));
        assert_eq!(tools.get(Tool::BatikTtf2Svg), Some(&PathBuf::from("/project/bin/ttf2svg")));
        assert_eq!(tools.get(Tool::Ttf2Eot), None);
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (_, ignored) = ProjectConfig::parse_with_ignored(
            r#"
            [build]
            dst = "out"

            [serve]
            port = 80
            "#,
        )
        .unwrap();
        assert_eq!(ignored, vec!["build.dst", "serve"]);
    }

    #[test]
    fn test_invalid_format() {
        assert!(ProjectConfig::parse_with_ignored("[build]\nformats = [\"otf\"]").is_err());
    }
}
