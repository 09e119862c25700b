//! Error types for the font-face pipeline.
//!
//! Every failure is fatal for the font being built. The CLI decides whether a
//! batch continues with the next font.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result alias used throughout the pipeline.
pub type Result<T> = std::result::Result<T, FontFaceError>;

/// Coarse classification of a [`FontFaceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required external tool could not be located.
    ToolResolution,
    /// A font metadata query produced no usable output.
    MetadataExtraction,
    /// An external converter failed, timed out or was cancelled.
    Conversion,
    /// Reading, writing or deleting a file failed.
    Filesystem,
    /// The sidecar config could not be parsed.
    Config,
}

#[derive(Debug, Error)]
pub enum FontFaceError {
    #[error("missing required font tools: {}\n{hint}", missing.join(", "))]
    ToolResolution { missing: Vec<String>, hint: String },

    #[error("could not read font {field} from `{}`", font.display())]
    MetadataExtraction { field: &'static str, font: PathBuf },

    #[error("{tool} command failed\nFrom command: {command}\nCode: {}\n{output}", code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    Conversion {
        tool: String,
        command: String,
        code: Option<i32>,
        output: String,
    },

    #[error("failed to execute `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` did not finish within {}s", timeout.as_secs_f32())]
    Timeout { command: String, timeout: Duration },

    #[error("`{command}` was cancelled")]
    Cancelled { command: String },

    #[error("failed to {action} `{}`", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid sidecar config `{}`", path.display())]
    Sidecar {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl FontFaceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ToolResolution { .. } => ErrorKind::ToolResolution,
            Self::MetadataExtraction { .. } => ErrorKind::MetadataExtraction,
            Self::Conversion { .. }
            | Self::Spawn { .. }
            | Self::Timeout { .. }
            | Self::Cancelled { .. } => ErrorKind::Conversion,
            Self::Filesystem { .. } => ErrorKind::Filesystem,
            Self::Sidecar { .. } => ErrorKind::Config,
        }
    }

    /// Shorthand for a [`FontFaceError::Filesystem`] error.
    pub fn fs(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind as IoKind};

    #[test]
    fn test_tool_resolution_display() {
        let err = FontFaceError::ToolResolution {
            missing: vec!["fontforge".into(), "ttf2eot".into()],
            hint: "brew install fontforge ttf2eot".into(),
        };
        let display = err.to_string();
        assert!(display.contains("fontforge, ttf2eot"));
        assert!(display.contains("brew install"));
        assert_eq!(err.kind(), ErrorKind::ToolResolution);
    }

    #[test]
    fn test_conversion_display() {
        let err = FontFaceError::Conversion {
            tool: "FontForge".into(),
            command: "fontforge -lang=ff -c 'Open($1);'".into(),
            code: Some(1),
            output: "no such font".into(),
        };
        let display = err.to_string();
        assert!(display.contains("FontForge command failed"));
        assert!(display.contains("Code: 1"));
        assert!(display.contains("no such font"));
    }

    #[test]
    fn test_kinds() {
        let fs = FontFaceError::fs("read", "a.woff", Error::new(IoKind::NotFound, "gone"));
        assert_eq!(fs.kind(), ErrorKind::Filesystem);
        assert!(fs.to_string().contains("a.woff"));

        let timeout = FontFaceError::Timeout {
            command: "ttf2eot".into(),
            timeout: Duration::from_secs(2),
        };
        assert_eq!(timeout.kind(), ErrorKind::Conversion);
    }
}
