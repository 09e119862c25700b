//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading `fontface.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error in `{}`", .0.display())]
    Toml(PathBuf, #[source] toml::de::Error),
}
