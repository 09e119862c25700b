//! Font formats and metadata.

mod meta;
mod weight;

pub use meta::{FontMetadata, FontQuery, MetaField};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output formats the pipeline knows how to produce or embed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FontFormat {
    Ttf,
    Eot,
    Svg,
    Woff,
}

impl FontFormat {
    /// Generation order. TTF comes first because EOT and SVG read it.
    pub const ALL: [Self; 4] = [Self::Ttf, Self::Eot, Self::Svg, Self::Woff];

    /// Formats generated when nothing else is requested.
    pub const DEFAULT: [Self; 2] = [Self::Eot, Self::Woff];

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Ttf => "ttf",
            Self::Eot => "eot",
            Self::Svg => "svg",
            Self::Woff => "woff",
        }
    }

    /// Whether the stylesheet can reference this format as a data URI.
    pub const fn embeddable(self) -> bool {
        matches!(self, Self::Ttf | Self::Woff)
    }
}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
