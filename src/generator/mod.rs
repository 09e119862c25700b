//! Output generation through external converters.
//!
//! | Format | Tool            | Input          |
//! |--------|-----------------|----------------|
//! | TTF    | `fontforge`     | `plan.source`  |
//! | EOT    | `ttf2eot`       | `plan.ttf`     |
//! | SVG    | `batik-ttf2svg` | `plan.ttf`     |
//! | WOFF   | `fontforge`     | `plan.source`  |

mod eot;
mod fontforge;
mod svg;

pub use fontforge::FontForge;

use crate::debug;
use crate::error::Result;
use crate::font::FontFormat;
use crate::plan::BuildPlan;
use crate::tools::{Tool, ToolRegistry};
use std::time::Duration;

/// Resolved tools plus the bounded wait applied to every invocation.
#[derive(Clone, Copy)]
pub struct Toolchain<'a> {
    pub registry: &'a ToolRegistry,
    pub timeout: Option<Duration>,
}

impl<'a> Toolchain<'a> {
    pub fn new(registry: &'a ToolRegistry, timeout: Option<Duration>) -> Self {
        Self { registry, timeout }
    }

    pub fn fontforge(&self) -> Result<FontForge> {
        Ok(FontForge::new(self.registry.path(Tool::FontForge)?, self.timeout))
    }
}

/// Produce `format` for `plan`. Existing output is overwritten.
pub fn generate(format: FontFormat, plan: &BuildPlan, tools: &Toolchain<'_>) -> Result<()> {
    debug!("build"; "{format} -> {}", plan.path(format).display());
    match format {
        FontFormat::Ttf => tools.fontforge()?.generate_ttf(plan),
        FontFormat::Eot => eot::convert(plan, tools),
        FontFormat::Svg => svg::convert(plan, tools),
        FontFormat::Woff => tools.fontforge()?.generate_woff(plan),
    }
}
