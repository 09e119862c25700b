//! The font-face pipeline.
//!
//! ```text
//! ToolLocator ──► BuildPlan::build ──► ensure_dir ──► generate (per format) ──► stylesheet::emit
//!   (once)         (metadata + merge)                  ttf, eot, svg, woff
//! ```
//!
//! Each run is synchronous and all-or-nothing: the first failure aborts the
//! font, and files written before it stay on disk.


use crate::error::Result;
use crate::font::FontFormat;
use crate::generator::{self, Toolchain};
use crate::plan::{BuildPlan, FontFaceOptions, OutputPaths};
use crate::stylesheet;
use crate::tools::{Resolve, Tool, ToolLocator, ToolOverrides};
use crate::utils::path::ensure_dir;
use crate::{debug, log};
use std::time::Duration;

/// Settings shared by every font in a process.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Formats to generate. Order does not matter.
    pub formats: Vec<FontFormat>,
    /// Upper bound for each external command.
    pub timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            formats: FontFormat::DEFAULT.to_vec(),
            timeout: None,
        }
    }
}

/// Builds font-face bundles, reusing resolved tools across fonts.
pub struct Pipeline {
    locator: ToolLocator,
    settings: Settings,
}

impl Pipeline {
    pub fn new(settings: Settings, overrides: ToolOverrides, resolver: impl Resolve + 'static) -> Self {
        let required = Tool::required_for(&settings.formats);
        Self {
            locator: ToolLocator::new(required, overrides, resolver),
            settings,
        }
    }

    /// Generate all outputs for one font and return their paths.
    pub fn run(&self, options: &FontFaceOptions) -> Result<OutputPaths> {
        let registry = self.locator.registry()?;
        let tools = Toolchain::new(registry, self.settings.timeout);

        let plan = BuildPlan::build(options, &tools.fontforge()?)?;
        log!("build"; "{} ({}, {}, {})", plan.source.display(), plan.name, plan.weight, plan.style);
        debug!("plan"; "target {} (source extension `{}`)", plan.target.display(), plan.extension);

        ensure_dir(&plan.dest_dir)?;

        for format in FontFormat::ALL {
            if self.settings.formats.contains(&format) {
                generator::generate(format, &plan, &tools)?;
            }
        }

        stylesheet::emit(&plan)?;
        Ok(plan.outputs())
    }
}
