//! FontForge invocation.
//!
//! Every call is `fontforge -lang=ff -c '<script>' <args>...`, where the
//! script refers to positional arguments as `$1`, `$2`, ...

use crate::error::Result;
use crate::font::{FontQuery, MetaField};
use crate::plan::BuildPlan;
use crate::utils::exec::{Cmd, FilterRule, SILENT_FILTER};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

/// Banner lines FontForge prints to stderr on every start.
pub const FONTFORGE_FILTER: FilterRule = FilterRule::new(&[
    "Copyright (c)",
    "License GPLv3+",
    "with many parts BSD",
    "Version:",
    "Based on sources from",
    "Core python package",
]);

/// Regenerate the TrueType file with all name tables set to the family name.
const TTF_SCRIPT: &str = r#"Open($1);SetFontNames($3,$3,$3);Generate($2, "", 8);"#;

/// Convert to WOFF; the format follows from the target extension.
const WOFF_SCRIPT: &str = r#"Open($1);Generate($2, "", 8);"#;

/// Runs FontForge scripts against font files.
#[derive(Debug, Clone)]
pub struct FontForge {
    path: PathBuf,
    timeout: Option<Duration>,
}

impl FontForge {
    pub fn new(path: &Path, timeout: Option<Duration>) -> Self {
        Self {
            path: path.to_path_buf(),
            timeout,
        }
    }

    /// Run `script` with positional `args`.
    pub fn run<I, S>(&self, script: &str, args: I, filter: &'static FilterRule) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Cmd::new(&self.path)
            .args(["-lang=ff", "-c", script])
            .args(args)
            .label("FontForge")
            .filter(filter)
            .timeout(self.timeout)
            .run()
    }

    pub fn generate_ttf(&self, plan: &BuildPlan) -> Result<()> {
        self.run(
            TTF_SCRIPT,
            [plan.source.as_os_str(), plan.ttf.as_os_str(), OsStr::new(&plan.name)],
            &FONTFORGE_FILTER,
        )
        .map(drop)
    }

    pub fn generate_woff(&self, plan: &BuildPlan) -> Result<()> {
        self.run(
            WOFF_SCRIPT,
            [plan.source.as_os_str(), plan.woff.as_os_str()],
            &FONTFORGE_FILTER,
        )
        .map(drop)
    }
}

impl FontQuery for FontForge {
    fn query(&self, source: &Path, field: MetaField) -> Result<Option<String>> {
        let script = format!("Open($1);Print({});", field.variable());
        // Queries only care about stdout; stderr is banner and font warnings
        let output = self.run(&script, [source], &SILENT_FILTER)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let value = stdout.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }
}
