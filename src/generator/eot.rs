//! EOT conversion with `ttf2eot`, which writes the font to stdout.

use super::Toolchain;
use crate::error::{FontFaceError, Result};
use crate::plan::BuildPlan;
use crate::tools::Tool;
use crate::utils::exec::Cmd;
use std::fs;

pub fn convert(plan: &BuildPlan, tools: &Toolchain<'_>) -> Result<()> {
    let output = Cmd::new(tools.registry.path(Tool::Ttf2Eot)?)
        .arg(&plan.ttf)
        .timeout(tools.timeout)
        .run()?;

    fs::write(&plan.eot, &output.stdout).map_err(|err| FontFaceError::fs("write", &plan.eot, err))
}
