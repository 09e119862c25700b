//! SVG font export with Batik's `ttf2svg`.

use super::Toolchain;
use crate::error::Result;
use crate::plan::BuildPlan;
use crate::tools::Tool;
use crate::utils::exec::Cmd;

pub fn convert(plan: &BuildPlan, tools: &Toolchain<'_>) -> Result<()> {
    Cmd::new(tools.registry.path(Tool::BatikTtf2Svg)?)
        .arg(&plan.ttf)
        .args(["-id", plan.name.as_str(), "-o"])
        .arg(&plan.svg)
        .timeout(tools.timeout)
        .run()
        .map(drop)
}
