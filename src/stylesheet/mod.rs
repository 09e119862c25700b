//! `@font-face` stylesheet generation.
//!
//! The emitted block is fixed:
//!
//! ```css
//! @font-face {
//!     font-family: "Roboto";
//!     src: url("../Roboto.eot");
//!     src: local("☺︎"), url("../Roboto.woff") format("woff");
//!     font-weight: 700;
//!     font-style: normal;
//! }
//! @ff-7-n: "Roboto", helvetica, arial, sans-serif;
//! .ff-7-n(){
//! font-family:@ff-7-n;
//! }
//! ```
//!
//! `font-style` is always `normal`; the detected style only shows up in the
//! mixin key.
//!
//! Embedding `ttf` is the one departure from this layout: the second `src`
//! line gains `, url(<data>) format("truetype")`. Without it the block is
//! byte-for-byte the template above.

use crate::embed::embed_font;
use crate::error::{FontFaceError, Result};
use crate::font::FontFormat;
use crate::log;
use crate::plan::BuildPlan;
use crate::utils::path::url_join;
use std::fs;

/// Render the stylesheet for `plan`, write it to `plan.css` and return it.
///
/// Formats listed in `plan.embed` are inlined and their files deleted, so
/// they must already have been generated.
pub fn emit(plan: &BuildPlan) -> Result<String> {
    let prefix = font_path(plan);

    let woff = if plan.embeds(FontFormat::Woff) {
        embed_font(&plan.woff)?
    } else {
        format!("\"{prefix}.woff\"")
    };
    let ttf = if plan.embeds(FontFormat::Ttf) {
        Some(embed_font(&plan.ttf)?)
    } else {
        None
    };

    for format in plan.embed.iter().filter(|f| !f.embeddable()) {
        log!("warning"; "{format} cannot be embedded, linking it instead");
    }

    let css = render(plan, &prefix, &woff, ttf.as_deref());
    fs::write(&plan.css, &css).map_err(|err| FontFaceError::fs("write", &plan.css, err))?;
    Ok(css)
}

/// Url of the font files relative to the stylesheet, without extension.
pub fn font_path(plan: &BuildPlan) -> String {
    let basename = plan.basename.as_str();
    if plan.collate {
        url_join(&plan.css_fontpath, &[basename, basename])
    } else {
        url_join(&plan.css_fontpath, &[basename])
    }
}

/// Fill the stylesheet template.
///
/// `woff` and `ttf` are ready-to-use `url()` arguments: a quoted path or a
/// data URI. The TrueType source is only listed when it is embedded.
pub fn render(plan: &BuildPlan, prefix: &str, woff: &str, ttf: Option<&str>) -> String {
    let name = &plan.name;
    let mixin = format!("@ff-{}-{}", initial(&plan.weight), initial(&plan.style));
    let truetype = ttf
        .map(|ttf| format!(", url({ttf}) format(\"truetype\")"))
        .unwrap_or_default();

    [
        "@font-face {".to_string(),
        format!("    font-family: \"{name}\";"),
        format!("    src: url(\"{prefix}.eot\");"),
        format!("    src: local(\"☺︎\"), url({woff}) format(\"woff\"){truetype};"),
        format!("    font-weight: {};", plan.weight),
        "    font-style: normal;".to_string(),
        "}".to_string(),
        format!("{mixin}: \"{name}\", helvetica, arial, sans-serif;"),
        format!(".{}(){{", &mixin[1..]),
        format!("font-family:{mixin};"),
        "}".to_string(),
    ]
    .join("\n")
}

fn initial(value: &str) -> &str {
    value
        .char_indices()
        .nth(1)
        .map_or(value, |(end, _)| &value[..end])
}
