//! The Build Plan: one font's fully resolved generation job.
//!
//! A plan is derived from the source path, destination and collate flag,
//! then overlaid in order of increasing precedence:
//!
//! ```text
//! metadata-derived defaults  <  sidecar <font>.json  <  explicit options
//! ```
//!
//! Derived paths are computed once. Overlays replace individual fields and
//! never trigger re-derivation.

mod overrides;

pub use overrides::PlanOverrides;

use crate::debug;
use crate::error::{FontFaceError, Result};
use crate::font::{FontFormat, FontMetadata, FontQuery};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Default url prefix for fonts referenced from the stylesheet.
pub const DEFAULT_CSS_FONTPATH: &str = "../";

/// What the caller asks for: one source font and where its outputs go.
#[derive(Debug, Clone, Default)]
pub struct FontFaceOptions {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub collate: bool,
    /// Applied after the sidecar config, so these always win.
    pub overrides: PlanOverrides,
}

/// Fully merged description of one font's generation job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    pub source: PathBuf,
    /// Directory the outputs are written into (already nested when collating).
    pub dest_dir: PathBuf,
    pub collate: bool,
    /// Extension of `source`, with the leading dot.
    pub extension: String,
    pub basename: String,
    /// Output path without extension.
    pub target: PathBuf,
    /// Sidecar config location.
    pub config_file: PathBuf,
    pub ttf: PathBuf,
    pub eot: PathBuf,
    pub svg: PathBuf,
    pub woff: PathBuf,
    pub css: PathBuf,
    pub css_fontpath: String,
    pub name: String,
    pub weight: String,
    pub style: String,
    pub embed: Vec<FontFormat>,
}

/// Generated file locations, returned to the caller of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
    pub ttf: PathBuf,
    pub eot: PathBuf,
    pub svg: PathBuf,
    pub woff: PathBuf,
    pub css: PathBuf,
}

impl BuildPlan {
    /// Extract metadata, derive defaults and apply sidecar and explicit overrides.
    pub fn build(options: &FontFaceOptions, query: &dyn FontQuery) -> Result<Self> {
        let meta = FontMetadata::extract(&options.source, query)?;
        let mut plan = Self::derive(&options.source, &options.dest, options.collate, meta);

        if let Some(sidecar) = PlanOverrides::load_sidecar(&plan.config_file)? {
            debug!("plan"; "applying {}", plan.config_file.display());
            plan.apply(sidecar);
        }
        plan.apply(options.overrides.clone());

        plan.validate()?;
        Ok(plan)
    }

    /// Default plan for `source`, computed purely from its path and metadata.
    pub fn derive(source: &Path, dest: &Path, collate: bool, meta: FontMetadata) -> Self {
        let extension = source
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let basename = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let dest_dir = if collate {
            dest.join(&basename)
        } else {
            dest.to_path_buf()
        };
        let target = dest_dir.join(&basename);
        let output = |ext: &str| with_suffix(&target, ext);

        Self {
            source: source.to_path_buf(),
            config_file: source.with_extension("json"),
            ttf: source.to_path_buf(),
            eot: output(".eot"),
            svg: output(".svg"),
            woff: output(".woff"),
            css: output(".css"),
            dest_dir,
            collate,
            extension,
            basename,
            target,
            css_fontpath: DEFAULT_CSS_FONTPATH.to_string(),
            name: meta.name,
            weight: meta.weight,
            style: meta.style,
            embed: Vec::new(),
        }
    }

    /// Replace every field present in `overrides`.
    pub fn apply(&mut self, overrides: PlanOverrides) {
        let PlanOverrides {
            dest_dir,
            collate,
            extension,
            basename,
            target,
            ttf,
            eot,
            svg,
            woff,
            css,
            css_fontpath,
            name,
            weight,
            style,
            embed,
        } = overrides;

        replace(&mut self.dest_dir, dest_dir);
        replace(&mut self.collate, collate);
        replace(&mut self.extension, extension);
        replace(&mut self.basename, basename);
        replace(&mut self.target, target);
        replace(&mut self.ttf, ttf);
        replace(&mut self.eot, eot);
        replace(&mut self.svg, svg);
        replace(&mut self.woff, woff);
        replace(&mut self.css, css);
        replace(&mut self.css_fontpath, css_fontpath);
        replace(&mut self.name, name);
        replace(&mut self.weight, weight);
        replace(&mut self.style, style);
        replace(&mut self.embed, embed);
    }

    /// Weight and style feed the stylesheet's mixin names and must not be blank.
    fn validate(&self) -> Result<()> {
        for (field, value) in [("weight", &self.weight), ("style", &self.style)] {
            if value.trim().is_empty() {
                return Err(FontFaceError::MetadataExtraction {
                    field,
                    font: self.source.clone(),
                });
            }
        }
        Ok(())
    }

    /// Output path of `format`.
    pub fn path(&self, format: FontFormat) -> &Path {
        match format {
            FontFormat::Ttf => &self.ttf,
            FontFormat::Eot => &self.eot,
            FontFormat::Svg => &self.svg,
            FontFormat::Woff => &self.woff,
        }
    }

    /// Whether `format` is inlined into the stylesheet.
    pub fn embeds(&self, format: FontFormat) -> bool {
        self.embed.contains(&format)
    }

    pub fn outputs(&self) -> OutputPaths {
        OutputPaths {
            ttf: self.ttf.clone(),
            eot: self.eot.clone(),
            svg: self.svg.clone(),
            woff: self.woff.clone(),
            css: self.css.clone(),
        }
    }
}

impl OutputPaths {
    /// Paths in generation order, paired with their kind.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Path)> {
        [
            ("ttf", self.ttf.as_path()),
            ("eot", self.eot.as_path()),
            ("svg", self.svg.as_path()),
            ("woff", self.woff.as_path()),
            ("css", self.css.as_path()),
        ]
        .into_iter()
    }
}

#[inline]
fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Append `suffix` to the final path component (`out/Roboto` + `.woff`).
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::font::MetaField;
    use tempfile::TempDir;

    struct Regular;

    impl FontQuery for Regular {
        fn query(&self, _source: &Path, field: MetaField) -> Result<Option<String>> {
            Ok(Some(
                match field {
                    MetaField::Name => "Roboto",
                    MetaField::Weight => "Regular",
                    MetaField::ItalicAngle => "0",
                }
                .to_string(),
            ))
        }
    }

    fn meta() -> FontMetadata {
        FontMetadata {
            name: "Roboto".into(),
            weight: "normal".into(),
            style: "normal".into(),
        }
    }

    #[test]
    fn test_derive_flat() {
        let plan = BuildPlan::derive(Path::new("fonts/Roboto-Bold.ttf"), Path::new("out"), false, meta());

        assert_eq!(plan.extension, ".ttf");
        assert_eq!(plan.basename, "Roboto-Bold");
        assert_eq!(plan.dest_dir, PathBuf::from("out"));
        assert_eq!(plan.target, PathBuf::from("out/Roboto-Bold"));
        assert_eq!(plan.config_file, PathBuf::from("fonts/Roboto-Bold.json"));
        assert_eq!(plan.ttf, PathBuf::from("fonts/Roboto-Bold.ttf"));
        assert_eq!(plan.eot, PathBuf::from("out/Roboto-Bold.eot"));
        assert_eq!(plan.svg, PathBuf::from("out/Roboto-Bold.svg"));
        assert_eq!(plan.woff, PathBuf::from("out/Roboto-Bold.woff"));
        assert_eq!(plan.css, PathBuf::from("out/Roboto-Bold.css"));
        assert_eq!(plan.css_fontpath, "../");
        assert!(plan.embed.is_empty());
    }

    #[test]
    fn test_derive_collate() {
        let plan = BuildPlan::derive(Path::new("Roboto.ttf"), Path::new("out"), true, meta());
        assert_eq!(plan.dest_dir, PathBuf::from("out/Roboto"));
        assert_eq!(plan.target, PathBuf::from("out/Roboto/Roboto"));
        assert_eq!(plan.woff, PathBuf::from("out/Roboto/Roboto.woff"));
    }

    #[test]
    fn test_basename_strips_only_final_extension() {
        let plan = BuildPlan::derive(Path::new("a/Lato.Light.ttf"), Path::new("o"), false, meta());
        assert_eq!(plan.basename, "Lato.Light");
        assert_eq!(plan.config_file, PathBuf::from("a/Lato.Light.json"));
        assert_eq!(plan.css, PathBuf::from("o/Lato.Light.css"));
    }

    #[test]
    fn test_target_injective() {
        let sources = ["A.ttf", "B.ttf"];
        let dests = ["out", "dist"];
        let mut seen = std::collections::HashSet::new();
        for source in sources {
            for dest in dests {
                for collate in [false, true] {
                    let plan = BuildPlan::derive(Path::new(source), Path::new(dest), collate, meta());
                    assert!(seen.insert(plan.target.clone()), "duplicate {}", plan.target.display());
                }
            }
        }
    }

    #[test]
    fn test_apply_replaces_only_present_fields() {
        let mut plan = BuildPlan::derive(Path::new("Roboto.ttf"), Path::new("out"), false, meta());
        plan.apply(PlanOverrides {
            woff: Some(PathBuf::from("cdn/r.woff")),
            embed: Some(vec![FontFormat::Woff]),
            ..Default::default()
        });

        assert_eq!(plan.woff, PathBuf::from("cdn/r.woff"));
        assert!(plan.embeds(FontFormat::Woff));
        // Untouched, and not re-derived from the new woff path
        assert_eq!(plan.css, PathBuf::from("out/Roboto.css"));
        assert_eq!(plan.name, "Roboto");
    }

    #[test]
    fn test_merge_precedence() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("Roboto.ttf");
        std::fs::write(dir.path().join("Roboto.json"), r#"{"weight": "bold", "style": "italic"}"#).unwrap();

        let options = FontFaceOptions {
            source: source.clone(),
            dest: dir.path().join("out"),
            collate: false,
            overrides: PlanOverrides {
                weight: Some("100".into()),
                ..Default::default()
            },
        };

        let plan = BuildPlan::build(&options, &Regular).unwrap();
        // explicit beats sidecar
        assert_eq!(plan.weight, "100");
        // sidecar beats defaults
        assert_eq!(plan.style, "italic");
        // defaults survive
        assert_eq!(plan.name, "Roboto");
    }

    #[test]
    fn test_sidecar_beats_defaults() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("Roboto.ttf");
        std::fs::write(dir.path().join("Roboto.json"), r#"{"weight": "bold"}"#).unwrap();

        let options = FontFaceOptions {
            source,
            dest: dir.path().join("out"),
            ..Default::default()
        };
        let plan = BuildPlan::build(&options, &Regular).unwrap();
        // Overrides are taken as given, not normalized
        assert_eq!(plan.weight, "bold");
    }

    #[test]
    fn test_blank_weight_rejected() {
        let dir = TempDir::new().unwrap();
        let options = FontFaceOptions {
            source: dir.path().join("Roboto.ttf"),
            dest: dir.path().join("out"),
            collate: false,
            overrides: PlanOverrides {
                weight: Some(" ".into()),
                ..Default::default()
            },
        };

        let err = BuildPlan::build(&options, &Regular).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MetadataExtraction);
    }

    #[test]
    fn test_outputs() {
        let plan = BuildPlan::derive(Path::new("Roboto.ttf"), Path::new("out"), false, meta());
        let outputs = plan.outputs();
        assert_eq!(outputs.css, plan.css);
        let kinds: Vec<_> = outputs.iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, ["ttf", "eot", "svg", "woff", "css"]);
    }
}
