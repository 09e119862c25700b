//! Build command: run the pipeline for every source font.

use super::Cli;
use crate::config::ProjectConfig;
use crate::error::{ErrorKind, FontFaceError};
use crate::font::FontFormat;
use crate::pipeline::{Pipeline, Settings};
use crate::plan::{FontFaceOptions, OutputPaths, PlanOverrides};
use crate::tools::{Tool, ToolOverrides, WhichResolver};
use crate::utils::plural::plural_count;
use crate::{core, log};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything shared by the fonts of one invocation, CLI over config file.
#[derive(Debug, Clone)]
struct Job {
    settings: Settings,
    tools: ToolOverrides,
    dest: PathBuf,
    collate: bool,
    overrides: PlanOverrides,
    keep_going: bool,
}

impl Job {
    fn new(cli: &Cli, config: &ProjectConfig) -> Result<Self> {
        let build = &config.build;

        let Some(dest) = cli.dest.clone().or_else(|| config.dest()) else {
            bail!("no destination directory: pass --dest or set `build.dest` in the config file");
        };

        let formats = first_non_empty(&cli.formats, &build.formats)
            .map_or_else(|| FontFormat::DEFAULT.to_vec(), <[_]>::to_vec);
        let timeout = cli.timeout.or(build.timeout).map(Duration::from_secs);

        let tools = config
            .tool_overrides()
            .with(Tool::FontForge, cli.fontforge.clone())
            .with(Tool::Ttf2Eot, cli.ttf2eot.clone())
            .with(Tool::BatikTtf2Svg, cli.batik_ttf2svg.clone());

        let overrides = PlanOverrides {
            css_fontpath: cli.css_fontpath.clone().or_else(|| build.css_fontpath.clone()),
            name: cli.name.clone(),
            weight: cli.weight.clone(),
            style: cli.style.clone(),
            embed: first_non_empty(&cli.embed, &build.embed).map(<[_]>::to_vec),
            ..Default::default()
        };

        Ok(Self {
            settings: Settings { formats, timeout },
            tools,
            dest,
            collate: flag(cli.collate, cli.no_collate, build.collate),
            overrides,
            keep_going: flag(cli.keep_going, cli.no_keep_going, build.keep_going),
        })
    }

    fn options(&self, source: &Path) -> FontFaceOptions {
        FontFaceOptions {
            source: source.to_path_buf(),
            dest: self.dest.clone(),
            collate: self.collate,
            overrides: self.overrides.clone(),
        }
    }
}

/// Resolve a `--x` / `--no-x` pair, falling back to the config value.
fn flag(on: bool, off: bool, config: bool) -> bool {
    match (on, off) {
        (true, _) => true,
        (_, true) => false,
        _ => config,
    }
}

fn first_non_empty<'a, T>(primary: &'a [T], fallback: &'a [T]) -> Option<&'a [T]> {
    [primary, fallback].into_iter().find(|list| !list.is_empty())
}

/// One built font, as printed with `--json`.
#[derive(Serialize)]
struct Built {
    source: PathBuf,
    #[serde(flatten)]
    outputs: OutputPaths,
}

/// Build every source font, continuing past failures with `--keep-going`.
pub fn build_fonts(cli: &Cli, config: &ProjectConfig) -> Result<()> {
    let job = Job::new(cli, config)?;
    let pipeline = Pipeline::new(job.settings.clone(), job.tools.clone(), WhichResolver);

    let mut built = Vec::with_capacity(cli.sources.len());
    let mut failed = 0;

    for source in &cli.sources {
        match pipeline.run(&job.options(source)) {
            Ok(outputs) => {
                if !cli.json {
                    report(&outputs, &job.settings.formats);
                }
                built.push(Built {
                    source: source.clone(),
                    outputs,
                });
            }
            Err(err) if job.keep_going && !aborts_batch(&err) => {
                log!("error"; "{}: {err}", source.display());
                failed += 1;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to build `{}`", source.display()));
            }
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&built)?);
    }

    if failed > 0 {
        bail!(
            "{} of {} failed",
            plural_count(failed, "font"),
            cli.sources.len()
        );
    }
    Ok(())
}

/// Stop even with `--keep-going`: missing tools fail every font alike.
fn aborts_batch(err: &FontFaceError) -> bool {
    err.kind() == ErrorKind::ToolResolution || core::is_shutdown()
}

/// List the files that were actually written.
///
/// TTF is the source itself unless regenerated, and embedded files are gone.
fn report(outputs: &OutputPaths, formats: &[FontFormat]) {
    for (kind, path) in outputs.iter() {
        let generated = kind != "ttf" || formats.contains(&FontFormat::Ttf);
        if generated && path.exists() {
            log!("done"; "{}", path.display());
        }
    }
}
