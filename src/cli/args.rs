//! Command-line interface definitions.

use crate::font::FontFormat;
use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Generate web fonts and an @font-face stylesheet from TrueType fonts
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Source fonts; each one is built independently
    #[arg(value_name = "SOURCE", required = true, value_hint = clap::ValueHint::FilePath)]
    pub sources: Vec<PathBuf>,

    /// Destination directory for generated files
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub dest: Option<PathBuf>,

    /// Put each font's output in a subdirectory named after it
    #[arg(short, long, overrides_with = "no_collate")]
    pub collate: bool,

    /// Write output flat into the destination, even if the config collates
    #[arg(long, overrides_with = "collate")]
    pub no_collate: bool,

    /// Formats to generate [default: eot,woff]
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub formats: Vec<FontFormat>,

    /// Formats to inline into the stylesheet as data URIs (the files are removed)
    ///
    /// Only woff and ttf can be embedded. An embedded ttf adds
    /// `url(<data>) format("truetype")` to the second `src` line; it is the
    /// only change to the fixed @font-face layout.
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub embed: Vec<FontFormat>,

    /// Url prefix for font files in the stylesheet [default: ../]
    #[arg(long)]
    pub css_fontpath: Option<String>,

    /// Override the font family name
    #[arg(long)]
    pub name: Option<String>,

    /// Override the CSS font weight
    #[arg(long)]
    pub weight: Option<String>,

    /// Override the detected style
    #[arg(long)]
    pub style: Option<String>,

    /// Path to the fontforge executable
    #[arg(long, value_hint = clap::ValueHint::ExecutablePath)]
    pub fontforge: Option<PathBuf>,

    /// Path to the ttf2eot executable
    #[arg(long, value_hint = clap::ValueHint::ExecutablePath)]
    pub ttf2eot: Option<PathBuf>,

    /// Path to the batik-ttf2svg executable
    #[arg(long = "batik-ttf2svg", value_hint = clap::ValueHint::ExecutablePath)]
    pub batik_ttf2svg: Option<PathBuf>,

    /// Kill external tools that run longer than this many seconds
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Continue with the remaining fonts when one fails
    #[arg(short, long, overrides_with = "no_keep_going")]
    pub keep_going: bool,

    /// Stop at the first failing font, even if the config keeps going
    #[arg(long, overrides_with = "keep_going")]
    pub no_keep_going: bool,

    /// Print generated paths as JSON
    #[arg(long)]
    pub json: bool,

    /// Config file path (default: fontface.toml)
    #[arg(short = 'C', long, default_value = crate::config::CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_lists() {
        let cli = Cli::try_parse_from([
            "fontface", "-d", "out", "-f", "ttf,eot,woff", "-e", "woff", "a.ttf", "b.ttf",
        ])
        .unwrap();
        assert_eq!(cli.sources, vec![PathBuf::from("a.ttf"), PathBuf::from("b.ttf")]);
        assert_eq!(cli.formats, vec![FontFormat::Ttf, FontFormat::Eot, FontFormat::Woff]);
        assert_eq!(cli.embed, vec![FontFormat::Woff]);
        assert_eq!(cli.config, PathBuf::from("fontface.toml"));
    }

    #[test]
    fn test_embed_help_describes_truetype_source() {
        let mut cmd = Cli::command();
        let help = cmd.render_long_help().to_string();
        assert!(help.contains("format(\"truetype\")"));
    }

    #[test]
    fn test_sources_required() {
        assert!(Cli::try_parse_from(["fontface", "-d", "out"]).is_err());
    }
}
