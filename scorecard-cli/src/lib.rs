//! # Scorecard CLI
//!
//! Native host for score cards.
//!
//! ## Usage
//!
//! ```bash
//! scorecard render --game Chess --score 42 --out chess.png
//! scorecard links --game Chess --score 42 --url https://arcade.example/chess
//! scorecard share --game Chess --score 42 --out-dir share-kit
//! ```
//!
//! `share` runs the full share flow. A terminal has no share sheet, so the
//! flow always lands on the fallback, which writes the card, the share text
//! and the channel links into the output directory.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod surface;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use scorecard_core::{
    ScoreCard, ShareDispatcher, ShareLinks, ShareOutcome, ShareRequest, TracingAnalytics,
    Unavailable,
};
use scorecard_renderer::{
    CardExporter, ExportConfig, ExportFormat, RasterCardRenderer, MAX_SCALE,
};

pub use surface::DirectoryFallbackSurface;

/// Share URL used when neither `--url` nor `SCORECARD_SHARE_URL` is set.
pub const DEFAULT_SHARE_URL: &str = "https://example.com/";

/// Command-line arguments for scorecard.
#[derive(Debug, Clone, Parser)]
#[command(name = "scorecard")]
#[command(about = "Render and share game score cards")]
#[command(version)]
pub struct CliArgs {
    /// Skip loading system fonts (text uses the bundled font)
    #[arg(long, global = true, env = "SCORECARD_NO_FONTS")]
    pub no_fonts: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Game and score shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct ScoreArgs {
    /// Game name (blank renders as "Unknown Game")
    #[arg(long, env = "SCORECARD_GAME", default_value = "")]
    pub game: String,

    /// Final score
    #[arg(long)]
    pub score: u64,
}

/// URL to share.
#[derive(Debug, Clone, Args)]
pub struct UrlArgs {
    /// Canonical URL appended to the share text
    #[arg(long, env = "SCORECARD_SHARE_URL", default_value = DEFAULT_SHARE_URL)]
    pub url: String,
}

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// PNG image
    Png,
    /// JPEG image
    Jpeg,
    /// SVG source
    Svg,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Png => Self::Png,
            Format::Jpeg => Self::Jpeg,
            Format::Svg => Self::Svg,
        }
    }
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render a score card image
    Render {
        /// Game and score
        #[command(flatten)]
        score: ScoreArgs,

        /// Output file (default: score-card.<ext>)
        #[arg(long, short)]
        out: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Png)]
        format: Format,

        /// Scale factor (2.0 for retina, at most 4.0)
        #[arg(long, default_value_t = 1.0, value_parser = parse_scale)]
        scale: f32,
    },

    /// Print the share text and channel links
    Links {
        /// Game and score
        #[command(flatten)]
        score: ScoreArgs,

        /// Share URL
        #[command(flatten)]
        url: UrlArgs,
    },

    /// Run the share flow, writing the fallback share kit to a directory
    Share {
        /// Game and score
        #[command(flatten)]
        score: ScoreArgs,

        /// Share URL
        #[command(flatten)]
        url: UrlArgs,

        /// Directory receiving score-card.png, share.txt and links.txt
        #[arg(long, default_value = "share-kit")]
        out_dir: PathBuf,
    },
}

/// Parse `--scale`, accepting `(0, MAX_SCALE]`.
fn parse_scale(raw: &str) -> Result<f32, String> {
    let scale: f32 = raw
        .parse()
        .map_err(|e| format!("invalid scale '{raw}': {e}"))?;
    if scale.is_finite() && scale > 0.0 && scale <= MAX_SCALE {
        Ok(scale)
    } else {
        Err(format!("scale must be in (0, {MAX_SCALE}], got {raw}"))
    }
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Load system fonts before rasterizing text layers.
    pub load_system_fonts: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CliConfig {
    /// Configuration with system fonts enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            load_system_fonts: true,
        }
    }

    /// Card exporter at the given scale.
    #[must_use]
    pub fn exporter(&self, scale: f32) -> CardExporter {
        CardExporter::new(ExportConfig {
            scale,
            load_system_fonts: self.load_system_fonts,
            ..ExportConfig::default()
        })
    }
}

impl From<&CliArgs> for CliConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            load_system_fonts: !args.no_fonts,
        }
    }
}

/// Share text followed by one line per channel link.
#[must_use]
pub fn links_report(request: &ShareRequest) -> String {
    let text = request.share_text();
    let links = ShareLinks::from_text(&text);
    format!(
        "{text}\nTwitter: {}\nWhatsApp: {}\n",
        links.twitter, links.whatsapp
    )
}

/// Run a parsed command, returning what to print on stdout.
///
/// # Errors
///
/// Returns an error if rendering or writing the card fails. The `share`
/// subcommand itself never fails; it reports the outcome instead.
pub async fn run(args: CliArgs) -> anyhow::Result<String> {
    let config = CliConfig::from(&args);
    match args.command {
        Command::Render {
            score,
            out,
            format,
            scale,
        } => {
            let card = ScoreCard::new(&score.game, score.score);
            let format = ExportFormat::from(format);
            let bytes = config
                .exporter(scale)
                .export(&card, format)
                .context("Failed to render score card")?;

            let out = out
                .unwrap_or_else(|| PathBuf::from(format!("score-card.{}", format.extension())));
            std::fs::write(&out, &bytes)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            tracing::info!("Wrote {} bytes to {}", bytes.len(), out.display());

            Ok(format!("{}\n", out.display()))
        }

        Command::Links { score, url } => {
            let request = ShareRequest::new(&score.game, score.score, url.url);
            Ok(links_report(&request))
        }

        Command::Share {
            score,
            url,
            out_dir,
        } => {
            let request = ShareRequest::new(&score.game, score.score, url.url);
            let dispatcher = ShareDispatcher::new(
                RasterCardRenderer::new(config.exporter(1.0)),
                Unavailable,
                DirectoryFallbackSurface::new(&out_dir),
                TracingAnalytics,
            );

            let outcome = dispatcher.share_score(&request).await;
            Ok(match outcome {
                ShareOutcome::Fallback => format!("{}\n", out_dir.display()),
                other => format!("{}\n", other.as_str()),
            })
        }
    }
}
