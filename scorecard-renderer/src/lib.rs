//! # Scorecard Renderer
//!
//! Native score card rendering. The card layout from `scorecard-core` is
//! written out as SVG, rasterized with resvg/tiny-skia and encoded.
//!
//! ```text
//! ScoreCard::layers() ─▶ SVG ─▶ usvg::Tree ─▶ tiny_skia::Pixmap ─▶ PNG/JPEG
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;

pub use error::{RenderError, RenderResult};
pub use export::{CardExporter, ExportConfig, ExportFormat, BUNDLED_FONT_FAMILY, MAX_SCALE};

use scorecard_core::{CardRenderer, ScoreCard, ScoreCardArtifact, ShareResult};

/// [`CardRenderer`] producing PNG artifacts with an embedded data URL.
pub struct RasterCardRenderer {
    exporter: CardExporter,
}

impl RasterCardRenderer {
    /// Create a renderer backed by the given exporter.
    #[must_use]
    pub fn new(exporter: CardExporter) -> Self {
        Self { exporter }
    }
}

impl Default for RasterCardRenderer {
    fn default() -> Self {
        Self::new(CardExporter::with_defaults())
    }
}

impl CardRenderer for RasterCardRenderer {
    fn render(&self, card: &ScoreCard) -> ShareResult<ScoreCardArtifact> {
        let format = ExportFormat::Png;
        let png = self.exporter.export(card, format)?;
        let (width, height) = self.exporter.output_dimensions(card);
        tracing::debug!(
            "Rendered score card for {} ({} bytes)",
            card.game_name,
            png.len()
        );
        Ok(ScoreCardArtifact::from_encoded(png, format.mime(), width, height))
    }
}
