//! Score card export to image formats.
//!
//! Renders a [`ScoreCard`] to PNG, JPEG or SVG using an SVG intermediate
//! representation and the resvg/tiny-skia rasterization pipeline.

use std::fmt::Write;
use std::sync::Arc;

use image::ImageEncoder;
use scorecard_core::card::{Color, Font, GradientStop, Layer, FONT_FAMILY};
use scorecard_core::ScoreCard;

use crate::error::{RenderError, RenderResult};

/// Family name of the bundled card font.
pub const BUNDLED_FONT_FAMILY: &str = "DejaVu Sans";

/// Largest accepted scale factor.
pub const MAX_SCALE: f32 = 4.0;

const BUNDLED_FONT_REGULAR: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");
const BUNDLED_FONT_BOLD: &[u8] = include_bytes!("../fonts/DejaVuSans-Bold.ttf");

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// SVG vector graphics (returns the SVG XML string as UTF-8 bytes).
    Svg,
}

impl ExportFormat {
    /// MIME type of the encoded output.
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Svg => "image/svg+xml",
        }
    }

    /// Conventional file extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Svg => "svg",
        }
    }
}

/// Configuration for card export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Scale factor (e.g. 2.0 for retina).
    pub scale: f32,
    /// JPEG quality 1-100 (default: 85).
    pub jpeg_quality: u8,
    /// Load system fonts in addition to the bundled card font.
    pub load_system_fonts: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            jpeg_quality: 85,
            load_system_fonts: true,
        }
    }
}

/// Exports a [`ScoreCard`] to various image formats.
pub struct CardExporter {
    config: ExportConfig,
    options: usvg::Options<'static>,
}

impl CardExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        let mut options = usvg::Options::default();
        let fontdb = Arc::make_mut(&mut options.fontdb);
        fontdb.load_font_data(BUNDLED_FONT_REGULAR.to_vec());
        fontdb.load_font_data(BUNDLED_FONT_BOLD.to_vec());
        if config.load_system_fonts {
            fontdb.load_system_fonts();
        }
        // fontdb maps generic `sans-serif` to Arial by default.
        fontdb.set_sans_serif_family(BUNDLED_FONT_FAMILY);
        tracing::debug!("Loaded {} font faces", fontdb.len());

        Self { config, options }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// The exporter configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export a card to the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the card cannot be rendered or encoded.
    pub fn export(&self, card: &ScoreCard, format: ExportFormat) -> RenderResult<Vec<u8>> {
        match format {
            ExportFormat::Png => self.render_to_png(card),
            ExportFormat::Jpeg => self.render_to_jpeg(card),
            ExportFormat::Svg => Ok(self.render_to_svg(card).into_bytes()),
        }
    }

    /// Output dimensions (width, height) in pixels.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    #[must_use]
    pub fn output_dimensions(&self, card: &ScoreCard) -> (u32, u32) {
        let scale = self.config.scale.max(f32::EPSILON);
        let out_w = (card.width() as f32 * scale).round() as u32;
        let out_h = (card.height() as f32 * scale).round() as u32;
        (out_w.max(1), out_h.max(1))
    }

    /// Export the card to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn render_to_png(&self, card: &ScoreCard) -> RenderResult<Vec<u8>> {
        let pixmap = self.rasterize(card)?;
        pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))
    }

    /// Export the card to JPEG bytes.
    ///
    /// The card is fully opaque, so alpha is dropped without compositing.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn render_to_jpeg(&self, card: &ScoreCard) -> RenderResult<Vec<u8>> {
        let pixmap = self.rasterize(card)?;
        let (width, height) = (pixmap.width(), pixmap.height());

        let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);
        for pixel in pixmap.data().chunks_exact(4) {
            rgb_data.extend_from_slice(&pixel[..3]);
        }

        let mut buf = std::io::Cursor::new(Vec::new());
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, self.config.jpeg_quality);
        encoder
            .write_image(&rgb_data, width, height, image::ExtendedColorType::Rgb8)
            .map_err(|e| RenderError::Encode(format!("JPEG encoding failed: {e}")))?;

        Ok(buf.into_inner())
    }

    /// Export the card to an SVG string.
    #[must_use]
    pub fn render_to_svg(&self, card: &ScoreCard) -> String {
        let (out_w, out_h) = self.output_dimensions(card);
        let (view_w, view_h) = (card.width(), card.height());

        let mut svg = String::with_capacity(2048);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {view_w} {view_h}\">",
        );

        for (idx, layer) in card.layers().iter().enumerate() {
            render_layer_svg(&mut svg, idx, layer);
        }

        svg.push_str("</svg>");
        svg
    }

    /// Rasterize the card to a tiny-skia Pixmap.
    fn rasterize(&self, card: &ScoreCard) -> RenderResult<tiny_skia::Pixmap> {
        let scale = self.config.scale;
        if !(scale.is_finite() && scale > 0.0 && scale <= MAX_SCALE) {
            return Err(RenderError::Pixmap(format!(
                "scale {scale} outside 0..={MAX_SCALE}"
            )));
        }

        let svg_string = self.render_to_svg(card);
        let tree = usvg::Tree::from_str(&svg_string, &self.options)
            .map_err(|e| RenderError::Svg(e.to_string()))?;

        let (px_w, px_h) = self.output_dimensions(card);
        let mut pixmap = tiny_skia::Pixmap::new(px_w, px_h)
            .ok_or_else(|| RenderError::Pixmap(format!("{px_w}x{px_h}")))?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
        tracing::trace!("Rasterized score card at {px_w}x{px_h}");

        Ok(pixmap)
    }
}

/// Render a single layer to SVG.
fn render_layer_svg(svg: &mut String, idx: usize, layer: &Layer) {
    match layer {
        Layer::LinearGradient { stops } => render_gradient_svg(svg, idx, stops),

        Layer::Rect {
            x,
            y,
            width,
            height,
            color,
        } => {
            let _ = write!(
                svg,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" {}/>",
                fill_attrs(*color),
            );
        }

        Layer::Text {
            content,
            font,
            color,
            x,
            baseline,
        } => {
            let escaped = escape_xml(content);
            let _ = write!(
                svg,
                "<text x=\"{x}\" y=\"{baseline}\" text-anchor=\"middle\" {} {}>{escaped}</text>",
                font_attrs(font),
                fill_attrs(*color),
            );
        }
    }
}

/// Full-card vertical gradient, defined inline with a per-layer id.
fn render_gradient_svg(svg: &mut String, idx: usize, stops: &[GradientStop]) {
    let _ = write!(
        svg,
        "<defs><linearGradient id=\"layer{idx}\" x1=\"0\" y1=\"0\" x2=\"0\" y2=\"1\">"
    );
    for stop in stops {
        let _ = write!(
            svg,
            "<stop offset=\"{}\" stop-color=\"{}\" stop-opacity=\"{}\"/>",
            stop.offset,
            rgb(stop.color),
            stop.color.a,
        );
    }
    let _ = write!(
        svg,
        "</linearGradient></defs><rect width=\"100%\" height=\"100%\" fill=\"url(#layer{idx})\"/>"
    );
}

fn rgb(color: Color) -> String {
    format!("rgb({},{},{})", color.r, color.g, color.b)
}

fn fill_attrs(color: Color) -> String {
    format!("fill=\"{}\" fill-opacity=\"{}\"", rgb(color), color.a)
}

fn font_attrs(font: &Font) -> String {
    format!(
        "font-family=\"{}\" font-weight=\"{}\" font-size=\"{}\"",
        FONT_FAMILY.replace('"', "'"),
        font.weight,
        font.size,
    )
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exporter() -> CardExporter {
        CardExporter::new(ExportConfig {
            load_system_fonts: false,
            ..ExportConfig::default()
        })
    }

    #[test]
    fn test_svg_has_card_dimensions() {
        let svg = exporter().render_to_svg(&ScoreCard::new("Chess", 42));
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("width=\"1200\""));
        assert!(svg.contains("height=\"630\""));
        assert!(svg.contains("viewBox=\"0 0 1200 630\""));
    }

    #[test]
    fn test_svg_contains_layers_in_order() {
        let svg = exporter().render_to_svg(&ScoreCard::new("Chess", 42));
        let gradient = svg.find("linearGradient").expect("gradient");
        let brand = svg.find(">GameArcade<").expect("brand");
        let game = svg.find(">Chess<").expect("game");
        let score = svg.find(">42<").expect("score");
        let tagline = svg.find(">Can you beat my score?<").expect("tagline");
        assert!(gradient < brand && brand < game && game < score && score < tagline);
        assert!(svg.contains("stop-color=\"rgb(29,78,216)\""));
        assert!(svg.contains("fill=\"rgb(249,115,22)\""));
        assert!(svg.contains("font-size=\"140\""));
        assert!(svg.contains("fill-opacity=\"0.75\""));
    }

    #[test]
    fn test_xml_escaping() {
        let svg = exporter().render_to_svg(&ScoreCard::new("A < B & C > D", 1));
        assert!(svg.contains("A &lt; B &amp; C &gt; D"));
    }

    #[test]
    fn test_png_export_produces_valid_bytes() {
        let png = exporter()
            .render_to_png(&ScoreCard::new("Test", 1))
            .expect("png export");
        assert!(png.len() > 8);
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_jpeg_export_produces_valid_bytes() {
        let jpeg = exporter()
            .render_to_jpeg(&ScoreCard::new("Test", 1))
            .expect("jpeg export");
        assert!(jpeg.len() > 2);
        assert_eq!(jpeg[0], 0xFF);
        assert_eq!(jpeg[1], 0xD8);
    }

    #[test]
    fn test_scale_factor() {
        let exporter = CardExporter::new(ExportConfig {
            scale: 0.5,
            load_system_fonts: false,
            ..ExportConfig::default()
        });
        let card = ScoreCard::new("Chess", 42);
        assert_eq!(exporter.output_dimensions(&card), (600, 315));
        let svg = exporter.render_to_svg(&card);
        assert!(svg.contains("width=\"600\""));
        assert!(svg.contains("viewBox=\"0 0 1200 630\""));
    }

    #[test]
    fn test_oversized_scale_is_rejected() {
        let exporter = CardExporter::new(ExportConfig {
            scale: 40.0,
            load_system_fonts: false,
            ..ExportConfig::default()
        });
        let result = exporter.render_to_png(&ScoreCard::new("Chess", 42));
        assert!(matches!(result, Err(RenderError::Pixmap(_))));
        assert!(exporter.render_to_svg(&ScoreCard::new("Chess", 42)).contains("48000"));
    }

    #[test]
    fn test_bundled_font_is_registered() {
        let exporter = exporter();
        let has_family = exporter.options.fontdb.faces().any(|face| {
            face.families
                .iter()
                .any(|(name, _)| name == BUNDLED_FONT_FAMILY)
        });
        assert!(has_family);
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(ExportFormat::Png.mime(), "image/png");
        assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
        assert_eq!(ExportFormat::Svg.mime(), "image/svg+xml");
    }
}
