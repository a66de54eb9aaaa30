//! Score card layout.
//!
//! The card is described as an ordered list of [`Layer`]s so that every
//! backend (SVG rasterizer, browser 2D canvas) paints the same picture.
//! All colors, fonts and offsets are fixed.

use serde::{Deserialize, Serialize};

use crate::request::resolve_game_name;

/// Card width in pixels.
pub const CARD_WIDTH: u32 = 1200;
/// Card height in pixels.
pub const CARD_HEIGHT: u32 = 630;

/// Brand label drawn at the top of the card.
pub const BRAND_LABEL: &str = "GameArcade";
/// Tagline drawn under the score.
pub const TAGLINE: &str = "Can you beat my score?";
/// Font family stack for every text layer.
pub const FONT_FAMILY: &str = "\"Segoe UI\", sans-serif";

const FRAME_INSET: f32 = 60.0;
const PANEL_INSET: f32 = 90.0;

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity in `0.0..=1.0`.
    pub a: f32,
}

impl Color {
    /// Opaque color from a `0xRRGGBB` value.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    /// Same color with a different opacity.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS form: `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
    #[must_use]
    pub fn css(&self) -> String {
        if (self.a - 1.0).abs() < f32::EPSILON {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Royal blue at the top of the backdrop.
pub const BACKDROP_TOP: Color = Color::hex(0x1d_4e_d8);
/// Slate at the bottom of the backdrop, also the panel color.
pub const SLATE: Color = Color::hex(0x0f_17_2a);
/// Orange accent for the frame and game name.
pub const ACCENT: Color = Color::hex(0xf9_73_16);
/// Near-white text.
pub const TEXT: Color = Color::hex(0xf8_fa_fc);

/// Font specification for a text layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// CSS font weight (400 normal, 600 semibold, 700 bold).
    pub weight: u16,
    /// Size in pixels.
    pub size: f32,
}

impl Font {
    /// Regular weight.
    #[must_use]
    pub const fn regular(size: f32) -> Self {
        Self { weight: 400, size }
    }

    /// Bold weight.
    #[must_use]
    pub const fn bold(size: f32) -> Self {
        Self { weight: 700, size }
    }

    /// CSS `font` shorthand, e.g. `bold 72px "Segoe UI", sans-serif`.
    #[must_use]
    pub fn css(&self) -> String {
        match self.weight {
            400 => format!("{}px {FONT_FAMILY}", self.size),
            700 => format!("bold {}px {FONT_FAMILY}", self.size),
            w => format!("{w} {}px {FONT_FAMILY}", self.size),
        }
    }
}

/// A color stop on a linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient in `0.0..=1.0`.
    pub offset: f32,
    /// Color at this position.
    pub color: Color,
}

/// One drawing step of the card, painted in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    /// Full-card vertical gradient.
    LinearGradient {
        /// Gradient stops, top to bottom.
        stops: Vec<GradientStop>,
    },
    /// Filled rectangle.
    Rect {
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
        /// Fill color.
        color: Color,
    },
    /// Horizontally centered text.
    Text {
        /// Text content, drawn as-is.
        content: String,
        /// Font.
        font: Font,
        /// Fill color.
        color: Color,
        /// Center x coordinate.
        x: f32,
        /// Alphabetic baseline.
        baseline: f32,
    },
}

/// Inputs for one score card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Game name; blank names render as the placeholder.
    pub game_name: String,
    /// Score drawn as a plain integer.
    pub score: u64,
}

impl ScoreCard {
    /// Create a card for the given game and score.
    #[must_use]
    pub fn new(game_name: impl AsRef<str>, score: u64) -> Self {
        Self {
            game_name: resolve_game_name(game_name.as_ref()).to_string(),
            score,
        }
    }

    /// Card width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        CARD_WIDTH
    }

    /// Card height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        CARD_HEIGHT
    }

    /// Layers in paint order: backdrop, frame, panel, then the text stack.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn layers(&self) -> Vec<Layer> {
        let w = CARD_WIDTH as f32;
        let h = CARD_HEIGHT as f32;
        let cx = w / 2.0;

        let text = |content: String, font: Font, color: Color, baseline: f32| Layer::Text {
            content,
            font,
            color,
            x: cx,
            baseline,
        };

        vec![
            Layer::LinearGradient {
                stops: vec![
                    GradientStop {
                        offset: 0.0,
                        color: BACKDROP_TOP,
                    },
                    GradientStop {
                        offset: 1.0,
                        color: SLATE,
                    },
                ],
            },
            Layer::Rect {
                x: FRAME_INSET,
                y: FRAME_INSET,
                width: w - FRAME_INSET * 2.0,
                height: h - FRAME_INSET * 2.0,
                color: ACCENT,
            },
            Layer::Rect {
                x: PANEL_INSET,
                y: PANEL_INSET,
                width: w - PANEL_INSET * 2.0,
                height: h - PANEL_INSET * 2.0,
                color: SLATE,
            },
            text(BRAND_LABEL.to_string(), Font::bold(72.0), TEXT, 220.0),
            text(
                self.game_name.clone(),
                Font {
                    weight: 600,
                    size: 56.0,
                },
                ACCENT,
                320.0,
            ),
            text(self.score.to_string(), Font::bold(140.0), TEXT, 470.0),
            text(
                TAGLINE.to_string(),
                Font::regular(36.0),
                TEXT.with_alpha(0.75),
                560.0,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(card: &ScoreCard) -> Vec<String> {
        card.layers()
            .into_iter()
            .filter_map(|layer| match layer {
                Layer::Text { content, .. } => Some(content),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn text_layers_are_in_fixed_order() {
        let card = ScoreCard::new("Chess", 42);
        assert_eq!(
            texts(&card),
            vec!["GameArcade", "Chess", "42", "Can you beat my score?"]
        );
    }

    #[test]
    fn background_layers_come_first() {
        let layers = ScoreCard::new("Chess", 42).layers();
        assert!(matches!(layers[0], Layer::LinearGradient { .. }));
        assert_eq!(
            layers[1],
            Layer::Rect {
                x: 60.0,
                y: 60.0,
                width: 1080.0,
                height: 510.0,
                color: ACCENT,
            }
        );
        assert_eq!(
            layers[2],
            Layer::Rect {
                x: 90.0,
                y: 90.0,
                width: 1020.0,
                height: 450.0,
                color: SLATE,
            }
        );
    }

    #[test]
    fn long_names_are_kept_verbatim() {
        let name = "A".repeat(500);
        let card = ScoreCard::new(&name, u64::MAX);
        assert_eq!(card.width(), 1200);
        assert_eq!(card.height(), 630);
        assert!(texts(&card).contains(&name));
    }

    #[test]
    fn blank_name_renders_placeholder() {
        assert_eq!(texts(&ScoreCard::new("", 0))[1], "Unknown Game");
    }

    #[test]
    fn color_css_forms() {
        assert_eq!(ACCENT.css(), "#f97316");
        assert_eq!(TEXT.with_alpha(0.75).css(), "rgba(248, 250, 252, 0.75)");
    }

    #[test]
    fn font_css_shorthand() {
        assert_eq!(Font::bold(72.0).css(), "bold 72px \"Segoe UI\", sans-serif");
        assert_eq!(
            Font {
                weight: 600,
                size: 56.0
            }
            .css(),
            "600 56px \"Segoe UI\", sans-serif"
        );
        assert_eq!(Font::regular(36.0).css(), "36px \"Segoe UI\", sans-serif");
    }
}
