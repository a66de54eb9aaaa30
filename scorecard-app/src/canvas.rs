//! Score card rendering on an off-screen 2D canvas.

use scorecard_core::{
    CardRenderer, Layer, ScoreCard, ScoreCardArtifact, ShareError, ShareResult, MIME_PNG,
};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::js::describe;

/// [`CardRenderer`] drawing with `CanvasRenderingContext2d`.
pub struct CanvasCardRenderer {
    document: Document,
}

impl CanvasCardRenderer {
    /// Create a renderer that allocates canvases from `document`.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn create_canvas(&self, width: u32, height: u32) -> ShareResult<HtmlCanvasElement> {
        let canvas = self
            .document
            .create_element("canvas")
            .map_err(|e| ShareError::Render(describe(&e)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ShareError::Render("Element is not a canvas".to_string()))?;
        canvas.set_width(width);
        canvas.set_height(height);
        Ok(canvas)
    }
}

impl CardRenderer for CanvasCardRenderer {
    fn render(&self, card: &ScoreCard) -> ShareResult<ScoreCardArtifact> {
        let canvas = self.create_canvas(card.width(), card.height())?;

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| ShareError::Render(describe(&e)))?
            .ok_or_else(|| ShareError::Render("2D context not available".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ShareError::Render("Failed to cast to 2D context".to_string()))?;

        let size = (f64::from(card.width()), f64::from(card.height()));
        for layer in card.layers() {
            paint_layer(&ctx, &layer, size)?;
        }

        let data_url = canvas
            .to_data_url_with_type(MIME_PNG)
            .map_err(|e| ShareError::Render(describe(&e)))?;

        Ok(ScoreCardArtifact::from_data_url(
            data_url,
            card.width(),
            card.height(),
        ))
    }
}

fn paint_layer(
    ctx: &CanvasRenderingContext2d,
    layer: &Layer,
    (width, height): (f64, f64),
) -> ShareResult<()> {
    match layer {
        Layer::LinearGradient { stops } => {
            let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
            for stop in stops {
                gradient
                    .add_color_stop(stop.offset, &stop.color.css())
                    .map_err(|e| ShareError::Render(describe(&e)))?;
            }
            ctx.set_fill_style_canvas_gradient(&gradient);
            ctx.fill_rect(0.0, 0.0, width, height);
        }

        Layer::Rect {
            x,
            y,
            width,
            height,
            color,
        } => {
            ctx.set_fill_style_str(&color.css());
            ctx.fill_rect(
                f64::from(*x),
                f64::from(*y),
                f64::from(*width),
                f64::from(*height),
            );
        }

        Layer::Text {
            content,
            font,
            color,
            x,
            baseline,
        } => {
            ctx.set_fill_style_str(&color.css());
            ctx.set_font(&font.css());
            ctx.set_text_align("center");
            ctx.fill_text(content, f64::from(*x), f64::from(*baseline))
                .map_err(|e| ShareError::Render(describe(&e)))?;
        }
    }
    Ok(())
}
