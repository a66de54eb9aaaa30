//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering a score card.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The intermediate SVG could not be parsed.
    #[error("SVG parsing failed: {0}")]
    Svg(String),

    /// Raster surface allocation failed.
    #[error("Failed to create pixmap: {0}")]
    Pixmap(String),

    /// Image encoding failed.
    #[error("Image encoding failed: {0}")]
    Encode(String),
}

impl From<RenderError> for scorecard_core::ShareError {
    fn from(err: RenderError) -> Self {
        Self::Render(err.to_string())
    }
}
