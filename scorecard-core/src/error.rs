//! Error types for share operations.

use thiserror::Error;

/// Result type for share operations.
pub type ShareResult<T> = Result<T, ShareError>;

/// Errors raised by share collaborators.
///
/// None of these escape [`crate::ShareDispatcher::share_score`]; the
/// dispatcher turns each of them into a fallback step.
#[derive(Debug, Error)]
pub enum ShareError {
    /// Drawing or encoding the score card failed.
    #[error("Score card rendering failed: {0}")]
    Render(String),

    /// Converting the encoded card to its binary payload failed.
    #[error("Binary conversion failed: {0}")]
    Conversion(String),

    /// Packaging the card as a file attachment failed.
    #[error("Failed to package attachment: {0}")]
    Attachment(String),

    /// The native share call was rejected or cancelled.
    #[error("Native share rejected: {0}")]
    Rejected(String),

    /// The platform has no native share capability.
    #[error("Native share unavailable")]
    Unavailable,
}
