//! Share requests and share text composition.

use serde::{Deserialize, Serialize};

/// Placeholder used when no game name is available.
pub const UNKNOWN_GAME: &str = "Unknown Game";

/// Resolve a possibly blank game name to its display form.
///
/// Non-blank names are returned unchanged; hosts trim their own input.
#[must_use]
pub fn resolve_game_name(game_name: &str) -> &str {
    if game_name.trim().is_empty() {
        UNKNOWN_GAME
    } else {
        game_name
    }
}

/// Compose the canonical share text: `"{game} - Score: {score} {url}"`.
#[must_use]
pub fn compose_share_text(game_name: &str, score: u64, share_url: &str) -> String {
    format!("{} - Score: {score} {share_url}", resolve_game_name(game_name))
}

/// Format a score for on-page display with thousands separators.
#[must_use]
pub fn format_score_display(score: u64) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Immutable input to one share invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequest {
    /// Game name, never blank.
    pub game_name: String,
    /// Final score.
    pub score: u64,
    /// Canonical URL to share.
    pub share_url: String,
}

impl ShareRequest {
    /// Create a request, resolving a blank game name to [`UNKNOWN_GAME`].
    #[must_use]
    pub fn new(game_name: impl AsRef<str>, score: u64, share_url: impl Into<String>) -> Self {
        Self {
            game_name: resolve_game_name(game_name.as_ref()).to_string(),
            score,
            share_url: share_url.into(),
        }
    }

    /// The canonical share text for this request.
    #[must_use]
    pub fn share_text(&self) -> String {
        compose_share_text(&self.game_name, self.score, &self.share_url)
    }

    /// Title passed to the native share sheet.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} score", self.game_name)
    }

    /// File name of the score card attachment.
    #[must_use]
    pub fn attachment_name(&self) -> String {
        format!("{}-score.png", self.game_name)
    }
}
