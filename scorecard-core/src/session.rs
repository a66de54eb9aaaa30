//! Play/share controls as explicit commands over per-page session state.

use crate::request::{format_score_display, ShareRequest};

/// Scores are rolled in `0..MAX_ROLL`.
pub const MAX_ROLL: u64 = 10_000;

/// Map a uniform sample in `[0, 1)` to a score in `0..MAX_ROLL`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn roll_from_unit(sample: f64) -> u64 {
    let scaled = (sample.clamp(0.0, 1.0) * MAX_ROLL as f64).floor() as u64;
    scaled.min(MAX_ROLL - 1)
}

/// A user-facing control that was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The play control: roll a new score.
    Play,
    /// The share control.
    Share,
}

/// What the host must do in response to a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A new score is set; display it and enable sharing.
    ScoreUpdated {
        /// Raw score.
        score: u64,
        /// Display form with thousands separators.
        display: String,
    },
    /// Run the share flow for this request.
    Share(ShareRequest),
    /// Nothing to do (share pressed with no score yet).
    Ignored,
}

/// State for one page: the current score and what to share it as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSession {
    game_name: String,
    share_url: String,
    score: Option<u64>,
}

impl ScoreSession {
    /// Create a session with no score.
    #[must_use]
    pub fn new(game_name: impl Into<String>, share_url: impl Into<String>) -> Self {
        Self {
            game_name: game_name.into(),
            share_url: share_url.into(),
            score: None,
        }
    }

    /// Current score, if any.
    #[must_use]
    pub fn score(&self) -> Option<u64> {
        self.score
    }

    /// Whether the share control should be enabled.
    #[must_use]
    pub fn share_enabled(&self) -> bool {
        self.score.is_some()
    }

    /// Replace the game name (e.g. after the page title changes).
    pub fn set_game_name(&mut self, game_name: impl Into<String>) {
        self.game_name = game_name.into();
    }

    /// Set a new score.
    pub fn set_score(&mut self, score: u64) -> Action {
        self.score = Some(score);
        Action::ScoreUpdated {
            score,
            display: format_score_display(score),
        }
    }

    /// Dispatch a trigger. `roll` is only called for [`Trigger::Play`].
    pub fn handle(&mut self, trigger: Trigger, roll: impl FnOnce() -> u64) -> Action {
        match trigger {
            Trigger::Play => self.set_score(roll()),
            Trigger::Share => match self.score {
                Some(score) => {
                    Action::Share(ShareRequest::new(&self.game_name, score, &self.share_url))
                }
                None => Action::Ignored,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_is_ignored_until_a_score_exists() {
        let mut session = ScoreSession::new("Chess", "https://x/y");
        assert!(!session.share_enabled());
        assert_eq!(session.handle(Trigger::Share, || 1), Action::Ignored);
    }

    #[test]
    fn play_sets_score_and_enables_share() {
        let mut session = ScoreSession::new("Chess", "https://x/y");
        let action = session.handle(Trigger::Play, || 1234);
        assert_eq!(
            action,
            Action::ScoreUpdated {
                score: 1234,
                display: "1,234".to_string()
            }
        );
        assert!(session.share_enabled());

        match session.handle(Trigger::Share, || unreachable!()) {
            Action::Share(request) => {
                assert_eq!(request, ShareRequest::new("Chess", 1234, "https://x/y"));
            }
            other => panic!("expected share, got {other:?}"),
        }
    }

    #[test]
    fn new_score_replaces_old() {
        let mut session = ScoreSession::new("", "u");
        session.set_score(5);
        session.handle(Trigger::Play, || 9);
        assert_eq!(session.score(), Some(9));
        let Action::Share(request) = session.handle(Trigger::Share, || 0) else {
            panic!("expected share");
        };
        assert_eq!(request.game_name, "Unknown Game");
        assert_eq!(request.score, 9);
    }

    #[test]
    fn rolls_stay_in_range() {
        assert_eq!(roll_from_unit(0.0), 0);
        assert_eq!(roll_from_unit(0.5), 5_000);
        assert_eq!(roll_from_unit(0.999_999_9), 9_999);
        assert_eq!(roll_from_unit(1.0), 9_999);
        assert_eq!(roll_from_unit(-3.0), 0);
    }
}
