//! Share dispatcher: render, track, then try each share channel in order.
//!
//! ```text
//! render card ─▶ compose text ─▶ links ─▶ analytics ─▶ hide fallback
//!                                                          │
//!                         ┌────────────────────────────────┘
//!                         ▼
//!               [Native] ──declined/unavailable──▶ [Fallback]
//! ```
//!
//! Nothing here returns an error. Every collaborator failure degrades to
//! the next attempt and the caller only learns which channel completed.

use serde::{Deserialize, Serialize};

use crate::analytics::{Analytics, AnalyticsEvent};
use crate::artifact::{ScoreCardArtifact, MIME_PNG};
use crate::card::ScoreCard;
use crate::links::ShareLinks;
use crate::platform::{
    CardRenderer, FallbackContent, FallbackSurface, FileAttachment, NativeShare, SharePayload,
};
use crate::request::ShareRequest;

/// Result of a single share attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptOutcome {
    /// The channel completed; stop here.
    Succeeded,
    /// The channel was tried and rejected (including user cancellation).
    Declined,
    /// The channel does not exist on this platform.
    Unavailable,
}

/// Share channels in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attempt {
    /// Platform share sheet.
    Native,
    /// On-page links and image.
    Fallback,
}

impl Attempt {
    /// Attempt order.
    pub const ORDER: [Attempt; 2] = [Attempt::Native, Attempt::Fallback];
}

/// Observable result of a share invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareOutcome {
    /// The native share sheet completed.
    Native,
    /// The fallback surface is showing.
    Fallback,
    /// Neither channel exists on this host.
    Nothing,
}

impl ShareOutcome {
    /// Lowercase name, as exposed to JavaScript callers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Fallback => "fallback",
            Self::Nothing => "nothing",
        }
    }
}

impl From<Attempt> for ShareOutcome {
    fn from(attempt: Attempt) -> Self {
        match attempt {
            Attempt::Native => Self::Native,
            Attempt::Fallback => Self::Fallback,
        }
    }
}

/// Runs the share flow against a set of host collaborators.
///
/// The dispatcher holds no per-invocation state, so overlapping calls to
/// [`Self::share_score`] run independently of each other.
pub struct ShareDispatcher<R, N, F, A> {
    renderer: R,
    native: N,
    fallback: F,
    analytics: A,
}

impl<R, N, F, A> ShareDispatcher<R, N, F, A>
where
    R: CardRenderer,
    N: NativeShare,
    F: FallbackSurface,
    A: Analytics,
{
    /// Create a dispatcher from its collaborators.
    #[must_use]
    pub fn new(renderer: R, native: N, fallback: F, analytics: A) -> Self {
        Self {
            renderer,
            native,
            fallback,
            analytics,
        }
    }

    /// The fallback surface this dispatcher reveals.
    #[must_use]
    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    /// Share a score, returning once the flow settles.
    pub async fn share_score(&self, request: &ShareRequest) -> ShareOutcome {
        let card = ScoreCard::new(&request.game_name, request.score);
        let artifact = match self.renderer.render(&card) {
            Ok(artifact) => Some(artifact),
            Err(e) => {
                tracing::error!("Score card rendering failed, sharing without image: {e}");
                None
            }
        };

        let text = request.share_text();
        let links = ShareLinks::from_text(&text);

        self.analytics.track_event(&AnalyticsEvent::share(request));
        self.fallback.hide();

        for attempt in Attempt::ORDER {
            let outcome = match attempt {
                Attempt::Native => self.attempt_native(request, &text, artifact.as_ref()).await,
                Attempt::Fallback => self.attempt_fallback(&text, &links, artifact.as_ref()),
            };
            tracing::debug!(?attempt, ?outcome, "Share attempt settled");
            if outcome == AttemptOutcome::Succeeded {
                return attempt.into();
            }
        }

        tracing::warn!("No share channel available");
        ShareOutcome::Nothing
    }

    async fn attempt_native(
        &self,
        request: &ShareRequest,
        text: &str,
        artifact: Option<&ScoreCardArtifact>,
    ) -> AttemptOutcome {
        if !self.native.is_available() {
            return AttemptOutcome::Unavailable;
        }

        let payload = SharePayload {
            title: request.title(),
            text: text.to_string(),
            url: request.share_url.clone(),
            files: self.attachments(request, artifact),
        };

        match self.native.share(payload).await {
            Ok(()) => AttemptOutcome::Succeeded,
            Err(e) => {
                tracing::warn!("Native share failed: {e}");
                AttemptOutcome::Declined
            }
        }
    }

    /// Package the card payload as a file, or nothing if the platform can't take it.
    fn attachments(
        &self,
        request: &ShareRequest,
        artifact: Option<&ScoreCardArtifact>,
    ) -> Vec<N::File> {
        let Some(bytes) = artifact.and_then(|a| a.payload.as_deref()) else {
            return Vec::new();
        };

        let attachment = FileAttachment {
            name: request.attachment_name(),
            mime: MIME_PNG,
            bytes,
        };

        match self.native.package_file(&attachment) {
            Ok(file) => {
                let files = vec![file];
                if self.native.can_share_files(&files) {
                    files
                } else {
                    tracing::debug!("Platform cannot share files, sharing without attachment");
                    Vec::new()
                }
            }
            Err(e) => {
                tracing::warn!("Unable to create score card file: {e}");
                Vec::new()
            }
        }
    }

    fn attempt_fallback(
        &self,
        text: &str,
        links: &ShareLinks,
        artifact: Option<&ScoreCardArtifact>,
    ) -> AttemptOutcome {
        let content = FallbackContent::new(
            text.to_string(),
            links.clone(),
            artifact.map(|a| a.data_url.clone()),
        );
        if self.fallback.reveal(&content) {
            AttemptOutcome::Succeeded
        } else {
            AttemptOutcome::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempts_native_before_fallback() {
        assert_eq!(Attempt::ORDER, [Attempt::Native, Attempt::Fallback]);
        assert_eq!(ShareOutcome::from(Attempt::Native), ShareOutcome::Native);
        assert_eq!(ShareOutcome::from(Attempt::Fallback), ShareOutcome::Fallback);
    }

    #[test]
    fn outcome_names() {
        assert_eq!(ShareOutcome::Native.as_str(), "native");
        assert_eq!(ShareOutcome::Fallback.as_str(), "fallback");
        assert_eq!(ShareOutcome::Nothing.as_str(), "nothing");
        assert_eq!(
            serde_json::to_string(&AttemptOutcome::Declined).expect("json"),
            "\"declined\""
        );
    }
}
