//! # Scorecard Core
//!
//! Platform-independent "share your score" logic. Hosts (the browser app,
//! the native CLI) plug in a card renderer, a native share sheet, a
//! fallback surface and an analytics sink.
//!
//! ## Flow
//!
//! ```text
//! ┌───────────┐   ┌────────────────┐   ┌─────────────────────────┐
//! │  Trigger  │──▶│  ScoreSession  │──▶│     ShareDispatcher     │
//! │ play/share│   │ (current score)│   │ render ─▶ native share  │
//! └───────────┘   └────────────────┘   │        ╰▶ fallback links │
//!                                      └─────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod artifact;
pub mod card;
pub mod dispatcher;
pub mod error;
pub mod links;
pub mod platform;
pub mod request;
pub mod session;

pub use analytics::{Analytics, AnalyticsEvent, NoopAnalytics, TracingAnalytics};
pub use artifact::{ScoreCardArtifact, MIME_PNG};
pub use card::{Color, Font, GradientStop, Layer, ScoreCard, CARD_HEIGHT, CARD_WIDTH};
pub use dispatcher::{Attempt, AttemptOutcome, ShareDispatcher, ShareOutcome};
pub use error::{ShareError, ShareResult};
pub use links::{Channel, ShareLinks};
pub use platform::{
    CardRenderer, FallbackContent, FallbackSurface, FileAttachment, NativeShare, SharePayload,
    Unavailable,
};
pub use request::{compose_share_text, format_score_display, ShareRequest, UNKNOWN_GAME};
pub use session::{Action, ScoreSession, Trigger};

/// Scorecard core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
