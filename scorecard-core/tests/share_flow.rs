//! Integration tests for the share flow (scorecard-core).
//!
//! Drives `ShareDispatcher` with recording fakes for every collaborator and
//! checks the order of side effects and the chosen channel.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use scorecard_core::{
    Analytics, AnalyticsEvent, CardRenderer, FallbackContent, FallbackSurface, FileAttachment,
    NativeShare, ScoreCard, ScoreCardArtifact, ShareDispatcher, ShareError, ShareOutcome,
    SharePayload, ShareRequest, ShareResult,
};

type Log = Rc<RefCell<Vec<String>>>;

const PNG_1X1: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

#[derive(Clone, Copy)]
enum RenderMode {
    WithPayload,
    NoPayload,
    Broken,
}

struct FakeRenderer {
    mode: RenderMode,
    log: Log,
}

impl CardRenderer for FakeRenderer {
    fn render(&self, card: &ScoreCard) -> ShareResult<ScoreCardArtifact> {
        self.log
            .borrow_mut()
            .push(format!("render {} {}", card.game_name, card.score));
        match self.mode {
            RenderMode::WithPayload => Ok(ScoreCardArtifact::from_data_url(
                PNG_1X1,
                card.width(),
                card.height(),
            )),
            RenderMode::NoPayload => Ok(ScoreCardArtifact::from_data_url(
                "data:image/png;base64,not-base64!",
                card.width(),
                card.height(),
            )),
            RenderMode::Broken => Err(ShareError::Render("no 2d context".to_string())),
        }
    }
}

#[derive(Default)]
struct NativeState {
    available: bool,
    can_share_files: bool,
    packaging_fails: bool,
    rejects: bool,
    payloads: RefCell<Vec<SharePayload<String>>>,
}

struct FakeNative {
    state: Rc<NativeState>,
    log: Log,
}

#[async_trait(?Send)]
impl NativeShare for FakeNative {
    type File = String;

    fn is_available(&self) -> bool {
        self.state.available
    }

    fn package_file(&self, attachment: &FileAttachment<'_>) -> ShareResult<String> {
        if self.state.packaging_fails {
            return Err(ShareError::Attachment("File constructor missing".to_string()));
        }
        assert!(!attachment.bytes.is_empty());
        Ok(format!("{} ({})", attachment.name, attachment.mime))
    }

    fn can_share_files(&self, _files: &[String]) -> bool {
        self.state.can_share_files
    }

    async fn share(&self, payload: SharePayload<String>) -> ShareResult<()> {
        self.log.borrow_mut().push("native share".to_string());
        self.state.payloads.borrow_mut().push(payload);
        if self.state.rejects {
            Err(ShareError::Rejected("AbortError: Share canceled".to_string()))
        } else {
            Ok(())
        }
    }
}

struct SurfaceState {
    present: bool,
    visible: Cell<bool>,
    reveals: Cell<u32>,
    content: RefCell<Option<FallbackContent>>,
}

struct FakeSurface {
    state: Rc<SurfaceState>,
    log: Log,
}

impl FallbackSurface for FakeSurface {
    fn hide(&self) {
        self.log.borrow_mut().push("hide".to_string());
        self.state.visible.set(false);
    }

    fn reveal(&self, content: &FallbackContent) -> bool {
        if !self.state.present {
            return false;
        }
        self.log.borrow_mut().push("reveal".to_string());
        self.state.visible.set(true);
        self.state.reveals.set(self.state.reveals.get() + 1);
        *self.state.content.borrow_mut() = Some(content.clone());
        true
    }
}

struct RecordingAnalytics {
    events: RefCell<Vec<AnalyticsEvent>>,
    log: Log,
}

impl Analytics for RecordingAnalytics {
    fn track_event(&self, event: &AnalyticsEvent) {
        self.log.borrow_mut().push(format!("track {}", event.name));
        self.events.borrow_mut().push(event.clone());
    }
}

struct Harness {
    log: Log,
    native: Rc<NativeState>,
    surface: Rc<SurfaceState>,
    analytics: Rc<RecordingAnalytics>,
    dispatcher: ShareDispatcher<FakeRenderer, FakeNative, FakeSurface, Rc<RecordingAnalytics>>,
}

fn harness(mode: RenderMode, native: NativeState, surface_present: bool) -> Harness {
    let log: Log = Rc::default();
    let native = Rc::new(native);
    let surface = Rc::new(SurfaceState {
        present: surface_present,
        visible: Cell::new(true),
        reveals: Cell::new(0),
        content: RefCell::new(None),
    });
    let analytics = Rc::new(RecordingAnalytics {
        events: RefCell::default(),
        log: Rc::clone(&log),
    });
    let dispatcher = ShareDispatcher::new(
        FakeRenderer {
            mode,
            log: Rc::clone(&log),
        },
        FakeNative {
            state: Rc::clone(&native),
            log: Rc::clone(&log),
        },
        FakeSurface {
            state: Rc::clone(&surface),
            log: Rc::clone(&log),
        },
        Rc::clone(&analytics),
    );
    Harness {
        log,
        native,
        surface,
        analytics,
        dispatcher,
    }
}

fn sharing_platform() -> NativeState {
    NativeState {
        available: true,
        can_share_files: true,
        ..NativeState::default()
    }
}

fn query_text(link: &str) -> String {
    let parsed = url::Url::parse(link).expect("valid link");
    parsed
        .query_pairs()
        .find(|(key, _)| key == "text")
        .map(|(_, value)| value.into_owned())
        .expect("text parameter")
}

// ==========================================================================
// Native share unavailable
// ==========================================================================

#[tokio::test]
async fn test_no_native_share_shows_fallback_with_links() {
    let h = harness(RenderMode::WithPayload, NativeState::default(), true);
    let request = ShareRequest::new("Chess", 42, "https://arcade.test/chess?x=1&y=2");

    let outcome = h.dispatcher.share_score(&request).await;

    assert_eq!(outcome, ShareOutcome::Fallback);
    assert!(h.surface.visible.get());
    assert_eq!(h.surface.reveals.get(), 1);
    assert!(h.native.payloads.borrow().is_empty());

    let content = h.surface.content.borrow().clone().expect("content");
    let expected = "Chess - Score: 42 https://arcade.test/chess?x=1&y=2";
    assert_eq!(content.text, expected);
    assert!(content
        .links
        .twitter
        .starts_with("https://twitter.com/intent/tweet?text="));
    assert!(content
        .links
        .whatsapp
        .starts_with("https://api.whatsapp.com/send?text="));
    assert_eq!(query_text(&content.links.twitter), expected);
    assert_eq!(query_text(&content.links.whatsapp), expected);
    assert_eq!(content.image_src.as_deref(), Some(PNG_1X1));
}

#[tokio::test]
async fn test_links_round_trip_unicode_and_reserved_characters() {
    let h = harness(RenderMode::WithPayload, NativeState::default(), true);
    let request = ShareRequest::new("Échecs & Dames #1", 9_999, "https://x.test/?q=a+b");

    h.dispatcher.share_score(&request).await;

    let content = h.surface.content.borrow().clone().expect("content");
    assert_eq!(query_text(&content.links.twitter), request.share_text());
    assert_eq!(query_text(&content.links.whatsapp), request.share_text());
}

// ==========================================================================
// Native share available
// ==========================================================================

#[tokio::test]
async fn test_native_success_never_reveals_fallback() {
    let h = harness(RenderMode::WithPayload, sharing_platform(), true);
    let request = ShareRequest::new("Chess", 42, "https://x/y");

    let outcome = h.dispatcher.share_score(&request).await;

    assert_eq!(outcome, ShareOutcome::Native);
    assert!(!h.surface.visible.get(), "surface hidden before the attempt");
    assert_eq!(h.surface.reveals.get(), 0);

    let payloads = h.native.payloads.borrow();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].title, "Chess score");
    assert_eq!(payloads[0].text, "Chess - Score: 42 https://x/y");
    assert_eq!(payloads[0].url, "https://x/y");
    assert_eq!(payloads[0].files, vec!["Chess-score.png (image/png)".to_string()]);
}

#[tokio::test]
async fn test_native_rejection_falls_back_once_after_analytics() {
    let h = harness(
        RenderMode::WithPayload,
        NativeState {
            rejects: true,
            ..sharing_platform()
        },
        true,
    );
    let request = ShareRequest::new("Chess", 42, "https://x/y");

    let outcome = h.dispatcher.share_score(&request).await;

    assert_eq!(outcome, ShareOutcome::Fallback);
    assert_eq!(h.surface.reveals.get(), 1);
    assert_eq!(h.native.payloads.borrow().len(), 1, "no automatic retry");
    assert_eq!(
        *h.log.borrow(),
        vec![
            "render Chess 42".to_string(),
            "track share".to_string(),
            "hide".to_string(),
            "native share".to_string(),
            "reveal".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_files_dropped_when_platform_cannot_share_them() {
    let h = harness(
        RenderMode::WithPayload,
        NativeState {
            can_share_files: false,
            ..sharing_platform()
        },
        true,
    );

    let outcome = h
        .dispatcher
        .share_score(&ShareRequest::new("Chess", 1, "u"))
        .await;

    assert_eq!(outcome, ShareOutcome::Native);
    assert!(h.native.payloads.borrow()[0].files.is_empty());
}

#[tokio::test]
async fn test_packaging_failure_shares_without_attachment() {
    let h = harness(
        RenderMode::WithPayload,
        NativeState {
            packaging_fails: true,
            ..sharing_platform()
        },
        true,
    );

    let outcome = h
        .dispatcher
        .share_score(&ShareRequest::new("Chess", 1, "u"))
        .await;

    assert_eq!(outcome, ShareOutcome::Native);
    assert!(h.native.payloads.borrow()[0].files.is_empty());
}

// ==========================================================================
// Rendering failures
// ==========================================================================

#[tokio::test]
async fn test_missing_payload_still_completes_with_data_url() {
    let h = harness(RenderMode::NoPayload, sharing_platform(), true);

    let outcome = h
        .dispatcher
        .share_score(&ShareRequest::new("Chess", 1, "u"))
        .await;
    assert_eq!(outcome, ShareOutcome::Native);
    assert!(h.native.payloads.borrow()[0].files.is_empty());

    let h = harness(RenderMode::NoPayload, NativeState::default(), true);
    let outcome = h
        .dispatcher
        .share_score(&ShareRequest::new("Chess", 1, "u"))
        .await;
    assert_eq!(outcome, ShareOutcome::Fallback);
    let content = h.surface.content.borrow().clone().expect("content");
    assert_eq!(
        content.image_src.as_deref(),
        Some("data:image/png;base64,not-base64!")
    );
}

#[tokio::test]
async fn test_render_failure_shows_links_without_image() {
    let h = harness(RenderMode::Broken, NativeState::default(), true);

    let outcome = h
        .dispatcher
        .share_score(&ShareRequest::new("Chess", 1, "u"))
        .await;

    assert_eq!(outcome, ShareOutcome::Fallback);
    let content = h.surface.content.borrow().clone().expect("content");
    assert!(content.image_src.is_none());
    assert_eq!(content.text, "Chess - Score: 1 u");
}

// ==========================================================================
// Edge cases
// ==========================================================================

#[tokio::test]
async fn test_blank_game_name_uses_placeholder_everywhere() {
    let h = harness(RenderMode::WithPayload, NativeState::default(), true);

    h.dispatcher
        .share_score(&ShareRequest::new("", 0, "https://x/y"))
        .await;

    let content = h.surface.content.borrow().clone().expect("content");
    assert_eq!(content.text, "Unknown Game - Score: 0 https://x/y");
    assert_eq!(h.log.borrow()[0], "render Unknown Game 0");

    let events = h.analytics.events.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].attributes["game"], "Unknown Game");
    assert_eq!(events[0].attributes["score"], 0);
}

#[tokio::test]
async fn test_missing_surface_reports_nothing() {
    let h = harness(RenderMode::WithPayload, NativeState::default(), false);

    let outcome = h
        .dispatcher
        .share_score(&ShareRequest::new("Chess", 1, "u"))
        .await;

    assert_eq!(outcome, ShareOutcome::Nothing);
    assert_eq!(h.surface.reveals.get(), 0);
}

#[tokio::test]
async fn test_repeated_invocations_are_independent() {
    let h = harness(RenderMode::WithPayload, NativeState::default(), true);

    h.dispatcher
        .share_score(&ShareRequest::new("Chess", 1, "u"))
        .await;
    h.dispatcher
        .share_score(&ShareRequest::new("Go", 2, "u"))
        .await;

    assert_eq!(h.surface.reveals.get(), 2);
    let content = h.surface.content.borrow().clone().expect("content");
    assert_eq!(content.text, "Go - Score: 2 u");
    assert_eq!(h.analytics.events.borrow().len(), 2);
    assert_eq!(
        h.log.borrow().iter().filter(|e| e.as_str() == "hide").count(),
        2
    );
}
