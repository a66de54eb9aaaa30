//! # Scorecard WASM Application
//!
//! Browser host for the share-your-score flow: renders the card on a 2D
//! canvas, opens the native share sheet when the browser has one and falls
//! back to on-page social links otherwise.
//!
//! ## Usage
//!
//! Build for WASM:
//! ```bash
//! wasm-pack build --target web scorecard-app
//! ```
//!
//! Then import in JavaScript:
//! ```javascript
//! import init, { ShareApp, shareScore } from './pkg/scorecard_app.js';
//!
//! await init();
//! const app = new ShareApp();          // wires #play-btn and #share-btn
//! await shareScore('Chess', 42);       // or share directly
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod canvas;
mod js;
pub mod navigator;
pub mod surface;

use std::{cell::RefCell, rc::Rc};

use scorecard_core::session::roll_from_unit;
use scorecard_core::{
    Action, ScoreSession, ShareDispatcher, ShareOutcome, ShareRequest, Trigger, UNKNOWN_GAME,
};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlButtonElement};

pub use analytics::ConsoleAnalytics;
pub use canvas::CanvasCardRenderer;
pub use navigator::BrowserShare;
pub use surface::DomFallbackSurface;

/// Play control id.
pub const PLAY_BUTTON_ID: &str = "play-btn";
/// Share control id.
pub const SHARE_BUTTON_ID: &str = "share-btn";
/// Score display id.
pub const SCORE_VALUE_ID: &str = "score-value";
/// Game name source id.
pub const GAME_NAME_ID: &str = "game-name";

/// Dispatcher wired to browser collaborators.
pub type WebDispatcher =
    ShareDispatcher<CanvasCardRenderer, BrowserShare, DomFallbackSurface, ConsoleAnalytics>;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    console_error_panic_hook::set_once();
    if tracing_wasm::try_set_as_global_default().is_err() {
        web_sys::console::warn_1(&"tracing subscriber already installed".into());
    }
    tracing::info!("Scorecard WASM initialized");
}

/// Build a dispatcher for the current window.
fn web_dispatcher() -> Result<(WebDispatcher, web_sys::Window, Document), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))?;

    let dispatcher = ShareDispatcher::new(
        CanvasCardRenderer::new(document.clone()),
        BrowserShare::new(window.navigator()),
        DomFallbackSurface::new(document.clone()),
        ConsoleAnalytics,
    );
    Ok((dispatcher, window, document))
}

/// Convert a JS number to a score: finite, non-negative, integral.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn score_from_js(score: f64) -> u64 {
    if score.is_finite() && score > 0.0 {
        score.floor() as u64
    } else {
        0
    }
}

/// Share a score: native share sheet if possible, on-page links otherwise.
///
/// `share_url` defaults to the current page location. Resolves to
/// `"native"`, `"fallback"` or `"nothing"`; never rejects.
#[wasm_bindgen(js_name = shareScore)]
pub async fn share_score(game_name: String, score: f64, share_url: Option<String>) -> String {
    let (dispatcher, window, _) = match web_dispatcher() {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!("Cannot share outside a browser window: {:?}", e);
            return ShareOutcome::Nothing.as_str().to_string();
        }
    };

    let share_url = share_url
        .or_else(|| window.location().href().ok())
        .unwrap_or_default();
    let request = ShareRequest::new(game_name, score_from_js(score), share_url);

    dispatcher.share_score(&request).await.as_str().to_string()
}

/// Page controls the app updates.
struct Controls {
    document: Document,
    share_button: Option<HtmlButtonElement>,
    score_value: Option<Element>,
}

impl Controls {
    fn game_name(&self) -> String {
        self.document
            .get_element_by_id(GAME_NAME_ID)
            .and_then(|el| el.text_content())
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_GAME.to_string())
    }

    fn show_score(&self, display: &str) {
        if let Some(score_value) = &self.score_value {
            score_value.set_text_content(Some(display));
        }
        if let Some(button) = &self.share_button {
            button.set_disabled(false);
        }
    }
}

struct AppInner {
    session: RefCell<ScoreSession>,
    dispatcher: WebDispatcher,
    controls: Controls,
}

impl AppInner {
    fn dispatch(self: &Rc<Self>, trigger: Trigger) {
        if trigger == Trigger::Share {
            let game_name = self.controls.game_name();
            self.session.borrow_mut().set_game_name(game_name);
        }

        let action = self
            .session
            .borrow_mut()
            .handle(trigger, || roll_from_unit(js_sys::Math::random()));

        match action {
            Action::ScoreUpdated { display, .. } => self.controls.show_score(&display),
            Action::Share(request) => {
                let app = Rc::clone(self);
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = app.dispatcher.share_score(&request).await;
                    tracing::debug!("Share settled: {}", outcome.as_str());
                });
            }
            Action::Ignored => tracing::debug!("Share ignored: no score yet"),
        }
    }
}

type Listener = Closure<dyn FnMut(Event)>;

/// The share demo page: play rolls a score, share runs the share flow.
#[wasm_bindgen]
pub struct ShareApp {
    inner: Rc<AppInner>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl ShareApp {
    /// Wire the page controls and preload a score.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no window or document.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ShareApp, JsValue> {
        let (dispatcher, window, document) = web_dispatcher()?;
        let share_url = window.location().href()?;

        let share_button = document
            .get_element_by_id(SHARE_BUTTON_ID)
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        if let Some(button) = &share_button {
            button.set_disabled(true);
        }

        let controls = Controls {
            score_value: document.get_element_by_id(SCORE_VALUE_ID),
            share_button,
            document: document.clone(),
        };
        let inner = Rc::new(AppInner {
            session: RefCell::new(ScoreSession::new(controls.game_name(), share_url)),
            dispatcher,
            controls,
        });

        let mut listeners = Vec::new();
        for (id, trigger) in [
            (PLAY_BUTTON_ID, Trigger::Play),
            (SHARE_BUTTON_ID, Trigger::Share),
        ] {
            let Some(control) = document.get_element_by_id(id) else {
                tracing::warn!("Control #{id} not found");
                continue;
            };
            let app = Rc::clone(&inner);
            let listener = Listener::new(move |_event: Event| app.dispatch(trigger));
            control.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
            listeners.push(listener);
        }

        inner.dispatch(Trigger::Play);

        Ok(Self {
            inner,
            _listeners: listeners,
        })
    }

    /// Roll a new score.
    pub fn play(&self) {
        self.inner.dispatch(Trigger::Play);
    }

    /// Share the current score (ignored until a score exists).
    pub fn share(&self) {
        self.inner.dispatch(Trigger::Share);
    }

    /// Current score, if any.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        self.inner.session.borrow().score().map(|s| s as f64)
    }

    /// Whether the share control is enabled.
    #[wasm_bindgen(js_name = shareEnabled)]
    #[must_use]
    pub fn share_enabled(&self) -> bool {
        self.inner.session.borrow().share_enabled()
    }
}
