//! On-page fallback: social links, share text and the card image.

use scorecard_core::{FallbackContent, FallbackSurface};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlImageElement, HtmlInputElement, HtmlTextAreaElement,
};

/// Container toggled between shown and hidden.
pub const SHARE_RESULT_ID: &str = "share-result";
/// Tweet composer link.
pub const TWITTER_LINK_ID: &str = "twitter-link";
/// WhatsApp link.
pub const WHATSAPP_LINK_ID: &str = "whatsapp-link";
/// Read-only share text field.
pub const SHARE_TEXT_ID: &str = "share-text";
/// Score card preview.
pub const SCORE_CARD_IMAGE_ID: &str = "score-card-image";
/// CSS class hiding the container.
pub const HIDDEN_CLASS: &str = "hidden";

struct Slots {
    root: Element,
    twitter: HtmlAnchorElement,
    whatsapp: HtmlAnchorElement,
    text: Element,
    image: HtmlImageElement,
}

/// [`FallbackSurface`] over the page's `#share-result` region.
///
/// Elements are looked up on every call; if any is missing the surface
/// counts as absent and nothing is touched.
pub struct DomFallbackSurface {
    document: Document,
}

impl DomFallbackSurface {
    /// Bind to `document`.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element<T: JsCast>(&self, id: &str) -> Option<T> {
        self.document.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    fn slots(&self) -> Option<Slots> {
        Some(Slots {
            root: self.document.get_element_by_id(SHARE_RESULT_ID)?,
            twitter: self.element(TWITTER_LINK_ID)?,
            whatsapp: self.element(WHATSAPP_LINK_ID)?,
            text: self.document.get_element_by_id(SHARE_TEXT_ID)?,
            image: self.element(SCORE_CARD_IMAGE_ID)?,
        })
    }
}

/// Fill a text field, whether it is an `<input>`, a `<textarea>` or plain text.
fn set_text_value(field: &Element, text: &str) {
    if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(text);
    } else if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.set_value(text);
    } else {
        field.set_text_content(Some(text));
    }
}

impl FallbackSurface for DomFallbackSurface {
    fn hide(&self) {
        if let Some(root) = self.document.get_element_by_id(SHARE_RESULT_ID) {
            let _ = root.class_list().add_1(HIDDEN_CLASS);
        }
    }

    fn reveal(&self, content: &FallbackContent) -> bool {
        let Some(slots) = self.slots() else {
            tracing::debug!("Fallback surface not present on this page");
            return false;
        };

        slots.twitter.set_href(&content.links.twitter);
        slots.whatsapp.set_href(&content.links.whatsapp);
        set_text_value(&slots.text, &content.text);
        match &content.image_src {
            Some(src) => slots.image.set_src(src),
            None => {
                let _ = slots.image.remove_attribute("src");
            }
        }
        slots.image.set_alt(&content.image_alt);

        slots.root.class_list().remove_1(HIDDEN_CLASS).is_ok()
    }
}
