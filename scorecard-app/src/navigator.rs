//! `navigator.share` adapter.
//!
//! The Web Share API is feature-detected through `Reflect` rather than the
//! typed bindings, since browsers without it simply lack the methods.

use async_trait::async_trait;
use js_sys::{Array, Object, Promise, Uint8Array};
use scorecard_core::{FileAttachment, NativeShare, ShareError, SharePayload, ShareResult};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FilePropertyBag, Navigator};

use crate::js::{describe, method, set};

/// Native share sheet backed by the browser's Web Share API.
pub struct BrowserShare {
    navigator: Navigator,
}

impl BrowserShare {
    /// Wrap the window's navigator.
    #[must_use]
    pub fn new(navigator: Navigator) -> Self {
        Self { navigator }
    }

    fn files_array(files: &[File]) -> Array {
        files.iter().collect()
    }
}

#[async_trait(?Send)]
impl NativeShare for BrowserShare {
    type File = File;

    fn is_available(&self) -> bool {
        method(&self.navigator, "share").is_some()
    }

    fn package_file(&self, attachment: &FileAttachment<'_>) -> ShareResult<File> {
        let bytes = Uint8Array::from(attachment.bytes);
        let parts = Array::of1(&bytes);

        let options = FilePropertyBag::new();
        options.set_type(attachment.mime);
        options.set_last_modified(js_sys::Date::now());

        File::new_with_u8_array_sequence_and_options(&parts, &attachment.name, &options)
            .map_err(|e| ShareError::Attachment(describe(&e)))
    }

    fn can_share_files(&self, files: &[File]) -> bool {
        let Some(can_share) = method(&self.navigator, "canShare") else {
            return false;
        };
        let data = Object::new();
        set(&data, "files", &Self::files_array(files));
        can_share
            .call1(&self.navigator, &data)
            .map(|verdict| verdict.is_truthy())
            .unwrap_or(false)
    }

    async fn share(&self, payload: SharePayload<File>) -> ShareResult<()> {
        let share = method(&self.navigator, "share").ok_or(ShareError::Unavailable)?;

        let data = Object::new();
        set(&data, "title", &JsValue::from_str(&payload.title));
        set(&data, "text", &JsValue::from_str(&payload.text));
        set(&data, "url", &JsValue::from_str(&payload.url));
        if !payload.files.is_empty() {
            set(&data, "files", &Self::files_array(&payload.files));
        }

        let promise = share
            .call1(&self.navigator, &data)
            .map_err(|e| ShareError::Rejected(describe(&e)))?
            .dyn_into::<Promise>()
            .map_err(|_| ShareError::Rejected("share() did not return a promise".to_string()))?;

        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| ShareError::Rejected(describe(&e)))
    }
}
