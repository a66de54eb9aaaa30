//! Collaborator seams implemented by each host (browser, native).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::artifact::ScoreCardArtifact;
use crate::card::ScoreCard;
use crate::error::{ShareError, ShareResult};
use crate::links::ShareLinks;

/// Produces the score card image.
pub trait CardRenderer {
    /// Draw and encode a card.
    ///
    /// # Errors
    ///
    /// Returns an error if the card cannot be drawn or encoded at all. A
    /// failed binary conversion is not an error; it yields an artifact
    /// without payload.
    fn render(&self, card: &ScoreCard) -> ShareResult<ScoreCardArtifact>;
}

/// A file to attach to a native share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment<'a> {
    /// File name, e.g. `Chess-score.png`.
    pub name: String,
    /// MIME type.
    pub mime: &'static str,
    /// File contents.
    pub bytes: &'a [u8],
}

/// Structured payload for the native share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload<F> {
    /// Sheet title.
    pub title: String,
    /// Share text.
    pub text: String,
    /// Canonical URL.
    pub url: String,
    /// Attachments, empty when files are unsupported.
    pub files: Vec<F>,
}

/// Platform-level share sheet.
#[async_trait(?Send)]
pub trait NativeShare {
    /// Platform file handle.
    type File;

    /// Whether the platform can share at all.
    fn is_available(&self) -> bool;

    /// Package bytes as a platform file.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Attachment`] if the file cannot be created.
    fn package_file(&self, attachment: &FileAttachment<'_>) -> ShareResult<Self::File>;

    /// Whether a payload carrying these files can be shared.
    fn can_share_files(&self, files: &[Self::File]) -> bool;

    /// Open the share sheet and wait until it settles.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Rejected`] on cancellation, permission denial or
    /// platform error.
    async fn share(&self, payload: SharePayload<Self::File>) -> ShareResult<()>;
}

/// A platform without native sharing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[async_trait(?Send)]
impl NativeShare for Unavailable {
    type File = ();

    fn is_available(&self) -> bool {
        false
    }

    fn package_file(&self, _attachment: &FileAttachment<'_>) -> ShareResult<()> {
        Err(ShareError::Unavailable)
    }

    fn can_share_files(&self, _files: &[()]) -> bool {
        false
    }

    async fn share(&self, _payload: SharePayload<()>) -> ShareResult<()> {
        Err(ShareError::Unavailable)
    }
}

/// What the fallback surface shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackContent {
    /// Raw share text.
    pub text: String,
    /// Channel links.
    pub links: ShareLinks,
    /// Rendered card reference, absent if rendering failed.
    pub image_src: Option<String>,
    /// Alternative text for the card image.
    pub image_alt: String,
}

impl FallbackContent {
    /// Assemble the fallback content.
    #[must_use]
    pub fn new(text: String, links: ShareLinks, image_src: Option<String>) -> Self {
        let image_alt = format!("Score card for {text}");
        Self {
            text,
            links,
            image_src,
            image_alt,
        }
    }
}

/// On-page region shown when native sharing is unavailable or declined.
pub trait FallbackSurface {
    /// Hide the surface. Idempotent.
    fn hide(&self);

    /// Fill the surface and make it visible.
    ///
    /// Returns `false` if the surface is not present on this host.
    fn reveal(&self, content: &FallbackContent) -> bool;
}
