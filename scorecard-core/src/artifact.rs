//! The rendered score card and its optional binary form.

use base64::Engine;

use crate::error::{ShareError, ShareResult};

/// MIME type of the score card image.
pub const MIME_PNG: &str = "image/png";

/// A rendered score card, owned by the share invocation that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreCardArtifact {
    /// Embeddable image reference (`data:image/png;base64,...`).
    pub data_url: String,
    /// Declared width in pixels.
    pub width: u32,
    /// Declared height in pixels.
    pub height: u32,
    /// Encoded image bytes, absent when conversion failed.
    pub payload: Option<Vec<u8>>,
}

impl ScoreCardArtifact {
    /// Build an artifact from a data URL, converting it to bytes on a best-effort basis.
    ///
    /// A conversion failure is logged and leaves [`Self::payload`] empty.
    #[must_use]
    pub fn from_data_url(data_url: impl Into<String>, width: u32, height: u32) -> Self {
        let data_url = data_url.into();
        let payload = match decode_data_url(&data_url) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!("Unable to convert score card to binary payload: {e}");
                None
            }
        };
        Self {
            data_url,
            width,
            height,
            payload,
        }
    }

    /// Build an artifact from already encoded image bytes.
    #[must_use]
    pub fn from_encoded(bytes: Vec<u8>, mime: &str, width: u32, height: u32) -> Self {
        Self {
            data_url: encode_data_url(&bytes, mime),
            width,
            height,
            payload: Some(bytes),
        }
    }

    /// Whether a binary payload is available for attachment.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }
}

/// Encode bytes as a base64 data URL.
#[must_use]
pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}

/// Decode a base64 data URL (`data:<mime>;base64,<data>`) into bytes.
///
/// # Errors
///
/// Returns [`ShareError::Conversion`] if the URL is not a base64 data URL or
/// its body does not decode.
pub fn decode_data_url(uri: &str) -> ShareResult<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| ShareError::Conversion("Not a data URL".to_string()))?;

    let (metadata, encoded) = rest
        .split_once(',')
        .ok_or_else(|| ShareError::Conversion("Invalid data URL: missing comma".to_string()))?;

    if !metadata.ends_with(";base64") {
        return Err(ShareError::Conversion(
            "Data URL is not base64 encoded".to_string(),
        ));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| ShareError::Conversion(format!("Failed to decode base64: {e}")))?;

    if bytes.is_empty() {
        return Err(ShareError::Conversion("Data URL is empty".to_string()));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

    #[test]
    fn data_url_converts_to_payload() {
        let artifact =
            ScoreCardArtifact::from_data_url(format!("data:image/png;base64,{PNG_1X1}"), 1, 1);
        let payload = artifact.payload.expect("payload");
        assert_eq!(&payload[0..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn failed_conversion_leaves_payload_empty() {
        let artifact = ScoreCardArtifact::from_data_url("data:image/png;base64,@@@", 1200, 630);
        assert!(!artifact.has_payload());
        assert_eq!(artifact.data_url, "data:image/png;base64,@@@");
        assert_eq!((artifact.width, artifact.height), (1200, 630));

        assert!(!ScoreCardArtifact::from_data_url("data:,", 1, 1).has_payload());
        assert!(!ScoreCardArtifact::from_data_url("blob:xyz", 1, 1).has_payload());
    }

    #[test]
    fn encoded_bytes_produce_data_url() {
        let artifact = ScoreCardArtifact::from_encoded(vec![1, 2, 3], MIME_PNG, 1200, 630);
        assert_eq!(artifact.data_url, "data:image/png;base64,AQID");
        assert_eq!(decode_data_url(&artifact.data_url).expect("decode"), vec![1, 2, 3]);
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(decode_data_url("data:image/png;base64").is_err());
        assert!(decode_data_url("data:text/plain,hello").is_err());
        assert!(decode_data_url("https://example.com/card.png").is_err());
    }
}
