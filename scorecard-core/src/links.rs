//! Pre-filled social composer links.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::request::ShareRequest;

/// Characters left intact by ECMAScript `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query component the way browsers' `encodeURIComponent` does.
#[must_use]
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// External sharing destination with a pre-filled composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Twitter / X tweet composer.
    Twitter,
    /// WhatsApp send dialog.
    WhatsApp,
}

impl Channel {
    /// Every supported channel, in display order.
    pub const ALL: [Channel; 2] = [Channel::Twitter, Channel::WhatsApp];

    /// Composer endpoint for this channel.
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Twitter => "https://twitter.com/intent/tweet",
            Self::WhatsApp => "https://api.whatsapp.com/send",
        }
    }

    /// Build the composer link carrying `text`.
    #[must_use]
    pub fn link(self, text: &str) -> String {
        format!("{}?text={}", self.endpoint(), encode_component(text))
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Twitter => write!(f, "Twitter"),
            Self::WhatsApp => write!(f, "WhatsApp"),
        }
    }
}

/// Links for every channel, derived from one share text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLinks {
    /// Tweet composer link.
    pub twitter: String,
    /// WhatsApp send link.
    pub whatsapp: String,
}

impl ShareLinks {
    /// Derive links from already composed share text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            twitter: Channel::Twitter.link(text),
            whatsapp: Channel::WhatsApp.link(text),
        }
    }

    /// Derive links for a request.
    #[must_use]
    pub fn for_request(request: &ShareRequest) -> Self {
        Self::from_text(&request.share_text())
    }

    /// Link for a single channel.
    #[must_use]
    pub fn get(&self, channel: Channel) -> &str {
        match channel {
            Channel::Twitter => &self.twitter,
            Channel::WhatsApp => &self.whatsapp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(
            encode_component("Chess - Score: 42 https://x/y"),
            "Chess%20-%20Score%3A%2042%20https%3A%2F%2Fx%2Fy"
        );
        assert_eq!(encode_component("a!b~c*d'e(f)g_h.i"), "a!b~c*d'e(f)g_h.i");
        assert_eq!(encode_component("a&b=c?d#e+f"), "a%26b%3Dc%3Fd%23e%2Bf");
    }

    #[test]
    fn encodes_utf8_as_bytes() {
        assert_eq!(encode_component("é"), "%C3%A9");
        assert_eq!(encode_component("将棋"), "%E5%B0%86%E6%A3%8B");
    }

    #[test]
    fn links_use_fixed_endpoints() {
        let links = ShareLinks::from_text("hi there");
        assert_eq!(links.twitter, "https://twitter.com/intent/tweet?text=hi%20there");
        assert_eq!(links.whatsapp, "https://api.whatsapp.com/send?text=hi%20there");
        assert_eq!(links.get(Channel::Twitter), links.twitter);
        assert_eq!(links.get(Channel::WhatsApp), links.whatsapp);
    }

    #[test]
    fn links_for_request_embed_share_text() {
        let request = ShareRequest::new("Chess", 42, "https://x/y");
        let links = ShareLinks::for_request(&request);
        assert!(links
            .twitter
            .ends_with("Chess%20-%20Score%3A%2042%20https%3A%2F%2Fx%2Fy"));
    }
}
