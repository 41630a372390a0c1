//! Request interceptor applied to the viewer's outgoing calls.
//!
//! The viewer fetches two kinds of URLs: the specification document itself
//! (`.yaml`/`.json`) and "Try it out" API calls. Spec fetches must keep their
//! original location, which may differ from the API host; API calls are
//! redirected from the page origin to the configured target origin.

use serde::{Deserialize, Serialize};
use url::Url;

/// An outgoing viewer request, immediately before dispatch.
///
/// Only `url` is ever rewritten. Method, headers, and body pass through the
/// interceptor untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub url: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl OutboundRequest {
    /// A bare GET request, the common case for viewer traffic.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: "GET".to_string(),
            headers: Vec::new(),
            body: None,
        }
    }
}

/// Rewrites request origins so "Try it out" calls reach the real API host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInterceptor {
    /// Origin (scheme + host + port) rewritten requests are sent to.
    pub target_origin: String,
}

impl RequestInterceptor {
    #[must_use]
    pub fn new(target_origin: impl Into<String>) -> Self {
        Self {
            target_origin: target_origin.into(),
        }
    }

    /// Apply the interceptor to a request.
    ///
    /// Specification-document fetches (URLs ending in `.yaml` or `.json`)
    /// pass through unchanged. For everything else, every literal occurrence
    /// of `page_origin` in the URL is replaced with the target origin. The
    /// match is an unanchored, case-sensitive substring match — the same
    /// string replace the viewer bundle performs in the generated
    /// initializer.
    ///
    /// This function is total: a URL that matches nothing passes through
    /// unchanged, and no input can make it fail.
    #[must_use]
    pub fn intercept(&self, mut req: OutboundRequest, page_origin: &str) -> OutboundRequest {
        req.url = self.rewrite_url(&req.url, page_origin);
        req
    }

    /// Rewrite a single URL according to the interceptor rules.
    #[must_use]
    pub fn rewrite_url(&self, url: &str, page_origin: &str) -> String {
        if url.ends_with(".yaml") || url.ends_with(".json") {
            return url.to_string();
        }
        url.replace(page_origin, &self.target_origin)
    }
}

/// Origin (scheme + host + port) of a URL, serialized the way a browser
/// reports `window.location.origin` (default ports omitted).
#[must_use]
pub fn page_origin(url: &Url) -> String {
    url.origin().ascii_serialization()
}
