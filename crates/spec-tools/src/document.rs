//! OpenAPI document loading and startup validation.

use crate::content_type::spec_content_type;
use crate::error::{Result, SpecToolsError};
use openapiv3::OpenAPI;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

/// Where a spec document lives: an `http(s)://` URL or a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecLocation {
    Url(Url),
    File(PathBuf),
}

impl SpecLocation {
    /// Parse a spec location into a URL or file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the location looks like a URL but does not parse
    /// as one.
    pub fn parse(location: &str) -> Result<Self> {
        if location.starts_with("http://") || location.starts_with("https://") {
            let url = Url::parse(location).map_err(|e| SpecToolsError::Location {
                location: location.to_string(),
                message: e.to_string(),
            })?;
            Ok(SpecLocation::Url(url))
        } else {
            Ok(SpecLocation::File(PathBuf::from(location)))
        }
    }
}

/// Digest verification policy.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DigestPolicy {
    /// Log a warning if the digest doesn't match.
    #[default]
    Warn,
    /// Refuse startup if the digest doesn't match.
    Fail,
    /// Skip digest verification.
    Ignore,
}

impl FromStr for DigestPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "warn" => Ok(DigestPolicy::Warn),
            "fail" => Ok(DigestPolicy::Fail),
            "ignore" => Ok(DigestPolicy::Ignore),
            other => Err(format!(
                "unknown digest policy '{other}' (expected warn, fail, or ignore)"
            )),
        }
    }
}

/// A loaded, parsed specification document.
///
/// The raw text is kept alongside the parsed model so the document can be
/// served byte-for-byte as it was authored.
#[derive(Debug, Clone)]
pub struct SpecDocument {
    location: String,
    content: String,
    spec: OpenAPI,
}

impl SpecDocument {
    /// Load and parse a spec document from a file path or URL.
    ///
    /// Parsing doubles as startup validation: a document that does not
    /// deserialize into an OpenAPI model refuses to load, so a server with a
    /// broken spec never starts.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be fetched or read, if the
    /// configured digest does not match under [`DigestPolicy::Fail`], or if
    /// the content is not a valid OpenAPI document.
    pub async fn load(
        location: &str,
        client: &Client,
        expected_digest: Option<&str>,
        digest_policy: DigestPolicy,
    ) -> Result<Self> {
        let content = match SpecLocation::parse(location)? {
            SpecLocation::Url(url) => {
                tracing::info!("Fetching OpenAPI document from {location}");
                let resp = client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| SpecToolsError::Fetch {
                        url: location.to_string(),
                        message: e.to_string(),
                    })?;
                resp.text().await.map_err(|e| SpecToolsError::ReadBody {
                    url: location.to_string(),
                    message: e.to_string(),
                })?
            }
            SpecLocation::File(path) => {
                tracing::info!("Loading OpenAPI document from {location}");
                std::fs::read_to_string(&path).map_err(|e| SpecToolsError::ReadFile {
                    path: location.to_string(),
                    source: e,
                })?
            }
        };

        if let Some(expected) = expected_digest {
            verify_digest(location, &content, expected, digest_policy)?;
        }

        // JSON is a valid subset of YAML, so one parser covers both formats.
        let spec: OpenAPI =
            serde_yaml::from_str(&content).map_err(|e| SpecToolsError::Parse {
                location: location.to_string(),
                source: e,
            })?;

        Ok(Self {
            location: location.to_string(),
            content,
            spec,
        })
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The document text exactly as it was loaded.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn spec(&self) -> &OpenAPI {
        &self.spec
    }

    /// Media type to serve the document with.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        spec_content_type(&self.location)
    }
}

fn verify_digest(
    location: &str,
    content: &str,
    expected: &str,
    policy: DigestPolicy,
) -> Result<()> {
    let actual = format!("sha256:{}", hex::encode(Sha256::digest(content)));
    if actual == expected {
        return Ok(());
    }
    match policy {
        DigestPolicy::Fail => Err(SpecToolsError::DigestMismatch {
            location: location.to_string(),
            expected: expected.to_string(),
            actual,
        }),
        DigestPolicy::Warn => {
            tracing::warn!(
                "Spec digest mismatch for '{location}'. Expected: {expected}, Got: {actual}"
            );
            Ok(())
        }
        DigestPolicy::Ignore => Ok(()),
    }
}
