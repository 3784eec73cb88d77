use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod context;

pub use context::PageContext;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A resolved href candidate does not parse as a URL. Carries both the
    /// raw attribute value and the string it resolved to, for diagnosis.
    #[error("invalid url: {raw:?} (resolved: {resolved:?})")]
    InvalidUrl { raw: String, resolved: String },
    /// An anchor tag carries an `href=` marker but no extractable value.
    #[error("malformed anchor: {0}")]
    MalformedAnchor(String),
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Which extraction strategy to run.
///
/// `Scan` is the lexical scanner (default); `Dom` delegates to a full HTML
/// parser and is mainly useful for cross-checking the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractMode {
    Scan,
    Dom,
}

impl Default for ExtractMode {
    fn default() -> Self {
        Self::Scan
    }
}

/// What to do when a tag has an `href=` marker but no extractable value.
///
/// Strict fails the whole run with the offending tag attached. Permissive
/// skips the tag and continues; skips are logged, never silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorPolicy {
    Strict,
    Permissive,
}

impl Default for AnchorPolicy {
    fn default() -> Self {
        Self::Strict
    }
}

/// One extraction strategy. Implementations must be pure with respect to
/// their inputs: same html + context always yields the same result.
pub trait LinkExtractor: Send + Sync {
    fn name(&self) -> &'static str;
    /// Returns absolute URL strings in first-occurrence order.
    /// Duplicates are preserved, not deduplicated.
    fn extract_links(&self, html: &str, ctx: &PageContext) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchRequest {
    pub url: String,
    /// Timeout for the operation (network + body read).
    pub timeout_ms: Option<u64>,
    /// Hard cap on bytes read from the response body.
    pub max_bytes: Option<u64>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_ms: None,
            max_bytes: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum FetchSource {
    File,
    Network,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResponse {
    pub url: String,
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub truncated: bool,
    pub source: FetchSource,
}

impl FetchResponse {
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).to_string()
    }
}

#[async_trait::async_trait]
pub trait FetchBackend: Send + Sync {
    async fn fetch(&self, req: &FetchRequest) -> Result<FetchResponse>;
}
