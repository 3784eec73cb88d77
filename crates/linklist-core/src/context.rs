//! Resolution context derived from the target page address.
//!
//! Built once per run from a caller-validated absolute http(s) URL, then
//! read-only. All relative-href resolution policy keys off these fields,
//! so the engine never has to re-parse the target.

use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContext {
    /// Scheme with trailing colon, e.g. `"https:"`.
    pub scheme: String,
    /// Scheme + host + port, no trailing slash, e.g. `"https://site.com"`.
    pub origin: String,
    /// The target address with any query and fragment stripped. Fragment-
    /// and query-relative hrefs resolve against this, so a target that
    /// already carries `?q=..#frag` does not leak it into results.
    pub address: String,
    /// `address` with its final path segment removed; when the address has
    /// at most one path segment, the full address is the base.
    /// Invariant: never ends with `/`.
    pub base_path: String,
}

impl PageContext {
    /// Derive the context from an already-validated target URL.
    pub fn from_url(target: &Url) -> Self {
        let scheme = format!("{}:", target.scheme());
        let origin = target.origin().ascii_serialization();

        let mut stripped = target.clone();
        stripped.set_query(None);
        stripped.set_fragment(None);
        let address = stripped.to_string();

        let segments = stripped
            .path_segments()
            .map(|s| s.count())
            .unwrap_or_default();
        let base_path = if segments <= 1 {
            address.trim_end_matches('/').to_string()
        } else {
            // More than one segment: the path is guaranteed to contain a
            // slash past the origin, so rfind cannot eat into the host.
            match address.rfind('/') {
                Some(i) => address[..i].to_string(),
                None => address.clone(),
            }
        };

        Self {
            scheme,
            origin,
            address,
            base_path,
        }
    }
}
