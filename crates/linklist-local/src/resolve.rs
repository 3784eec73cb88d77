//! Relative-href resolution against a [`PageContext`].

use linklist_core::{Error, PageContext, Result};
use url::Url;

/// Rewrite a decoded href into a fully-qualified URL and return its
/// canonical serialization (default ports dropped, path normalized,
/// percent-encoding canonicalized).
///
/// Precedence, first match wins:
/// - `//…`       protocol-relative: inherit the page scheme
/// - `#…` / `?…` relative to the page address itself
/// - `/…`        root-relative: resolve against the origin
/// - no `:`      path-relative: resolve against the base path
/// - otherwise   already absolute (`http:`, `mailto:`, …), kept as-is
pub fn resolve(raw: &str, ctx: &PageContext) -> Result<String> {
    let candidate = if raw.starts_with("//") {
        format!("{}{raw}", ctx.scheme)
    } else if raw.starts_with('#') || raw.starts_with('?') {
        format!("{}{raw}", ctx.address)
    } else if raw.starts_with('/') {
        format!("{}{raw}", ctx.origin)
    } else if !raw.contains(':') {
        format!("{}/{raw}", ctx.base_path)
    } else {
        raw.to_string()
    };

    let url = Url::parse(&candidate).map_err(|_| Error::InvalidUrl {
        raw: raw.to_string(),
        resolved: candidate.clone(),
    })?;
    Ok(url.to_string())
}
