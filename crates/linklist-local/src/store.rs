//! Page store: save fetched HTML to a file, or load HTML from a file in
//! place of a network fetch. Relative links still need the page's real
//! address, so loading takes the target URL alongside the path.

use linklist_core::{Error, FetchResponse, FetchSource, Result};
use std::fs;
use std::path::Path;

pub fn save_page(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::Store(e.to_string()))?;
        }
    }
    fs::write(path, bytes).map_err(|e| Error::Store(e.to_string()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved page");
    Ok(())
}

pub fn load_page(path: &Path, url: &str) -> Result<FetchResponse> {
    let bytes = fs::read(path).map_err(|e| Error::Store(format!("{}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded page");
    Ok(FetchResponse {
        url: url.to_string(),
        final_url: url.to_string(),
        status: 200,
        content_type: None,
        bytes,
        truncated: false,
        source: FetchSource::File,
    })
}
