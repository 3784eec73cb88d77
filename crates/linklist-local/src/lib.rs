use linklist_core::{
    AnchorPolicy, Error, ExtractMode, FetchBackend, FetchRequest, FetchResponse, FetchSource,
    LinkExtractor, Result,
};
use std::time::Duration;

pub mod dom;
pub mod resolve;
pub mod sanitize;
pub mod scan;
pub mod store;

/// Construct the extractor for a caller-selected mode.
pub fn extractor_for(mode: ExtractMode, policy: AnchorPolicy) -> Box<dyn LinkExtractor> {
    match mode {
        ExtractMode::Scan => Box::new(scan::ScanExtractor::new(policy)),
        ExtractMode::Dom => Box::new(dom::DomExtractor::new()),
    }
}

#[derive(Debug, Clone)]
pub struct LocalFetcher {
    client: reqwest::Client,
}

impl LocalFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("linklist/0.1")
            .redirect(reqwest::redirect::Policy::limited(10))
            // Avoid "hang forever" on DNS/TLS/body stalls; per-request
            // timeouts (FetchRequest.timeout_ms) can still override this.
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl FetchBackend for LocalFetcher {
    async fn fetch(&self, req: &FetchRequest) -> Result<FetchResponse> {
        let url = url::Url::parse(&req.url).map_err(|e| Error::Fetch(e.to_string()))?;

        let t0 = std::time::Instant::now();
        let mut rb = self.client.get(url);
        if let Some(to) = req.timeout() {
            rb = rb.timeout(to);
        }
        let resp = rb.send().await.map_err(|e| Error::Fetch(e.to_string()))?;
        let final_url = resp.url().to_string();
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let max_bytes = req.max_bytes.unwrap_or(u64::MAX) as usize;
        let mut truncated = false;
        let mut bytes = Vec::new();
        let mut stream = resp.bytes_stream();
        use futures_util::StreamExt;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Fetch(e.to_string()))?;
            if bytes.len().saturating_add(chunk.len()) > max_bytes {
                let can_take = max_bytes.saturating_sub(bytes.len());
                bytes.extend_from_slice(&chunk[..can_take]);
                truncated = true;
                break;
            }
            bytes.extend_from_slice(&chunk);
        }

        tracing::debug!(
            url = %req.url,
            status,
            bytes = bytes.len(),
            truncated,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "fetched page"
        );

        Ok(FetchResponse {
            url: req.url.clone(),
            final_url,
            status,
            content_type,
            bytes,
            truncated,
            source: FetchSource::Network,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::header, routing::get, Router};
    use std::net::SocketAddr;

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn local_fetcher_returns_body_and_content_type() {
        let app = Router::new().route(
            "/",
            get(|| async { ([(header::CONTENT_TYPE, "text/html")], "<a href=\"/x\">x</a>") }),
        );
        let addr = serve(app).await;

        let fetcher = LocalFetcher::new().unwrap();
        let mut req = FetchRequest::new(format!("http://{addr}/"));
        req.timeout_ms = Some(2_000);

        let resp = fetcher.fetch(&req).await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.source, FetchSource::Network);
        assert_eq!(resp.content_type.as_deref(), Some("text/html"));
        assert_eq!(resp.text_lossy(), "<a href=\"/x\">x</a>");
        assert!(!resp.truncated);
    }

    #[tokio::test]
    async fn local_fetcher_truncates_at_max_bytes() {
        let app = Router::new().route("/", get(|| async { "x".repeat(10_000) }));
        let addr = serve(app).await;

        let fetcher = LocalFetcher::new().unwrap();
        let mut req = FetchRequest::new(format!("http://{addr}/"));
        req.timeout_ms = Some(2_000);
        req.max_bytes = Some(100);

        let resp = fetcher.fetch(&req).await.unwrap();
        assert!(resp.truncated);
        assert_eq!(resp.bytes.len(), 100);
    }

    #[tokio::test]
    async fn local_fetcher_follows_redirects_and_reports_final_url() {
        let app = Router::new()
            .route(
                "/",
                get(|| async {
                    (
                        axum::http::StatusCode::MOVED_PERMANENTLY,
                        [(header::LOCATION, "/moved")],
                        "",
                    )
                }),
            )
            .route("/moved", get(|| async { "here" }));
        let addr = serve(app).await;

        let fetcher = LocalFetcher::new().unwrap();
        let mut req = FetchRequest::new(format!("http://{addr}/"));
        req.timeout_ms = Some(2_000);

        let resp = fetcher.fetch(&req).await.unwrap();
        assert_eq!(resp.status, 200);
        assert!(resp.final_url.ends_with("/moved"));
        assert_eq!(resp.text_lossy(), "here");
    }
}
