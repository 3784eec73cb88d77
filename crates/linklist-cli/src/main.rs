use anyhow::{bail, Context, Result};
use clap::Parser;
use linklist_core::{AnchorPolicy, ExtractMode, FetchBackend, FetchRequest, PageContext};
use linklist_local::{extractor_for, store, LocalFetcher};
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "linklist")]
#[command(about = "Harvest anchor links from a web page and resolve them to absolute URLs", long_about = None)]
struct Cli {
    /// Target URL. Always required, even with --from-file: relative links
    /// resolve against it.
    url: String,

    /// Write the fetched HTML to FILE.
    #[arg(short = 'S', long, value_name = "FILE")]
    save_file: Option<PathBuf>,

    /// Read HTML from FILE instead of fetching over the network.
    #[arg(short = 'f', long, value_name = "FILE", conflicts_with = "save_file")]
    from_file: Option<PathBuf>,

    /// Extraction backend. Allowed: scan, dom
    #[arg(short, long, default_value = "scan")]
    mode: String,

    /// Skip anchors with unextractable hrefs instead of failing fast.
    #[arg(long)]
    permissive: bool,

    /// Fetch timeout in milliseconds.
    #[arg(long, env = "LINKLIST_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Hard cap on bytes read from the response body.
    #[arg(long, env = "LINKLIST_MAX_BYTES")]
    max_bytes: Option<u64>,

    /// Print extra diagnostics to stderr.
    #[arg(short = 'v', long)]
    debug: bool,
}

/// Relative links only make sense against a fetchable page address.
fn parse_target(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("invalid URL: {raw}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("invalid HTTP(S) URL: {raw} (scheme {other}:)"),
    }
}

fn parse_mode(raw: &str) -> Result<ExtractMode> {
    match raw {
        "scan" => Ok(ExtractMode::Scan),
        "dom" => Ok(ExtractMode::Dom),
        other => bail!("unknown mode: {other} (allowed: scan, dom)"),
    }
}

fn init_logging(debug: bool) {
    let default = if debug {
        "info,linklist_local=debug,linklist_cli=debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let target = parse_target(&cli.url)?;
    let mode = parse_mode(&cli.mode)?;
    let ctx = PageContext::from_url(&target);

    let resp = if let Some(path) = &cli.from_file {
        store::load_page(path, target.as_str())?
    } else {
        let fetcher = LocalFetcher::new()?;
        let req = FetchRequest {
            url: target.to_string(),
            timeout_ms: cli.timeout_ms,
            max_bytes: cli.max_bytes,
        };
        let resp = fetcher.fetch(&req).await?;
        if !(200..300).contains(&resp.status) {
            tracing::warn!(status = resp.status, url = %resp.final_url, "non-success response");
        }
        if let Some(path) = &cli.save_file {
            store::save_page(path, &resp.bytes)?;
        }
        resp
    };

    let policy = if cli.permissive {
        AnchorPolicy::Permissive
    } else {
        AnchorPolicy::Strict
    };
    let extractor = extractor_for(mode, policy);
    tracing::debug!(
        backend = extractor.name(),
        source = ?resp.source,
        bytes = resp.bytes.len(),
        "extracting links"
    );

    let links = extractor.extract_links(&resp.text_lossy(), &ctx)?;
    for link in &links {
        println!("{link}");
    }
    println!("count: {}", links.len());
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);
    if let Err(err) = run(cli).await {
        eprintln!("linklist error: {err:#}");
        std::process::exit(1);
    }
}
