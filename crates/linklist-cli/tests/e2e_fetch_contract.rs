use axum::{http::header, routing::get, Router};
use std::net::SocketAddr;

const PAGE: &str = r#"<html><body>
<!-- <a href="/from-comment">hidden</a> -->
<a href="/docs/">Docs</a>
<a href="//cdn.example.com/lib">CDN</a>
</body></html>"#;

fn spawn_fixture_server(rt: &tokio::runtime::Runtime) -> SocketAddr {
    rt.block_on(async {
        let app = Router::new().route(
            "/",
            get(|| async { ([(header::CONTENT_TYPE, "text/html")], PAGE) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    })
}

#[test]
fn fetches_and_extracts_against_a_local_server() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let addr = spawn_fixture_server(&rt);

    let mut cmd = assert_cmd::Command::cargo_bin("linklist").unwrap();
    cmd.arg(format!("http://{addr}/"))
        .arg("--timeout-ms")
        .arg("2000")
        .assert()
        .success()
        .stdout(format!(
            "http://{addr}/docs/\nhttp://cdn.example.com/lib\ncount: 2\n"
        ));
}

#[test]
fn save_file_writes_the_fetched_html() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let addr = spawn_fixture_server(&rt);

    let tmp = tempfile::tempdir().unwrap();
    let saved = tmp.path().join("page.html");

    let mut cmd = assert_cmd::Command::cargo_bin("linklist").unwrap();
    cmd.arg(format!("http://{addr}/"))
        .arg("--save-file")
        .arg(&saved)
        .arg("--timeout-ms")
        .arg("2000")
        .assert()
        .success();

    let body = std::fs::read_to_string(&saved).unwrap();
    assert_eq!(body, PAGE);

    // The saved copy must reproduce the same links offline.
    let mut offline = assert_cmd::Command::cargo_bin("linklist").unwrap();
    offline
        .arg(format!("http://{addr}/"))
        .arg("--from-file")
        .arg(&saved)
        .assert()
        .success()
        .stdout(format!(
            "http://{addr}/docs/\nhttp://cdn.example.com/lib\ncount: 2\n"
        ));
}
