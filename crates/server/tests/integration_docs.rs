use anyhow::Context as _;
use apiview_test_support::{KillOnDrop, pick_unused_port, wait_http_ok, write_viewer_bundle};
use axum::Router;
use axum::routing::get;
use serde_json::json;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

fn spawn_server(ui_dir: &Path, spec_path: &str, port: u16, extra: &[&str]) -> anyhow::Result<Child> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_apiview-server"));
    cmd.arg("--listen-addr")
        .arg(format!("127.0.0.1:{port}"))
        .arg("--ui-dir")
        .arg(ui_dir)
        .arg("--spec-path")
        .arg(spec_path)
        .args(extra)
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd.spawn().context("spawn apiview-server")
}

/// Serve a canned API upstream so proxy behavior can be observed end to end.
async fn spawn_stub_api() -> anyhow::Result<u16> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("bind stub api")?;
    let port = listener.local_addr()?.port();
    let app = Router::new().route(
        "/api/pets",
        get(|| async { axum::Json(json!(["rex", "bella"])) }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(port)
}

#[tokio::test]
async fn serves_docs_spec_and_generated_initializer() -> anyhow::Result<()> {
    let dir = tempfile::tempdir().context("tempdir")?;
    let ui_dir = dir.path().join("swagger-ui");
    write_viewer_bundle(&ui_dir)?;
    let spec_path = apiview_test_support::write_petstore_spec(dir.path())?;

    let port = pick_unused_port()?;
    let child = spawn_server(&ui_dir, &spec_path, port, &[])?;
    let _child = KillOnDrop(child);

    let base = format!("http://127.0.0.1:{port}");
    wait_http_ok(&format!("{base}/health"), Duration::from_secs(30)).await?;

    let client = reqwest::Client::new();

    // /docs and /docs/ both serve the bundle index.
    for path in ["/docs", "/docs/"] {
        let resp = client.get(format!("{base}{path}")).send().await?;
        assert_eq!(resp.status(), 200, "GET {path}");
        assert!(resp.text().await?.contains("viewer-index"));
    }

    // Assets come from the bundle directory with suffix-derived types.
    let resp = client.get(format!("{base}/docs/swagger-ui.css")).send().await?;
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/css")
    );

    // The generated initializer shadows the placeholder shipped on disk.
    let resp = client
        .get(format!("{base}/docs/swagger-initializer.js"))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);
    let script = resp.text().await?;
    assert!(script.contains("SwaggerUIBundle"));
    assert!(script.contains("url: \"/api/openapi.yaml\""));
    assert!(script.contains("requestInterceptor"));
    assert!(!script.contains("placeholder"));

    // The spec document is served as authored.
    let resp = client.get(format!("{base}/api/openapi.yaml")).send().await?;
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/yaml")
    );
    assert_eq!(resp.text().await?, apiview_test_support::PETSTORE_SPEC);

    // Unknown assets and traversal attempts both miss.
    let resp = client.get(format!("{base}/docs/nope.css")).send().await?;
    assert_eq!(resp.status(), 404);

    Ok(())
}

#[tokio::test]
async fn proxies_api_calls_to_the_configured_origin() -> anyhow::Result<()> {
    let dir = tempfile::tempdir().context("tempdir")?;
    let ui_dir = dir.path().join("swagger-ui");
    write_viewer_bundle(&ui_dir)?;
    let spec_path = apiview_test_support::write_petstore_spec(dir.path())?;

    let api_port = spawn_stub_api().await?;
    let port = pick_unused_port()?;
    let child = spawn_server(
        &ui_dir,
        &spec_path,
        port,
        &["--api-origin", &format!("http://127.0.0.1:{api_port}")],
    )?;
    let _child = KillOnDrop(child);

    let base = format!("http://127.0.0.1:{port}");
    wait_http_ok(&format!("{base}/health"), Duration::from_secs(30)).await?;

    let client = reqwest::Client::new();

    // An API path is rewritten to the upstream origin and relayed back.
    let resp = client.get(format!("{base}/api/pets")).send().await?;
    assert_eq!(resp.status(), 200);
    let pets: Vec<String> = resp.json().await?;
    assert_eq!(pets, vec!["rex", "bella"]);

    // Upstream status codes pass through.
    let resp = client.get(format!("{base}/api/missing")).send().await?;
    assert_eq!(resp.status(), 404);

    // Spec-document suffixes are never proxied.
    let resp = client.get(format!("{base}/v2/users.json")).send().await?;
    assert_eq!(resp.status(), 404);

    Ok(())
}

#[tokio::test]
async fn cors_allowlist_echoes_matching_origins() -> anyhow::Result<()> {
    let dir = tempfile::tempdir().context("tempdir")?;
    let ui_dir = dir.path().join("swagger-ui");
    write_viewer_bundle(&ui_dir)?;
    let spec_path = apiview_test_support::write_petstore_spec(dir.path())?;

    let port = pick_unused_port()?;
    let child = spawn_server(
        &ui_dir,
        &spec_path,
        port,
        &["--cors-allow-origin", "https://docs.example.com"],
    )?;
    let _child = KillOnDrop(child);

    let base = format!("http://127.0.0.1:{port}");
    wait_http_ok(&format!("{base}/health"), Duration::from_secs(30)).await?;

    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/health"))
        .header("Origin", "https://docs.example.com")
        .send()
        .await?;
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("https://docs.example.com")
    );

    let resp = client
        .get(format!("{base}/health"))
        .header("Origin", "https://evil.example.net")
        .send()
        .await?;
    assert!(resp.headers().get("access-control-allow-origin").is_none());

    // Preflights short-circuit with 200.
    let resp = client
        .request(reqwest::Method::OPTIONS, format!("{base}/api/pets"))
        .header("Origin", "https://docs.example.com")
        .send()
        .await?;
    assert_eq!(resp.status(), 200);

    Ok(())
}

#[tokio::test]
async fn refuses_startup_on_digest_mismatch_under_fail_policy() -> anyhow::Result<()> {
    let dir = tempfile::tempdir().context("tempdir")?;
    let ui_dir = dir.path().join("swagger-ui");
    write_viewer_bundle(&ui_dir)?;
    let spec_path = apiview_test_support::write_petstore_spec(dir.path())?;

    let port = pick_unused_port()?;
    let child = spawn_server(
        &ui_dir,
        &spec_path,
        port,
        &[
            "--spec-digest",
            "sha256:0000000000000000000000000000000000000000000000000000000000000000",
            "--spec-digest-policy",
            "fail",
        ],
    )?;
    let mut child = KillOnDrop(child);

    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(status) = child.0.try_wait()? {
            assert!(!status.success(), "server should refuse startup");
            return Ok(());
        }
        if Instant::now() > deadline {
            anyhow::bail!("server did not exit on digest mismatch");
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}
