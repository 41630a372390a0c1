use anyhow::Context as _;
use std::net::TcpListener;
use std::path::Path;
use std::process::Child;
use std::time::{Duration, Instant};

/// Kill a spawned docs server (or stub) when the test scope ends.
pub struct KillOnDrop(pub Child);

impl Drop for KillOnDrop {
    fn drop(&mut self) {
        let _ = self.0.kill();
    }
}

/// Pick an unused TCP port on localhost.
///
/// Note: this does not reserve the port; it's still possible for another
/// process to bind it before you do.
///
/// # Errors
///
/// Returns an error if binding an ephemeral localhost port fails or if the
/// bound socket's local address cannot be read.
pub fn pick_unused_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").context("bind ephemeral port")?;
    Ok(listener.local_addr()?.port())
}

/// Poll an HTTP URL until it returns a success status (2xx/3xx).
///
/// # Errors
///
/// Returns an error if the timeout elapses before the endpoint returns a
/// success status.
pub async fn wait_http_ok(url: &str, timeout_dur: Duration) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > timeout_dur {
            anyhow::bail!("timed out waiting for {url}");
        }

        match client.get(url).send().await {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => tokio::time::sleep(Duration::from_millis(200)).await,
        }
    }
}

/// Minimal OpenAPI document used by docs-server tests.
pub const PETSTORE_SPEC: &str =
    "openapi: 3.0.3\ninfo:\n  title: Pets\n  version: 1.0.0\npaths: {}\n";

/// Write a skeletal viewer asset bundle into `dir`.
///
/// The files carry recognizable markers so tests can assert which asset a
/// response came from.
///
/// # Errors
///
/// Returns an error if any of the asset files cannot be written.
pub fn write_viewer_bundle(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("create ui dir {}", dir.display()))?;
    std::fs::write(
        dir.join("index.html"),
        "<!DOCTYPE html><html><body><div id=\"swagger-ui\">viewer-index</div></body></html>\n",
    )
    .context("write index.html")?;
    std::fs::write(dir.join("swagger-ui.css"), ".swagger-ui { color: inherit }\n")
        .context("write swagger-ui.css")?;
    std::fs::write(
        dir.join("swagger-initializer.js"),
        "// placeholder, replaced by the generated initializer\n",
    )
    .context("write swagger-initializer.js")?;
    Ok(())
}

/// Write `PETSTORE_SPEC` to `dir/openapi.yaml` and return its path as a
/// string suitable for `--spec-path`.
///
/// # Errors
///
/// Returns an error if the spec file cannot be written.
pub fn write_petstore_spec(dir: &Path) -> anyhow::Result<String> {
    let path = dir.join("openapi.yaml");
    std::fs::write(&path, PETSTORE_SPEC).context("write openapi.yaml")?;
    Ok(path.display().to_string())
}
