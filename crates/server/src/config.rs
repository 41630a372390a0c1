//! Server configuration (CLI flags with environment fallbacks).

use apiview_spec_tools::document::DigestPolicy;
use apiview_viewer::config::ViewerConfig;
use apiview_viewer::interceptor::{self, RequestInterceptor};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use url::Url;

/// Deployment environment, selecting log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

/// Standalone API-documentation server.
#[derive(Debug, Clone, Parser)]
#[command(name = "apiview-server", version, about)]
pub struct ServerConfig {
    /// Address the docs server listens on.
    #[arg(long, env = "APIVIEW_LISTEN_ADDR", default_value = "127.0.0.1:8090")]
    pub listen_addr: SocketAddr,

    /// Origin (scheme + host + port) rewritten API calls are sent to.
    #[arg(long, env = "APIVIEW_API_ORIGIN", default_value = "http://localhost:8080")]
    pub api_origin: String,

    /// OpenAPI document location (file path or http(s) URL).
    #[arg(long, env = "APIVIEW_SPEC_PATH", default_value = "openapi/openapi.yaml")]
    pub spec_path: String,

    /// Directory holding the viewer asset bundle.
    #[arg(long, env = "APIVIEW_UI_DIR", default_value = "swagger-ui")]
    pub ui_dir: PathBuf,

    /// Expected spec digest (`sha256:<hex>`).
    #[arg(long, env = "APIVIEW_SPEC_DIGEST")]
    pub spec_digest: Option<String>,

    /// What to do when the spec digest doesn't match.
    #[arg(long, env = "APIVIEW_SPEC_DIGEST_POLICY", default_value = "warn")]
    pub spec_digest_policy: DigestPolicy,

    /// Origins allowed for cross-origin access to the docs endpoints.
    #[arg(
        long = "cors-allow-origin",
        env = "APIVIEW_CORS_ALLOW_ORIGIN",
        value_delimiter = ','
    )]
    pub cors_allow_origins: Vec<String>,

    /// Deployment environment.
    #[arg(
        long,
        env = "APIVIEW_ENVIRONMENT",
        default_value = "production",
        value_enum
    )]
    pub environment: Environment,
}

impl ServerConfig {
    /// Origin the hosted page is served from, as a browser would report it
    /// (default ports omitted).
    ///
    /// # Errors
    ///
    /// Returns an error if the listen address does not form a valid URL.
    pub fn page_origin(&self) -> anyhow::Result<String> {
        let url = Url::parse(&format!("http://{}", self.listen_addr))?;
        Ok(interceptor::page_origin(&url))
    }

    /// Viewer configuration for this deployment: stock bundle defaults plus
    /// an interceptor targeting the configured API origin.
    #[must_use]
    pub fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            request_interceptor: Some(RequestInterceptor::new(&self.api_origin)),
            ..ViewerConfig::default()
        }
    }
}
