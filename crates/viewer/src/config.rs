//! Viewer configuration record.

use crate::interceptor::RequestInterceptor;
use serde::{Deserialize, Serialize};

/// Configuration handed to the external viewer bundle at page load.
///
/// Field names on the wire follow the bundle's own option names: `dom_id`
/// stays snake_case, the rest are camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Location of the specification document, as seen from the page.
    #[serde(default = "default_spec_url")]
    pub url: String,

    /// Mount point selector for the rendered UI.
    #[serde(rename = "dom_id", default = "default_dom_id")]
    pub dom_id: String,

    /// URL-fragment-based navigation state.
    #[serde(default = "default_true")]
    pub deep_linking: bool,

    /// Viewer preset identifiers, passed through verbatim.
    #[serde(default = "default_presets")]
    pub presets: Vec<String>,

    /// Viewer plugin identifiers, passed through verbatim.
    #[serde(default = "default_plugins")]
    pub plugins: Vec<String>,

    /// Layout name.
    #[serde(default = "default_layout")]
    pub layout: String,

    /// Request interceptor; omit when API calls need no redirect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_interceptor: Option<RequestInterceptor>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            url: default_spec_url(),
            dom_id: default_dom_id(),
            deep_linking: default_true(),
            presets: default_presets(),
            plugins: default_plugins(),
            layout: default_layout(),
            request_interceptor: None,
        }
    }
}

fn default_spec_url() -> String {
    "/api/openapi.yaml".to_string()
}

fn default_dom_id() -> String {
    "#swagger-ui".to_string()
}

fn default_true() -> bool {
    true
}

fn default_presets() -> Vec<String> {
    vec![
        "SwaggerUIBundle.presets.apis".to_string(),
        "SwaggerUIStandalonePreset".to_string(),
    ]
}

fn default_plugins() -> Vec<String> {
    vec!["SwaggerUIBundle.plugins.DownloadUrl".to_string()]
}

fn default_layout() -> String {
    "StandaloneLayout".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_bundle() {
        let config = ViewerConfig::default();
        assert_eq!(config.url, "/api/openapi.yaml");
        assert_eq!(config.dom_id, "#swagger-ui");
        assert!(config.deep_linking);
        assert_eq!(
            config.presets,
            vec!["SwaggerUIBundle.presets.apis", "SwaggerUIStandalonePreset"]
        );
        assert_eq!(config.plugins, vec!["SwaggerUIBundle.plugins.DownloadUrl"]);
        assert_eq!(config.layout, "StandaloneLayout");
        assert!(config.request_interceptor.is_none());
    }

    #[test]
    fn wire_names_follow_the_bundle_options() {
        let mut config = ViewerConfig::default();
        config.request_interceptor = Some(RequestInterceptor::new("http://localhost:8080"));

        let value = serde_json::to_value(&config).expect("serialize");
        let obj = value.as_object().expect("object");
        assert!(obj.contains_key("url"));
        assert!(obj.contains_key("dom_id"));
        assert!(obj.contains_key("deepLinking"));
        assert!(obj.contains_key("requestInterceptor"));
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let config: ViewerConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config, ViewerConfig::default());
    }
}
