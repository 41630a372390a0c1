//! Suffix-based media-type classification for served documents and assets.

/// Media type for a viewer asset path, by file suffix.
///
/// Unknown suffixes fall back to `application/octet-stream`.
#[must_use]
pub fn content_type_for(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, suffix)| suffix) {
        Some("yaml" | "yml") => "application/yaml",
        // Source maps are JSON too.
        Some("json" | "map") => "application/json",
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

/// Media type for the spec document itself.
///
/// JSON documents keep their own type; everything else is served as YAML,
/// matching how the document is parsed.
#[must_use]
pub fn spec_content_type(location: &str) -> &'static str {
    if location.ends_with(".json") {
        "application/json"
    } else {
        "application/yaml"
    }
}
