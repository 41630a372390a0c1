//! Renders the generated initializer script.
//!
//! The viewer bundle loads `swagger-initializer.js` at page start; this
//! module produces that script from a [`ViewerConfig`], embedding the
//! request interceptor as an equivalent JavaScript function when one is
//! configured.

use crate::config::ViewerConfig;
use std::fmt::Write as _;

/// Render the bootstrap script the viewer bundle loads at page start.
#[must_use]
pub fn render(config: &ViewerConfig) -> String {
    let mut out = String::new();
    out.push_str("window.onload = function () {\n");
    out.push_str("\twindow.ui = SwaggerUIBundle({\n");
    let _ = writeln!(out, "\t\turl: \"{}\",", escape_js(&config.url));
    let _ = writeln!(out, "\t\tdom_id: \"{}\",", escape_js(&config.dom_id));
    let _ = writeln!(out, "\t\tdeepLinking: {},", config.deep_linking);
    push_identifier_list(&mut out, "presets", &config.presets);
    push_identifier_list(&mut out, "plugins", &config.plugins);
    let _ = writeln!(out, "\t\tlayout: \"{}\",", escape_js(&config.layout));
    if let Some(interceptor) = &config.request_interceptor {
        out.push_str("\n\t\trequestInterceptor: function (req) {\n");
        out.push_str("\t\t\tif (!req.url.endsWith('.yaml') && !req.url.endsWith('.json')) {\n");
        let _ = writeln!(
            out,
            "\t\t\t\treq.url = req.url.replace(window.location.origin, \"{}\");",
            escape_js(&interceptor.target_origin)
        );
        out.push_str("\t\t\t}\n");
        out.push_str("\t\t\treturn req;\n");
        out.push_str("\t\t}\n");
    }
    out.push_str("\t});\n");
    out.push_str("};\n");
    out
}

/// Presets and plugins are bundle identifiers, emitted verbatim.
fn push_identifier_list(out: &mut String, key: &str, items: &[String]) {
    let _ = writeln!(out, "\t\t{key}: [");
    for item in items {
        let _ = writeln!(out, "\t\t\t{item},");
    }
    out.push_str("\t\t],\n");
}

/// Escape a value for embedding inside a double-quoted JavaScript string.
fn escape_js(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            c if (c as u32) < 0x20 => {
                let _ = write!(escaped, "\\u{:04x}", c as u32);
            }
            c => escaped.push(c),
        }
    }
    escaped
}
