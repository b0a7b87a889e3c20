//! HTML status report linked from the commit status.

use crate::artifact::ArtifactSet;

pub const REPORT_CONTENT_TYPE: &str = "text/html";

/// Renders the artifacts grouped by category. Iteration follows
/// [`ARTIFACT_ORDER`](crate::artifact::ARTIFACT_ORDER), and a heading is
/// emitted whenever the category changes.
pub fn render_status_report(artifacts: &ArtifactSet) -> String {
    let mut html = String::from("<html>\n<body>\n<h1>Build Artifacts</h1>\n");
    let mut current_heading: Option<&str> = None;

    for artifact in artifacts.ordered() {
        if current_heading != Some(artifact.category.as_str()) {
            current_heading = Some(artifact.category.as_str());
            html.push_str(&format!("<h2>{}</h2>\n", escape_html(&artifact.category)));
        }
        html.push_str(&format!(
            "<p>{}: <a href='{}'>{}</a></p>\n",
            escape_html(&artifact.description),
            escape_html(artifact.media_url.as_deref().unwrap_or_default()),
            escape_html(&artifact.name),
        ));
    }

    html.push_str("</body>\n</html>");
    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
