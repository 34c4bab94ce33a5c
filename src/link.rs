/// Hosted diagram viewer that accepts `#R<payload>` fragments.
pub const DEFAULT_VIEWER: &str = "https://app.diagrams.net/?splash=0&clibs=U&lang=en";

/// The payload is appended verbatim; viewers accept raw base64 in the fragment.
pub fn viewer_url(viewer: &str, payload: &str) -> String {
    format!("{viewer}#R{payload}")
}
