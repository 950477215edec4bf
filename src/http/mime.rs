//! Content-type lookup by file extension.

use std::path::Path;

/// Fallback for any extension not in [`MIME_TABLE`].
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Lowercase extension (leading dot included) to content type.
pub const MIME_TABLE: &[(&str, &str)] = &[
    (".html", "text/html"),
    (".js", "application/javascript"),
    (".css", "text/css"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".gif", "image/gif"),
    (".svg", "image/svg+xml"),
    (".json", "application/json"),
    (".wav", "audio/wav"),
    (".mp3", "audio/mpeg"),
    (".ico", "image/x-icon"),
];

/// Looks up an extension such as `".png"`. Case-insensitive.
pub fn lookup(ext: &str) -> Option<&'static str> {
    MIME_TABLE
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, content_type)| *content_type)
}

/// Content type for a file path. Never fails; unknown or missing
/// extensions yield [`OCTET_STREAM`].
pub fn content_type_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| lookup(&format!(".{}", ext)))
        .unwrap_or(OCTET_STREAM)
}
