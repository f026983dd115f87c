//! Object key derivation from a source URL

/// Derives the object key for an image from the URL it is fetched from
///
/// The fragment and query string are dropped, then everything up to the last
/// `://` and the last `:` is dropped. The last `:` cut removes a port, but it
/// also truncates any path that itself contains a colon. The key is the
/// final path segment, or an empty string when no `/` remains.
///
/// No validation is performed. A trailing slash yields an empty key.
#[must_use]
pub fn derive_filename(url: &str) -> String {
    let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
    let without_query = without_fragment
        .split_once('?')
        .map_or(without_fragment, |(head, _)| head);
    let without_scheme = without_query
        .rsplit_once("://")
        .map_or(without_query, |(_, tail)| tail);
    let without_port = without_scheme
        .rsplit_once(':')
        .map_or(without_scheme, |(_, tail)| tail);

    without_port
        .rsplit_once('/')
        .map(|(_, basename)| basename.to_string())
        .unwrap_or_default()
}
