//! Endpoint URL construction.
//!
//! The responder is addressed by a base URL (for example
//! `http://localhost:8888`) and the message endpoint is resolved against it,
//! so a configured trailing slash never produces `//msg`.

/// Strip trailing slashes from a configured server URL.
///
/// ```
/// use poncho_chat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:8888/"), "http://localhost:8888");
/// assert_eq!(normalize_base_url("http://host/poncho//"), "http://host/poncho");
/// ```
pub fn normalize_base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Join a server URL and an endpoint path with exactly one slash.
///
/// ```
/// use poncho_chat::utils::url::endpoint_url;
///
/// assert_eq!(endpoint_url("http://localhost:8888", "msg"), "http://localhost:8888/msg");
/// assert_eq!(endpoint_url("http://localhost:8888/", "/msg"), "http://localhost:8888/msg");
/// ```
pub fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        normalize_base_url(base_url.trim()),
        endpoint.trim_start_matches('/')
    )
}

/// Minimal sanity check applied to user-supplied server URLs.
pub fn looks_like_http_url(candidate: &str) -> bool {
    let trimmed = candidate.trim();
    ["http://", "https://"].iter().any(|scheme| {
        trimmed
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
            && trimmed.len() > scheme.len()
    })
}
