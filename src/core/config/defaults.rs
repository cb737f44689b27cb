//! Built-in fallbacks for unset configuration values.

/// Where the responder listens when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8888";

pub const DEFAULT_USER_NAME: &str = "You";

pub const DEFAULT_RESPONDER_NAME: &str = "Poncho";

/// Transcript pin-to-bottom cadence.
pub const DEFAULT_SCROLL_INTERVAL_MS: u64 = 50;

pub const DEFAULT_THEME: &str = "dark";

/// Environment variable consulted for the server URL.
pub const SERVER_URL_ENV: &str = "PONCHO_SERVER_URL";
