use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::defaults::{
    DEFAULT_RESPONDER_NAME, DEFAULT_SCROLL_INTERVAL_MS, DEFAULT_SERVER_URL, DEFAULT_THEME,
    DEFAULT_USER_NAME,
};

/// On-disk configuration. Every field is optional; unset fields fall back to
/// the values in [`super::defaults`] when resolved into [`Settings`].
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the responder; `/msg` is appended when posting
    pub server_url: Option<String>,
    /// Prefix shown before the user's lines
    pub user_name: Option<String>,
    /// Prefix shown before the responder's lines
    pub responder_name: Option<String>,
    /// How often the transcript is forced to the bottom
    pub scroll_interval_ms: Option<u64>,
    /// Give up on a request after this many seconds; unset waits forever
    pub request_timeout_secs: Option<u64>,
    /// UI theme name ("dark" or "light")
    pub theme: Option<String>,
}

/// Values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// `--server` on the command line
    pub server_url_flag: Option<String>,
    /// `PONCHO_SERVER_URL` from the environment
    pub server_url_env: Option<String>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub user_name: String,
    pub responder_name: String,
    pub scroll_interval: Duration,
    pub request_timeout: Option<Duration>,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::resolve(&Config::default(), &ConfigOverrides::default())
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Settings {
    /// Merge with precedence flag > environment > file > default.
    pub fn resolve(config: &Config, overrides: &ConfigOverrides) -> Self {
        let server_url = non_blank(overrides.server_url_flag.as_ref())
            .or_else(|| non_blank(overrides.server_url_env.as_ref()))
            .or_else(|| non_blank(config.server_url.as_ref()))
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let user_name = non_blank(config.user_name.as_ref())
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string());
        let responder_name = non_blank(config.responder_name.as_ref())
            .unwrap_or_else(|| DEFAULT_RESPONDER_NAME.to_string());

        let scroll_interval = Duration::from_millis(
            config
                .scroll_interval_ms
                .unwrap_or(DEFAULT_SCROLL_INTERVAL_MS)
                .max(1),
        );
        let request_timeout = config
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        let theme = non_blank(config.theme.as_ref()).unwrap_or_else(|| DEFAULT_THEME.to_string());

        Self {
            server_url,
            user_name,
            responder_name,
            scroll_interval,
            request_timeout,
            theme,
        }
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
