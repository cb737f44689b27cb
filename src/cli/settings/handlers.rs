//! Setting handlers, one per configuration key.

use crate::cli::settings::error::SettingError;
use crate::cli::settings::SettingHandler;
use crate::core::config::defaults::{
    DEFAULT_RESPONDER_NAME, DEFAULT_SERVER_URL, DEFAULT_THEME, DEFAULT_USER_NAME,
};
use crate::core::config::Config;
use crate::ui::theme::Theme;
use crate::utils::url::{looks_like_http_url, normalize_base_url};

fn success_set(key: &str, value: &str) -> String {
    format!("✅ Set {key} to: {value}")
}

fn success_unset(key: &str) -> String {
    format!("✅ Unset {key}")
}

fn format_entry(key: &str, value: Option<String>, default: &str) -> String {
    match value {
        Some(value) => format!("  {key}: {value}"),
        None => format!("  {key}: (unset, default {default})"),
    }
}

/// A free-text setting stored as `Option<String>`.
pub struct TextSetting {
    key: &'static str,
    hint: &'static str,
    example: &'static str,
    default: &'static str,
    field: fn(&mut Config) -> &mut Option<String>,
    read: fn(&Config) -> Option<&String>,
}

impl SettingHandler for TextSetting {
    fn key(&self) -> &'static str {
        self.key
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let value = args.join(" ");
        if value.trim().is_empty() {
            return Err(SettingError::MissingArgs {
                hint: self.hint,
                example: self.example,
            });
        }
        let message = success_set(self.key, &value);
        *(self.field)(config) = Some(value);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> Result<String, SettingError> {
        *(self.field)(config) = None;
        Ok(success_unset(self.key))
    }

    fn format(&self, config: &Config) -> String {
        format_entry(self.key, (self.read)(config).cloned(), self.default)
    }
}

pub fn user_name_handler() -> TextSetting {
    TextSetting {
        key: "user-name",
        hint: "To set the name shown before your messages, specify it:",
        example: "poncho-chat set user-name Ada",
        default: DEFAULT_USER_NAME,
        field: |config| &mut config.user_name,
        read: |config| config.user_name.as_ref(),
    }
}

pub fn responder_name_handler() -> TextSetting {
    TextSetting {
        key: "responder-name",
        hint: "To set the name shown before replies, specify it:",
        example: "poncho-chat set responder-name Poncho",
        default: DEFAULT_RESPONDER_NAME,
        field: |config| &mut config.responder_name,
        read: |config| config.responder_name.as_ref(),
    }
}

/// Handler for the `server-url` setting.
pub struct ServerUrlHandler;

impl SettingHandler for ServerUrlHandler {
    fn key(&self) -> &'static str {
        "server-url"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let Some(raw) = args.first().map(|arg| arg.trim()).filter(|arg| !arg.is_empty()) else {
            return Err(SettingError::MissingArgs {
                hint: "To set the responder address, specify its base URL:",
                example: "poncho-chat set server-url http://localhost:8888",
            });
        };
        if !looks_like_http_url(raw) {
            return Err(SettingError::InvalidUrl(raw.to_string()));
        }

        let url = normalize_base_url(raw).to_string();
        let message = success_set("server-url", &url);
        config.server_url = Some(url);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> Result<String, SettingError> {
        config.server_url = None;
        Ok(success_unset("server-url"))
    }

    fn format(&self, config: &Config) -> String {
        format_entry("server-url", config.server_url.clone(), DEFAULT_SERVER_URL)
    }
}

/// A whole-number setting stored as `Option<u64>`.
pub struct NumberSetting {
    key: &'static str,
    example: &'static str,
    default: &'static str,
    field: fn(&mut Config) -> &mut Option<u64>,
    read: fn(&Config) -> Option<u64>,
}

impl SettingHandler for NumberSetting {
    fn key(&self) -> &'static str {
        self.key
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let Some(raw) = args.first().map(|arg| arg.trim()) else {
            return Err(SettingError::MissingArgs {
                hint: "Specify a whole number:",
                example: self.example,
            });
        };
        let value: u64 = raw.parse().map_err(|_| SettingError::InvalidNumber {
            key: self.key,
            input: raw.to_string(),
        })?;
        *(self.field)(config) = Some(value);
        Ok(success_set(self.key, &value.to_string()))
    }

    fn unset(&self, config: &mut Config) -> Result<String, SettingError> {
        *(self.field)(config) = None;
        Ok(success_unset(self.key))
    }

    fn format(&self, config: &Config) -> String {
        format_entry(
            self.key,
            (self.read)(config).map(|value| value.to_string()),
            self.default,
        )
    }
}

pub fn scroll_interval_handler() -> NumberSetting {
    NumberSetting {
        key: "scroll-interval-ms",
        example: "poncho-chat set scroll-interval-ms 50",
        default: "50",
        field: |config| &mut config.scroll_interval_ms,
        read: |config| config.scroll_interval_ms,
    }
}

pub fn request_timeout_handler() -> NumberSetting {
    NumberSetting {
        key: "request-timeout-secs",
        example: "poncho-chat set request-timeout-secs 30",
        default: "none, wait forever",
        field: |config| &mut config.request_timeout_secs,
        read: |config| config.request_timeout_secs,
    }
}

/// Handler for the `theme` setting.
pub struct ThemeHandler;

impl SettingHandler for ThemeHandler {
    fn key(&self) -> &'static str {
        "theme"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        if args.is_empty() {
            return Err(SettingError::MissingArgs {
                hint: "To set a theme, specify the theme name:",
                example: "poncho-chat set theme dark",
            });
        }

        let input = args.join(" ");
        let theme = Theme::builtin_names()
            .iter()
            .find(|name| name.eq_ignore_ascii_case(input.trim()))
            .ok_or(SettingError::UnknownTheme {
                input: input.clone(),
            })?;
        config.theme = Some(theme.to_string());
        Ok(success_set("theme", theme))
    }

    fn unset(&self, config: &mut Config) -> Result<String, SettingError> {
        config.theme = None;
        Ok(success_unset("theme"))
    }

    fn format(&self, config: &Config) -> String {
        format_entry("theme", config.theme.clone(), DEFAULT_THEME)
    }
}
