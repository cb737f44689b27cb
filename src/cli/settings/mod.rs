//! Settings management for CLI set/unset commands.
//!
//! Each configuration key has a [`SettingHandler`]. Handlers only touch the
//! in-memory [`Config`]; [`run_set`] and [`run_unset`] load the file, apply
//! the handler, and save the result.

pub mod error;
pub mod handlers;

pub use error::SettingError;

use std::collections::HashMap;

use crate::core::config::Config;

use self::handlers::{
    request_timeout_handler, responder_name_handler, scroll_interval_handler, user_name_handler,
    ServerUrlHandler, ThemeHandler,
};

/// Trait for handling a configuration setting.
pub trait SettingHandler: Send + Sync {
    /// Returns the configuration key this handler manages.
    fn key(&self) -> &'static str;

    /// Set the value from the words given after the key.
    ///
    /// Returns a success message to display.
    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError>;

    /// Clear the value so the default applies again.
    fn unset(&self, config: &mut Config) -> Result<String, SettingError>;

    /// Format the current value for display in `poncho-chat set` output.
    fn format(&self, config: &Config) -> String;
}

/// Registry of all available setting handlers.
pub struct SettingRegistry {
    handlers: HashMap<&'static str, Box<dyn SettingHandler>>,
    /// Keys in display order for `poncho-chat set` output.
    display_order: Vec<&'static str>,
}

impl SettingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
            display_order: Vec::new(),
        };

        registry.register(Box::new(ServerUrlHandler));
        registry.register(Box::new(user_name_handler()));
        registry.register(Box::new(responder_name_handler()));
        registry.register(Box::new(scroll_interval_handler()));
        registry.register(Box::new(request_timeout_handler()));
        registry.register(Box::new(ThemeHandler));

        registry
    }

    fn register(&mut self, handler: Box<dyn SettingHandler>) {
        let key = handler.key();
        self.display_order.push(key);
        self.handlers.insert(key, handler);
    }

    pub fn get(&self, key: &str) -> Option<&dyn SettingHandler> {
        self.handlers.get(key).map(|h| h.as_ref())
    }

    pub fn keys_display_order(&self) -> &[&'static str] {
        &self.display_order
    }

    /// Render every key and its current value, one per line.
    pub fn describe(&self, config: &Config) -> String {
        let mut out = String::from("Current configuration:");
        for key in &self.display_order {
            if let Some(handler) = self.get(key) {
                out.push('\n');
                out.push_str(&handler.format(config));
            }
        }
        out
    }

    pub fn apply_set(
        &self,
        key: &str,
        args: &[String],
        config: &mut Config,
    ) -> Result<String, SettingError> {
        let handler = self
            .get(key)
            .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
        handler.set(args, config)
    }

    pub fn apply_unset(&self, key: &str, config: &mut Config) -> Result<String, SettingError> {
        let handler = self
            .get(key)
            .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
        handler.unset(config)
    }
}

impl Default for SettingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn load_config() -> Result<Config, SettingError> {
    Config::load().map_err(|e| SettingError::ConfigError(e.to_string()))
}

fn save_config(config: &Config) -> Result<(), SettingError> {
    config
        .save()
        .map_err(|e| SettingError::ConfigError(e.to_string()))
}

/// `poncho-chat set [key [value...]]`. Without a value, prints the current
/// configuration instead.
pub fn run_set(key: Option<&str>, value: Option<&[String]>) -> Result<String, SettingError> {
    let registry = SettingRegistry::new();
    let mut config = load_config()?;

    let (Some(key), Some(args)) = (key, value.filter(|args| !args.is_empty())) else {
        return Ok(registry.describe(&config));
    };

    let message = registry.apply_set(key, args, &mut config)?;
    save_config(&config)?;
    Ok(message)
}

pub fn run_unset(key: &str) -> Result<String, SettingError> {
    let registry = SettingRegistry::new();
    let mut config = load_config()?;
    let message = registry.apply_unset(key, &mut config)?;
    save_config(&config)?;
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_keys_in_display_order() {
        let registry = SettingRegistry::new();
        assert_eq!(
            registry.keys_display_order(),
            [
                "server-url",
                "user-name",
                "responder-name",
                "scroll-interval-ms",
                "request-timeout-secs",
                "theme",
            ]
        );
    }

    #[test]
    fn unknown_key_is_reported() {
        let registry = SettingRegistry::new();
        let mut config = Config::default();
        assert_eq!(
            registry.apply_set("colour", &["red".to_string()], &mut config),
            Err(SettingError::UnknownKey("colour".to_string()))
        );
        assert_eq!(
            registry.apply_unset("colour", &mut config),
            Err(SettingError::UnknownKey("colour".to_string()))
        );
        assert_eq!(config, Config::default());
    }

    #[test]
    fn set_then_unset_round_trips_through_registry() {
        let registry = SettingRegistry::new();
        let mut config = Config::default();

        registry
            .apply_set("responder-name", &["Eliza".to_string()], &mut config)
            .expect("set");
        assert_eq!(config.responder_name.as_deref(), Some("Eliza"));

        registry
            .apply_unset("responder-name", &mut config)
            .expect("unset");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn describe_shows_set_and_default_values() {
        let registry = SettingRegistry::new();
        let config = Config {
            server_url: Some("http://chat.example".to_string()),
            ..Config::default()
        };

        let description = registry.describe(&config);
        assert!(description.starts_with("Current configuration:"));
        assert!(description.contains("  server-url: http://chat.example"));
        assert!(description.contains("  user-name: (unset, default You)"));
        assert!(description.contains("  theme: (unset, default dark)"));
    }
}
