//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod say;
pub mod settings;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::say::run_say;
use crate::cli::settings::{run_set, run_unset, SettingError};
use crate::core::config::defaults::SERVER_URL_ENV;
use crate::core::config::{Config, ConfigOverrides, Settings};
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{init_diagnostics, DiagnosticsTarget};
use crate::utils::url::looks_like_http_url;

#[derive(Parser, Debug)]
#[command(name = "poncho-chat")]
#[command(version)]
#[command(about = "A terminal chat widget for a line-in, line-out responder")]
#[command(
    long_about = "poncho-chat is a full-screen terminal chat box. Each line you send is \
POSTed to <server>/msg as the form field 'data', and whatever the responder returns is \
appended to the transcript.\n\n\
Environment Variables:\n\
  PONCHO_SERVER_URL  Responder base URL (overridden by --server)\n\
  RUST_LOG           Diagnostics filter, e.g. 'poncho_chat=debug'\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Ctrl+C / Esc      Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Responder base URL
    #[arg(short = 's', long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Write diagnostics to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub debug_log: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send one message and print the reply
    Say {
        /// Message to send
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },
    /// Set configuration values, or show them when no value is given
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key (can be multiple words for names)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Option<Vec<String>>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

fn report_setting_result(result: Result<String, SettingError>) {
    match result {
        Ok(message) => println!("{message}"),
        Err(err) => {
            err.print();
            std::process::exit(err.exit_code());
        }
    }
}

/// Resolve settings and reject a server URL that could never be posted to,
/// whichever layer it came from.
fn checked_settings(
    config: &Config,
    overrides: &ConfigOverrides,
) -> Result<Settings, SettingError> {
    let settings = Settings::resolve(config, overrides);
    if !looks_like_http_url(&settings.server_url) {
        return Err(SettingError::InvalidUrl(settings.server_url));
    }
    Ok(settings)
}

fn resolve_settings(server_flag: Option<String>) -> Result<Settings, Box<dyn Error>> {
    let config = Config::load()?;
    let overrides = ConfigOverrides {
        server_url_flag: server_flag,
        server_url_env: std::env::var(SERVER_URL_ENV).ok(),
    };
    Ok(checked_settings(&config, &overrides)?)
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Chat);

    let fallback = match command {
        // The chat UI owns the terminal; only a file is safe to write to.
        Commands::Chat => DiagnosticsTarget::Off,
        _ => DiagnosticsTarget::Stderr,
    };
    init_diagnostics(&DiagnosticsTarget::choose(args.debug_log, fallback))?;

    match command {
        Commands::Set { key, value } => {
            report_setting_result(run_set(key.as_deref(), value.as_deref()));
            Ok(())
        }
        Commands::Unset { key } => {
            report_setting_result(run_unset(&key));
            Ok(())
        }
        Commands::Say { message } => {
            let settings = resolve_settings(args.server)?;
            run_say(message, &settings).await
        }
        Commands::Chat => {
            let settings = resolve_settings(args.server)?;
            run_chat(settings).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_chat() {
        let args = Args::try_parse_from(["poncho-chat"]).expect("parse");
        assert!(args.command.is_none());
        assert!(args.server.is_none());
    }

    #[test]
    fn server_flag_is_global() {
        let args = Args::try_parse_from(["poncho-chat", "-s", "http://h:1", "say", "hi"])
            .expect("parse");
        assert_eq!(args.server.as_deref(), Some("http://h:1"));
        match args.command {
            Some(Commands::Say { message }) => assert_eq!(message, ["hi"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn say_collects_all_words() {
        let args =
            Args::try_parse_from(["poncho-chat", "say", "how", "are", "-you"]).expect("parse");
        match args.command {
            Some(Commands::Say { message }) => assert_eq!(message, ["how", "are", "-you"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn set_accepts_multi_word_values() {
        let args = Args::try_parse_from(["poncho-chat", "set", "user-name", "Ada", "Lovelace"])
            .expect("parse");
        match args.command {
            Some(Commands::Set { key, value }) => {
                assert_eq!(key.as_deref(), Some("user-name"));
                assert_eq!(
                    value,
                    Some(vec!["Ada".to_string(), "Lovelace".to_string()])
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn bare_set_lists_configuration() {
        let args = Args::try_parse_from(["poncho-chat", "set"]).expect("parse");
        assert!(matches!(
            args.command,
            Some(Commands::Set {
                key: None,
                value: None
            })
        ));
    }

    #[test]
    fn debug_log_takes_a_path() {
        let args = Args::try_parse_from(["poncho-chat", "--debug-log", "/tmp/p.log"])
            .expect("parse");
        assert_eq!(args.debug_log, Some(PathBuf::from("/tmp/p.log")));
    }

    #[test]
    fn server_flag_without_scheme_is_rejected() {
        let overrides = ConfigOverrides {
            server_url_flag: Some("localhost:8888".to_string()),
            server_url_env: None,
        };
        assert_eq!(
            checked_settings(&Config::default(), &overrides),
            Err(SettingError::InvalidUrl("localhost:8888".to_string()))
        );
    }

    #[test]
    fn bad_env_url_is_rejected_unless_the_flag_wins() {
        let from_env = ConfigOverrides {
            server_url_flag: None,
            server_url_env: Some("ftp://files.example".to_string()),
        };
        assert!(matches!(
            checked_settings(&Config::default(), &from_env),
            Err(SettingError::InvalidUrl(_))
        ));

        let flag_wins = ConfigOverrides {
            server_url_flag: Some("http://h:1".to_string()),
            ..from_env
        };
        let settings = checked_settings(&Config::default(), &flag_wins).expect("valid flag");
        assert_eq!(settings.server_url, "http://h:1");
    }

    #[test]
    fn default_server_url_passes_the_check() {
        let settings = checked_settings(&Config::default(), &ConfigOverrides::default())
            .expect("default is valid");
        assert_eq!(settings, Settings::default());
    }
}
