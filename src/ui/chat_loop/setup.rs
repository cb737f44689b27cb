use std::error::Error;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::core::config::Settings;
use crate::core::input::InputBuffer;
use crate::core::message::DisplayLog;
use crate::core::transport::{HttpTransport, MessageTransport};
use crate::core::widget::{ChatWidget, WidgetEvent, WidgetEventDispatcher};
use crate::ui::layout::SenderNames;
use crate::ui::renderer::ViewChrome;
use crate::ui::theme::Theme;

/// A widget ready for the event loop, plus everything drawn around it.
pub struct ChatSession {
    pub widget: ChatWidget,
    pub widget_rx: mpsc::UnboundedReceiver<WidgetEvent>,
    pub chrome: ViewChrome,
}

/// Resolve the configured theme, falling back to the default for unknown
/// names.
pub fn resolve_theme(name: &str) -> Theme {
    Theme::by_name(name).unwrap_or_else(|| {
        warn!(theme = name, "unknown theme, using default");
        Theme::default()
    })
}

pub fn build_chrome(settings: &Settings) -> ViewChrome {
    let title = format!(
        "poncho-chat v{} - {}",
        env!("CARGO_PKG_VERSION"),
        settings.server_url
    );
    ViewChrome::new(
        title,
        SenderNames::new(settings.user_name.clone(), settings.responder_name.clone()),
        resolve_theme(&settings.theme),
    )
}

/// Wire a widget to `transport` and start the keep-at-bottom ticker.
pub fn bootstrap_session(
    settings: &Settings,
    transport: Arc<dyn MessageTransport>,
) -> ChatSession {
    let chrome = build_chrome(settings);
    let (dispatcher, widget_rx) = WidgetEventDispatcher::new();
    let mut widget = ChatWidget::new(
        DisplayLog::new(),
        InputBuffer::with_style(chrome.theme.input_text_style),
        transport,
        dispatcher,
    );
    widget.keep_scrolled_to_bottom(settings.scroll_interval);

    ChatSession {
        widget,
        widget_rx,
        chrome,
    }
}

/// Build the HTTP transport from settings and bootstrap a session around it.
pub fn bootstrap_http_session(settings: &Settings) -> Result<ChatSession, Box<dyn Error>> {
    let transport = HttpTransport::with_timeout(&settings.server_url, settings.request_timeout)?;
    Ok(bootstrap_session(settings, Arc::new(transport)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::ScriptedTransport;

    #[test]
    fn unknown_theme_falls_back_to_default() {
        assert_eq!(resolve_theme("neon"), Theme::default());
        assert_eq!(resolve_theme("LIGHT"), Theme::light());
    }

    #[test]
    fn chrome_uses_configured_names() {
        let settings = Settings {
            user_name: "Ada".to_string(),
            responder_name: "Eliza".to_string(),
            ..Settings::default()
        };

        let chrome = build_chrome(&settings);
        assert_eq!(chrome.names, SenderNames::new("Ada", "Eliza"));
        assert!(chrome.title.ends_with("http://localhost:8888"));
    }

    #[tokio::test]
    async fn session_starts_with_running_ticker() {
        let (transport, _requests) = ScriptedTransport::new();
        let session = bootstrap_session(&Settings::default(), Arc::new(transport));

        assert!(session.widget.is_scroll_ticker_running());
        assert!(session.widget.log().is_empty());
        assert_eq!(session.widget.in_flight(), 0);
    }

    #[tokio::test]
    async fn http_session_accepts_default_settings() {
        let session = bootstrap_http_session(&Settings::default()).expect("session");
        assert!(session.widget.input().is_empty());
    }
}
