//! Interactive chat session
//!
//! Builds the widget from resolved settings, takes over the terminal, and
//! runs the event loop until the user quits.

mod event_loop;
mod lifecycle;
mod setup;

pub use self::event_loop::{route_keyboard_event, KeyLoopAction, UiEvent};
pub use self::setup::{bootstrap_session, ChatSession};

use std::error::Error;

use tracing::info;

use self::event_loop::run_event_loop;
use self::lifecycle::{restore_terminal, setup_terminal};
use self::setup::bootstrap_http_session;
use crate::core::config::Settings;

pub async fn run_chat(settings: Settings) -> Result<(), Box<dyn Error>> {
    let ChatSession {
        mut widget,
        mut widget_rx,
        mut chrome,
    } = bootstrap_http_session(&settings)?;
    info!(server = %settings.server_url, "starting chat session");

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut widget, &mut chrome, &mut widget_rx).await;

    widget.stop_scrolling();
    let restored = restore_terminal(&mut terminal);

    if widget.in_flight() > 0 {
        info!(
            outstanding = widget.in_flight(),
            "leaving with replies still pending"
        );
    }
    result?;
    restored
}
