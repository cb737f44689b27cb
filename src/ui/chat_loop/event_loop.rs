//! Event polling, dispatching, and UI rendering loop.
//!
//! A blocking reader thread forwards terminal events over a channel. The loop
//! drains terminal events into the widget, drains widget events (replies,
//! failures, scroll ticks), and redraws at a capped frame rate.

use std::{
    error::Error,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::lifecycle::ChatTerminal;
use crate::core::widget::{ChatWidget, WidgetEvent};
use crate::ui::renderer::{ui, ViewChrome};

const MAX_FPS: u64 = 60;
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLoopAction {
    Continue,
    Break,
}

fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Enter submits, quit keys end the loop, everything else edits the draft.
pub fn route_keyboard_event(widget: &mut ChatWidget, key: KeyEvent) -> KeyLoopAction {
    if key.kind != KeyEventKind::Press {
        return KeyLoopAction::Continue;
    }
    if is_quit_key(&key) {
        return KeyLoopAction::Break;
    }
    if !widget.submit_on_enter(&key) {
        widget.input_mut().handle_key(key);
    }
    KeyLoopAction::Continue
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct EventProcessingOutcome {
    pub events_processed: bool,
    pub request_redraw: bool,
    pub exit_requested: bool,
}

pub fn process_ui_events(
    widget: &mut ChatWidget,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
) -> EventProcessingOutcome {
    let mut outcome = EventProcessingOutcome::default();

    while let Ok(ev) = event_rx.try_recv() {
        outcome.events_processed = true;
        match ev {
            UiEvent::Crossterm(Event::Key(key)) => {
                if route_keyboard_event(widget, key) == KeyLoopAction::Break {
                    outcome.exit_requested = true;
                    break;
                }
            }
            UiEvent::Crossterm(Event::Paste(text)) => {
                widget.input_mut().paste(&text);
            }
            UiEvent::Crossterm(_) => {}
        }
    }

    outcome.request_redraw = outcome.events_processed;
    outcome
}

/// Apply every queued widget event. Returns whether a redraw is needed.
pub fn process_widget_events(
    widget: &mut ChatWidget,
    widget_rx: &mut mpsc::UnboundedReceiver<WidgetEvent>,
) -> bool {
    let mut changed = false;
    while let Ok(event) = widget_rx.try_recv() {
        changed |= widget.apply(event);
    }
    changed
}

pub fn spawn_event_reader(
    event_tx: mpsc::UnboundedSender<UiEvent>,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !cancel_token.is_cancelled() {
            match event::poll(EVENT_POLL_INTERVAL) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(err) => debug!(error = %err, "terminal read failed"),
                },
                Ok(false) => {}
                Err(err) => {
                    debug!(error = %err, "terminal poll failed");
                    break;
                }
            }
        }
    })
}

pub async fn run_event_loop(
    terminal: &mut ChatTerminal,
    widget: &mut ChatWidget,
    chrome: &mut ViewChrome,
    widget_rx: &mut mpsc::UnboundedReceiver<WidgetEvent>,
) -> Result<(), Box<dyn Error>> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let reader_cancel = CancellationToken::new();
    let reader_handle = spawn_event_reader(event_tx, reader_cancel.clone());

    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut request_redraw = true;

    let result = loop {
        if request_redraw && last_draw.elapsed() >= frame_duration {
            if let Err(err) = terminal.draw(|f| ui(f, widget, chrome)) {
                break Err(err.into());
            }
            last_draw = Instant::now();
            request_redraw = false;
        }

        let ui_outcome = process_ui_events(widget, &mut event_rx);
        if ui_outcome.exit_requested {
            break Ok(());
        }
        request_redraw |= ui_outcome.request_redraw;

        let widget_changed = process_widget_events(widget, widget_rx);
        request_redraw |= widget_changed;

        // Keep the activity indicator animating.
        if widget.in_flight() > 0 {
            request_redraw = true;
        }

        if !ui_outcome.events_processed && !widget_changed {
            tokio::time::sleep(Duration::from_millis(16)).await;
        }
    };

    reader_cancel.cancel();
    let _ = reader_handle.await;
    result
}
