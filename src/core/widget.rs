//! The chat widget: display log, draft input, and the outbound call.
//!
//! The widget never blocks on the network. [`ChatWidget::submit`] appends the
//! user's line, clears the draft, and spawns a task that talks to the
//! [`MessageTransport`]. When that task finishes it sends a [`WidgetEvent`]
//! back through a [`WidgetEventDispatcher`]; the owner of the widget drains
//! those events and hands them to [`ChatWidget::apply`]. Because only the
//! owner mutates the widget, completions never interleave with each other or
//! with key handling.
//!
//! Replies are appended in the order they arrive. Nothing correlates a reply
//! with the submission that caused it beyond the diagnostic [`SubmissionId`].

use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::core::input::InputBuffer;
use crate::core::message::{DisplayLog, Message};
use crate::core::ticker::PeriodicTask;
use crate::core::transport::MessageTransport;
use crate::utils::scroll::ScrollState;

pub type SubmissionId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The responder answered a submission.
    Reply { id: SubmissionId, text: String },
    /// A submission could not be delivered or answered.
    Failed { id: SubmissionId, error: String },
    /// Periodic request to pin the transcript to its last line.
    ScrollTick,
}

#[derive(Debug, Clone)]
pub struct WidgetEventDispatcher {
    tx: mpsc::UnboundedSender<WidgetEvent>,
}

impl WidgetEventDispatcher {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<WidgetEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Returns `false` once the receiving side is gone.
    pub fn dispatch(&self, event: WidgetEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

pub struct ChatWidget {
    log: DisplayLog,
    input: InputBuffer,
    transport: Arc<dyn MessageTransport>,
    dispatcher: WidgetEventDispatcher,
    scroll: ScrollState,
    next_id: SubmissionId,
    in_flight: usize,
    scroll_ticker: Option<PeriodicTask>,
}

impl std::fmt::Debug for ChatWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatWidget")
            .field("log_len", &self.log.len())
            .field("next_id", &self.next_id)
            .field("in_flight", &self.in_flight)
            .field("scroll", &self.scroll)
            .finish_non_exhaustive()
    }
}

impl ChatWidget {
    pub fn new(
        log: DisplayLog,
        input: InputBuffer,
        transport: Arc<dyn MessageTransport>,
        dispatcher: WidgetEventDispatcher,
    ) -> Self {
        Self {
            log,
            input,
            transport,
            dispatcher,
            scroll: ScrollState::new(),
            next_id: 1,
            in_flight: 0,
            scroll_ticker: None,
        }
    }

    pub fn log(&self) -> &DisplayLog {
        &self.log
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputBuffer {
        &mut self.input
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    /// Number of submissions still waiting on the responder.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Send the current draft.
    ///
    /// Only the exact empty string is rejected; whitespace is sent as typed.
    /// Must be called from within a Tokio runtime.
    pub fn submit(&mut self) -> Option<SubmissionId> {
        let text = self.input.text();
        if text.is_empty() {
            return None;
        }

        self.log.push(Message::user(text.clone()));
        self.input.clear();

        let id = self.next_id;
        self.next_id += 1;
        self.in_flight += 1;
        debug!(id, in_flight = self.in_flight, "submission sent");

        let transport = Arc::clone(&self.transport);
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            let event = match transport.send(&text).await {
                Ok(reply) => WidgetEvent::Reply { id, text: reply },
                Err(err) => {
                    warn!(id, error = %err, "submission failed; no reply will be shown");
                    WidgetEvent::Failed {
                        id,
                        error: err.to_string(),
                    }
                }
            };
            if !dispatcher.dispatch(event) {
                debug!(id, "widget gone before completion");
            }
        });

        Some(id)
    }

    /// Submit if `key` is Enter. Returns whether the key was consumed.
    pub fn submit_on_enter(&mut self, key: &KeyEvent) -> bool {
        if key.code != KeyCode::Enter {
            return false;
        }
        self.submit();
        true
    }

    /// Start pinning the transcript to the bottom every `period`.
    ///
    /// The ticker lives as long as the widget; calling this again replaces
    /// the previous ticker.
    pub fn keep_scrolled_to_bottom(&mut self, period: Duration) {
        let dispatcher = self.dispatcher.clone();
        self.scroll_ticker = Some(PeriodicTask::spawn(period, move || {
            dispatcher.dispatch(WidgetEvent::ScrollTick)
        }));
    }

    pub fn stop_scrolling(&mut self) {
        self.scroll_ticker = None;
    }

    pub fn is_scroll_ticker_running(&self) -> bool {
        self.scroll_ticker
            .as_ref()
            .is_some_and(|ticker| !ticker.is_cancelled() && !ticker.is_finished())
    }

    /// Fold a completion or tick into the widget. Returns whether anything
    /// visible changed.
    pub fn apply(&mut self, event: WidgetEvent) -> bool {
        match event {
            WidgetEvent::Reply { id, text } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                debug!(id, bytes = text.len(), "reply appended");
                self.log.push(Message::responder(text));
                true
            }
            WidgetEvent::Failed { id, .. } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                debug!(id, in_flight = self.in_flight, "failure absorbed");
                true
            }
            WidgetEvent::ScrollTick => self.scroll.scroll_to_bottom(),
        }
    }
}
