//! Terminal UI layer for the chat widget.
//!
//! - [`chat_loop`]: terminal setup, key routing, and the redraw loop.
//! - [`layout`] and [`renderer`]: transcript wrapping and frame output.
//! - [`theme`]: colors for the two senders and the input box.
//!
//! This layer only presents and captures interaction; the widget in
//! [`crate::core::widget`] owns the log, the draft, and request bookkeeping.

pub mod chat_loop;
pub mod layout;
pub mod renderer;
pub mod theme;
