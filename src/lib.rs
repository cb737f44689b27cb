//! poncho-chat is a terminal chat client for the Poncho responder.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the chat widget: the display log, the input buffer, the
//!   outbound transport, and the periodic scroll ticker.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that feeds key presses and completions into the widget.
//! - [`cli`] parses arguments and dispatches subcommands.
//! - [`utils`] holds diagnostics setup, URL handling, and scroll math.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
