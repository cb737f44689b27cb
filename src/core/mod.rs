pub mod config;
pub mod input;
pub mod message;
pub mod ticker;
pub mod transport;
pub mod widget;
