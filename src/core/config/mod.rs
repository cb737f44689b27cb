pub mod data;
pub mod defaults;
pub mod io;


pub use data::{Config, ConfigOverrides, Settings};
pub use io::ConfigError;
