//! Diagnostics setup.
//!
//! The interactive UI owns the terminal, so diagnostics either go to a file
//! (`--debug-log`) or nowhere. One-shot commands may write them to stderr.

use std::error::Error;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticsTarget {
    Off,
    Stderr,
    File(PathBuf),
}

impl DiagnosticsTarget {
    /// A file always wins; otherwise `fallback` decides.
    pub fn choose(log_path: Option<PathBuf>, fallback: DiagnosticsTarget) -> Self {
        log_path.map(DiagnosticsTarget::File).unwrap_or(fallback)
    }

    fn default_directive(&self) -> &'static str {
        match self {
            DiagnosticsTarget::Stderr => "warn",
            _ => "info",
        }
    }
}

/// `RUST_LOG` when set and valid, otherwise the target's default level.
pub fn build_filter(target: &DiagnosticsTarget) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(target.default_directive()))
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

pub fn init_diagnostics(target: &DiagnosticsTarget) -> Result<(), Box<dyn Error>> {
    let filter = build_filter(target);
    match target {
        DiagnosticsTarget::Off => {}
        DiagnosticsTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|err| -> Box<dyn Error> { err })?;
        }
        DiagnosticsTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|err| -> Box<dyn Error> { err })?;
        }
    }
    Ok(())
}
