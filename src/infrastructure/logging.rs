//! Tracing setup. Output goes to a file so the terminal UI stays intact.

use std::fs::{create_dir_all, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use super::config::Config;

/// Installs the global subscriber. Calling it twice is harmless.
///
/// `RUST_LOG` takes precedence over `config.log_level`. If the log file
/// cannot be opened, events are discarded.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match open_log_file(&config.log_file) {
        Some(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .try_init();
        }
    }

    tracing::info!(
        endpoint = %config.endpoint,
        export_dir = %config.export_dir.display(),
        log_level = %config.log_level,
        "logging initialized"
    );
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && create_dir_all(parent).is_err() {
            return None;
        }
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
