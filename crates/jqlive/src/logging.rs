use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::CONFIG_DIR_NAME;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "JQLIVE_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";
const LOG_FILENAME: &str = "jqlive.log";

/// `<cache_dir>/jqlive/jqlive.log`.
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(LOG_FILENAME))
}

/// Installs the global subscriber. Logs go to a file because the terminal UI
/// owns the screen. Returns the log path, or `None` if logging is off.
pub fn init() -> Option<PathBuf> {
    let path = log_file_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let directive = std::env::var(LOG_ENV).ok();
    subscriber(file, directive.as_deref()).try_init().ok()?;
    Some(path)
}

fn subscriber(file: File, directive: Option<&str>) -> impl Subscriber + Send + Sync {
    let filter = directive
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE));
    tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file)),
    )
}
