//! Logging setup.
//!
//! While the terminal UI owns the screen, log lines must never reach it.
//! Output goes to the configured log file; without one, lines are written to
//! stderr only while the UI is inactive and dropped otherwise.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{fmt, EnvFilter};

static TUI_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Mark whether the terminal UI currently owns the screen.
pub fn set_tui_active(active: bool) {
    TUI_ACTIVE.store(active, Ordering::SeqCst);
}

pub fn is_tui_active() -> bool {
    TUI_ACTIVE.load(Ordering::SeqCst)
}

/// Where and how much to log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    /// Log file; `None` means stderr (suppressed while the UI is active).
    pub file: Option<PathBuf>,
    /// Filter directive, e.g. `info` or `peersense=debug`.
    pub level: Option<String>,
    /// `-v` count; raises the default level.
    pub verbosity: u8,
}

impl LogSettings {
    /// Filter directive: `PEERSENSE_LOG` wins, then the configured level,
    /// then the verbosity count.
    pub fn directive(&self) -> String {
        if let Ok(env) = std::env::var("PEERSENSE_LOG") {
            return env;
        }
        if let Some(level) = &self.level {
            return level.clone();
        }
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
        .to_string()
    }
}

/// Default log file under the user's cache directory.
pub fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("peersense").join("peersense.log"))
}

/// Writer handed to the subscriber for each event.
pub struct SessionWriter {
    sink: Option<Arc<Mutex<File>>>,
}

impl Write for SessionWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &self.sink {
            Some(file) => {
                let mut file = file
                    .lock()
                    .map_err(|_| io::Error::other("log file lock poisoned"))?;
                file.write(buf)
            }
            None if is_tui_active() => Ok(buf.len()),
            None => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &self.sink {
            Some(file) => file
                .lock()
                .map_err(|_| io::Error::other("log file lock poisoned"))?
                .flush(),
            None => io::stderr().flush(),
        }
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. Safe to call once per process.
pub fn init_logging(settings: &LogSettings) -> anyhow::Result<()> {
    let file = match &settings.file {
        Some(path) => Some(Arc::new(Mutex::new(open_log_file(path)?))),
        None => None,
    };

    let filter =
        EnvFilter::try_new(settings.directive()).unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_ansi(file.is_none())
        .with_target(false)
        .with_writer(move || SessionWriter { sink: file.clone() })
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))
}
