//! Logging init: file under the XDG state dir, or graceful fallback to stderr.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Per-event writer handed out by the subscriber: the shared log file,
/// or stderr when the file handle cannot be cloned.
enum LogSink {
    File(fs::File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

fn open_log_file() -> anyhow::Result<(fs::File, PathBuf)> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bmd")?;
    let log_dir = xdg_dirs.get_state_home().join("bmd");
    fs::create_dir_all(&log_dir)?;
    let path = log_dir.join("bmd.log");
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Initialize structured logging to `~/.local/state/bmd/bmd.log`, falling
/// back to stderr when the state dir is unavailable or unwritable.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bmd_core=debug,bmd_cli=debug"));

    let (writer, log_path) = match open_log_file() {
        Ok((file, path)) => {
            let file = Arc::new(file);
            let make = move || {
                file.try_clone()
                    .map(LogSink::File)
                    .unwrap_or(LogSink::Stderr)
            };
            (BoxMakeWriter::new(make), Some(path))
        }
        Err(_) => (BoxMakeWriter::new(io::stderr), None),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    match log_path {
        Some(path) => tracing::info!("bmd logging initialized at {}", path.display()),
        None => tracing::warn!("log file unavailable, logging to stderr"),
    }
}
