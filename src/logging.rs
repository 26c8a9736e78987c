use crate::config::{data_dir, APP_NAME};
use anyhow::{anyhow, Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Routes tracing output to a log file; the terminal UI owns stdout.
///
/// When the data directory cannot be written, output falls back to stderr at
/// `warn` level so the read-only commands keep working. Returns the log file
/// path when one is in use.
pub fn init_logging() -> Result<Option<PathBuf>> {
    let opened = data_dir().and_then(|dir| open_log_file(&dir));
    match opened {
        Ok((path, file)) => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(env_filter("info"))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            install(subscriber)?;
            Ok(Some(path))
        }
        Err(err) => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(env_filter("warn"))
                .with_writer(io::stderr)
                .finish();
            install(subscriber)?;
            warn!(error = %format!("{:#}", err), "log file unavailable, logging to stderr");
            Ok(None)
        }
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", APP_NAME, default_level)))
}

fn install(subscriber: impl tracing::Subscriber + Send + Sync + 'static) -> Result<()> {
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("failed to set up logging: {}", e))
}

fn open_log_file(dir: &Path) -> Result<(PathBuf, File)> {
    fs::create_dir_all(dir).with_context(|| format!("creating {:?}", dir))?;
    let path = dir.join(format!("{}.log", APP_NAME));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {:?}", path))?;
    Ok((path, file))
}
