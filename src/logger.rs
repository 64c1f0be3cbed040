//! File-based logging through simplelog.
//!
//! stdout is the game screen, so log records go to a file: the working
//! directory for debug builds, the temp directory for release builds, or
//! wherever `--log-file` points.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

const LOG_FILE_NAME: &str = "snake-debug.log";

pub fn default_log_path() -> PathBuf {
    if cfg!(debug_assertions) {
        PathBuf::from(LOG_FILE_NAME)
    } else {
        std::env::temp_dir().join(LOG_FILE_NAME)
    }
}

/// Reads the level from a `RUST_LOG` style value, falling back to debug.
pub fn level_from_env(value: Option<&str>) -> LevelFilter {
    match value.map(|v| v.to_lowercase()).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some(_) => LevelFilter::Info,
        None => LevelFilter::Debug,
    }
}

pub fn init(path: &Path) -> Result<()> {
    let level = level_from_env(std::env::var("RUST_LOG").ok().as_deref());

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;

    Ok(())
}
