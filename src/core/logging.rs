//! Logging initialization
//!
//! Console output always; a log file as well when `LOG_FILE_PATH` is set.
//! The level comes from `LOG_LEVEL` (error, warn, info, debug, trace).

use anyhow::Result;
use simplelog::*;
use std::fs::File;

/// Resolves the level filter from a `LOG_LEVEL`-style value, defaulting to info
pub fn level_from(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|value| value.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

/// `LOG_FILE_PATH`-style value, with blank meaning "no file"
pub fn log_file_from(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|path| !path.is_empty())
}

/// Initialize logger for console and, optionally, file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file, `None` for console only
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to create the file or a logger was already installed
pub fn init_logger(log_file_path: Option<&str>) -> Result<()> {
    let level = level_from(std::env::var("LOG_LEVEL").ok().as_deref());

    let config = ConfigBuilder::new()
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file_path {
        let log_file = File::create(path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;
        loggers.push(WriteLogger::new(level, config, log_file));
    }

    CombinedLogger::init(loggers).map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}
