use crate::error::{LinkPulseError, Result};
use simplelog::*;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static INIT: Once = Once::new();
static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Directory the log file is written to: `$HOME/.local/share/linkpulse/logs`.
pub fn log_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| LinkPulseError::Logging("HOME environment variable not set".to_string()))?;

    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("linkpulse")
        .join("logs"))
}

pub fn init_logger(level: LevelFilter) -> Result<()> {
    let log_dir = log_dir()?;
    fs::create_dir_all(&log_dir)?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("app.log"))?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .build();

    INIT.call_once(|| {
        if let Ok(()) = CombinedLogger::init(vec![WriteLogger::new(level, config, log_file)]) {
            LOGGER_INITIALIZED.store(true, Ordering::SeqCst);
        }
    });

    if LOGGER_INITIALIZED.load(Ordering::SeqCst) {
        Ok(())
    } else {
        Err(LinkPulseError::Logging(
            "Logger initialization failed".to_string(),
        ))
    }
}
