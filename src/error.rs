use std::error::Error;
use std::fmt;

/// Errors raised around the clock node: settings, logging and the terminal
/// display. The clock itself never fails.
#[derive(Debug)]
pub enum LinkPulseError {
    /// Settings source could not be read or parsed
    Config(String),
    /// A setting was readable but out of range
    InvalidSetting(String),
    /// Logger could not be installed
    Logging(String),
    /// Terminal display could not be drawn
    Display(String),
}

impl fmt::Display for LinkPulseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkPulseError::Config(msg) => write!(f, "Configuration error: {}", msg),
            LinkPulseError::InvalidSetting(msg) => write!(f, "Invalid setting: {}", msg),
            LinkPulseError::Logging(msg) => write!(f, "Logging error: {}", msg),
            LinkPulseError::Display(msg) => write!(f, "Display error: {}", msg),
        }
    }
}

impl Error for LinkPulseError {}

impl From<config::ConfigError> for LinkPulseError {
    fn from(e: config::ConfigError) -> Self {
        LinkPulseError::Config(e.to_string())
    }
}

impl From<std::io::Error> for LinkPulseError {
    fn from(e: std::io::Error) -> Self {
        LinkPulseError::Logging(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkPulseError>;
