pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod runner;
pub mod timeline;
pub mod ui;

pub use cli::Args;
pub use clock::LinkClock;
pub use config::{ClockConfig, Gating, Settings, Variant};
pub use error::{LinkPulseError, Result};
pub use host::{Controls, Light, Output, OutputSink, PortBuffer};
pub use timeline::{InternalTimeline, ManualTimeline, Timeline};
