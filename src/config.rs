// config.rs

use crate::error::{LinkPulseError, Result};
use clap::ValueEnum;
use log::{debug, info};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Tick length in beats: a 16th note split in two so the clock can run at 50% PWM.
pub const TICK_LENGTH: f64 = (1.0 / 16.0) / 2.0;
/// Fixed 4/4 signature.
pub const BEATS_PER_BAR: f64 = 4.0;
pub const TICKS_PER_BAR: u32 = (BEATS_PER_BAR / TICK_LENGTH) as u32;
/// Ticks per quarter of a beat, the unit both the clock PWM and swing groups work in.
pub const TICKS_PER_GROUP: u32 = 8;

/// Maximum phase shift reachable with the offset control, in ticks.
pub const OFFSET_RANGE_TICKS: f64 = 5.0;
/// Maximum delay applied to odd groups with the swing control, in ticks.
pub const SWING_RANGE_TICKS: f64 = 2.0;

/// Gate level written to an output when a pulse is high.
pub const GATE_HIGH: f32 = 10.0;
pub const GATE_LOW: f32 = 0.0;

pub const DEFAULT_BPM: f64 = 120.0;
pub const DEFAULT_STEP_RATE: u32 = 1000;
/// Steps the host must run per tick so tick 0 is never stepped over.
pub const MIN_STEPS_PER_TICK: f64 = 1.5;

const ENV_PREFIX: &str = "LINKPULSE";

/// Which flavour of the clock node is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Clock and reset only, the swing control is ignored.
    Plain,
    /// Clock and reset with every other eighth delayed by the swing control.
    Swing,
}

impl FromStr for Variant {
    type Err = LinkPulseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(Variant::Plain),
            "swing" => Ok(Variant::Swing),
            other => Err(LinkPulseError::InvalidSetting(format!(
                "unknown variant '{}', expected 'plain' or 'swing'",
                other
            ))),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Plain => write!(f, "plain"),
            Variant::Swing => write!(f, "swing"),
        }
    }
}

/// When the node rewrites its clock and reset outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gating {
    /// Only when the tick index changes.
    TickChange,
    /// When the tick index changes, and on every step while unsynced so the
    /// outputs are held at zero.
    TickChangeOrUnsynced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    pub variant: Variant,
    pub gating: Gating,
}

impl ClockConfig {
    pub fn plain() -> Self {
        ClockConfig {
            variant: Variant::Plain,
            gating: Gating::TickChange,
        }
    }

    pub fn swing() -> Self {
        ClockConfig {
            variant: Variant::Swing,
            gating: Gating::TickChangeOrUnsynced,
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Plain => Self::plain(),
            Variant::Swing => Self::swing(),
        }
    }

    pub fn swing_enabled(&self) -> bool {
        self.variant == Variant::Swing
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::swing()
    }
}

/// Settings for the demo host, merged from defaults, an optional settings
/// file and `LINKPULSE_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bpm: f64,
    pub offset: f32,
    pub swing: f32,
    pub variant: Variant,
    /// Control-rate steps per second.
    pub step_rate: u32,
    /// Stop after this many bars, run forever when unset.
    pub bars: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bpm: DEFAULT_BPM,
            offset: 0.0,
            swing: 0.0,
            variant: Variant::Swing,
            step_rate: DEFAULT_STEP_RATE,
            bars: None,
        }
    }
}

impl Settings {
    /// Loads settings from `path` (when given and present) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = config::Config::builder()
            .set_default("bpm", defaults.bpm)?
            .set_default("offset", defaults.offset as f64)?
            .set_default("swing", defaults.swing as f64)?
            .set_default("variant", defaults.variant.to_string())?
            .set_default("step_rate", defaults.step_rate as i64)?;

        if let Some(path) = path {
            debug!("Reading settings file: {}", path.display());
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let raw = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let bars = match raw.get_int("bars") {
            Ok(bars) => Some(to_u32("bars", bars)?),
            Err(config::ConfigError::NotFound(_)) => None,
            Err(e) => return Err(e.into()),
        };

        let settings = Settings {
            bpm: raw.get_float("bpm")?,
            offset: raw.get_float("offset")? as f32,
            swing: raw.get_float("swing")? as f32,
            variant: raw.get_string("variant")?.parse()?,
            step_rate: to_u32("step_rate", raw.get_int("step_rate")?)?,
            bars,
        };

        info!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    /// Checks ranges the host exposes to the user. The clock itself accepts
    /// anything and wraps.
    pub fn validate(&self) -> Result<()> {
        if !(self.bpm > 20.0 && self.bpm <= 999.0) {
            return Err(LinkPulseError::InvalidSetting(format!(
                "bpm {} out of range (20, 999]",
                self.bpm
            )));
        }
        if !(-1.0..=1.0).contains(&self.offset) {
            return Err(LinkPulseError::InvalidSetting(format!(
                "offset {} out of range [-1, 1]",
                self.offset
            )));
        }
        if !(0.0..=1.0).contains(&self.swing) {
            return Err(LinkPulseError::InvalidSetting(format!(
                "swing {} out of range [0, 1]",
                self.swing
            )));
        }
        if self.step_rate == 0 {
            return Err(LinkPulseError::InvalidSetting(
                "step rate must be greater than zero".to_string(),
            ));
        }
        let min_step_rate = self.ticks_per_second() * MIN_STEPS_PER_TICK;
        if f64::from(self.step_rate) < min_step_rate {
            return Err(LinkPulseError::InvalidSetting(format!(
                "step rate {} too slow for {} BPM, need at least {:.0} steps/s",
                self.step_rate,
                self.bpm,
                min_step_rate.ceil()
            )));
        }
        Ok(())
    }

    /// Ticks the timeline advances per second at the configured tempo.
    pub fn ticks_per_second(&self) -> f64 {
        self.bpm / 60.0 / TICK_LENGTH
    }

    pub fn clock_config(&self) -> ClockConfig {
        ClockConfig::for_variant(self.variant)
    }
}

fn to_u32(key: &str, value: i64) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| LinkPulseError::InvalidSetting(format!("{} {} out of range", key, value)))
}
