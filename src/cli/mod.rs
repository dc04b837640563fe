use crate::config::{Settings, Variant};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Clock and reset pulses locked to a shared tempo timeline", long_about = None)]
pub struct Args {
    /// Settings file (toml, json, yaml or ini), optional
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Tempo of the local timeline session
    #[arg(short, long)]
    pub bpm: Option<f64>,

    /// Phase offset, -1.0 to 1.0 (up to 5 ticks either way)
    #[arg(short, long, allow_hyphen_values = true)]
    pub offset: Option<f32>,

    /// Swing amount, 0.0 to 1.0 (up to 2 ticks delay on off-beats)
    #[arg(short, long)]
    pub swing: Option<f32>,

    /// Node variant to run
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Control steps per second
    #[arg(long)]
    pub step_rate: Option<u32>,

    /// Stop after this many bars
    #[arg(long)]
    pub bars: Option<u32>,

    /// Print the effective settings and exit
    #[arg(long)]
    pub print_config: bool,

    /// Log per-tick detail
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Overrides loaded settings with whatever was given on the command line.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(bpm) = self.bpm {
            settings.bpm = bpm;
        }
        if let Some(offset) = self.offset {
            settings.offset = offset;
        }
        if let Some(swing) = self.swing {
            settings.swing = swing;
        }
        if let Some(variant) = self.variant {
            settings.variant = variant;
        }
        if let Some(step_rate) = self.step_rate {
            settings.step_rate = step_rate;
        }
        if self.bars.is_some() {
            settings.bars = self.bars;
        }
        settings
    }
}

pub fn describe_settings(settings: &Settings) -> String {
    let bars = settings
        .bars
        .map(|b| b.to_string())
        .unwrap_or_else(|| "unbounded".to_string());
    format!(
        "bpm = {}\noffset = {}\nswing = {}\nvariant = {}\nstep_rate = {}\nbars = {}",
        settings.bpm, settings.offset, settings.swing, settings.variant, settings.step_rate, bars
    )
}
