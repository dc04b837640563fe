//! Gate levels and light brightnesses derived from a locked tick.

use crate::config::{GATE_HIGH, GATE_LOW, TICKS_PER_GROUP};

/// Gate levels and mirrored light brightnesses for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseOutputs {
    pub clock: f32,
    pub reset: f32,
    pub clock_light: f32,
    pub reset_light: f32,
}

impl PulseOutputs {
    pub const SILENT: PulseOutputs = PulseOutputs {
        clock: GATE_LOW,
        reset: GATE_LOW,
        clock_light: 0.0,
        reset_light: 0.0,
    };

    fn from_levels(clock_high: bool, reset_high: bool) -> Self {
        PulseOutputs {
            clock: gate(clock_high),
            reset: gate(reset_high),
            clock_light: light(clock_high),
            reset_light: light(reset_high),
        }
    }
}

/// Clock runs at 50% PWM over each group of eight ticks.
pub fn clock_high(tick: u32) -> bool {
    (tick % TICKS_PER_GROUP) < TICKS_PER_GROUP / 2
}

/// Reset is high for the first two ticks of the bar only.
pub fn reset_high(tick: u32, ticks_per_bar: u32) -> bool {
    (tick % ticks_per_bar) < 2
}

pub fn derive(tick: u32, ticks_per_bar: u32, synced: bool) -> PulseOutputs {
    if !synced {
        return PulseOutputs::SILENT;
    }
    PulseOutputs::from_levels(clock_high(tick), reset_high(tick, ticks_per_bar))
}

/// Brightness of the "searching" light: lit while the clock is not locked.
pub fn lock_light(synced: bool) -> f32 {
    if synced {
        0.0
    } else {
        1.0
    }
}

fn gate(high: bool) -> f32 {
    if high {
        GATE_HIGH
    } else {
        GATE_LOW
    }
}

fn light(high: bool) -> f32 {
    if high {
        1.0
    } else {
        0.0
    }
}
