//! Phase to tick quantization, with the swing correction for odd groups.

use crate::config::{
    OFFSET_RANGE_TICKS, SWING_RANGE_TICKS, TICKS_PER_BAR, TICKS_PER_GROUP, TICK_LENGTH,
};

/// Maps a bar phase (in beats) shifted by `offset` (in beats) to a tick index
/// in `[0, ticks_per_bar)`.
///
/// Shifts that land before the start of the bar wrap around to its end
/// instead of clamping, and shifts past the end wrap to the start.
/// `ticks_per_bar` must be non-zero.
pub fn quantize(phase: f64, offset: f64, tick_length: f64, ticks_per_bar: u32) -> u32 {
    let raw = ((phase + offset) / tick_length).floor() as i64;
    raw.rem_euclid(i64::from(ticks_per_bar)) as u32
}

/// Offset control (nominally [-1, 1]) to a phase shift in beats, up to ±5 ticks.
pub fn offset_beats(control: f32) -> f64 {
    f64::from(control) * (OFFSET_RANGE_TICKS * TICK_LENGTH)
}

/// Swing control (nominally [0, 1]) to a delay in beats, up to 2 ticks.
pub fn swing_beats(control: f32) -> f64 {
    f64::from(control) * (SWING_RANGE_TICKS * TICK_LENGTH)
}

/// Whether `tick` falls in an odd group of eight ticks. Every other quarter beat is swung.
pub fn is_swung_group(tick: u32) -> bool {
    (tick / TICKS_PER_GROUP) % 2 == 1
}

/// Re-quantizes ticks in odd groups with the phase pulled back by `swing` beats.
///
/// The second quantization wins outright, even when it moves the tick back
/// into the preceding even group.
pub fn apply_swing(tick: u32, phase: f64, offset: f64, swing: f64) -> u32 {
    if is_swung_group(tick) {
        quantize(phase, offset - swing, TICK_LENGTH, TICKS_PER_BAR)
    } else {
        tick
    }
}

/// Full tick computation for one step at the fixed 4/4, 1/32 beat resolution.
pub fn tick_at(phase: f64, offset_control: f32, swing_control: Option<f32>) -> u32 {
    let offset = offset_beats(offset_control);
    let tick = quantize(phase, offset, TICK_LENGTH, TICKS_PER_BAR);

    match swing_control {
        Some(swing) => apply_swing(tick, phase, offset, swing_beats(swing)),
        None => tick,
    }
}
