//! Clock and reset pulse generation locked to a shared timeline
pub mod pulse;
pub mod quantize;
pub mod sync;

use crate::config::{ClockConfig, BEATS_PER_BAR, TICKS_PER_BAR};
use crate::host::{Controls, Light, Output, OutputSink};
use crate::timeline::Timeline;
use log::{debug, info, trace};
use pulse::PulseOutputs;
use sync::{ClockState, SyncEvent, SyncState};

/// One clock node: joins the timeline session on creation and leaves it on drop.
pub struct LinkClock<T: Timeline> {
    timeline: T,
    config: ClockConfig,
    state: ClockState,
}

impl<T: Timeline> LinkClock<T> {
    pub fn new(mut timeline: T, config: ClockConfig) -> Self {
        timeline.enable(true);
        info!("Clock node joined timeline session ({:?})", config.variant);
        LinkClock {
            timeline,
            config,
            state: ClockState::new(),
        }
    }

    pub fn config(&self) -> ClockConfig {
        self.config
    }

    pub fn timeline(&self) -> &T {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut T {
        &mut self.timeline
    }

    pub fn sync_state(&self) -> SyncState {
        self.state.state()
    }

    pub fn is_synced(&self) -> bool {
        self.state.is_synced()
    }

    pub fn last_tick(&self) -> Option<u32> {
        self.state.last_tick()
    }

    /// Runs one control step and returns the tick observed.
    pub fn step<S: OutputSink>(&mut self, controls: &Controls, sink: &mut S) -> u32 {
        let resync = controls.sync_requested();

        let time = self.timeline.current_time();
        let phase = self.timeline.phase_at_time(time, BEATS_PER_BAR);

        let swing = self.config.swing_enabled().then_some(controls.swing);
        let tick = quantize::tick_at(phase, controls.offset, swing);

        match self.state.update(tick, resync) {
            Some(SyncEvent::Locked) => info!("Clock locked to timeline at bar start"),
            Some(SyncEvent::Released) => info!("Resync requested, waiting for next bar"),
            None => {}
        }

        if self.state.needs_refresh(tick, self.config.gating) {
            if self.state.last_tick() != Some(tick) {
                trace!("Tick {} at phase {:.4}", tick, phase);
            }
            let pulses = pulse::derive(tick, TICKS_PER_BAR, self.state.is_synced());
            write_pulses(sink, &pulses);
            self.state.mark_written(tick);
        }

        sink.set_light(Light::Sync, pulse::lock_light(self.state.is_synced()));
        tick
    }
}

impl<T: Timeline> Drop for LinkClock<T> {
    fn drop(&mut self) {
        self.timeline.enable(false);
        debug!("Clock node left timeline session");
    }
}

fn write_pulses<S: OutputSink>(sink: &mut S, pulses: &PulseOutputs) {
    sink.set_output(Output::Clock, pulses.clock);
    sink.set_light(Light::Clock, pulses.clock_light);
    sink.set_output(Output::Reset, pulses.reset);
    sink.set_light(Light::Reset, pulses.reset_light);
}
