// runner.rs

use crate::clock::LinkClock;
use crate::config::Settings;
use crate::error::Result;
use crate::host::{Controls, PortBuffer};
use crate::timeline::{InternalTimeline, Timeline};
use crate::ui::PulseDisplay;
use crossbeam::channel;
use log::{debug, info};
use std::time::Duration;

/// What a finished run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub steps: u64,
    /// Bar starts seen while locked, the first lock included.
    pub bars: u32,
}

/// One hosted node plus the slots and knob values the host keeps for it.
pub struct Host<T: Timeline> {
    clock: LinkClock<T>,
    ports: PortBuffer,
    controls: Controls,
    summary: RunSummary,
}

impl<T: Timeline> Host<T> {
    pub fn new(clock: LinkClock<T>, controls: Controls) -> Self {
        Host {
            clock,
            ports: PortBuffer::new(),
            controls,
            summary: RunSummary::default(),
        }
    }

    pub fn clock(&self) -> &LinkClock<T> {
        &self.clock
    }

    pub fn ports(&self) -> &PortBuffer {
        &self.ports
    }

    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Steps the node once. The resync button is released after one step,
    /// like a momentary panel button.
    pub fn step(&mut self) -> u32 {
        let previous = self.clock.last_tick();
        let tick = self.clock.step(&self.controls, &mut self.ports);
        self.controls.sync_trigger = 0.0;

        self.summary.steps += 1;
        if tick == 0 && previous != Some(0) && self.clock.is_synced() {
            self.summary.bars += 1;
            debug!("Bar {} started", self.summary.bars);
        }
        tick
    }

    pub fn request_resync(&mut self) {
        self.controls.sync_trigger = 1.0;
    }
}

impl Host<InternalTimeline> {
    /// Retunes the local session without moving its beat position.
    pub fn set_tempo(&mut self, bpm: f64) {
        self.clock.timeline_mut().set_tempo(bpm);
    }

    pub fn tempo(&self) -> f64 {
        self.clock.timeline().tempo()
    }
}

/// Bar starts to wait for: the first lock counts as one, so `bars` full bars
/// end on the start after them.
fn bar_target(bars: Option<u32>) -> Option<u32> {
    bars.map(|bars| bars.saturating_add(1))
}

/// Hosts one node on a local timeline in real time until `settings.bars`
/// bars have played, or forever when unbounded.
pub fn run(settings: &Settings, show_display: bool) -> Result<RunSummary> {
    settings.validate()?;

    let timeline = InternalTimeline::new(settings.bpm);
    let clock = LinkClock::new(timeline, settings.clock_config());
    let mut host = Host::new(clock, Controls::new(settings.offset, settings.swing));

    let display = if show_display {
        Some(PulseDisplay::new()?)
    } else {
        None
    };

    let period = Duration::from_secs_f64(1.0 / f64::from(settings.step_rate));
    let ticker = channel::tick(period);
    info!(
        "Hosting {} clock node at {} steps/s, {} BPM",
        host.clock().config().variant,
        settings.step_rate,
        host.tempo()
    );

    let target = bar_target(settings.bars);

    while ticker.recv().is_ok() {
        let tick = host.step();

        if let Some(display) = &display {
            display.update(tick, host.ports());
        }

        if target.is_some_and(|target| host.summary().bars >= target) {
            break;
        }
    }

    if let Some(display) = &display {
        display.finish();
    }

    let summary = host.summary();
    info!(
        "Run finished after {} steps, {} bar starts",
        summary.steps, summary.bars
    );
    Ok(summary)
}
