use super::Timeline;
use crate::config::DEFAULT_BPM;
use log::{debug, info};
use std::time::{Duration, Instant};

/// Free-running local tempo session.
///
/// Beat position is anchored to a point in time so tempo changes bend the
/// timeline without jumping it.
pub struct InternalTimeline {
    origin: Instant,
    bpm: f64,
    anchor_time: Duration,
    anchor_beats: f64,
    enabled: bool,
}

impl Default for InternalTimeline {
    fn default() -> Self {
        Self::new(DEFAULT_BPM)
    }
}

impl InternalTimeline {
    pub fn new(bpm: f64) -> Self {
        info!("Creating new InternalTimeline at {} BPM", bpm);
        InternalTimeline {
            origin: Instant::now(),
            bpm,
            anchor_time: Duration::ZERO,
            anchor_beats: 0.0,
            enabled: false,
        }
    }

    pub fn tempo(&self) -> f64 {
        self.bpm
    }

    pub fn set_tempo(&mut self, bpm: f64) {
        self.set_tempo_at(bpm, self.current_time());
    }

    /// Changes tempo from `time` onwards, keeping the beat position at `time`.
    pub fn set_tempo_at(&mut self, bpm: f64, time: Duration) {
        self.anchor_beats = self.beats_at(time);
        self.anchor_time = time;
        self.bpm = bpm;
        info!("Timeline tempo updated to {} BPM", bpm);
    }

    pub fn beats_at(&self, time: Duration) -> f64 {
        let elapsed = time.as_secs_f64() - self.anchor_time.as_secs_f64();
        self.anchor_beats + elapsed * self.bpm / 60.0
    }
}

impl Timeline for InternalTimeline {
    fn enable(&mut self, enabled: bool) {
        if self.enabled != enabled {
            debug!("InternalTimeline session enabled: {}", enabled);
        }
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn current_time(&self) -> Duration {
        self.origin.elapsed()
    }

    fn phase_at_time(&self, time: Duration, beats_per_bar: f64) -> f64 {
        self.beats_at(time).rem_euclid(beats_per_bar)
    }
}
