use super::Timeline;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct ManualState {
    enabled: bool,
    enable_calls: Vec<bool>,
    beats: f64,
    time: Duration,
}

/// Timeline driven by hand, for tests.
///
/// Clones share the same state, so a test can keep a handle after moving
/// one into a node and keep steering the phase or inspect session calls.
#[derive(Debug, Clone, Default)]
pub struct ManualTimeline {
    state: Arc<Mutex<ManualState>>,
}

impl ManualTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the absolute beat position returned from now on.
    pub fn set_beats(&self, beats: f64) {
        self.state().beats = beats;
    }

    /// Moves the beat position and clock forward.
    pub fn advance(&self, beats: f64, time: Duration) {
        let mut state = self.state();
        state.beats += beats;
        state.time += time;
    }

    pub fn beats(&self) -> f64 {
        self.state().beats
    }

    /// Every `enable` call received, in order.
    pub fn enable_calls(&self) -> Vec<bool> {
        self.state().enable_calls.clone()
    }
}

impl Timeline for ManualTimeline {
    fn enable(&mut self, enabled: bool) {
        let mut state = self.state();
        state.enabled = enabled;
        state.enable_calls.push(enabled);
    }

    fn is_enabled(&self) -> bool {
        self.state().enabled
    }

    fn current_time(&self) -> Duration {
        self.state().time
    }

    fn phase_at_time(&self, _time: Duration, beats_per_bar: f64) -> f64 {
        self.state().beats.rem_euclid(beats_per_bar)
    }
}
