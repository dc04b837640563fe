//! Lock tracking for the clock node.
//!
//! The node starts unsynced and only locks when it observes the first tick of
//! a bar, so the pulses it emits always begin on a bar boundary. A manual
//! resync request drops the lock and the node waits for the next bar start.

use crate::config::Gating;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Unsynced,
    Synced,
}

/// Lock change produced by one step, reported for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent {
    /// Lock acquired at the top of the bar.
    Locked,
    /// Lock dropped by a resync request.
    Released,
}

/// Per-node mutable state, owned by the node and touched once per step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockState {
    last_tick: Option<u32>,
    state: SyncState,
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockState {
    pub fn new() -> Self {
        ClockState {
            last_tick: None,
            state: SyncState::Unsynced,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn is_synced(&self) -> bool {
        self.state == SyncState::Synced
    }

    pub fn last_tick(&self) -> Option<u32> {
        self.last_tick
    }

    /// Advances the lock state for a step that observed `tick`.
    ///
    /// A resync request always leaves the state unsynced, even at tick 0;
    /// lock is then picked up at the next bar start.
    pub fn update(&mut self, tick: u32, resync: bool) -> Option<SyncEvent> {
        let previous = self.state;

        if resync {
            self.state = SyncState::Unsynced;
        } else if tick == 0 {
            self.state = SyncState::Synced;
        }

        match (previous, self.state) {
            (SyncState::Unsynced, SyncState::Synced) => Some(SyncEvent::Locked),
            (SyncState::Synced, SyncState::Unsynced) => Some(SyncEvent::Released),
            _ => None,
        }
    }

    /// Whether the gate outputs must be rewritten for `tick` under `gating`.
    pub fn needs_refresh(&self, tick: u32, gating: Gating) -> bool {
        let tick_changed = self.last_tick != Some(tick);
        match gating {
            Gating::TickChange => tick_changed,
            Gating::TickChangeOrUnsynced => tick_changed || !self.is_synced(),
        }
    }

    pub fn mark_written(&mut self, tick: u32) {
        self.last_tick = Some(tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ClockState::new();
        assert_eq!(state.state(), SyncState::Unsynced);
        assert_eq!(state.last_tick(), None);
    }

    #[test]
    fn test_locks_only_at_bar_start() {
        let mut state = ClockState::new();
        for tick in 1..128 {
            assert_eq!(state.update(tick, false), None);
            assert!(!state.is_synced(), "locked mid-bar at tick {}", tick);
        }
        assert_eq!(state.update(0, false), Some(SyncEvent::Locked));
        assert!(state.is_synced());
    }

    #[test]
    fn test_stays_locked_through_bar() {
        let mut state = ClockState::new();
        state.update(0, false);
        for tick in 1..128 {
            assert_eq!(state.update(tick, false), None);
            assert!(state.is_synced());
        }
    }

    #[test]
    fn test_resync_wins_over_bar_start() {
        let mut state = ClockState::new();
        state.update(0, false);
        assert_eq!(state.update(0, true), Some(SyncEvent::Released));
        assert!(!state.is_synced());
        assert_eq!(state.update(0, true), None);
        assert!(!state.is_synced());
    }

    #[test]
    fn test_refresh_gating() {
        let mut state = ClockState::new();
        assert!(state.needs_refresh(5, Gating::TickChange));
        state.mark_written(5);
        assert!(!state.needs_refresh(5, Gating::TickChange));
        assert!(state.needs_refresh(5, Gating::TickChangeOrUnsynced));
        assert!(state.needs_refresh(6, Gating::TickChange));

        state.update(0, false);
        state.mark_written(0);
        assert!(!state.needs_refresh(0, Gating::TickChangeOrUnsynced));
        assert!(state.needs_refresh(1, Gating::TickChangeOrUnsynced));
    }
}
