//! Tempo/phase sources the clock node locks onto
//!
//! This module provides the boundary between the clock node and whatever
//! shared tempo session drives it:
//! - [`Timeline`] trait with the three capabilities the node needs
//! - [`InternalTimeline`] for a free-running local session
//! - [`ManualTimeline`] for deterministic tests
//!
mod internal;
mod manual;

use std::time::Duration;

pub use internal::InternalTimeline;
pub use manual::ManualTimeline;

/// A shared tempo session the node can join and query.
///
/// Queries must not block: the node calls them once per control step.
pub trait Timeline {
    /// Joins (`true`) or leaves (`false`) the shared session.
    fn enable(&mut self, enabled: bool);

    fn is_enabled(&self) -> bool;

    /// Monotonic timestamp, only meaningful when passed back to [`Timeline::phase_at_time`].
    fn current_time(&self) -> Duration;

    /// Position within a bar of `beats_per_bar` beats at `time`, in `[0, beats_per_bar)`.
    fn phase_at_time(&self, time: Duration, beats_per_bar: f64) -> f64;
}
