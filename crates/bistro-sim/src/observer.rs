//! Simulation observer trait for progress reporting and data collection.

use bistro_behavior::{GroupState, GuestGroup};
use bistro_core::{GroupId, Tick};

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: a state logger
///
/// ```rust,ignore
/// struct StateLog(Vec<(Tick, GroupId, GroupState)>);
///
/// impl SimObserver for StateLog {
///     fn on_group_state(&mut self, tick: Tick, group: GroupId, _from: GroupState, to: GroupState) {
///         self.0.push((tick, group, to));
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with the number of groups still in the
    /// scene.
    fn on_tick_end(&mut self, _tick: Tick, _active_groups: usize) {}

    /// A group was created by the periodic spawner.
    fn on_group_spawned(&mut self, _tick: Tick, _group: GroupId, _size: usize) {}

    /// A group passed its barrier and moved to a new shared state.
    fn on_group_state(&mut self, _tick: Tick, _group: GroupId, _from: GroupState, _to: GroupState) {}

    /// A group finished leaving.  Called just before it is dropped, so the
    /// guests' tabs and counters are still readable.
    fn on_group_left(&mut self, _tick: Tick, _group: &GuestGroup) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
