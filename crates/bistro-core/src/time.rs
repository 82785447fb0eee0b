//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter advanced once per
//! scheduler step.  Every delay in the simulation (kitchen time, bill time,
//! idle timers) is expressed as a deadline tick compared against this
//! counter, so runs are exactly reproducible and need no host timer.
//!
//! `SimClock` maps ticks onto wall time for display only:
//!
//!   elapsed_ms = tick * tick_duration_ms

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The scheduler's monotonic tick counter plus its wall-time resolution.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many milliseconds one tick represents.
    pub tick_duration_ms: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_ms: u32) -> Self {
        Self {
            tick_duration_ms,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_ms as u64
    }

    /// Break elapsed time into (minutes, seconds) for log lines.
    pub fn elapsed_ms_split(&self) -> (u64, u32) {
        let secs = self.elapsed_ms() / 1_000;
        (secs / 60, (secs % 60) as u32)
    }

    /// How many ticks span `secs` seconds?  Rounds up, so a delay never
    /// fires early.
    #[inline]
    pub fn ticks_for_secs(&self, secs: u64) -> u64 {
        (secs * 1_000).div_ceil(self.tick_duration_ms.max(1) as u64)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s) = self.elapsed_ms_split();
        write!(f, "{} ({:02}:{:02})", self.current_tick, m, s)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// The demo binary loads this from JSON; tests build it with struct update
/// syntax over [`SimConfig::default`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Pixels per tile.  Walking advances one pixel per tick, so this is
    /// also the number of ticks needed to cross one cell.
    pub tile_size: u32,

    /// Wall time one tick represents, in milliseconds.
    pub tick_duration_ms: u32,

    /// Ticks simulated by `Sim::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Delay between a food/dessert order being taken and `order-ready`.
    pub kitchen_delay_ticks: u64,

    /// Delay between the bill being requested and `order-ready` for it.
    pub bill_delay_ticks: u64,

    /// Cells an escorting waiter walks between two follower notifications.
    pub escort_cadence_cells: u32,

    /// Ticks leaving guests stand at their seat before heading out.
    pub linger_ticks: u64,

    /// Automatic group arrival cadence.  0 disables the spawner.
    pub spawn_interval_ticks: u64,

    /// Largest randomly generated group.
    pub max_group_size: usize,

    /// The spawner pauses while this many groups are in the scene.
    pub max_active_groups: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tile_size:            16,
            tick_duration_ms:     50,
            total_ticks:          20_000,
            seed:                 42,
            kitchen_delay_ticks:  200,
            bill_delay_ticks:     100,
            escort_cadence_cells: 2,
            linger_ticks:         20,
            spawn_interval_ticks: 0,
            max_group_size:       4,
            max_active_groups:    4,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tile_size == 0 {
            return Err(CoreError::Config("tile_size must be positive".into()));
        }
        if self.escort_cadence_cells == 0 {
            return Err(CoreError::Config("escort_cadence_cells must be positive".into()));
        }
        if self.max_group_size == 0 {
            return Err(CoreError::Config("max_group_size must be positive".into()));
        }
        Ok(())
    }
}
