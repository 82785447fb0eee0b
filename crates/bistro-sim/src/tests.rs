//! Integration tests for bistro-sim.

use bistro_actor::ClockAnimator;
use bistro_behavior::{FloorPlan, GroupState, GuestGroup, Table};
use bistro_core::{Cell, Direction, GroupId, SimConfig, TableId, Tick};
use bistro_grid::{AStar, Grid};

use crate::{SimBuilder, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        tile_size:            4,
        total_ticks,
        seed:                 42,
        kitchen_delay_ticks:  10,
        bill_delay_ticks:     5,
        linger_ticks:         3,
        spawn_interval_ticks: 0,
        max_group_size:       2,
        max_active_groups:    2,
        ..SimConfig::default()
    }
}

/// An empty 10×10 room.
fn open_room() -> Grid {
    Grid::from_blueprint(&[".........."; 10]).unwrap()
}

/// One two-seat table in the middle of the room, the waiter's idle spot in
/// the top-left corner, and the door in the bottom-left.
fn room_plan() -> FloorPlan {
    FloorPlan {
        tables: vec![
            Table::new(TableId(0), Cell::new(4, 5))
                .with_seat(Cell::new(5, 4), Direction::Right)
                .with_seat(Cell::new(5, 6), Direction::Left),
        ],
        idle_spots:   vec![Cell::new(0, 0)],
        spawn_cells:  vec![Cell::new(9, 0), Cell::new(9, 1)],
        meeting_cell: Cell::new(8, 1),
        exit_cell:    Cell::new(9, 0),
    }
}

fn builder(config: SimConfig) -> SimBuilder<AStar, ClockAnimator> {
    SimBuilder::new(config, open_room(), room_plan(), AStar, ClockAnimator::with_defaults(3, 2).unwrap())
}

/// Observer that records everything it is told.
#[derive(Default)]
struct Recorder {
    states:  Vec<(Tick, GroupId, GroupState)>,
    spawned: Vec<(Tick, GroupId, usize)>,
    left:    Vec<GroupId>,
    starts:  usize,
    ends:    usize,
    sim_end: Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.starts += 1;
    }

    fn on_tick_end(&mut self, _tick: Tick, _active_groups: usize) {
        self.ends += 1;
    }

    fn on_group_spawned(&mut self, tick: Tick, group: GroupId, size: usize) {
        self.spawned.push((tick, group, size));
    }

    fn on_group_state(&mut self, tick: Tick, group: GroupId, _from: GroupState, to: GroupState) {
        self.states.push((tick, group, to));
    }

    fn on_group_left(&mut self, _tick: Tick, group: &GuestGroup) {
        self.left.push(group.id());
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.sim_end = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use bistro_behavior::{BehaviorError, Event, Menu, MenuItem, MenuKind};
    use bistro_core::{ActorId, CoreError};
    use bistro_grid::Marker;

    use super::*;
    use crate::SimError;

    #[test]
    fn builds_with_waiter_on_idle_spot() {
        let sim = builder(test_config(10)).build().unwrap();
        assert_eq!(sim.waiters.len(), 1);
        assert_eq!(sim.waiters[0].actor.cell, Some(Cell::new(0, 0)));
        assert_eq!(sim.grid.holder(Cell::new(0, 0)), Some(ActorId(0)));
        assert!(sim.groups.is_empty());
        assert_eq!(sim.tables.free_count(), 1);
    }

    #[test]
    fn initial_group_waits_at_the_door() {
        let sim = builder(test_config(10)).initial_group(2).build().unwrap();
        assert_eq!(sim.groups.len(), 1);
        let ids = sim.groups[0].guest_ids();
        assert_eq!(ids, vec![ActorId(1), ActorId(2)]);
        assert_eq!(sim.grid.holder(Cell::new(9, 0)), Some(ActorId(1)));
        assert_eq!(sim.grid.holder(Cell::new(9, 1)), Some(ActorId(2)));
        assert_eq!(sim.events.peek(), Some(&Event::Arrive(GroupId(0))));
        assert_eq!(sim.stats.groups_spawned, 1);
    }

    #[test]
    fn group_larger_than_any_table_errors() {
        let config = SimConfig { max_group_size: 3, ..test_config(10) };
        let result = builder(config).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn zero_tile_size_errors() {
        let config = SimConfig { tile_size: 0, ..test_config(10) };
        let result = builder(config).build();
        assert!(matches!(result, Err(SimError::Core(CoreError::Config(_)))));
    }

    #[test]
    fn menu_without_dessert_errors() {
        let menu = Menu::new(vec![
            MenuItem::new("Soup", MenuKind::Food, 500, 4),
            MenuItem::new("Tea", MenuKind::Drink, 200, 1),
        ]);
        let result = builder(test_config(10)).menu(menu).build();
        assert!(matches!(result, Err(SimError::Behavior(BehaviorError::Menu(_)))));
    }

    #[test]
    fn blocked_meeting_cell_errors() {
        let mut rows = vec![".........."; 10];
        rows[8] = ".#........";
        let grid = Grid::from_blueprint(&rows[..]).unwrap();
        assert_eq!(grid.get(Cell::new(8, 1)), Some(Marker::Blocked));
        let animator = ClockAnimator::with_defaults(3, 2).unwrap();
        let result = SimBuilder::new(test_config(10), grid, room_plan(), AStar, animator).build();
        assert!(matches!(result, Err(SimError::Behavior(BehaviorError::FloorPlan(_)))));
    }

    #[test]
    fn more_waiters_than_idle_spots_errors() {
        let result = builder(test_config(10)).waiters(2).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;
    use crate::{NoopObserver, SimError};

    #[test]
    fn empty_room_runs_to_end_tick() {
        let mut sim = builder(test_config(10)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(10));
        assert_eq!(rec.starts, 10);
        assert_eq!(rec.ends, 10);
        assert_eq!(rec.sim_end, Some(Tick(10)));
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut sim = builder(test_config(100)).build().unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(5));
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(8));
    }

    #[test]
    fn spawn_is_deferred_while_the_door_is_busy() {
        let mut sim = builder(test_config(100)).initial_group(2).build().unwrap();
        assert_eq!(sim.spawn_group(1).unwrap(), None);
        assert_eq!(sim.groups.len(), 1);
        assert!(matches!(sim.spawn_group(3), Err(SimError::Config(_))));
        assert!(matches!(sim.spawn_group(0), Err(SimError::Config(_))));
    }

    #[test]
    fn spawner_respects_active_group_limit() {
        let config = SimConfig {
            spawn_interval_ticks: 100,
            max_active_groups: 1,
            ..test_config(150)
        };
        let mut sim = builder(config).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        // Tick 100 finds the first group still eating.
        assert_eq!(rec.spawned.len(), 1);
        let (tick, group, size) = rec.spawned[0];
        assert_eq!((tick, group), (Tick(0), GroupId(0)));
        assert!((1..=2).contains(&size));
        assert_eq!(sim.groups.len(), 1);
    }
}

// ── End-to-end scenario ───────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use bistro_actor::ActionKind;
    use bistro_core::ActorId;
    use bistro_grid::Marker;

    use super::*;

    const FULL_MEAL: [&str; 9] = [
        "order(food)",
        "receive-order(food)",
        "eat-drink(food)",
        "order(dessert)",
        "receive-order(dessert)",
        "eat-drink(dessert)",
        "order(bill)",
        "receive-order(bill)",
        "leave",
    ];

    #[test]
    fn pair_dines_and_leaves() {
        let mut sim = builder(test_config(3_000))
            .variants(["red", "green", "blue"])
            .initial_group(2)
            .build()
            .unwrap();
        assert_eq!(sim.variants.available(), 1);

        let mut rec = Recorder::default();
        let finished = sim.run_until(3_000, &mut rec, |s| s.groups.is_empty()).unwrap();
        assert!(finished, "group still present at {}", sim.clock.current_tick);

        let states: Vec<String> = rec.states.iter().map(|(_, _, s)| s.to_string()).collect();
        assert_eq!(states, FULL_MEAL);
        assert!(rec.states.windows(2).all(|w| w[0].0 <= w[1].0));
        assert_eq!(rec.left, vec![GroupId(0)]);

        // Everything the group held is back.
        assert_eq!(sim.tables.free_count(), 1);
        assert_eq!(sim.variants.available(), 3);
        assert!(sim.mailbox.is_empty());
        assert_eq!(sim.mailbox.overwrites(), 0);
        assert_eq!(sim.grid.count(|m| matches!(m, Marker::Occupied(_))), 1);

        let waiter = &sim.waiters[0];
        assert_eq!(waiter.groups_seated(), 1);
        assert_eq!(waiter.orders_taken(), 3);
        assert_eq!(waiter.orders_served(), 3);
        assert!(waiter.takings_cents() > 0);

        assert_eq!(sim.stats.groups_left, 1);
        assert_eq!(sim.stats.guests_left, 2);
        assert_eq!(sim.stats.revenue_cents, u64::from(waiter.takings_cents()));
        // Food and a drink each, then at least a dessert each.
        assert!(sim.stats.dishes_finished >= 6);
    }

    #[test]
    fn same_seed_same_run() {
        let run = || {
            let mut sim = builder(test_config(3_000)).initial_group(2).build().unwrap();
            let mut rec = Recorder::default();
            sim.run_until(3_000, &mut rec, |s| s.groups.is_empty()).unwrap();
            (rec.states, sim.stats, sim.clock.current_tick)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn nobody_stays_on_a_cell_someone_else_holds() {
        let mut sim = builder(test_config(6_000)).initial_group(2).build().unwrap();
        let mut rec = Recorder::default();
        let mut second = None;

        // Two actors may meet on a cell for the tick it takes the later one
        // to notice; never for two ticks running.
        let mut squatters: Vec<(ActorId, Cell)> = Vec::new();
        for _ in 0..6_000 {
            sim.run_ticks(1, &mut rec).unwrap();
            if second.is_none() {
                second = sim.spawn_group(2).unwrap();
            }
            let actors = sim
                .waiters
                .iter()
                .map(|w| &w.actor)
                .chain(sim.groups.iter().flat_map(|g| g.guests().iter().map(|g| &g.actor)));
            let mut now = Vec::new();
            for actor in actors {
                if actor.action_kind() == ActionKind::Walking && !actor.action_done() {
                    continue;
                }
                let Some(cell) = actor.aligned_cell(4) else { continue };
                if sim.grid.holder(cell).is_some_and(|h| h != actor.id()) {
                    now.push((actor.id(), cell));
                }
            }
            for squat in &now {
                assert!(!squatters.contains(squat), "{} stays on {} held by another actor", squat.0, squat.1);
            }
            squatters = now;
            if second.is_some() && sim.groups.is_empty() {
                break;
            }
        }
        assert!(sim.groups.is_empty());
        assert_eq!(sim.stats.groups_left, 2);
    }

    #[test]
    fn order_ready_is_no_earlier_than_kitchen_delay() {
        let mut sim = builder(test_config(3_000)).initial_group(2).build().unwrap();
        let mut rec = Recorder::default();
        sim.run_until(3_000, &mut rec, |s| s.groups.is_empty()).unwrap();

        let at = |name: &str| {
            rec.states
                .iter()
                .find(|(_, _, s)| s.to_string() == name)
                .map(|(t, _, _)| *t)
                .unwrap()
        };
        assert!(at("eat-drink(food)").since(at("receive-order(food)")) >= 10);
        assert!(at("leave").since(at("receive-order(bill)")) >= 5);
    }
}
