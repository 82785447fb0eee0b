//! diner — a small evening at the bistro.
//!
//! Two waiters, four tables, and groups of one to four guests arriving at a
//! fixed cadence.  Every group is greeted, escorted to a table, orders food
//! and dessert, eats, pays, and leaves.
//!
//! ```text
//! cargo run -p diner [config.json] [menu.csv]
//! RUST_LOG=debug cargo run -p diner      # every state transition
//! ```

mod room;

use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use bistro_actor::ClockAnimator;
use bistro_behavior::{GroupState, GuestGroup, Menu, load_menu_csv, load_menu_reader};
use bistro_core::{GroupId, SimConfig, Tick};
use bistro_grid::{AStar, Grid};
use bistro_sim::{SimBuilder, SimObserver};

use room::{ROOM, build_floor_plan};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:          u64 = 7;
const TOTAL_TICKS:   u64 = 24_000; // 20 minutes at 50 ms per tick
const SPAWN_EVERY:   u64 = 900;
const EAT_TICKS:     u64 = 24;
const DRINK_TICKS:   u64 = 16;

const VARIANTS: [&str; 6] = ["amber", "cobalt", "fern", "plum", "rust", "slate"];

// ── Menu CSV ──────────────────────────────────────────────────────────────────

const MENU_CSV: &str = "\
name,kind,price_cents,portions\n\
Onion soup,food,750,4\n\
Duck confit,food,2200,5\n\
Ratatouille,food,1450,4\n\
Moules frites,food,1900,5\n\
Citron pressé,drink,400,1\n\
Glass of Bordeaux,drink,900,2\n\
Espresso,drink,300,1\n\
Tarte Tatin,dessert,650,3\n\
Crème caramel,dessert,600,3\n\
Cheese plate,dessert,1100,4\n\
";

// ── Observer ──────────────────────────────────────────────────────────────────

/// One finished visit.
struct Visit {
    group:   GroupId,
    size:    usize,
    arrived: Tick,
    left:    Tick,
    bill:    u32,
    dishes:  u32,
}

/// Collects visits and counts barrier transitions.
#[derive(Default)]
struct DinerLog {
    spawned:     usize,
    transitions: usize,
    visits:      Vec<Visit>,
}

impl SimObserver for DinerLog {
    fn on_group_spawned(&mut self, _tick: Tick, _group: GroupId, _size: usize) {
        self.spawned += 1;
    }

    fn on_group_state(&mut self, tick: Tick, group: GroupId, _from: GroupState, to: GroupState) {
        self.transitions += 1;
        tracing::debug!(%group, %to, %tick, "barrier passed");
    }

    fn on_group_left(&mut self, tick: Tick, group: &GuestGroup) {
        let visit = Visit {
            group:   group.id(),
            size:    group.size(),
            arrived: group.arrived_at(),
            left:    tick,
            bill:    group.guests().iter().map(|g| g.paid_cents()).sum(),
            dishes:  group.guests().iter().map(|g| g.dishes_finished()).sum(),
        };
        tracing::info!(
            group = %visit.group,
            stayed = tick.since(visit.arrived),
            bill_cents = visit.bill,
            "visit over"
        );
        self.visits.push(visit);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        tracing::info!(%final_tick, visits = self.visits.len(), "closing time");
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

/// The demo config, or the one in `path` when given.  Fields missing from
/// the JSON keep their `SimConfig::default()` values.
fn load_config(path: Option<&str>) -> Result<SimConfig> {
    match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening config {path}"))?;
            let config = serde_json::from_reader(file).with_context(|| format!("parsing config {path}"))?;
            Ok(config)
        }
        None => Ok(SimConfig {
            total_ticks: TOTAL_TICKS,
            seed: SEED,
            spawn_interval_ticks: SPAWN_EVERY,
            ..SimConfig::default()
        }),
    }
}

fn load_menu(path: Option<&str>) -> Result<Menu> {
    let menu = match path {
        Some(path) => load_menu_csv(Path::new(path)).with_context(|| format!("loading menu {path}"))?,
        None => load_menu_reader(Cursor::new(MENU_CSV))?,
    };
    Ok(menu)
}

fn cents(c: u64) -> String {
    format!("{}.{:02}", c / 100, c % 100)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str))?;
    let menu = load_menu(args.get(1).map(String::as_str))?;

    println!("=== diner — bistro simulation ===");
    println!(
        "Ticks: {}  |  Tile: {} px  |  Seed: {}  |  Spawn every {} ticks",
        config.total_ticks, config.tile_size, config.seed, config.spawn_interval_ticks
    );
    println!("Menu: {} items", menu.len());
    println!();

    // 1. Room and floor plan.
    let grid = Grid::from_blueprint(&ROOM)?;
    let plan = build_floor_plan();
    println!(
        "Room: {}×{} tiles, {} tables, {} seats",
        grid.rows(),
        grid.cols(),
        plan.tables.len(),
        plan.tables.iter().map(|t| t.capacity()).sum::<usize>()
    );

    // 2. Build sim.
    let animator = ClockAnimator::with_defaults(EAT_TICKS, DRINK_TICKS)?;
    let mut sim = SimBuilder::new(config, grid, plan, AStar, animator)
        .menu(menu)
        .variants(VARIANTS)
        .build()?;
    println!("Waiters: {}", sim.waiters.len());
    println!();

    // 3. Run.
    let mut log = DinerLog::default();
    let t0 = Instant::now();
    sim.run(&mut log)?;
    let elapsed = t0.elapsed();

    // 4. Summary.
    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), sim.clock);
    println!(
        "  groups: {} arrived, {} left, {} still inside",
        sim.stats.groups_spawned,
        sim.stats.groups_left,
        sim.groups.len()
    );
    println!("  timed arrivals     : {}", log.spawned);
    println!("  barrier transitions: {}", log.transitions);
    println!("  dishes finished    : {}", sim.stats.dishes_finished);
    println!("  revenue            : {}", cents(sim.stats.revenue_cents));
    println!("  mailbox overwrites : {}", sim.mailbox.overwrites());
    println!();

    println!("{:<10} {:>5} {:>9} {:>9} {:>7} {:>9}", "Group", "Size", "Arrived", "Left", "Dishes", "Bill");
    println!("{}", "-".repeat(54));
    for v in &log.visits {
        println!(
            "{:<10} {:>5} {:>9} {:>9} {:>7} {:>9}",
            v.group.to_string(),
            v.size,
            v.arrived.to_string(),
            v.left.to_string(),
            v.dishes,
            cents(u64::from(v.bill)),
        );
    }
    println!();

    println!("{:<10} {:>7} {:>7} {:>7} {:>10}", "Waiter", "Seated", "Taken", "Served", "Takings");
    println!("{}", "-".repeat(45));
    for w in &sim.waiters {
        println!(
            "{:<10} {:>7} {:>7} {:>7} {:>10}",
            w.id().to_string(),
            w.groups_seated(),
            w.orders_taken(),
            w.orders_served(),
            cents(u64::from(w.takings_cents())),
        );
    }

    Ok(())
}
