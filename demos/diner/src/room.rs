//! The demo dining room.
//!
//! A walled 12×16 room with a door at the bottom, two two-seat tables on
//! the left and two four-seat tables on the right.

use bistro_behavior::{FloorPlan, Table};
use bistro_core::{Cell, Direction, TableId};

/// `#` wall, `.` floor.  Table footprints are carved in by the floor plan.
pub const ROOM: [&str; 12] = [
    "################",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#####..#########",
];

/// Tables, waiter idle spots, and the door cells.
pub fn build_floor_plan() -> FloorPlan {
    use Direction::*;

    let c = Cell::new;
    FloorPlan {
        tables: vec![
            Table::new(TableId(0), c(2, 3))
                .with_footprint([c(3, 3)])
                .with_seat(c(3, 2), Right)
                .with_seat(c(3, 4), Left),
            Table::new(TableId(1), c(2, 11))
                .with_footprint([c(3, 9), c(3, 10)])
                .with_seat(c(3, 8), Right)
                .with_seat(c(3, 11), Left)
                .with_seat(c(2, 9), Down)
                .with_seat(c(4, 10), Up),
            Table::new(TableId(2), c(6, 11))
                .with_footprint([c(7, 9), c(7, 10)])
                .with_seat(c(7, 8), Right)
                .with_seat(c(7, 11), Left)
                .with_seat(c(6, 9), Down)
                .with_seat(c(8, 10), Up),
            Table::new(TableId(3), c(6, 3))
                .with_footprint([c(7, 3)])
                .with_seat(c(7, 2), Right)
                .with_seat(c(7, 4), Left),
        ],
        idle_spots:   vec![c(1, 1), c(1, 14)],
        spawn_cells:  vec![c(10, 4), c(10, 5), c(10, 6), c(10, 7)],
        meeting_cell: c(9, 6),
        exit_cell:    c(11, 5),
    }
}
