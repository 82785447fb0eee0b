//! Unit tests for bistro-grid.
//!
//! All grids are small hand-written blueprints so expected paths can be
//! checked by eye.

#[cfg(test)]
mod helpers {
    use bistro_core::Cell;

    use crate::Path;

    /// Every consecutive pair differs by exactly one orthogonal step.
    pub fn assert_orthogonal_steps(path: &Path) {
        for pair in path.cells().windows(2) {
            assert_eq!(
                pair[0].manhattan(pair[1]),
                1,
                "non-adjacent step {} -> {}",
                pair[0],
                pair[1]
            );
        }
    }

    pub fn contains(path: &Path, cell: Cell) -> bool {
        path.cells().contains(&cell)
    }
}

// ── Grid structure ────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid {
    use bistro_core::{ActorId, Cell};

    use crate::{Grid, GridError, Marker};

    #[test]
    fn new_grid_is_free() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.count(|m| m == Marker::Free), 12);
    }

    #[test]
    fn blueprint_parsing() {
        let grid = Grid::from_blueprint(&["..#", "#..", "..."]).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 3);
        assert!(grid.is_blocked(Cell::new(0, 2)));
        assert!(grid.is_blocked(Cell::new(1, 0)));
        assert!(grid.is_walkable(Cell::new(2, 2)));
        assert_eq!(grid.count(|m| m == Marker::Blocked), 2);
        assert_eq!(grid.to_string(), "..#\n#..\n...\n");
    }

    #[test]
    fn blueprint_rejects_ragged_rows() {
        let err = Grid::from_blueprint(&["...", ".."]).unwrap_err();
        assert!(matches!(err, GridError::Blueprint(_)));
    }

    #[test]
    fn blueprint_rejects_unknown_glyph() {
        let err = Grid::from_blueprint(&[".x."]).unwrap_err();
        assert!(matches!(err, GridError::Blueprint(_)));
    }

    #[test]
    fn out_of_bounds_access() {
        let mut grid = Grid::new(2, 2);
        assert_eq!(grid.get(Cell::new(-1, 0)), None);
        assert_eq!(grid.get(Cell::new(0, 2)), None);
        assert!(!grid.is_walkable(Cell::new(2, 0)));
        assert!(!grid.is_blocked(Cell::new(2, 0)));
        let err = grid.set(Cell::new(5, 5), Marker::Blocked).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds(_)));
    }

    #[test]
    fn block_and_holder() {
        let mut grid = Grid::new(3, 3);
        grid.block([Cell::new(1, 1), Cell::new(1, 2)]).unwrap();
        assert!(grid.is_blocked(Cell::new(1, 1)));
        assert!(grid.is_blocked(Cell::new(1, 2)));

        grid.set(Cell::new(0, 0), Marker::Occupied(ActorId(9))).unwrap();
        assert_eq!(grid.holder(Cell::new(0, 0)), Some(ActorId(9)));
        assert_eq!(grid.holder(Cell::new(0, 1)), None);
        // Held cells are still walkable for the planner.
        assert!(grid.is_walkable(Cell::new(0, 0)));
    }

    #[test]
    fn neighbours_in_fixed_order() {
        let grid = Grid::new(3, 3);
        let ns: Vec<_> = grid.neighbors(Cell::new(1, 1)).collect();
        assert_eq!(
            ns,
            vec![Cell::new(0, 1), Cell::new(2, 1), Cell::new(1, 0), Cell::new(1, 2)]
        );
    }

    #[test]
    fn corner_neighbours_are_clipped() {
        let grid = Grid::new(3, 3);
        let ns: Vec<_> = grid.neighbors(Cell::new(0, 0)).collect();
        assert_eq!(ns, vec![Cell::new(1, 0), Cell::new(0, 1)]);
    }
}

// ── Occupancy ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod occupancy {
    use bistro_core::{ActorId, Cell, Point};

    use crate::{Grid, Marker, Occupancy};

    const TILE: u32 = 16;

    fn at(cell: Cell) -> Point {
        cell.to_point(TILE)
    }

    #[test]
    fn first_claim_and_stay() {
        let mut grid = Grid::new(4, 4);
        let a = ActorId(0);
        let mut held = None;

        let out = grid.reconcile(a, &mut held, at(Cell::new(1, 1)), TILE);
        assert_eq!(out, Occupancy::Moved { from: None, to: Cell::new(1, 1) });
        assert_eq!(held, Some(Cell::new(1, 1)));
        assert_eq!(grid.holder(Cell::new(1, 1)), Some(a));

        let out = grid.reconcile(a, &mut held, at(Cell::new(1, 1)), TILE);
        assert_eq!(out, Occupancy::Stayed);
    }

    #[test]
    fn unaligned_position_keeps_hold() {
        let mut grid = Grid::new(4, 4);
        let a = ActorId(0);
        let mut held = None;
        grid.reconcile(a, &mut held, at(Cell::new(1, 1)), TILE);

        let between = at(Cell::new(1, 1)).shifted(5, 0);
        assert_eq!(grid.reconcile(a, &mut held, between, TILE), Occupancy::Kept);
        assert_eq!(held, Some(Cell::new(1, 1)));
        assert_eq!(grid.holder(Cell::new(1, 1)), Some(a));
    }

    #[test]
    fn moving_leaves_cooldown_until_cleared() {
        let mut grid = Grid::new(4, 4);
        let a = ActorId(0);
        let b = ActorId(1);
        let mut held_a = None;
        let mut held_b = None;
        grid.reconcile(a, &mut held_a, at(Cell::new(1, 1)), TILE);

        let out = grid.reconcile(a, &mut held_a, at(Cell::new(1, 2)), TILE);
        assert_eq!(
            out,
            Occupancy::Moved { from: Some(Cell::new(1, 1)), to: Cell::new(1, 2) }
        );
        assert_eq!(grid.get(Cell::new(1, 1)), Some(Marker::Cooldown));

        // Same tick: b cannot claim the cell a just left.
        let out = grid.reconcile(b, &mut held_b, at(Cell::new(1, 1)), TILE);
        assert_eq!(out, Occupancy::Cooling(Cell::new(1, 1)));
        assert_eq!(held_b, None);

        // Next tick: cooldown is gone and b may claim it.
        grid.clear_cooldowns();
        assert_eq!(grid.get(Cell::new(1, 1)), Some(Marker::Free));
        let out = grid.reconcile(b, &mut held_b, at(Cell::new(1, 1)), TILE);
        assert_eq!(out, Occupancy::Moved { from: None, to: Cell::new(1, 1) });
    }

    #[test]
    fn held_cell_is_never_shared() {
        let mut grid = Grid::new(4, 4);
        let a = ActorId(0);
        let b = ActorId(1);
        let mut held_a = None;
        let mut held_b = None;
        grid.reconcile(a, &mut held_a, at(Cell::new(2, 2)), TILE);
        grid.reconcile(b, &mut held_b, at(Cell::new(2, 3)), TILE);

        let out = grid.reconcile(b, &mut held_b, at(Cell::new(2, 2)), TILE);
        assert_eq!(out, Occupancy::Contested { cell: Cell::new(2, 2), holder: a });
        assert_eq!(held_b, Some(Cell::new(2, 3)));
        assert_eq!(grid.holder(Cell::new(2, 2)), Some(a));
        assert_eq!(grid.holder(Cell::new(2, 3)), Some(b));
        assert_eq!(grid.count(|m| matches!(m, Marker::Occupied(_))), 2);
    }

    #[test]
    fn blocked_cell_is_never_claimed() {
        let mut grid = Grid::from_blueprint(&["..", ".#"]).unwrap();
        let mut held = None;
        let out = grid.reconcile(ActorId(0), &mut held, at(Cell::new(1, 1)), TILE);
        assert_eq!(out, Occupancy::Kept);
        assert!(grid.is_blocked(Cell::new(1, 1)));
        assert_eq!(held, None);
    }

    #[test]
    fn vacate_frees_cell() {
        let mut grid = Grid::new(2, 2);
        let a = ActorId(3);
        let mut held = None;
        grid.reconcile(a, &mut held, at(Cell::new(0, 1)), TILE);
        grid.vacate(a, &mut held);
        assert_eq!(held, None);
        assert_eq!(grid.get(Cell::new(0, 1)), Some(Marker::Free));
    }
}

// ── Pathfinding ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod pathfinding {
    use bistro_core::Cell;

    use super::helpers::{assert_orthogonal_steps, contains};
    use crate::{AStar, BadPathRequest, Grid, PathError, Pathfinder};

    #[test]
    fn open_grid_path_is_manhattan_plus_one() {
        let grid = Grid::new(8, 8);
        for (start, goal) in [
            (Cell::new(0, 0), Cell::new(7, 7)),
            (Cell::new(3, 1), Cell::new(0, 6)),
            (Cell::new(5, 5), Cell::new(5, 0)),
        ] {
            let path = AStar.find_path(&grid, start, goal).unwrap();
            assert_eq!(path.len() as u32, start.manhattan(goal) + 1);
            assert_eq!(path.start(), Some(start));
            assert_eq!(path.goal(), Some(goal));
            assert_orthogonal_steps(&path);
        }
    }

    #[test]
    fn start_equals_goal() {
        let grid = Grid::new(3, 3);
        let c = Cell::new(1, 1);
        let path = AStar.find_path(&grid, c, c).unwrap();
        assert_eq!(path.cells(), &[c]);
        assert!(path.is_trivial());
        assert_eq!(path.steps(), 0);
    }

    #[test]
    fn routes_around_wall() {
        // Wall across column 2 with a gap at the bottom.
        let grid = Grid::from_blueprint(&[
            "..#..",
            "..#..",
            "..#..",
            ".....",
        ])
        .unwrap();
        let start = Cell::new(0, 0);
        let goal = Cell::new(0, 4);
        let path = AStar.find_path(&grid, start, goal).unwrap();

        assert_orthogonal_steps(&path);
        assert!(path.cells().iter().all(|&c| !grid.is_blocked(c)));
        assert!(contains(&path, Cell::new(3, 2)), "must pass through the gap");
        // Down 3, across 4, up 3.
        assert_eq!(path.steps(), 10);
    }

    #[test]
    fn enclosed_goal_is_not_found() {
        let grid = Grid::from_blueprint(&[
            ".....",
            ".###.",
            ".#.#.",
            ".###.",
            ".....",
        ])
        .unwrap();
        let start = Cell::new(0, 0);
        let goal = Cell::new(2, 2);
        let err = AStar.find_path(&grid, start, goal).unwrap_err();
        assert_eq!(err, PathError::NotFound { start, goal });
    }

    #[test]
    fn out_of_bounds_endpoint_is_bad_request() {
        let grid = Grid::new(3, 3);
        let err = AStar.find_path(&grid, Cell::new(0, 0), Cell::new(3, 0)).unwrap_err();
        assert_eq!(
            err,
            PathError::BadRequest(BadPathRequest::OutOfBounds(Cell::new(3, 0)))
        );
        let err = AStar.find_path(&grid, Cell::new(-1, 0), Cell::new(0, 0)).unwrap_err();
        assert!(matches!(err, PathError::BadRequest(BadPathRequest::OutOfBounds(_))));
    }

    #[test]
    fn blocked_endpoint_is_bad_request() {
        let grid = Grid::from_blueprint(&["...", ".#.", "..."]).unwrap();
        let err = AStar.find_path(&grid, Cell::new(0, 0), Cell::new(1, 1)).unwrap_err();
        assert_eq!(
            err,
            PathError::BadRequest(BadPathRequest::BlockedEndpoint(Cell::new(1, 1)))
        );
    }

    #[test]
    fn occupied_cells_do_not_block_search() {
        use bistro_core::ActorId;
        use crate::Marker;

        let mut grid = Grid::from_blueprint(&["...", "##.", "..."]).unwrap();
        grid.set(Cell::new(0, 2), Marker::Occupied(ActorId(1))).unwrap();
        grid.set(Cell::new(1, 2), Marker::Cooldown).unwrap();
        let path = AStar.find_path(&grid, Cell::new(0, 0), Cell::new(2, 0)).unwrap();
        assert_eq!(path.steps(), 6);
        assert_orthogonal_steps(&path);
    }

    #[test]
    fn search_is_deterministic() {
        let grid = Grid::new(6, 6);
        let a = AStar.find_path(&grid, Cell::new(0, 0), Cell::new(5, 5)).unwrap();
        let b = AStar.find_path(&grid, Cell::new(0, 0), Cell::new(5, 5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn pathfinder_is_object_safe() {
        let grid = Grid::new(2, 2);
        let finder: &dyn Pathfinder = &AStar;
        let path = finder.find_path(&grid, Cell::new(0, 0), Cell::new(1, 1)).unwrap();
        assert_eq!(path.len(), 3);
    }
}
