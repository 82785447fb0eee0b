//! Unit tests for bistro-walk.

#[cfg(test)]
mod helpers {
    use bistro_core::Cell;
    use bistro_grid::Path;

    /// A straight or L-shaped path through the given cells.
    pub fn path(cells: &[(i32, i32)]) -> Path {
        Path::new(cells.iter().map(|&(r, c)| Cell::new(r, c)).collect())
    }
}

// ── WalkPath ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod walk_path {
    use bistro_core::{Cell, Direction, Point};
    use bistro_grid::{AStar, Grid, PathError};

    use super::helpers::path;
    use crate::{WalkError, WalkPath};

    const TILE: u32 = 4;

    #[test]
    fn reaches_goal_after_exactly_n_minus_one_tiles() {
        let cells = [(0, 0), (0, 1), (1, 1), (2, 1)];
        let mut walk = WalkPath::from_path(path(&cells), TILE);
        let needed = (cells.len() as u32 - 1) * TILE;

        for i in 0..needed {
            assert!(!walk.has_reached_goal(), "reached early before update {i}");
            walk.update();
        }
        assert!(walk.has_reached_goal());
        assert_eq!(walk.pos(), Cell::new(2, 1).to_point(TILE));
        assert_eq!(walk.cell_count(), 3);
        assert_eq!(walk.progress(), 1.0);
    }

    #[test]
    fn updates_after_goal_are_no_ops() {
        let mut walk = WalkPath::from_path(path(&[(0, 0), (0, 1)]), TILE);
        for _ in 0..TILE {
            walk.update();
        }
        let pos = walk.pos();
        walk.update();
        walk.update();
        assert_eq!(walk.pos(), pos);
        assert_eq!(walk.cell_count(), 1);
    }

    #[test]
    fn zero_length_path_is_reached_immediately() {
        let walk = WalkPath::from_path(path(&[(3, 3)]), TILE);
        assert!(walk.has_reached_goal());
        assert_eq!(walk.facing(), None);
        assert_eq!(walk.pos(), Point::new(12, 12));
        assert_eq!(walk.progress(), 1.0);
    }

    #[test]
    fn moves_one_pixel_per_tick() {
        let mut walk = WalkPath::from_path(path(&[(0, 0), (0, 1), (1, 1)]), TILE);
        walk.update();
        assert_eq!(walk.pos(), Point::new(1, 0));
        walk.update();
        assert_eq!(walk.pos(), Point::new(2, 0));
        assert_eq!(walk.cell_count(), 0);
        assert!((walk.progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn facing_follows_next_segment_then_keeps_last() {
        let mut walk = WalkPath::from_path(path(&[(0, 0), (0, 1), (1, 1)]), TILE);
        assert_eq!(walk.facing(), Some(Direction::Right));
        for _ in 0..TILE {
            walk.update();
        }
        assert_eq!(walk.cell_count(), 1);
        assert_eq!(walk.facing(), Some(Direction::Down));
        for _ in 0..TILE {
            walk.update();
        }
        assert!(walk.has_reached_goal());
        assert_eq!(walk.facing(), Some(Direction::Down));
    }

    #[test]
    fn plan_routes_through_pathfinder() {
        let grid = Grid::new(5, 5);
        let walk = WalkPath::plan(&AStar, &grid, Point::new(0, 0), Cell::new(2, 3), TILE)
            .unwrap();
        assert_eq!(walk.path().len(), 6);
        assert_eq!(walk.goal(), Some(Cell::new(2, 3)));
        assert_eq!(walk.current_cell(), Some(Cell::new(0, 0)));
    }

    #[test]
    fn plan_requires_alignment() {
        let grid = Grid::new(5, 5);
        let err = WalkPath::plan(&AStar, &grid, Point::new(1, 0), Cell::new(2, 3), TILE)
            .unwrap_err();
        assert!(matches!(err, WalkError::NotAligned(_)));
    }

    #[test]
    fn plan_propagates_routing_errors() {
        let grid = Grid::from_blueprint(&["..#", "###", "..."]).unwrap();
        let err = WalkPath::plan(&AStar, &grid, Point::new(0, 0), Cell::new(2, 2), TILE)
            .unwrap_err();
        assert!(matches!(err, WalkError::Routing(PathError::NotFound { .. })));
    }
}

// ── approach ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod approach {
    use bistro_core::{Direction, Point};

    use crate::{approach, facing_toward};

    #[test]
    fn x_resolves_before_y() {
        let target = Point::new(2, -2);
        let mut pos = Point::new(0, 0);
        let mut trail = Vec::new();
        while pos != target {
            pos = approach(pos, target);
            trail.push(pos);
        }
        assert_eq!(
            trail,
            vec![
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, -1),
                Point::new(2, -2),
            ]
        );
        assert_eq!(approach(pos, target), target);
    }

    #[test]
    fn facing_toward_uses_both_axes() {
        let o = Point::new(0, 0);
        assert_eq!(facing_toward(o, Point::new(5, 0)), Some(Direction::Right));
        assert_eq!(facing_toward(o, Point::new(0, -3)), Some(Direction::Up));
        assert_eq!(facing_toward(o, Point::new(-2, 2)), Some(Direction::DownLeft));
        assert_eq!(facing_toward(o, o), None);
    }
}
