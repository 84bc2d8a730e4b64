#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic shortest-path search over the arena grid.
//!
//! The search is a classic A* with unit step cost and a Manhattan heuristic.
//! Neighbours are expanded in canonical direction order and every heap entry
//! carries an insertion counter, so identical terrain always yields the same
//! path.

use std::{cmp::Ordering, collections::BinaryHeap};

use knights_arena_core::{Direction, Position, TerrainView};

/// Cells that end a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Goal {
    /// Stand on the given cell.
    Reach(Position),
    /// Stand on any cell orthogonally adjacent to the given cell.
    Adjacent(Position),
}

impl Goal {
    /// Reports whether standing on `cell` fulfils the goal.
    #[must_use]
    pub fn is_satisfied_by(self, cell: Position) -> bool {
        match self {
            Self::Reach(target) => cell == target,
            Self::Adjacent(target) => cell.is_adjacent(target),
        }
    }

    /// Admissible estimate of the steps left from `cell`.
    #[must_use]
    pub fn heuristic(self, cell: Position) -> u32 {
        match self {
            Self::Reach(target) => cell.manhattan_distance(target),
            Self::Adjacent(target) => cell.manhattan_distance(target).saturating_sub(1),
        }
    }
}

/// Ordered cells from the start to a cell satisfying the goal, both inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Position>,
}

impl Path {
    /// Every cell on the path, starting with the origin.
    #[must_use]
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Number of cells on the path, including the origin.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a path contains at least its origin.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves needed to walk the path.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Last cell of the path.
    #[must_use]
    pub fn destination(&self) -> Option<Position> {
        self.cells.last().copied()
    }

    /// Cell entered by the first move, or `None` when already at the goal.
    #[must_use]
    pub fn first_step(&self) -> Option<Position> {
        self.cells.get(1).copied()
    }

    /// Direction of the first move, or `None` when already at the goal.
    #[must_use]
    pub fn first_direction(&self) -> Option<Direction> {
        let origin = self.cells.first().copied()?;
        origin.direction_to(self.first_step()?)
    }
}

#[derive(Clone, Copy, Debug)]
struct OpenNode {
    f: u32,
    h: u32,
    g: u32,
    cell: Position,
    tie: u64,
}

impl OpenNode {
    fn key(&self) -> (u32, u32, u64) {
        (self.f, self.h, self.tie)
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the cheapest node first.
        other.key().cmp(&self.key())
    }
}

/// Reusable A* search with scratch buffers sized to the grid.
#[derive(Clone, Debug, Default)]
pub struct Pathfinder {
    open: BinaryHeap<OpenNode>,
    g_score: Vec<u32>,
    came_from: Vec<Option<usize>>,
}

impl Pathfinder {
    /// Creates a pathfinder with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the shortest legal path from `start` to a cell satisfying `goal`.
    ///
    /// Returns a single-cell path when `start` already satisfies the goal and
    /// `None` when no satisfying cell is reachable.
    pub fn find_path(
        &mut self,
        start: Position,
        goal: Goal,
        terrain: &TerrainView<'_>,
    ) -> Option<Path> {
        let width = usize::try_from(terrain.size()).ok()?;
        let start_index = index(width, start)?;

        if goal.is_satisfied_by(start) {
            return Some(Path { cells: vec![start] });
        }

        self.reset(width.checked_mul(width)?);

        let mut tie: u64 = 0;
        let h0 = goal.heuristic(start);
        self.g_score[start_index] = 0;
        self.open.push(OpenNode {
            f: h0,
            h: h0,
            g: 0,
            cell: start,
            tie,
        });
        tie += 1;

        while let Some(node) = self.open.pop() {
            let node_index = index(width, node.cell)?;
            if node.g != self.g_score[node_index] {
                continue;
            }

            if goal.is_satisfied_by(node.cell) {
                return Some(self.reconstruct(width, node_index));
            }

            for (_, next) in terrain.neighbors(node.cell) {
                let Some(next_index) = index(width, next) else {
                    continue;
                };

                let tentative = node.g.saturating_add(1);
                if tentative >= self.g_score[next_index] {
                    continue;
                }

                self.came_from[next_index] = Some(node_index);
                self.g_score[next_index] = tentative;
                let h = goal.heuristic(next);
                self.open.push(OpenNode {
                    f: tentative.saturating_add(h),
                    h,
                    g: tentative,
                    cell: next,
                    tie,
                });
                tie += 1;
            }
        }

        None
    }

    fn reset(&mut self, cell_count: usize) {
        self.open.clear();
        self.g_score.clear();
        self.g_score.resize(cell_count, u32::MAX);
        self.came_from.clear();
        self.came_from.resize(cell_count, None);
    }

    fn reconstruct(&self, width: usize, mut current: usize) -> Path {
        let mut cells = vec![position(width, current)];
        while let Some(previous) = self.came_from[current] {
            current = previous;
            cells.push(position(width, current));
        }
        cells.reverse();
        Path { cells }
    }
}

fn index(width: usize, cell: Position) -> Option<usize> {
    let row = usize::try_from(cell.row()).ok()?;
    let column = usize::try_from(cell.column()).ok()?;
    if row >= width || column >= width {
        return None;
    }
    row.checked_mul(width)?.checked_add(column)
}

fn position(width: usize, index: usize) -> Position {
    let row = u32::try_from(index / width).unwrap_or(u32::MAX);
    let column = u32::try_from(index % width).unwrap_or(u32::MAX);
    Position::new(row, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use knights_arena_core::ObstacleSet;

    fn open_terrain(obstacles: &ObstacleSet) -> TerrainView<'_> {
        TerrainView::new(6, 6, obstacles, None)
    }

    #[test]
    fn start_on_goal_yields_single_cell_path() {
        let obstacles = ObstacleSet::new();
        let mut pathfinder = Pathfinder::new();
        let path = pathfinder
            .find_path(
                Position::new(2, 2),
                Goal::Reach(Position::new(2, 2)),
                &open_terrain(&obstacles),
            )
            .expect("path");

        assert_eq!(path.cells(), &[Position::new(2, 2)]);
        assert_eq!(path.first_step(), None);
        assert_eq!(path.first_direction(), None);
    }

    #[test]
    fn straight_corridor_is_followed() {
        let obstacles = ObstacleSet::new();
        let mut pathfinder = Pathfinder::new();
        let path = pathfinder
            .find_path(
                Position::new(0, 0),
                Goal::Reach(Position::new(0, 3)),
                &open_terrain(&obstacles),
            )
            .expect("path");

        assert_eq!(
            path.cells(),
            &[
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(0, 3),
            ]
        );
        assert_eq!(path.first_direction(), Some(Direction::Right));
        assert_eq!(path.steps(), 3);
    }

    #[test]
    fn adjacency_goal_stops_next_to_target() {
        let obstacles = ObstacleSet::new();
        let target = Position::new(0, 3);
        let terrain = TerrainView::new(6, 6, &obstacles, Some(target));
        let mut pathfinder = Pathfinder::new();
        let path = pathfinder
            .find_path(Position::new(0, 0), Goal::Adjacent(target), &terrain)
            .expect("path");

        assert_eq!(path.destination(), Some(Position::new(0, 2)));
        assert_eq!(path.steps(), 2);
    }

    #[test]
    fn walled_off_goal_has_no_path() {
        let obstacles: ObstacleSet = [Position::new(4, 5), Position::new(5, 4)]
            .into_iter()
            .collect();
        let mut pathfinder = Pathfinder::new();

        assert_eq!(
            pathfinder.find_path(
                Position::new(0, 0),
                Goal::Reach(Position::new(5, 5)),
                &open_terrain(&obstacles),
            ),
            None
        );
    }

    #[test]
    fn detours_around_obstacles() {
        let obstacles: ObstacleSet = [Position::new(0, 1), Position::new(1, 1)]
            .into_iter()
            .collect();
        let mut pathfinder = Pathfinder::new();
        let path = pathfinder
            .find_path(
                Position::new(0, 0),
                Goal::Reach(Position::new(0, 2)),
                &open_terrain(&obstacles),
            )
            .expect("path");

        assert_eq!(path.steps(), 6);
        assert_eq!(path.first_direction(), Some(Direction::Down));
    }

    #[test]
    fn scratch_buffers_are_reused_between_searches() {
        let obstacles = ObstacleSet::new();
        let terrain = open_terrain(&obstacles);
        let mut pathfinder = Pathfinder::new();
        let goal = Goal::Reach(Position::new(5, 5));

        let first = pathfinder.find_path(Position::new(0, 0), goal, &terrain);
        let second = pathfinder.find_path(Position::new(0, 0), goal, &terrain);

        assert!(first.is_some());
        assert_eq!(first, second);
    }
}
