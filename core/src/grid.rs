//! Spatial primitives shared by the world and every system.

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

/// Location of a single arena cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: u32,
    column: u32,
}

impl Position {
    /// Creates a new arena position.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }

    /// Reports whether the two positions share an edge.
    #[must_use]
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Position one step away in the provided direction.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    /// Upper bounds are the caller's concern because they depend on the
    /// current grid and zone.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Position> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Self::new(row, self.column)),
            Direction::Down => self.row.checked_add(1).map(|row| Self::new(row, self.column)),
            Direction::Left => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(self.row, column)),
            Direction::Right => self
                .column
                .checked_add(1)
                .map(|column| Self::new(self.row, column)),
        }
    }

    /// Direction that leads from `self` to an adjacent position.
    #[must_use]
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| self.step(*direction) == Some(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Cardinal movement directions, listed in the canonical expansion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward decreasing row indices.
    Up,
    /// Toward increasing row indices.
    Down,
    /// Toward decreasing column indices.
    Left,
    /// Toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in the order used for deterministic tie-breaking.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(label)
    }
}

/// Reports whether a position lies within a square boundary anchored at the origin.
#[must_use]
pub fn is_in_bounds(position: Position, boundary: u32) -> bool {
    position.row() < boundary && position.column() < boundary
}

/// Manhattan distance between two positions.
#[must_use]
pub fn manhattan_distance(a: Position, b: Position) -> u32 {
    a.manhattan_distance(b)
}

/// Reports whether two positions are exactly one step apart.
#[must_use]
pub fn is_adjacent(a: Position, b: Position) -> bool {
    a.is_adjacent(b)
}

/// Reports whether the position is marked impassable.
#[must_use]
pub fn is_blocked(position: Position, obstacles: &ObstacleSet) -> bool {
    obstacles.contains(position)
}

/// Number of steps a position sits outside the playable zone.
///
/// Zero for every position inside the boundary.
#[must_use]
pub fn zone_excess(position: Position, boundary: u32) -> u32 {
    position.row().saturating_add(1).saturating_sub(boundary)
        + position.column().saturating_add(1).saturating_sub(boundary)
}

/// Deterministically ordered set of impassable cells.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObstacleSet {
    cells: BTreeSet<Position>,
}

impl ObstacleSet {
    /// Creates an empty obstacle set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports whether the provided cell is impassable.
    #[must_use]
    pub fn contains(&self, cell: Position) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of impassable cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether no cell is blocked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterator over the blocked cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<Position> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Reasons a single step may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveFailure {
    /// The destination lies beyond the edge of the grid.
    OutOfBounds,
    /// The destination lies outside the playable zone and does not lead back toward it.
    OutsideZone,
    /// The destination is an obstacle.
    Obstacle,
    /// The rival combatant stands on the destination.
    Occupied,
}

impl fmt::Display for MoveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::OutOfBounds => "the edge of the arena",
            Self::OutsideZone => "the closing zone",
            Self::Obstacle => "a wall",
            Self::Occupied => "the other combatant",
        };
        f.write_str(label)
    }
}

/// Read-only view of the terrain as seen by one combatant.
///
/// The rival's cell counts as occupied, everything else follows the grid
/// size, the zone boundary and the obstacle set.
#[derive(Clone, Copy, Debug)]
pub struct TerrainView<'a> {
    size: u32,
    boundary: u32,
    obstacles: &'a ObstacleSet,
    occupant: Option<Position>,
}

impl<'a> TerrainView<'a> {
    /// Captures a new terrain view.
    #[must_use]
    pub const fn new(
        size: u32,
        boundary: u32,
        obstacles: &'a ObstacleSet,
        occupant: Option<Position>,
    ) -> Self {
        Self {
            size,
            boundary,
            obstacles,
            occupant,
        }
    }

    /// Side length of the full grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Current side length of the playable zone.
    #[must_use]
    pub const fn boundary(&self) -> u32 {
        self.boundary
    }

    /// Cell held by the rival combatant, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<Position> {
        self.occupant
    }

    /// Obstacles that block traversal.
    #[must_use]
    pub const fn obstacles(&self) -> &'a ObstacleSet {
        self.obstacles
    }

    /// Validates a move between two cells.
    pub fn check_step(&self, from: Position, to: Position) -> Result<(), MoveFailure> {
        if !is_in_bounds(to, self.size) {
            return Err(MoveFailure::OutOfBounds);
        }

        if !is_in_bounds(to, self.boundary)
            && zone_excess(to, self.boundary) >= zone_excess(from, self.boundary)
        {
            return Err(MoveFailure::OutsideZone);
        }

        if is_blocked(to, self.obstacles) {
            return Err(MoveFailure::Obstacle);
        }

        if self.occupant == Some(to) {
            return Err(MoveFailure::Occupied);
        }

        Ok(())
    }

    /// Reports whether a move between two cells is legal.
    #[must_use]
    pub fn can_step(&self, from: Position, to: Position) -> bool {
        self.check_step(from, to).is_ok()
    }

    /// Legal neighbours of a cell in canonical direction order.
    pub fn neighbors(&self, from: Position) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            let to = from.step(direction)?;
            self.can_step(from, to).then_some((direction, to))
        })
    }
}
