//! Obstacle layout generation.

use std::collections::VecDeque;

use knights_arena_core::{ObstacleSet, Position, TerrainView};
use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

/// Maximum number of layouts drawn before giving up on connectivity.
pub const MAX_LAYOUT_ATTEMPTS: usize = 32;

/// Parameters describing the obstacle layout to draw.
#[derive(Clone, Copy, Debug)]
pub struct LayoutRequest<'a> {
    /// Side length of the full grid.
    pub size: u32,
    /// Side length of the playable zone the anchors must connect through.
    pub boundary: u32,
    /// Number of obstacles to place.
    pub count: usize,
    /// Cells that must stay free, such as combatants and hazards.
    pub reserved: &'a [Position],
    /// Cells that must stay mutually reachable.
    pub anchors: [Position; 2],
    /// Re-draws until the anchors are connected.
    pub ensure_reachable: bool,
}

impl LayoutRequest<'_> {
    /// Cells eligible to hold an obstacle, in row-major order.
    #[must_use]
    pub fn candidates(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        for row in 0..self.size {
            for column in 0..self.size {
                let cell = Position::new(row, column);
                if self.reserved.contains(&cell) || self.anchors.contains(&cell) {
                    continue;
                }
                cells.push(cell);
            }
        }
        cells
    }
}

/// Reasons an obstacle layout cannot be produced.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Fewer free cells exist than obstacles were requested.
    #[error("{requested} obstacles requested but only {available} cells are free")]
    InsufficientSpace {
        /// Requested obstacle count.
        requested: usize,
        /// Cells eligible to hold an obstacle.
        available: usize,
    },
    /// Every drawn layout separated the combatants.
    #[error("no layout keeping both combatants connected after {attempts} attempts")]
    Unreachable {
        /// Number of layouts drawn.
        attempts: usize,
    },
}

/// Draws a random obstacle layout by sampling the eligible cells directly.
///
/// Sampling never retries individual cells, so the draw terminates even on a
/// nearly full grid. Only the connectivity check may re-draw, at most
/// [`MAX_LAYOUT_ATTEMPTS`] times.
pub fn generate_obstacles<R>(
    rng: &mut R,
    request: &LayoutRequest<'_>,
) -> Result<ObstacleSet, LayoutError>
where
    R: Rng + ?Sized,
{
    let candidates = request.candidates();
    if request.count > candidates.len() {
        return Err(LayoutError::InsufficientSpace {
            requested: request.count,
            available: candidates.len(),
        });
    }

    let attempts = if request.ensure_reachable {
        MAX_LAYOUT_ATTEMPTS
    } else {
        1
    };

    for attempt in 1..=attempts {
        let obstacles: ObstacleSet = candidates
            .choose_multiple(rng, request.count)
            .copied()
            .collect();

        if !request.ensure_reachable {
            return Ok(obstacles);
        }

        let [from, to] = request.anchors;
        let terrain = TerrainView::new(request.size, request.boundary, &obstacles, None);
        if is_connected(&terrain, from, to) {
            tracing::trace!(attempt, obstacles = obstacles.len(), "obstacle layout accepted");
            return Ok(obstacles);
        }
    }

    Err(LayoutError::Unreachable { attempts })
}

/// Reports whether the combatants at `a` and `b` can walk to one another.
///
/// Steps follow the terrain's movement rule, so a shrunken zone is honoured.
/// A combatant stranded outside the zone may only walk inward, hence both
/// directions are tried.
#[must_use]
pub fn is_connected(terrain: &TerrainView<'_>, a: Position, b: Position) -> bool {
    walks_to(terrain, a, b) || walks_to(terrain, b, a)
}

fn walks_to(terrain: &TerrainView<'_>, from: Position, to: Position) -> bool {
    let width = usize::try_from(terrain.size()).unwrap_or(0);
    let Some(cell_count) = width.checked_mul(width) else {
        return false;
    };
    let (Some(start), Some(_)) = (index(width, from), index(width, to)) else {
        return false;
    };

    let mut visited = vec![false; cell_count];
    let mut queue = VecDeque::new();
    visited[start] = true;
    queue.push_back(from);

    while let Some(cell) = queue.pop_front() {
        if cell == to {
            return true;
        }

        for (_, neighbor) in terrain.neighbors(cell) {
            let Some(neighbor_index) = index(width, neighbor) else {
                continue;
            };

            if visited[neighbor_index] {
                continue;
            }

            visited[neighbor_index] = true;
            queue.push_back(neighbor);
        }
    }

    false
}

fn index(width: usize, cell: Position) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    if column >= width || row >= width {
        return None;
    }
    row.checked_mul(width)?.checked_add(column)
}
