//! Hazard instances currently on the board.

use knights_arena_core::{BombSnapshot, Position, PowerUpSnapshot};

/// Healing pickup waiting to be collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PowerUp {
    pub(crate) cell: Position,
    pub(crate) remaining: u32,
}

impl PowerUp {
    pub(crate) fn snapshot(&self) -> PowerUpSnapshot {
        PowerUpSnapshot {
            cell: self.cell,
            remaining: self.remaining,
        }
    }
}

/// Armed bomb counting down to detonation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Bomb {
    pub(crate) cell: Position,
    pub(crate) fuse: u32,
}

impl Bomb {
    pub(crate) fn snapshot(&self) -> BombSnapshot {
        BombSnapshot {
            cell: self.cell,
            fuse: self.fuse,
        }
    }
}
