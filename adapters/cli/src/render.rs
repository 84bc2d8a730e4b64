//! Text rendering of the arena.

use std::fmt::Write as _;

use knights_arena_core::{is_in_bounds, MatchSnapshot, Position};

const KNIGHT: char = 'K';
const OPPONENT: char = 'O';
const OBSTACLE: char = '#';
const POWER_UP: char = '+';
const BOMB: char = '*';
const OUTSIDE_ZONE: char = '~';
const EMPTY: char = '.';

/// Draws the grid row by row, one character per cell.
pub(crate) fn render_grid(snapshot: &MatchSnapshot) -> String {
    let mut out = String::new();
    for row in 0..snapshot.grid_size {
        for column in 0..snapshot.grid_size {
            if column > 0 {
                out.push(' ');
            }
            out.push(glyph(snapshot, Position::new(row, column)));
        }
        out.push('\n');
    }
    out
}

fn glyph(snapshot: &MatchSnapshot, cell: Position) -> char {
    if cell == snapshot.player.position {
        KNIGHT
    } else if cell == snapshot.opponent.position {
        OPPONENT
    } else if snapshot.obstacles.contains(cell) {
        OBSTACLE
    } else if snapshot.bomb.is_some_and(|bomb| bomb.cell == cell) {
        BOMB
    } else if snapshot.power_up.is_some_and(|power_up| power_up.cell == cell) {
        POWER_UP
    } else if !is_in_bounds(cell, snapshot.boundary) {
        OUTSIDE_ZONE
    } else {
        EMPTY
    }
}

/// One-line summary of hit points, cooldowns and the turn counter.
pub(crate) fn status_line(snapshot: &MatchSnapshot) -> String {
    let mut line = format!(
        "Turn {} | Knight HP {} | Opponent HP {}",
        snapshot.turn, snapshot.player.health, snapshot.opponent.health
    );
    for (kind, remaining) in &snapshot.player.cooldowns {
        let _ = write!(line, " | {kind} ready in {remaining}");
    }
    if let Some(stamina) = snapshot.player.stamina {
        let _ = write!(line, " | Stamina {}/{}", stamina.current(), stamina.max());
    }
    if let Some(bomb) = snapshot.bomb {
        let _ = write!(line, " | Bomb fuse {}", bomb.fuse);
    }
    line
}
