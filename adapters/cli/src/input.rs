//! Parsing of the commands typed at the prompt.

use knights_arena_core::{AttackKind, Direction, PlayerAction};
use thiserror::Error;

/// A line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    /// Resolve a turn with the given action.
    Action(PlayerAction),
    /// Print the current state without playing a turn.
    State,
    /// Print the command reference.
    Help,
    /// Leave the match.
    Quit,
}

/// Reasons a line cannot be understood.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum InputError {
    /// The line held nothing but whitespace.
    #[error("type a command, or `help` to list them")]
    Empty,
    /// The line did not match any command.
    #[error("unknown command `{0}`, type `help` to list commands")]
    Unknown(String),
}

/// Reference printed by the `help` command.
pub(crate) const HELP: &str = "\
Commands:
  up | down | left | right   (or w | s | a | d)  move one cell
  light | sword | special                        attack the adjacent opponent
  state                                          show the arena
  help                                           show this list
  quit                                           leave the match";

/// Parses one line of input, ignoring case and surrounding whitespace.
pub(crate) fn parse(line: &str) -> Result<Input, InputError> {
    let word = line.trim().to_ascii_lowercase();
    let input = match word.as_str() {
        "" => return Err(InputError::Empty),
        "up" | "w" => movement(Direction::Up),
        "down" | "s" => movement(Direction::Down),
        "left" | "a" => movement(Direction::Left),
        "right" | "d" => movement(Direction::Right),
        "light" => attack(AttackKind::Light),
        "sword" => attack(AttackKind::Sword),
        "special" => attack(AttackKind::Special),
        "state" => Input::State,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        _ => return Err(InputError::Unknown(word)),
    };
    Ok(input)
}

fn movement(direction: Direction) -> Input {
    Input::Action(PlayerAction::Move { direction })
}

fn attack(kind: AttackKind) -> Input {
    Input::Action(PlayerAction::Attack { kind })
}
