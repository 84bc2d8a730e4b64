#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-priority decision procedure for the autonomous opponent.
//!
//! Exactly one branch runs per turn, checked in this order: an active or
//! freshly triggered retreat, an attack on an adjacent knight, a detour to the
//! power-up and finally a step toward the knight.

use knights_arena_core::{
    AttackKind, Command, Direction, HoldReason, Maneuver, MatchSnapshot, Position, Side,
};
use knights_arena_system_combat::CombatResolver;
use knights_arena_system_pathfinding::{Goal, Pathfinder};

/// Turns a retreat lasts once triggered.
pub const RETREAT_TURNS: u32 = 2;

/// The opponent considers retreating below this many hit points.
const RETREAT_HP: i32 = 3;

/// The opponent considers fetching the power-up below this many hit points.
const SEEK_HP: i32 = 5;

/// Distance at which the knight counts as a threat.
const THREAT_RANGE: u32 = 2;

/// Branch chosen by the policy for one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Back away from the knight.
    Retreat {
        /// Retreat turns still owed after this one.
        remaining: u32,
    },
    /// Strike the adjacent knight.
    Attack,
    /// Head for the power-up at the given cell.
    SeekPowerUp {
        /// Cell holding the power-up.
        cell: Position,
    },
    /// Close in on the knight.
    Approach,
}

/// Pure system that chooses and emits the opponent's action for a turn.
///
/// The retreat counter lives in the match state, so any policy instance
/// picks up a retreat where the previous one left it.
#[derive(Clone, Debug, Default)]
pub struct OpponentPolicy {
    pathfinder: Pathfinder,
}

impl OpponentPolicy {
    /// Creates a policy with fresh pathfinding buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks this turn's branch.
    #[must_use]
    pub fn decide(&self, snapshot: &MatchSnapshot) -> Decision {
        let opponent_hp = snapshot.opponent.health.get();
        let player_hp = snapshot.player.health.get();
        let distance = snapshot.separation();

        let retreat_turns =
            if opponent_hp < RETREAT_HP && player_hp > opponent_hp && distance <= THREAT_RANGE {
                RETREAT_TURNS
            } else {
                snapshot.retreat_turns
            };

        if retreat_turns > 0 {
            return Decision::Retreat {
                remaining: retreat_turns - 1,
            };
        }

        if distance == 1 {
            return Decision::Attack;
        }

        if let Some(power_up) = snapshot.power_up {
            if opponent_hp < SEEK_HP && distance > THREAT_RANGE {
                return Decision::SeekPowerUp {
                    cell: power_up.cell,
                };
            }
        }

        Decision::Approach
    }

    /// Emits the commands carrying out this turn's decision.
    pub fn handle(
        &mut self,
        snapshot: &MatchSnapshot,
        combat: &CombatResolver,
        out: &mut Vec<Command>,
    ) {
        let decision = self.decide(snapshot);
        tracing::debug!(?decision, "opponent decided");

        match decision {
            Decision::Retreat { remaining } => {
                out.push(Command::SetRetreat { turns: remaining });
                match retreat_direction(snapshot) {
                    Some(direction) => out.push(step(direction, Maneuver::Retreat)),
                    None => out.push(hold(HoldReason::Cornered)),
                }
            }
            Decision::Attack => combat.handle(Side::Opponent, AttackKind::Light, snapshot, out),
            Decision::SeekPowerUp { cell } => {
                match self.first_direction(snapshot, Goal::Reach(cell)) {
                    Some(direction) => out.push(step(direction, Maneuver::SeekPowerUp)),
                    None => self.approach(snapshot, out),
                }
            }
            Decision::Approach => self.approach(snapshot, out),
        }
    }

    fn approach(&mut self, snapshot: &MatchSnapshot, out: &mut Vec<Command>) {
        let goal = Goal::Adjacent(snapshot.player.position);
        match self.first_direction(snapshot, goal) {
            Some(direction) => out.push(step(direction, Maneuver::Approach)),
            None => out.push(hold(HoldReason::NoPath)),
        }
    }

    fn first_direction(&mut self, snapshot: &MatchSnapshot, goal: Goal) -> Option<Direction> {
        let terrain = snapshot.terrain_for(Side::Opponent);
        self.pathfinder
            .find_path(snapshot.opponent.position, goal, &terrain)?
            .first_direction()
    }
}

/// Legal neighbour farthest from the knight, earliest direction winning ties.
fn retreat_direction(snapshot: &MatchSnapshot) -> Option<Direction> {
    let terrain = snapshot.terrain_for(Side::Opponent);
    let knight = snapshot.player.position;

    let mut best: Option<(Direction, u32)> = None;
    for (direction, cell) in terrain.neighbors(snapshot.opponent.position) {
        let distance = cell.manhattan_distance(knight);
        if best.map_or(true, |(_, farthest)| distance > farthest) {
            best = Some((direction, distance));
        }
    }
    best.map(|(direction, _)| direction)
}

fn step(direction: Direction, maneuver: Maneuver) -> Command {
    Command::StepCombatant {
        side: Side::Opponent,
        direction,
        maneuver,
    }
}

fn hold(reason: HoldReason) -> Command {
    Command::HoldPosition {
        side: Side::Opponent,
        reason,
    }
}
