#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative match state management for Knight's Arena.

mod combatant;
mod hazards;
pub mod layout;

use knights_arena_core::{
    Command, ConfigError, Direction, Event, Health, LogEntry, MatchConfig, MatchResult,
    MoveFailure, ObstacleSet, Position, Side, TerrainView,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    combatant::Combatant,
    hazards::{Bomb, PowerUp},
    layout::{LayoutError, LayoutRequest},
};

const FIRST_TURN: u32 = 1;

/// Optional overrides for the opening position of a match.
///
/// Every field left empty falls back to the regular setup: combatants in
/// opposite corners, full health and a random obstacle layout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Starting cell of the knight.
    pub player: Option<Position>,
    /// Starting cell of the opponent.
    pub opponent: Option<Position>,
    /// Starting hit points of the knight.
    pub player_hp: Option<i32>,
    /// Starting hit points of the opponent.
    pub opponent_hp: Option<i32>,
    /// Fixed obstacle layout replacing the random draw.
    pub obstacles: Option<Vec<Position>>,
}

/// Reasons a match cannot be created.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    /// The configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// No acceptable obstacle layout exists.
    #[error("cannot lay out obstacles: {0}")]
    Layout(#[from] LayoutError),
    /// A scenario places a combatant outside the grid.
    #[error("{side} starts outside the grid at {position}")]
    OutOfBounds {
        /// Misplaced combatant.
        side: Side,
        /// Requested cell.
        position: Position,
    },
    /// A scenario places both combatants on one cell.
    #[error("both combatants start at {position}")]
    SharedCell {
        /// Shared cell.
        position: Position,
    },
    /// A scenario places an obstacle outside the grid or under a combatant.
    #[error("obstacle at {position} is outside the grid or under a combatant")]
    MisplacedObstacle {
        /// Offending obstacle.
        position: Position,
    },
    /// A scenario starts a combatant without hit points.
    #[error("{side} must start with positive hit points, got {hp}")]
    NonPositiveHp {
        /// Affected combatant.
        side: Side,
        /// Requested hit points.
        hp: i32,
    },
}

/// Represents the authoritative Knight's Arena match state.
#[derive(Clone, Debug)]
pub struct MatchState {
    config: MatchConfig,
    boundary: u32,
    turn: u32,
    player: Combatant,
    opponent: Combatant,
    obstacles: ObstacleSet,
    power_up: Option<PowerUp>,
    bomb: Option<Bomb>,
    retreat_turns: u32,
    result: MatchResult,
    log: Vec<LogEntry>,
}

impl MatchState {
    /// Creates a new match with combatants in opposite corners and a random layout.
    pub fn new(config: MatchConfig) -> Result<Self, SetupError> {
        Self::from_scenario(config, &Scenario::default())
    }

    /// Creates a new match, applying the scenario's overrides to the regular setup.
    pub fn from_scenario(config: MatchConfig, scenario: &Scenario) -> Result<Self, SetupError> {
        config.validate()?;

        let size = config.grid_size;
        let far_corner = size.saturating_sub(1);
        let player_position = scenario.player.unwrap_or(Position::new(0, 0));
        let opponent_position = scenario
            .opponent
            .unwrap_or(Position::new(far_corner, far_corner));

        for (side, position) in [
            (Side::Player, player_position),
            (Side::Opponent, opponent_position),
        ] {
            if !knights_arena_core::is_in_bounds(position, size) {
                return Err(SetupError::OutOfBounds { side, position });
            }
        }
        if player_position == opponent_position {
            return Err(SetupError::SharedCell {
                position: player_position,
            });
        }

        let player_hp = scenario.player_hp.unwrap_or(config.start_hp);
        let opponent_hp = scenario.opponent_hp.unwrap_or(config.start_hp);
        for (side, hp) in [(Side::Player, player_hp), (Side::Opponent, opponent_hp)] {
            if hp <= 0 {
                return Err(SetupError::NonPositiveHp { side, hp });
            }
        }

        let anchors = [player_position, opponent_position];
        let obstacles = match &scenario.obstacles {
            Some(cells) => fixed_layout(cells, size, anchors, config.ensure_reachable)?,
            None => {
                let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
                layout::generate_obstacles(
                    &mut rng,
                    &LayoutRequest {
                        size,
                        boundary: size,
                        count: config.obstacle_count,
                        reserved: &[],
                        anchors,
                        ensure_reachable: config.ensure_reachable,
                    },
                )?
            }
        };

        let player = Combatant::new(
            Side::Player,
            player_position,
            Health::new(player_hp),
            config.stamina,
        );
        let opponent = Combatant::new(
            Side::Opponent,
            opponent_position,
            Health::new(opponent_hp),
            config.stamina,
        );

        Ok(Self {
            boundary: size,
            turn: FIRST_TURN,
            player,
            opponent,
            obstacles,
            power_up: None,
            bomb: None,
            retreat_turns: 0,
            result: MatchResult::Ongoing,
            log: Vec::new(),
            config,
        })
    }

    fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    fn terrain_for(&self, side: Side) -> TerrainView<'_> {
        TerrainView::new(
            self.config.grid_size,
            self.boundary,
            &self.obstacles,
            Some(self.combatant(side.rival()).position),
        )
    }

    fn step_destination(
        &self,
        side: Side,
        direction: Direction,
    ) -> Result<Position, MoveFailure> {
        let from = self.combatant(side).position;
        let to = from.step(direction).ok_or(MoveFailure::OutOfBounds)?;
        self.terrain_for(side).check_step(from, to)?;
        Ok(to)
    }
}

fn fixed_layout(
    cells: &[Position],
    size: u32,
    anchors: [Position; 2],
    ensure_reachable: bool,
) -> Result<ObstacleSet, SetupError> {
    if let Some(position) = cells
        .iter()
        .copied()
        .find(|cell| !knights_arena_core::is_in_bounds(*cell, size) || anchors.contains(cell))
    {
        return Err(SetupError::MisplacedObstacle { position });
    }

    let obstacles: ObstacleSet = cells.iter().copied().collect();
    let [from, to] = anchors;
    let terrain = TerrainView::new(size, size, &obstacles, None);
    if ensure_reachable && !layout::is_connected(&terrain, from, to) {
        return Err(LayoutError::Unreachable { attempts: 1 }.into());
    }
    Ok(obstacles)
}

/// Applies the provided command to the match, mutating state deterministically.
///
/// Every emitted event is also stamped with the current turn and appended to
/// the match log.
pub fn apply(state: &mut MatchState, command: Command, out_events: &mut Vec<Event>) {
    let first_new = out_events.len();

    match command {
        Command::StepCombatant {
            side,
            direction,
            maneuver,
        } => match state.step_destination(side, direction) {
            Ok(to) => {
                let combatant = state.combatant_mut(side);
                let from = combatant.position;
                combatant.position = to;
                out_events.push(Event::CombatantMoved {
                    side,
                    from,
                    to,
                    maneuver,
                });
            }
            Err(reason) => out_events.push(Event::MoveBlocked {
                side,
                direction,
                reason,
            }),
        },
        Command::HoldPosition { side, reason } => {
            out_events.push(Event::PositionHeld { side, reason });
        }
        Command::Strike {
            attacker,
            kind,
            damage,
        } => {
            let turn = state.turn;
            let combatant = state.combatant_mut(attacker);
            combatant.start_cooldown(kind, turn);
            combatant.spend_stamina();
            out_events.push(Event::Struck {
                attacker,
                kind,
                damage,
            });
        }
        Command::RejectAttack {
            attacker,
            kind,
            reason,
        } => out_events.push(Event::AttackRejected {
            attacker,
            kind,
            reason,
        }),
        Command::ApplyDamage {
            target,
            amount,
            cause,
        } => {
            let health = state.combatant_mut(target).apply_damage(amount);
            out_events.push(Event::Damaged {
                target,
                amount,
                cause,
                health,
            });
        }
        Command::ApplyHeal { target, amount } => {
            let cap = state.config.heal_cap;
            let (restored, health) = state.combatant_mut(target).apply_heal(amount, cap);
            out_events.push(Event::Healed {
                target,
                amount: restored,
                health,
            });
        }
        Command::SpawnPowerUp { cell, lifetime } => {
            if state.power_up.is_some() {
                tracing::trace!(%cell, "power-up already active, spawn ignored");
            } else {
                state.power_up = Some(PowerUp {
                    cell,
                    remaining: lifetime,
                });
                out_events.push(Event::PowerUpSpawned { cell });
            }
        }
        Command::AgePowerUp => {
            if let Some(power_up) = state.power_up.as_mut() {
                power_up.remaining = power_up.remaining.saturating_sub(1);
            }
        }
        Command::CollectPowerUp { by } => {
            if let Some(power_up) = state.power_up.take() {
                out_events.push(Event::PowerUpCollected {
                    by,
                    cell: power_up.cell,
                });
            }
        }
        Command::ExpirePowerUp => {
            if let Some(power_up) = state.power_up.take() {
                out_events.push(Event::PowerUpExpired {
                    cell: power_up.cell,
                });
            }
        }
        Command::ArmBomb { cell, fuse } => {
            if state.bomb.is_some() {
                tracing::trace!(%cell, "bomb already armed, arming ignored");
            } else {
                state.bomb = Some(Bomb { cell, fuse });
                out_events.push(Event::BombArmed { cell, fuse });
            }
        }
        Command::BurnFuse => {
            if let Some(bomb) = state.bomb.as_mut() {
                bomb.fuse = bomb.fuse.saturating_sub(1);
                out_events.push(Event::FuseBurned {
                    cell: bomb.cell,
                    fuse: bomb.fuse,
                });
            }
        }
        Command::DetonateBomb => {
            if let Some(bomb) = state.bomb.take() {
                out_events.push(Event::BombDetonated { cell: bomb.cell });
            }
        }
        Command::RaiseWalls { cells } => {
            let player = state.player.position;
            let opponent = state.opponent.position;
            state.obstacles = cells
                .iter()
                .filter(|cell| *cell != player && *cell != opponent)
                .collect();
            out_events.push(Event::WallsShifted {
                obstacles: state.obstacles.len(),
            });
        }
        Command::ShrinkZone { boundary } => {
            let boundary = boundary.clamp(1, state.boundary);
            if boundary < state.boundary {
                state.boundary = boundary;
                out_events.push(Event::ZoneShrunk { boundary });
            }
        }
        Command::SetRetreat { turns } => {
            tracing::trace!(turns, "opponent retreat counter set");
            state.retreat_turns = turns;
        }
        Command::Conclude { result } => {
            state.result = result;
            out_events.push(Event::MatchConcluded { result });
        }
        Command::IgnoreAction { action } => out_events.push(Event::ActionIgnored {
            action,
            result: state.result,
        }),
        Command::AdvanceTurn => {
            let turn = state.turn;
            for side in Side::BOTH {
                let combatant = state.combatant_mut(side);
                combatant.tick_cooldowns(turn);
                combatant.regenerate_stamina();
            }
            state.turn = turn.saturating_add(1);
            out_events.push(Event::TurnAdvanced { turn: state.turn });
        }
    }

    let turn = state.turn;
    state
        .log
        .extend(out_events[first_new..].iter().cloned().map(|event| LogEntry {
            turn,
            event,
        }));
}

/// Query functions that provide read-only access to the match state.
pub mod query {
    use knights_arena_core::{Health, LogEntry, MatchConfig, MatchResult, MatchSnapshot, Side};

    use super::MatchState;

    /// Captures a read-only projection of the entire match.
    #[must_use]
    pub fn snapshot(state: &MatchState) -> MatchSnapshot {
        MatchSnapshot {
            grid_size: state.config.grid_size,
            boundary: state.boundary,
            turn: state.turn,
            player: state.player.snapshot(),
            opponent: state.opponent.snapshot(),
            obstacles: state.obstacles.clone(),
            power_up: state.power_up.map(|power_up| power_up.snapshot()),
            bomb: state.bomb.map(|bomb| bomb.snapshot()),
            retreat_turns: state.retreat_turns,
            result: state.result,
        }
    }

    /// Every log entry recorded since the match started.
    #[must_use]
    pub fn log(state: &MatchState) -> &[LogEntry] {
        &state.log
    }

    /// Rules the match was created with.
    #[must_use]
    pub fn config(state: &MatchState) -> &MatchConfig {
        &state.config
    }

    /// Number of the turn awaiting resolution.
    #[must_use]
    pub fn turn(state: &MatchState) -> u32 {
        state.turn
    }

    /// Recorded result of the match.
    #[must_use]
    pub fn result(state: &MatchState) -> MatchResult {
        state.result
    }

    /// Reports whether the match has concluded.
    #[must_use]
    pub fn is_terminated(state: &MatchState) -> bool {
        state.result.is_terminal()
    }

    /// Current health of the requested combatant.
    #[must_use]
    pub fn health(state: &MatchState, side: Side) -> Health {
        state.combatant(side).health()
    }

    /// Result implied by the combatants' current health.
    #[must_use]
    pub fn pending_result(state: &MatchState) -> MatchResult {
        MatchResult::evaluate(state.player.health(), state.opponent.health())
    }
}
