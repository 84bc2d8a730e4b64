#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Knight's Arena engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative match state, and pure systems. Systems read immutable
//! [`MatchSnapshot`] values and respond exclusively with [`Command`] batches.
//! The world executes those commands via its `apply` entry point and reports
//! every outcome as an [`Event`], which doubles as the narrated match log.

mod config;
mod grid;

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

pub use config::{ConfigError, HazardTuning, MatchConfig};
pub use grid::{
    is_adjacent, is_blocked, is_in_bounds, manhattan_distance, zone_excess, Direction,
    MoveFailure, ObstacleSet, Position, TerrainView,
};

/// One of the two combatants sharing the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The knight controlled by the player.
    Player,
    /// The autonomous opponent.
    Opponent,
}

impl Side {
    /// Both sides in the order hazards resolve them.
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];

    /// The other combatant.
    #[must_use]
    pub const fn rival(self) -> Side {
        match self {
            Self::Player => Self::Opponent,
            Self::Opponent => Self::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => f.write_str("Knight"),
            Self::Opponent => f.write_str("Opponent"),
        }
    }
}

/// Attacks a combatant may attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    /// Quick jab without cooldown.
    Light,
    /// Heavy sword swing that needs to recharge.
    Sword,
    /// Devastating blow available only on special turns.
    Special,
}

impl AttackKind {
    /// Every attack kind.
    pub const ALL: [AttackKind; 3] = [AttackKind::Light, AttackKind::Sword, AttackKind::Special];

    /// Damage dealt when the attack connects.
    #[must_use]
    pub const fn damage(self) -> u32 {
        match self {
            Self::Light => 1,
            Self::Sword => 2,
            Self::Special => 4,
        }
    }

    /// Turns the attacker must wait after using the attack.
    #[must_use]
    pub const fn cooldown(self) -> u32 {
        match self {
            Self::Sword => 2,
            Self::Light | Self::Special => 0,
        }
    }
}

impl fmt::Display for AttackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light attack"),
            Self::Sword => f.write_str("sword strike"),
            Self::Special => f.write_str("special attack"),
        }
    }
}

/// Intent submitted by the player for one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    /// Step one cell in the given direction.
    Move {
        /// Direction of travel.
        direction: Direction,
    },
    /// Attack the opponent with the given ability.
    Attack {
        /// Ability used for the attack.
        kind: AttackKind,
    },
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move { direction } => write!(f, "move {direction}"),
            Self::Attack { kind } => write!(f, "{kind}"),
        }
    }
}

/// Hit points of a combatant.
///
/// The underlying value may dip below zero so that overkill stays visible;
/// every display and terminal check reads the clamped value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(i32);

impl Health {
    /// Wraps a raw hit point value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw hit points, possibly negative.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Hit points clamped at zero.
    #[must_use]
    pub fn displayed(&self) -> u32 {
        u32::try_from(self.0).unwrap_or(0)
    }

    /// Reports whether the combatant is out of the fight.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 <= 0
    }

    /// Health after subtracting `amount`, without a floor.
    #[must_use]
    pub fn damaged(self, amount: u32) -> Self {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        Self(self.0.saturating_sub(amount))
    }

    /// Health after adding `amount`, limited by `cap` when present.
    #[must_use]
    pub fn healed(self, amount: u32, cap: Option<i32>) -> Self {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        let raised = self.0.saturating_add(amount);
        match cap {
            Some(cap) => Self(raised.min(cap.max(self.0))),
            None => Self(raised),
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.displayed())
    }
}

/// Bounded stamina pool spent by attacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stamina {
    current: u32,
    max: u32,
}

impl Stamina {
    /// A full pool with the provided capacity.
    #[must_use]
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Points currently available.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Capacity of the pool.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Reports whether an attack can be paid for.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.current == 0
    }

    /// Pool after paying for one attack.
    #[must_use]
    pub const fn spent(self) -> Self {
        Self {
            current: self.current.saturating_sub(1),
            max: self.max,
        }
    }

    /// Pool after the per-turn regeneration.
    #[must_use]
    pub fn regenerated(self) -> Self {
        Self {
            current: self.current.saturating_add(1).min(self.max),
            max: self.max,
        }
    }
}

/// Transient battlefield features with their own lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    /// Healing pickup.
    PowerUp,
    /// Area damage after a short fuse.
    Bomb,
    /// Periodic regeneration of the obstacle set.
    DynamicWalls,
    /// Playable boundary that contracts over time.
    ShrinkingZone,
}

impl HazardKind {
    /// Order in which hazards tick within a turn.
    pub const TICK_ORDER: [HazardKind; 4] = [
        HazardKind::PowerUp,
        HazardKind::Bomb,
        HazardKind::DynamicWalls,
        HazardKind::ShrinkingZone,
    ];
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PowerUp => "power-up",
            Self::Bomb => "bomb",
            Self::DynamicWalls => "dynamic walls",
            Self::ShrinkingZone => "shrinking zone",
        };
        f.write_str(label)
    }
}

/// Purpose behind a step, used to narrate movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Maneuver {
    /// A step ordered by the player.
    Advance,
    /// The opponent closing in on the player.
    Approach,
    /// The opponent backing away from the player.
    Retreat,
    /// The opponent heading for the power-up.
    SeekPowerUp,
}

/// Reasons a combatant stays in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoldReason {
    /// Retreat requested but every neighbour is blocked.
    Cornered,
    /// No path leads toward the target.
    NoPath,
}

/// Reasons an attack fails to land.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackFailure {
    /// The ability is disabled by the match rules.
    Unavailable,
    /// The ability is still on cooldown.
    Recharging {
        /// Turns left before the ability can be used again.
        remaining: u32,
    },
    /// The ability's readiness condition does not hold this turn.
    NotReady,
    /// The attacker has no stamina left.
    Exhausted,
    /// The defender is not adjacent.
    OutOfRange,
}

impl fmt::Display for AttackFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("it is not allowed in this arena"),
            Self::Recharging { remaining } => write!(f, "it is recharging ({remaining} turns)"),
            Self::NotReady => f.write_str("it is not ready this turn"),
            Self::Exhausted => f.write_str("there is no stamina left"),
            Self::OutOfRange => f.write_str("there is no target in reach"),
        }
    }
}

/// Origin of damage applied to a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageCause {
    /// A landed attack.
    Attack {
        /// Combatant that attacked.
        attacker: Side,
        /// Ability that was used.
        kind: AttackKind,
    },
    /// A bomb detonation.
    Bomb,
    /// Standing outside the shrinking zone.
    Zone,
}

impl fmt::Display for DamageCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack { attacker, kind } => write!(f, "{attacker}'s {kind}"),
            Self::Bomb => f.write_str("the blast"),
            Self::Zone => f.write_str("the closing zone"),
        }
    }
}

/// Outcome of the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    /// The match is still being played.
    Ongoing,
    /// The opponent fell.
    PlayerWin,
    /// The knight fell.
    OpponentWin,
    /// Both fell on the same turn.
    Draw,
}

impl MatchResult {
    /// Derives the result from both combatants' health.
    ///
    /// A draw takes priority over either win.
    #[must_use]
    pub const fn evaluate(player: Health, opponent: Health) -> Self {
        match (player.is_depleted(), opponent.is_depleted()) {
            (true, true) => Self::Draw,
            (true, false) => Self::OpponentWin,
            (false, true) => Self::PlayerWin,
            (false, false) => Self::Ongoing,
        }
    }

    /// Reports whether the match has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ongoing => f.write_str("ongoing"),
            Self::PlayerWin => f.write_str("victory for the knight"),
            Self::OpponentWin => f.write_str("victory for the opponent"),
            Self::Draw => f.write_str("a draw"),
        }
    }
}

/// Commands that express all permissible match mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Moves a combatant one cell if the destination is legal.
    StepCombatant {
        /// Combatant attempting to move.
        side: Side,
        /// Direction of travel.
        direction: Direction,
        /// Purpose of the step, kept for narration.
        maneuver: Maneuver,
    },
    /// Records that a combatant deliberately stays put.
    HoldPosition {
        /// Combatant that holds.
        side: Side,
        /// Why it holds.
        reason: HoldReason,
    },
    /// Records a landed attack and charges its cooldown and stamina.
    Strike {
        /// Combatant that attacks.
        attacker: Side,
        /// Ability used.
        kind: AttackKind,
        /// Damage the attack deals.
        damage: u32,
    },
    /// Records an attack that failed validation.
    RejectAttack {
        /// Combatant that attempted the attack.
        attacker: Side,
        /// Ability attempted.
        kind: AttackKind,
        /// Why the attack failed.
        reason: AttackFailure,
    },
    /// Subtracts hit points from a combatant.
    ApplyDamage {
        /// Combatant receiving the damage.
        target: Side,
        /// Hit points removed.
        amount: u32,
        /// Origin of the damage.
        cause: DamageCause,
    },
    /// Adds hit points to a combatant, honouring the configured cap.
    ApplyHeal {
        /// Combatant receiving the heal.
        target: Side,
        /// Hit points restored.
        amount: u32,
    },
    /// Places a power-up on the board.
    SpawnPowerUp {
        /// Cell that holds the power-up.
        cell: Position,
        /// Turns before the power-up expires.
        lifetime: u32,
    },
    /// Counts one turn off the power-up's lifetime.
    AgePowerUp,
    /// Removes the power-up because a combatant picked it up.
    CollectPowerUp {
        /// Combatant that collected it.
        by: Side,
    },
    /// Removes the power-up because its lifetime ran out.
    ExpirePowerUp,
    /// Places a bomb on the board.
    ArmBomb {
        /// Cell that holds the bomb.
        cell: Position,
        /// Turns until detonation.
        fuse: u32,
    },
    /// Counts one turn off the bomb fuse.
    BurnFuse,
    /// Removes the bomb after it explodes.
    DetonateBomb,
    /// Replaces the entire obstacle set.
    RaiseWalls {
        /// New impassable cells.
        cells: ObstacleSet,
    },
    /// Contracts the playable zone.
    ShrinkZone {
        /// New side length of the zone.
        boundary: u32,
    },
    /// Sets how many more turns the opponent keeps retreating.
    SetRetreat {
        /// Retreat turns still owed after the current one.
        turns: u32,
    },
    /// Ends the match with the provided result.
    Conclude {
        /// Final result.
        result: MatchResult,
    },
    /// Records a player action submitted after the match ended.
    IgnoreAction {
        /// Action that was ignored.
        action: PlayerAction,
    },
    /// Closes the turn, ticking cooldowns and stamina.
    AdvanceTurn,
}

/// Events broadcast by the world after processing commands.
///
/// Each event renders as one line of the match log through [`fmt::Display`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A combatant moved between two cells.
    CombatantMoved {
        /// Combatant that moved.
        side: Side,
        /// Cell occupied before the move.
        from: Position,
        /// Cell occupied after the move.
        to: Position,
        /// Purpose of the move.
        maneuver: Maneuver,
    },
    /// A move was refused; the combatant stays where it is.
    MoveBlocked {
        /// Combatant that tried to move.
        side: Side,
        /// Direction it tried.
        direction: Direction,
        /// Why the move failed.
        reason: MoveFailure,
    },
    /// A combatant stayed in place.
    PositionHeld {
        /// Combatant that held.
        side: Side,
        /// Why it held.
        reason: HoldReason,
    },
    /// An attack connected.
    Struck {
        /// Combatant that attacked.
        attacker: Side,
        /// Ability used.
        kind: AttackKind,
        /// Damage dealt.
        damage: u32,
    },
    /// An attack failed validation.
    AttackRejected {
        /// Combatant that attempted the attack.
        attacker: Side,
        /// Ability attempted.
        kind: AttackKind,
        /// Why it failed.
        reason: AttackFailure,
    },
    /// A combatant lost hit points.
    Damaged {
        /// Combatant that was hurt.
        target: Side,
        /// Hit points removed.
        amount: u32,
        /// Origin of the damage.
        cause: DamageCause,
        /// Health after the damage.
        health: Health,
    },
    /// A combatant regained hit points.
    Healed {
        /// Combatant that was healed.
        target: Side,
        /// Hit points actually restored.
        amount: u32,
        /// Health after the heal.
        health: Health,
    },
    /// A power-up appeared.
    PowerUpSpawned {
        /// Cell holding the power-up.
        cell: Position,
    },
    /// A power-up was picked up.
    PowerUpCollected {
        /// Combatant that collected it.
        by: Side,
        /// Cell it was collected from.
        cell: Position,
    },
    /// A power-up vanished uncollected.
    PowerUpExpired {
        /// Cell it vanished from.
        cell: Position,
    },
    /// A bomb was armed.
    BombArmed {
        /// Cell holding the bomb.
        cell: Position,
        /// Turns until detonation.
        fuse: u32,
    },
    /// A bomb fuse burned down by one turn.
    FuseBurned {
        /// Cell holding the bomb.
        cell: Position,
        /// Turns left on the fuse.
        fuse: u32,
    },
    /// A bomb exploded.
    BombDetonated {
        /// Cell the bomb occupied.
        cell: Position,
    },
    /// The obstacle set was replaced.
    WallsShifted {
        /// Number of obstacles in the new layout.
        obstacles: usize,
    },
    /// The playable zone contracted.
    ZoneShrunk {
        /// New side length of the zone.
        boundary: u32,
    },
    /// A new turn began.
    TurnAdvanced {
        /// Number of the turn that begins.
        turn: u32,
    },
    /// The match ended.
    MatchConcluded {
        /// Final result.
        result: MatchResult,
    },
    /// An action arrived after the match ended and had no effect.
    ActionIgnored {
        /// Action that was ignored.
        action: PlayerAction,
        /// Result the match ended with.
        result: MatchResult,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CombatantMoved {
                side, to, maneuver, ..
            } => match maneuver {
                Maneuver::Advance | Maneuver::Approach => write!(f, "{side} moved to {to}."),
                Maneuver::Retreat => write!(f, "{side} is retreating to {to}."),
                Maneuver::SeekPowerUp => write!(f, "{side} heads for the power-up via {to}."),
            },
            Self::MoveBlocked {
                side,
                direction,
                reason,
            } => write!(f, "{side} tried to move {direction} but was stopped by {reason}."),
            Self::PositionHeld { side, reason } => match reason {
                HoldReason::Cornered => write!(f, "{side} tried to retreat but is blocked."),
                HoldReason::NoPath => write!(f, "{side} finds no path and holds position."),
            },
            Self::Struck {
                attacker,
                kind,
                damage,
            } => write!(f, "{attacker} lands a {kind} for {damage} damage."),
            Self::AttackRejected {
                attacker,
                kind,
                reason,
            } => write!(f, "{attacker} cannot use the {kind}: {reason}."),
            Self::Damaged {
                target,
                amount,
                cause,
                health,
            } => write!(
                f,
                "{target} takes {amount} damage from {cause} (HP {health})."
            ),
            Self::Healed {
                target,
                amount,
                health,
            } => write!(f, "{target} recovers {amount} HP (HP {health})."),
            Self::PowerUpSpawned { cell } => write!(f, "A power-up appeared at {cell}!"),
            Self::PowerUpCollected { by, cell } => {
                write!(f, "{by} collected the power-up at {cell}!")
            }
            Self::PowerUpExpired { cell } => write!(f, "The power-up at {cell} expired."),
            Self::BombArmed { cell, fuse } => {
                write!(f, "A bomb was armed at {cell}, {fuse} turns on the fuse!")
            }
            Self::FuseBurned { cell, fuse } => {
                write!(f, "The bomb at {cell} will explode in {fuse} turns.")
            }
            Self::BombDetonated { cell } => write!(f, "The bomb at {cell} exploded!"),
            Self::WallsShifted { obstacles } => {
                write!(f, "The walls shifted, {obstacles} blocks now stand.")
            }
            Self::ZoneShrunk { boundary } => {
                write!(f, "The arena closes in to {boundary}x{boundary}.")
            }
            Self::TurnAdvanced { turn } => write!(f, "Turn {turn} begins."),
            Self::MatchConcluded { result } => write!(f, "The match ends in {result}."),
            Self::ActionIgnored { action, result } => write!(
                f,
                "Ignored {action}: the match already ended in {result}."
            ),
        }
    }
}

/// Event stamped with the turn it happened on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Turn during which the event occurred.
    pub turn: u32,
    /// Event that occurred.
    pub event: Event,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[turn {}] {}", self.turn, self.event)
    }
}

/// Immutable representation of a combatant used for queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    /// Which combatant this is.
    pub side: Side,
    /// Cell currently occupied.
    pub position: Position,
    /// Current health.
    pub health: Health,
    /// Remaining cooldown per ability; absent abilities are ready.
    pub cooldowns: BTreeMap<AttackKind, u32>,
    /// Stamina pool when the stamina rule is enabled.
    pub stamina: Option<Stamina>,
}

impl CombatantSnapshot {
    /// Turns left before the ability can be used again.
    #[must_use]
    pub fn cooldown(&self, kind: AttackKind) -> u32 {
        self.cooldowns.get(&kind).copied().unwrap_or(0)
    }
}

/// Power-up currently on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpSnapshot {
    /// Cell holding the power-up.
    pub cell: Position,
    /// Turns left before it expires.
    pub remaining: u32,
}

/// Bomb currently on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BombSnapshot {
    /// Cell holding the bomb.
    pub cell: Position,
    /// Turns left before it explodes.
    pub fuse: u32,
}

/// Read-only projection of the entire match, sufficient for any renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Side length of the full grid.
    pub grid_size: u32,
    /// Side length of the playable zone.
    pub boundary: u32,
    /// Number of the turn awaiting resolution.
    pub turn: u32,
    /// The knight.
    pub player: CombatantSnapshot,
    /// The opponent.
    pub opponent: CombatantSnapshot,
    /// Impassable cells.
    pub obstacles: ObstacleSet,
    /// Active power-up, if any.
    pub power_up: Option<PowerUpSnapshot>,
    /// Armed bomb, if any.
    pub bomb: Option<BombSnapshot>,
    /// Turns the opponent is still committed to retreating.
    pub retreat_turns: u32,
    /// Current result.
    pub result: MatchResult,
}

impl MatchSnapshot {
    /// Snapshot of the requested combatant.
    #[must_use]
    pub fn combatant(&self, side: Side) -> &CombatantSnapshot {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// Terrain as seen by the provided combatant, with its rival as occupant.
    #[must_use]
    pub fn terrain_for(&self, side: Side) -> TerrainView<'_> {
        TerrainView::new(
            self.grid_size,
            self.boundary,
            &self.obstacles,
            Some(self.combatant(side.rival()).position),
        )
    }

    /// Cells inside the zone that hold no obstacle, combatant or hazard.
    ///
    /// Listed in row-major order so seeded sampling stays reproducible.
    #[must_use]
    pub fn vacant_cells(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        for row in 0..self.boundary.min(self.grid_size) {
            for column in 0..self.boundary.min(self.grid_size) {
                let cell = Position::new(row, column);
                if self.obstacles.contains(cell)
                    || cell == self.player.position
                    || cell == self.opponent.position
                    || self.power_up.is_some_and(|power_up| power_up.cell == cell)
                    || self.bomb.is_some_and(|bomb| bomb.cell == cell)
                {
                    continue;
                }
                cells.push(cell);
            }
        }
        cells
    }

    /// Distance between the two combatants.
    #[must_use]
    pub fn separation(&self) -> u32 {
        self.player.position.manhattan_distance(self.opponent.position)
    }
}
