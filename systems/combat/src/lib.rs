#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Attack validation and resolution.
//!
//! Failed attacks are ordinary outcomes: they surface as
//! [`Command::RejectAttack`] and consume the attacker's turn, never as errors.

use knights_arena_core::{
    AttackFailure, AttackKind, CombatantSnapshot, Command, DamageCause, MatchConfig,
    MatchSnapshot, Side,
};

/// The special attack is ready only on turns divisible by this value.
pub const SPECIAL_CADENCE: u32 = 7;

/// Validates an attack and reports the damage it deals.
///
/// Checks run in a fixed order: availability, cooldown, readiness, stamina and
/// finally range, so the reported failure is always the first one that applies.
pub fn resolve_attack(
    attacker: &CombatantSnapshot,
    defender: &CombatantSnapshot,
    kind: AttackKind,
    turn: u32,
    config: &MatchConfig,
) -> Result<u32, AttackFailure> {
    if kind == AttackKind::Special && !config.special_attack {
        return Err(AttackFailure::Unavailable);
    }

    let remaining = attacker.cooldown(kind);
    if remaining > 0 {
        return Err(AttackFailure::Recharging { remaining });
    }

    if kind == AttackKind::Special && turn % SPECIAL_CADENCE != 0 {
        return Err(AttackFailure::NotReady);
    }

    if attacker.stamina.is_some_and(|pool| pool.is_exhausted()) {
        return Err(AttackFailure::Exhausted);
    }

    if !attacker.position.is_adjacent(defender.position) {
        return Err(AttackFailure::OutOfRange);
    }

    Ok(kind.damage())
}

/// Pure system that turns attack intents into strike or rejection commands.
#[derive(Clone, Debug)]
pub struct CombatResolver {
    config: MatchConfig,
}

impl CombatResolver {
    /// Creates a resolver enforcing the provided rules.
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Emits the commands resolving one attack by `attacker` against its rival.
    pub fn handle(
        &self,
        attacker: Side,
        kind: AttackKind,
        snapshot: &MatchSnapshot,
        out: &mut Vec<Command>,
    ) {
        let defender = attacker.rival();
        match resolve_attack(
            snapshot.combatant(attacker),
            snapshot.combatant(defender),
            kind,
            snapshot.turn,
            &self.config,
        ) {
            Ok(damage) => {
                out.push(Command::Strike {
                    attacker,
                    kind,
                    damage,
                });
                out.push(Command::ApplyDamage {
                    target: defender,
                    amount: damage,
                    cause: DamageCause::Attack { attacker, kind },
                });
            }
            Err(reason) => {
                tracing::debug!(%attacker, %kind, %reason, "attack rejected");
                out.push(Command::RejectAttack {
                    attacker,
                    kind,
                    reason,
                });
            }
        }
    }
}
