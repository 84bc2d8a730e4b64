//! Authoritative combatant state.

use std::collections::BTreeMap;

use knights_arena_core::{AttackKind, CombatantSnapshot, Health, Position, Side, Stamina};

/// Cooldown charged on a specific turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cooldown {
    remaining: u32,
    started_on: u32,
}

/// Combatant stored inside the match state.
#[derive(Clone, Debug)]
pub(crate) struct Combatant {
    pub(crate) side: Side,
    pub(crate) position: Position,
    health: Health,
    cooldowns: BTreeMap<AttackKind, Cooldown>,
    stamina: Option<Stamina>,
}

impl Combatant {
    pub(crate) fn new(side: Side, position: Position, health: Health, stamina: Option<u32>) -> Self {
        Self {
            side,
            position,
            health,
            cooldowns: BTreeMap::new(),
            stamina: stamina.map(Stamina::full),
        }
    }

    pub(crate) fn health(&self) -> Health {
        self.health
    }

    /// Subtracts hit points without a floor and reports the new health.
    pub(crate) fn apply_damage(&mut self, amount: u32) -> Health {
        self.health = self.health.damaged(amount);
        self.health
    }

    /// Adds hit points and reports how many were actually restored.
    pub(crate) fn apply_heal(&mut self, amount: u32, cap: Option<i32>) -> (u32, Health) {
        let before = self.health;
        self.health = self.health.healed(amount, cap);
        let restored = self.health.get().saturating_sub(before.get());
        (u32::try_from(restored).unwrap_or(0), self.health)
    }

    /// Charges the ability's cooldown. Cooldowns never start above the ability's value.
    pub(crate) fn start_cooldown(&mut self, kind: AttackKind, turn: u32) {
        let turns = kind.cooldown();
        if turns == 0 {
            return;
        }

        let _ = self.cooldowns.insert(
            kind,
            Cooldown {
                remaining: turns,
                started_on: turn,
            },
        );
    }

    /// Counts one turn off every cooldown charged before `turn`.
    pub(crate) fn tick_cooldowns(&mut self, turn: u32) {
        for cooldown in self.cooldowns.values_mut() {
            if cooldown.started_on < turn {
                cooldown.remaining = cooldown.remaining.saturating_sub(1);
            }
        }
        self.cooldowns.retain(|_, cooldown| cooldown.remaining > 0);
    }

    pub(crate) fn spend_stamina(&mut self) {
        self.stamina = self.stamina.map(Stamina::spent);
    }

    pub(crate) fn regenerate_stamina(&mut self) {
        self.stamina = self.stamina.map(Stamina::regenerated);
    }

    pub(crate) fn snapshot(&self) -> CombatantSnapshot {
        CombatantSnapshot {
            side: self.side,
            position: self.position,
            health: self.health,
            cooldowns: self
                .cooldowns
                .iter()
                .map(|(kind, cooldown)| (*kind, cooldown.remaining))
                .collect(),
            stamina: self.stamina,
        }
    }
}
