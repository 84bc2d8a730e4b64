//! End-of-match battle report.

use std::fmt;

use knights_arena_core::{DamageCause, Event, LogEntry, MatchResult, Side};
use serde::Serialize;

/// Totals gathered from the match log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub(crate) struct BattleReport {
    pub(crate) turns: u32,
    pub(crate) result: Option<MatchResult>,
    pub(crate) damage_dealt: u32,
    pub(crate) damage_taken: u32,
    pub(crate) power_ups_collected: u32,
    pub(crate) attacks_rejected: u32,
}

impl BattleReport {
    /// Summarises the knight's match from its log.
    pub(crate) fn from_log(log: &[LogEntry]) -> Self {
        let mut report = Self::default();
        for entry in log {
            match &entry.event {
                Event::TurnAdvanced { .. } => report.turns += 1,
                Event::MatchConcluded { result } => report.result = Some(*result),
                Event::Damaged {
                    target: Side::Opponent,
                    amount,
                    cause: DamageCause::Attack { attacker: Side::Player, .. },
                    ..
                } => report.damage_dealt += amount,
                Event::Damaged {
                    target: Side::Player,
                    amount,
                    ..
                } => report.damage_taken += amount,
                Event::PowerUpCollected { by: Side::Player, .. } => {
                    report.power_ups_collected += 1;
                }
                Event::AttackRejected {
                    attacker: Side::Player,
                    ..
                } => report.attacks_rejected += 1,
                _ => {}
            }
        }
        report
    }
}

impl fmt::Display for BattleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Battle report ===")?;
        match self.result {
            Some(result) => writeln!(f, "Result:              {result}")?,
            None => writeln!(f, "Result:              abandoned")?,
        }
        writeln!(f, "Turns played:        {}", self.turns)?;
        writeln!(f, "Damage dealt:        {}", self.damage_dealt)?;
        writeln!(f, "Damage taken:        {}", self.damage_taken)?;
        writeln!(f, "Power-ups collected: {}", self.power_ups_collected)?;
        write!(f, "Failed attacks:      {}", self.attacks_rejected)
    }
}
