#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Hazard lifecycle: power-ups, bombs, dynamic walls and the shrinking zone.
//!
//! Each hazard kind ticks once per turn against a fresh snapshot and answers
//! with commands. Hit point changes are always expressed as
//! [`Command::ApplyDamage`] or [`Command::ApplyHeal`].

use std::collections::BTreeSet;

use knights_arena_core::{
    is_in_bounds, zone_excess, Command, DamageCause, HazardKind, HazardTuning, MatchConfig,
    MatchSnapshot, Position, Side,
};
use knights_arena_world::layout::{self, LayoutRequest};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Separates the hazard stream from the opening layout drawn with the same seed.
const HAZARD_STREAM: u64 = 0x6861_7a61_7264_7321;

/// Pure system that advances every enabled hazard.
#[derive(Clone, Debug)]
pub struct Hazards {
    enabled: BTreeSet<HazardKind>,
    tuning: HazardTuning,
    obstacle_count: usize,
    ensure_reachable: bool,
    rng: ChaCha8Rng,
}

impl Hazards {
    /// Creates the hazard system for a match, seeding its random stream from the config.
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            enabled: config.hazards.clone(),
            tuning: config.tuning.clone(),
            obstacle_count: config.obstacle_count,
            ensure_reachable: config.ensure_reachable,
            rng: ChaCha8Rng::seed_from_u64(config.seed ^ HAZARD_STREAM),
        }
    }

    /// Reports whether the hazard kind participates in the match.
    #[must_use]
    pub fn is_enabled(&self, kind: HazardKind) -> bool {
        self.enabled.contains(&kind)
    }

    /// Advances one hazard kind by a turn. Disabled kinds emit nothing.
    pub fn tick(&mut self, kind: HazardKind, snapshot: &MatchSnapshot, out: &mut Vec<Command>) {
        if !self.is_enabled(kind) {
            return;
        }

        match kind {
            HazardKind::PowerUp => self.tick_power_up(snapshot, out),
            HazardKind::Bomb => self.tick_bomb(snapshot, out),
            HazardKind::DynamicWalls => self.tick_walls(snapshot, out),
            HazardKind::ShrinkingZone => self.tick_zone(snapshot, out),
        }
    }

    fn tick_power_up(&mut self, snapshot: &MatchSnapshot, out: &mut Vec<Command>) {
        let mut active = false;

        if let Some(power_up) = snapshot.power_up {
            let collector = Side::BOTH
                .into_iter()
                .find(|side| snapshot.combatant(*side).position == power_up.cell);

            match collector {
                _ if power_up.remaining <= 1 => out.push(Command::ExpirePowerUp),
                Some(by) => {
                    out.push(Command::CollectPowerUp { by });
                    out.push(Command::ApplyHeal {
                        target: by,
                        amount: self.tuning.power_up_heal,
                    });
                }
                None => {
                    out.push(Command::AgePowerUp);
                    active = true;
                }
            }
        }

        if active || !is_due(snapshot.turn, self.tuning.power_up_interval) {
            return;
        }

        if let Some(cell) = self.pick_vacant_cell(snapshot) {
            tracing::trace!(%cell, turn = snapshot.turn, "power-up spawned");
            out.push(Command::SpawnPowerUp {
                cell,
                lifetime: self.tuning.power_up_lifetime,
            });
        }
    }

    fn tick_bomb(&mut self, snapshot: &MatchSnapshot, out: &mut Vec<Command>) {
        let mut armed = false;

        if let Some(bomb) = snapshot.bomb {
            if bomb.fuse <= 1 {
                out.push(Command::DetonateBomb);
                for side in Side::BOTH {
                    if snapshot.combatant(side).position.manhattan_distance(bomb.cell) <= 1 {
                        out.push(Command::ApplyDamage {
                            target: side,
                            amount: self.tuning.bomb_damage,
                            cause: DamageCause::Bomb,
                        });
                    }
                }
            } else {
                out.push(Command::BurnFuse);
                armed = true;
            }
        }

        if armed || !is_due(snapshot.turn, self.tuning.bomb_interval) {
            return;
        }

        if let Some(cell) = self.pick_vacant_cell(snapshot) {
            tracing::trace!(%cell, turn = snapshot.turn, "bomb armed");
            out.push(Command::ArmBomb {
                cell,
                fuse: self.tuning.bomb_fuse,
            });
        }
    }

    fn tick_walls(&mut self, snapshot: &MatchSnapshot, out: &mut Vec<Command>) {
        if !is_due(snapshot.turn, self.tuning.wall_interval) {
            return;
        }

        let reserved: Vec<Position> = snapshot
            .power_up
            .map(|power_up| power_up.cell)
            .into_iter()
            .chain(snapshot.bomb.map(|bomb| bomb.cell))
            .collect();
        let mut request = LayoutRequest {
            size: snapshot.grid_size,
            boundary: self.next_boundary(snapshot),
            count: 0,
            reserved: &reserved,
            anchors: [snapshot.player.position, snapshot.opponent.position],
            ensure_reachable: self.ensure_reachable,
        };
        request.count = self.obstacle_count.min(request.candidates().len());

        match layout::generate_obstacles(&mut self.rng, &request) {
            Ok(cells) => {
                tracing::trace!(obstacles = cells.len(), turn = snapshot.turn, "walls raised");
                out.push(Command::RaiseWalls { cells });
            }
            Err(error) => {
                tracing::warn!(%error, turn = snapshot.turn, "keeping previous wall layout");
            }
        }
    }

    fn tick_zone(&mut self, snapshot: &MatchSnapshot, out: &mut Vec<Command>) {
        let boundary = self.next_boundary(snapshot);
        if boundary < snapshot.boundary {
            out.push(Command::ShrinkZone { boundary });

            // Nobody may step out of the zone to collect it.
            if let Some(power_up) = snapshot.power_up {
                if !is_in_bounds(power_up.cell, boundary) {
                    out.push(Command::ExpirePowerUp);
                }
            }
        }

        for side in Side::BOTH {
            if zone_excess(snapshot.combatant(side).position, boundary) > 0 {
                out.push(Command::ApplyDamage {
                    target: side,
                    amount: self.tuning.zone_damage,
                    cause: DamageCause::Zone,
                });
            }
        }
    }

    /// Zone size once this turn's shrink, if any, has happened.
    fn next_boundary(&self, snapshot: &MatchSnapshot) -> u32 {
        let shrinks = self.is_enabled(HazardKind::ShrinkingZone)
            && is_due(snapshot.turn, self.tuning.zone_interval)
            && snapshot.boundary > self.tuning.zone_floor;
        if shrinks {
            snapshot.boundary - 1
        } else {
            snapshot.boundary
        }
    }

    /// Samples a vacant cell that stays inside the zone after this turn's shrink.
    fn pick_vacant_cell(&mut self, snapshot: &MatchSnapshot) -> Option<Position> {
        let boundary = self.next_boundary(snapshot);
        let cells: Vec<Position> = snapshot
            .vacant_cells()
            .into_iter()
            .filter(|cell| is_in_bounds(*cell, boundary))
            .collect();
        cells.choose(&mut self.rng).copied()
    }
}

fn is_due(turn: u32, interval: u32) -> bool {
    interval != 0 && turn % interval == 0
}
