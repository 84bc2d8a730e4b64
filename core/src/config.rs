//! Match configuration and its validation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::HazardKind;

const DEFAULT_GRID_SIZE: u32 = 6;
const DEFAULT_START_HP: i32 = 10;
const DEFAULT_OBSTACLE_COUNT: usize = 5;
const DEFAULT_SEED: u64 = 0x6b6e_6967_6874_7321;

/// Rule set a match is created from.
///
/// Every optional rule variant observed across the game's variants lives
/// here so that a single core serves all of them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Side length of the square grid.
    pub grid_size: u32,
    /// Hit points both combatants start with.
    pub start_hp: i32,
    /// Number of obstacles drawn for the opening layout and every wall shift.
    pub obstacle_count: usize,
    /// Hazard kinds that tick during the match.
    pub hazards: BTreeSet<HazardKind>,
    /// Seed feeding obstacle layout and hazard placement.
    pub seed: u64,
    /// Enables the special attack for the player.
    pub special_attack: bool,
    /// Upper bound applied when healing. `None` leaves healing uncapped.
    pub heal_cap: Option<i32>,
    /// Maximum stamina per combatant. `None` disables stamina entirely.
    pub stamina: Option<u32>,
    /// Re-draws obstacle layouts until the combatants can reach each other.
    pub ensure_reachable: bool,
    /// Cadences and magnitudes of every hazard.
    pub tuning: HazardTuning,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            start_hp: DEFAULT_START_HP,
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
            hazards: [HazardKind::PowerUp].into_iter().collect(),
            seed: DEFAULT_SEED,
            special_attack: true,
            heal_cap: None,
            stamina: None,
            ensure_reachable: true,
            tuning: HazardTuning::default(),
        }
    }
}

impl MatchConfig {
    /// Baseline configuration with every hazard enabled.
    #[must_use]
    pub fn with_all_hazards() -> Self {
        Self {
            hazards: HazardKind::TICK_ORDER.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Reports whether the hazard kind participates in the match.
    #[must_use]
    pub fn hazard_enabled(&self, kind: HazardKind) -> bool {
        self.hazards.contains(&kind)
    }

    /// Number of cells on the full grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let side = usize::try_from(self.grid_size).unwrap_or(usize::MAX);
        side.saturating_mul(side)
    }

    /// Checks the configuration for values that cannot produce a consistent board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall {
                size: self.grid_size,
            });
        }

        if self.start_hp <= 0 {
            return Err(ConfigError::NonPositiveHp { hp: self.start_hp });
        }

        let capacity = self.cell_count().saturating_sub(2);
        if self.obstacle_count > capacity {
            return Err(ConfigError::TooManyObstacles {
                requested: self.obstacle_count,
                capacity,
            });
        }

        if let Some(cap) = self.heal_cap {
            if cap <= 0 {
                return Err(ConfigError::NonPositiveHealCap { cap });
            }
        }

        self.tuning.validate()
    }
}

/// Cadences, lifetimes and magnitudes of the hazards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardTuning {
    /// A power-up may appear on turns divisible by this value.
    pub power_up_interval: u32,
    /// Turns an uncollected power-up stays on the board.
    pub power_up_lifetime: u32,
    /// Hit points granted on collection.
    pub power_up_heal: u32,
    /// A bomb may be armed on turns divisible by this value.
    pub bomb_interval: u32,
    /// Turns between arming and detonation.
    pub bomb_fuse: u32,
    /// Damage dealt to combatants on or next to the bomb.
    pub bomb_damage: u32,
    /// Obstacles are redrawn on turns divisible by this value.
    pub wall_interval: u32,
    /// The zone shrinks on turns divisible by this value.
    pub zone_interval: u32,
    /// Smallest side length the zone shrinks to.
    pub zone_floor: u32,
    /// Damage per turn for standing outside the zone.
    pub zone_damage: u32,
}

impl Default for HazardTuning {
    fn default() -> Self {
        Self {
            power_up_interval: 5,
            power_up_lifetime: 3,
            power_up_heal: 2,
            bomb_interval: 7,
            bomb_fuse: 2,
            bomb_damage: 3,
            wall_interval: 10,
            zone_interval: 5,
            zone_floor: 3,
            zone_damage: 1,
        }
    }
}

impl HazardTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        let intervals = [
            (HazardKind::PowerUp, self.power_up_interval),
            (HazardKind::PowerUp, self.power_up_lifetime),
            (HazardKind::Bomb, self.bomb_interval),
            (HazardKind::Bomb, self.bomb_fuse),
            (HazardKind::DynamicWalls, self.wall_interval),
            (HazardKind::ShrinkingZone, self.zone_interval),
        ];
        if let Some((hazard, _)) = intervals.into_iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ZeroInterval { hazard });
        }

        if self.zone_floor == 0 {
            return Err(ConfigError::ZeroZoneFloor);
        }

        Ok(())
    }
}

/// Reasons a configuration is rejected at match creation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The grid cannot hold both combatants.
    #[error("grid size {size} is too small, at least 2 is required")]
    GridTooSmall {
        /// Requested side length.
        size: u32,
    },
    /// Starting hit points must be positive.
    #[error("starting hit points must be positive, got {hp}")]
    NonPositiveHp {
        /// Requested starting hit points.
        hp: i32,
    },
    /// The obstacle count does not fit beside the combatants.
    #[error("{requested} obstacles requested but only {capacity} cells are free")]
    TooManyObstacles {
        /// Requested obstacle count.
        requested: usize,
        /// Cells available once both combatants are placed.
        capacity: usize,
    },
    /// A heal cap must allow at least one hit point.
    #[error("heal cap must be positive, got {cap}")]
    NonPositiveHealCap {
        /// Requested cap.
        cap: i32,
    },
    /// A hazard cadence, lifetime or fuse is zero.
    #[error("{hazard} tuning contains a zero interval")]
    ZeroInterval {
        /// Hazard whose tuning is invalid.
        hazard: HazardKind,
    },
    /// The zone would shrink to nothing.
    #[error("zone floor must be at least 1")]
    ZeroZoneFloor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_baseline() {
        let config = MatchConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.grid_size, 6);
        assert_eq!(config.start_hp, 10);
        assert_eq!(config.obstacle_count, 5);
        assert!(config.hazard_enabled(HazardKind::PowerUp));
        assert!(!config.hazard_enabled(HazardKind::Bomb));
    }

    #[test]
    fn validation_rejects_crowded_grid() {
        let config = MatchConfig {
            grid_size: 2,
            obstacle_count: 3,
            ..MatchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyObstacles {
                requested: 3,
                capacity: 2,
            })
        );
    }

    #[test]
    fn validation_rejects_zero_cadence() {
        let mut config = MatchConfig::with_all_hazards();
        config.tuning.bomb_fuse = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroInterval {
                hazard: HazardKind::Bomb,
            })
        );
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: MatchConfig = toml::from_str(
            r#"
            grid_size = 8
            hazards = ["bomb", "shrinking_zone"]

            [tuning]
            bomb_damage = 5
            "#,
        )
        .expect("parse config");

        assert_eq!(config.grid_size, 8);
        assert_eq!(config.start_hp, 10);
        assert!(config.hazard_enabled(HazardKind::ShrinkingZone));
        assert!(!config.hazard_enabled(HazardKind::PowerUp));
        assert_eq!(config.tuning.bomb_damage, 5);
        assert_eq!(config.tuning.bomb_fuse, 2);
    }
}
