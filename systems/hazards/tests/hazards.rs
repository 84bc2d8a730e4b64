use knights_arena_core::{
    is_in_bounds, Command, DamageCause, Direction, Event, HazardKind, Health, Maneuver,
    MatchConfig, Position, Side, TerrainView,
};
use knights_arena_system_hazards::Hazards;
use knights_arena_system_pathfinding::{Goal, Pathfinder};
use knights_arena_world::{apply, layout, query, MatchState, Scenario};

fn config_with(kind: HazardKind) -> MatchConfig {
    MatchConfig {
        hazards: [kind].into_iter().collect(),
        obstacle_count: 0,
        ..MatchConfig::default()
    }
}

fn arena(config: &MatchConfig) -> MatchState {
    MatchState::new(config.clone()).expect("valid setup")
}

fn duel(config: &MatchConfig) -> MatchState {
    MatchState::from_scenario(
        config.clone(),
        &Scenario {
            player: Some(Position::new(2, 2)),
            opponent: Some(Position::new(2, 3)),
            obstacles: Some(Vec::new()),
            ..Scenario::default()
        },
    )
    .expect("valid duel")
}

fn advance_to(state: &mut MatchState, turn: u32) {
    let mut ignored = Vec::new();
    while query::turn(state) < turn {
        apply(state, Command::AdvanceTurn, &mut ignored);
    }
}

fn tick(hazards: &mut Hazards, kind: HazardKind, state: &mut MatchState) -> Vec<Event> {
    let mut commands = Vec::new();
    hazards.tick(kind, &query::snapshot(state), &mut commands);

    let mut events = Vec::new();
    for command in commands {
        apply(state, command, &mut events);
    }
    events
}

#[test]
fn power_up_spawns_on_its_cadence() {
    let config = config_with(HazardKind::PowerUp);
    let mut hazards = Hazards::new(&config);
    let mut state = arena(&config);

    advance_to(&mut state, 4);
    assert!(tick(&mut hazards, HazardKind::PowerUp, &mut state).is_empty());

    advance_to(&mut state, 5);
    let events = tick(&mut hazards, HazardKind::PowerUp, &mut state);

    let snapshot = query::snapshot(&state);
    let power_up = snapshot.power_up.expect("power-up spawned");
    assert_eq!(events, vec![Event::PowerUpSpawned { cell: power_up.cell }]);
    assert_ne!(power_up.cell, snapshot.player.position);
    assert_ne!(power_up.cell, snapshot.opponent.position);
}

#[test]
fn uncollected_power_up_expires_on_third_tick() {
    let config = config_with(HazardKind::PowerUp);
    let mut hazards = Hazards::new(&config);
    let mut state = arena(&config);

    advance_to(&mut state, 5);
    let _ = tick(&mut hazards, HazardKind::PowerUp, &mut state);
    let cell = query::snapshot(&state)
        .power_up
        .map(|power_up| power_up.cell)
        .expect("power-up spawned");

    advance_to(&mut state, 6);
    assert!(tick(&mut hazards, HazardKind::PowerUp, &mut state).is_empty());
    advance_to(&mut state, 7);
    assert!(tick(&mut hazards, HazardKind::PowerUp, &mut state).is_empty());
    advance_to(&mut state, 8);
    let events = tick(&mut hazards, HazardKind::PowerUp, &mut state);

    assert_eq!(events, vec![Event::PowerUpExpired { cell }]);
    assert!(query::snapshot(&state).power_up.is_none());
}

#[test]
fn standing_on_power_up_collects_and_heals() {
    let config = config_with(HazardKind::PowerUp);
    let mut hazards = Hazards::new(&config);
    let mut state = arena(&config);
    let mut ignored = Vec::new();
    apply(
        &mut state,
        Command::SpawnPowerUp {
            cell: Position::new(0, 0),
            lifetime: 3,
        },
        &mut ignored,
    );

    let events = tick(&mut hazards, HazardKind::PowerUp, &mut state);

    assert_eq!(
        events,
        vec![
            Event::PowerUpCollected {
                by: Side::Player,
                cell: Position::new(0, 0),
            },
            Event::Healed {
                target: Side::Player,
                amount: 2,
                health: Health::new(12),
            },
        ]
    );
    assert!(query::snapshot(&state).power_up.is_none());
}

#[test]
fn bomb_fuse_burns_then_detonates_on_neighbours() {
    let config = config_with(HazardKind::Bomb);
    let mut hazards = Hazards::new(&config);
    let mut state = duel(&config);
    let mut ignored = Vec::new();
    let cell = Position::new(2, 2);
    apply(&mut state, Command::ArmBomb { cell, fuse: 2 }, &mut ignored);

    let burned = tick(&mut hazards, HazardKind::Bomb, &mut state);
    let detonated = tick(&mut hazards, HazardKind::Bomb, &mut state);

    assert_eq!(burned, vec![Event::FuseBurned { cell, fuse: 1 }]);
    assert_eq!(
        detonated,
        vec![
            Event::BombDetonated { cell },
            Event::Damaged {
                target: Side::Player,
                amount: 3,
                cause: DamageCause::Bomb,
                health: Health::new(7),
            },
            Event::Damaged {
                target: Side::Opponent,
                amount: 3,
                cause: DamageCause::Bomb,
                health: Health::new(7),
            },
        ]
    );
    assert!(query::snapshot(&state).bomb.is_none());
}

#[test]
fn distant_combatants_escape_the_blast() {
    let config = config_with(HazardKind::Bomb);
    let mut hazards = Hazards::new(&config);
    let mut state = arena(&config);
    let mut ignored = Vec::new();
    let cell = Position::new(3, 3);
    apply(&mut state, Command::ArmBomb { cell, fuse: 1 }, &mut ignored);

    let events = tick(&mut hazards, HazardKind::Bomb, &mut state);

    assert_eq!(events, vec![Event::BombDetonated { cell }]);
    assert_eq!(query::health(&state, Side::Player), Health::new(10));
    assert_eq!(query::health(&state, Side::Opponent), Health::new(10));
}

#[test]
fn bomb_is_armed_on_its_cadence() {
    let config = config_with(HazardKind::Bomb);
    let mut hazards = Hazards::new(&config);
    let mut state = arena(&config);

    advance_to(&mut state, 7);
    let events = tick(&mut hazards, HazardKind::Bomb, &mut state);

    let bomb = query::snapshot(&state).bomb.expect("bomb armed");
    assert_eq!(bomb.fuse, 2);
    assert_eq!(
        events,
        vec![Event::BombArmed {
            cell: bomb.cell,
            fuse: 2,
        }]
    );
}

#[test]
fn zone_shrinks_and_burns_stragglers() {
    let config = config_with(HazardKind::ShrinkingZone);
    let mut hazards = Hazards::new(&config);
    let mut state = arena(&config);

    advance_to(&mut state, 5);
    let events = tick(&mut hazards, HazardKind::ShrinkingZone, &mut state);

    assert_eq!(
        events,
        vec![
            Event::ZoneShrunk { boundary: 5 },
            Event::Damaged {
                target: Side::Opponent,
                amount: 1,
                cause: DamageCause::Zone,
                health: Health::new(9),
            },
        ]
    );

    advance_to(&mut state, 6);
    let events = tick(&mut hazards, HazardKind::ShrinkingZone, &mut state);
    assert_eq!(
        events,
        vec![Event::Damaged {
            target: Side::Opponent,
            amount: 1,
            cause: DamageCause::Zone,
            health: Health::new(8),
        }]
    );
}

#[test]
fn zone_never_shrinks_below_its_floor() {
    let mut config = config_with(HazardKind::ShrinkingZone);
    config.tuning.zone_floor = 5;
    let mut hazards = Hazards::new(&config);
    let mut state = arena(&config);

    for turn in [5, 10, 15] {
        advance_to(&mut state, turn);
        let _ = tick(&mut hazards, HazardKind::ShrinkingZone, &mut state);
    }

    assert_eq!(query::snapshot(&state).boundary, 5);
}

#[test]
fn walls_regenerate_around_combatants_and_hazards() {
    let config = MatchConfig {
        hazards: [HazardKind::DynamicWalls].into_iter().collect(),
        ..MatchConfig::default()
    };
    let mut hazards = Hazards::new(&config);
    let mut state = arena(&config);
    let mut ignored = Vec::new();
    let bomb_cell = Position::new(3, 2);
    apply(
        &mut state,
        Command::ArmBomb {
            cell: bomb_cell,
            fuse: 2,
        },
        &mut ignored,
    );

    advance_to(&mut state, 10);
    let events = tick(&mut hazards, HazardKind::DynamicWalls, &mut state);

    let snapshot = query::snapshot(&state);
    assert_eq!(events, vec![Event::WallsShifted { obstacles: 5 }]);
    assert_eq!(snapshot.obstacles.len(), 5);
    assert!(!snapshot.obstacles.contains(bomb_cell));
    assert!(!snapshot.obstacles.contains(snapshot.player.position));
    assert!(!snapshot.obstacles.contains(snapshot.opponent.position));
    assert!(layout::is_connected(
        &TerrainView::new(
            snapshot.grid_size,
            snapshot.boundary,
            &snapshot.obstacles,
            None
        ),
        snapshot.player.position,
        snapshot.opponent.position,
    ));
}

#[test]
fn impossible_wall_layout_keeps_previous_obstacles() {
    let config = MatchConfig {
        grid_size: 3,
        obstacle_count: 7,
        hazards: [HazardKind::DynamicWalls].into_iter().collect(),
        ..MatchConfig::default()
    };
    let mut hazards = Hazards::new(&config);
    let mut state = MatchState::from_scenario(
        config,
        &Scenario {
            obstacles: Some(Vec::new()),
            ..Scenario::default()
        },
    )
    .expect("valid scenario");

    advance_to(&mut state, 10);
    let events = tick(&mut hazards, HazardKind::DynamicWalls, &mut state);

    assert!(events.is_empty());
    assert!(query::snapshot(&state).obstacles.is_empty());
}

#[test]
fn same_seed_spawns_on_same_cell() {
    let config = config_with(HazardKind::PowerUp);
    let spawn = || {
        let mut hazards = Hazards::new(&config);
        let mut state = arena(&config);
        advance_to(&mut state, 5);
        let _ = tick(&mut hazards, HazardKind::PowerUp, &mut state);
        query::snapshot(&state).power_up
    };

    assert_eq!(spawn(), spawn());
}

fn step_player(state: &mut MatchState, direction: Direction) {
    let mut ignored = Vec::new();
    apply(
        state,
        Command::StepCombatant {
            side: Side::Player,
            direction,
            maneuver: Maneuver::Advance,
        },
        &mut ignored,
    );
}

fn power_up_beside_knight(turn: u32) -> (Hazards, MatchState) {
    let config = config_with(HazardKind::PowerUp);
    let hazards = Hazards::new(&config);
    let mut state = arena(&config);
    advance_to(&mut state, turn);
    let mut ignored = Vec::new();
    apply(
        &mut state,
        Command::SpawnPowerUp {
            cell: Position::new(0, 1),
            lifetime: 3,
        },
        &mut ignored,
    );
    (hazards, state)
}

#[test]
fn power_up_expires_before_a_late_collector_arrives() {
    let (mut hazards, mut state) = power_up_beside_knight(5);

    for turn in [6, 7] {
        advance_to(&mut state, turn);
        assert!(tick(&mut hazards, HazardKind::PowerUp, &mut state).is_empty());
    }
    advance_to(&mut state, 8);
    step_player(&mut state, Direction::Right);
    let events = tick(&mut hazards, HazardKind::PowerUp, &mut state);

    assert_eq!(
        events,
        vec![Event::PowerUpExpired {
            cell: Position::new(0, 1),
        }]
    );
    assert_eq!(query::health(&state, Side::Player), Health::new(10));
}

#[test]
fn power_up_is_collected_on_its_last_live_turn() {
    let (mut hazards, mut state) = power_up_beside_knight(5);

    advance_to(&mut state, 6);
    let _ = tick(&mut hazards, HazardKind::PowerUp, &mut state);
    advance_to(&mut state, 7);
    step_player(&mut state, Direction::Right);
    let events = tick(&mut hazards, HazardKind::PowerUp, &mut state);

    assert_eq!(
        events.first(),
        Some(&Event::PowerUpCollected {
            by: Side::Player,
            cell: Position::new(0, 1),
        })
    );
    assert_eq!(query::health(&state, Side::Player), Health::new(12));
}

#[test]
fn spawns_land_inside_the_zone_left_after_this_turns_shrink() {
    for seed in 0..100 {
        let config = MatchConfig {
            seed,
            hazards: [HazardKind::PowerUp, HazardKind::Bomb, HazardKind::ShrinkingZone]
                .into_iter()
                .collect(),
            obstacle_count: 0,
            ..MatchConfig::default()
        };
        let mut hazards = Hazards::new(&config);
        let mut state = arena(&config);
        // Power-ups, bombs and the zone are all due on this turn.
        advance_to(&mut state, 35);

        for kind in HazardKind::TICK_ORDER {
            let _ = tick(&mut hazards, kind, &mut state);
        }

        let snapshot = query::snapshot(&state);
        assert_eq!(snapshot.boundary, 5);
        let power_up = snapshot.power_up.expect("power-up spawned");
        assert!(is_in_bounds(power_up.cell, snapshot.boundary), "seed {seed}");
        let bomb = snapshot.bomb.expect("bomb armed");
        assert!(is_in_bounds(bomb.cell, snapshot.boundary), "seed {seed}");
    }
}

#[test]
fn shrinking_zone_removes_a_power_up_left_outside() {
    let config = config_with(HazardKind::ShrinkingZone);
    let mut hazards = Hazards::new(&config);
    let mut state = arena(&config);
    let mut ignored = Vec::new();
    let cell = Position::new(5, 2);
    apply(
        &mut state,
        Command::SpawnPowerUp { cell, lifetime: 10 },
        &mut ignored,
    );

    advance_to(&mut state, 5);
    let events = tick(&mut hazards, HazardKind::ShrinkingZone, &mut state);

    assert_eq!(
        events,
        vec![
            Event::ZoneShrunk { boundary: 5 },
            Event::PowerUpExpired { cell },
            Event::Damaged {
                target: Side::Opponent,
                amount: 1,
                cause: DamageCause::Zone,
                health: Health::new(9),
            },
        ]
    );
    assert!(query::snapshot(&state).power_up.is_none());
}

#[test]
fn regenerated_walls_never_seal_a_combatant_inside_the_zone() {
    let mut pathfinder = Pathfinder::new();

    for seed in 0..300 {
        let config = MatchConfig {
            seed,
            hazards: [HazardKind::DynamicWalls].into_iter().collect(),
            ..MatchConfig::default()
        };
        let mut hazards = Hazards::new(&config);
        let mut state = MatchState::from_scenario(
            config,
            &Scenario {
                player: Some(Position::new(0, 0)),
                opponent: Some(Position::new(2, 2)),
                obstacles: Some(Vec::new()),
                ..Scenario::default()
            },
        )
        .expect("valid scenario");
        let mut ignored = Vec::new();
        apply(&mut state, Command::ShrinkZone { boundary: 3 }, &mut ignored);

        advance_to(&mut state, 10);
        let _ = tick(&mut hazards, HazardKind::DynamicWalls, &mut state);

        let snapshot = query::snapshot(&state);
        let path = pathfinder.find_path(
            snapshot.opponent.position,
            Goal::Adjacent(snapshot.player.position),
            &snapshot.terrain_for(Side::Opponent),
        );
        assert!(path.is_some(), "seed {seed} sealed by {:?}", snapshot.obstacles);
    }
}
