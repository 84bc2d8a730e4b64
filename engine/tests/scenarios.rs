use knights_arena_core::{
    AttackFailure, AttackKind, Command, DamageCause, Direction, Event, HazardKind, Health,
    MatchConfig, MatchResult, PlayerAction, Position, Side,
};
use knights_arena_engine::Match;
use knights_arena_world::{apply, MatchState, Scenario};

const LIGHT: PlayerAction = PlayerAction::Attack {
    kind: AttackKind::Light,
};
const SWORD: PlayerAction = PlayerAction::Attack {
    kind: AttackKind::Sword,
};

fn events(log: &[knights_arena_core::LogEntry]) -> Vec<&Event> {
    log.iter().map(|entry| &entry.event).collect()
}

fn duel(config: MatchConfig, player_hp: i32, opponent_hp: i32) -> MatchState {
    MatchState::from_scenario(
        config,
        &Scenario {
            player: Some(Position::new(2, 2)),
            opponent: Some(Position::new(2, 3)),
            player_hp: Some(player_hp),
            opponent_hp: Some(opponent_hp),
            obstacles: Some(Vec::new()),
        },
    )
    .expect("valid duel")
}

#[test]
fn new_match_starts_in_opposite_corners() {
    let arena = Match::new(MatchConfig::default()).expect("valid setup");
    let snapshot = arena.state();

    assert_eq!(snapshot.turn, 1);
    assert_eq!(snapshot.player.position, Position::new(0, 0));
    assert_eq!(snapshot.opponent.position, Position::new(5, 5));
    assert_eq!(snapshot.player.health, Health::new(10));
    assert_eq!(snapshot.obstacles.len(), 5);
    assert!(snapshot.power_up.is_none());
    assert!(snapshot.bomb.is_none());
    assert_eq!(arena.result(), MatchResult::Ongoing);
}

#[test]
fn trading_light_blows_for_three_turns() {
    let mut arena = Match::from_state(duel(MatchConfig::default(), 10, 10));

    for _ in 0..3 {
        let _ = arena.submit_action(LIGHT);
    }

    let snapshot = arena.state();
    assert_eq!(snapshot.player.health, Health::new(7));
    assert_eq!(snapshot.opponent.health, Health::new(7));
    assert_eq!(snapshot.result, MatchResult::Ongoing);
    assert_eq!(snapshot.turn, 4);
}

#[test]
fn wounded_opponent_retreats_while_adjacent() {
    let mut arena = Match::from_state(duel(MatchConfig::default(), 10, 2));

    let report = arena.submit_action(PlayerAction::Move {
        direction: Direction::Up,
    });

    assert!(!report
        .log
        .iter()
        .any(|entry| matches!(entry.event, Event::Struck { attacker: Side::Opponent, .. })));
    assert!(report.log.iter().any(|entry| matches!(
        entry.event,
        Event::CombatantMoved {
            side: Side::Opponent,
            maneuver: knights_arena_core::Maneuver::Retreat,
            ..
        }
    )));
    assert_eq!(report.snapshot.player.health, Health::new(10));
}

#[test]
fn sword_used_twice_in_a_row_is_recharging() {
    let config = MatchConfig {
        hazards: Default::default(),
        ..MatchConfig::default()
    };
    let mut arena = Match::from_state(duel(config, 10, 10));

    let first = arena.submit_action(SWORD);
    let second = arena.submit_action(SWORD);

    assert_eq!(first.snapshot.opponent.health, Health::new(8));
    assert_eq!(first.snapshot.player.cooldown(AttackKind::Sword), 2);
    assert!(events(&second.log).contains(&&Event::AttackRejected {
        attacker: Side::Player,
        kind: AttackKind::Sword,
        reason: AttackFailure::Recharging { remaining: 2 },
    }));
    assert_eq!(second.snapshot.opponent.health, Health::new(8));
    assert_eq!(second.snapshot.turn, 3);
    assert_eq!(second.snapshot.player.cooldown(AttackKind::Sword), 1);
}

#[test]
fn knight_collects_power_up_spawned_on_fifth_turn() {
    // A 3x3 arena with a single vacant cell next to the knight; the opponent is walled off.
    let config = MatchConfig {
        grid_size: 3,
        ensure_reachable: false,
        ..MatchConfig::default()
    };
    let scenario = Scenario {
        obstacles: Some(vec![
            Position::new(0, 2),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(1, 2),
            Position::new(2, 0),
            Position::new(2, 1),
        ]),
        ..Scenario::default()
    };
    let mut arena = Match::from_scenario(config, &scenario).expect("valid scenario");
    let wait = PlayerAction::Move {
        direction: Direction::Up,
    };

    for _ in 0..4 {
        let report = arena.submit_action(wait);
        assert!(report.snapshot.power_up.is_none());
    }
    let fifth = arena.submit_action(wait);
    assert!(events(&fifth.log).contains(&&Event::PowerUpSpawned {
        cell: Position::new(0, 1),
    }));

    let sixth = arena.submit_action(PlayerAction::Move {
        direction: Direction::Right,
    });

    let log = events(&sixth.log);
    assert!(log.contains(&&Event::PowerUpCollected {
        by: Side::Player,
        cell: Position::new(0, 1),
    }));
    assert!(log.contains(&&Event::Healed {
        target: Side::Player,
        amount: 2,
        health: Health::new(12),
    }));
    assert!(sixth.snapshot.power_up.is_none());
    assert_eq!(sixth.snapshot.player.health, Health::new(12));
}

#[test]
fn simultaneous_knockout_is_a_draw() {
    let config = MatchConfig {
        hazards: [HazardKind::Bomb].into_iter().collect(),
        ..MatchConfig::default()
    };
    let mut state = duel(config, 3, 3);
    let mut ignored = Vec::new();
    apply(
        &mut state,
        Command::ArmBomb {
            cell: Position::new(2, 2),
            fuse: 1,
        },
        &mut ignored,
    );
    let mut arena = Match::from_state(state);

    let report = arena.submit_action(LIGHT);

    assert_eq!(report.snapshot.result, MatchResult::Draw);
    assert_eq!(report.snapshot.player.health.displayed(), 0);
    assert_eq!(report.snapshot.opponent.health.displayed(), 0);
    assert!(events(&report.log).contains(&&Event::Damaged {
        target: Side::Opponent,
        amount: 3,
        cause: DamageCause::Bomb,
        health: Health::new(-1),
    }));
    assert!(events(&report.log).contains(&&Event::MatchConcluded {
        result: MatchResult::Draw,
    }));
    assert!(!report
        .log
        .iter()
        .any(|entry| matches!(entry.event, Event::Struck { attacker: Side::Opponent, .. })));
    assert!(arena.is_terminated());
}

#[test]
fn concluded_match_only_records_ignored_actions() {
    let mut arena = Match::from_state(duel(MatchConfig::default(), 10, 1));

    let finishing = arena.submit_action(LIGHT);
    assert_eq!(finishing.snapshot.result, MatchResult::PlayerWin);
    assert_eq!(finishing.snapshot.turn, 2);

    let before = arena.state();
    let log_len = arena.log().len();
    let report = arena.submit_action(SWORD);

    assert_eq!(report.snapshot, before);
    assert_eq!(arena.log().len(), log_len + 1);
    assert_eq!(
        events(&report.log),
        vec![&Event::ActionIgnored {
            action: SWORD,
            result: MatchResult::PlayerWin,
        }]
    );
    assert_eq!(report.log[0].turn, 2);
}

#[test]
fn blocked_move_still_consumes_the_turn() {
    let mut arena = Match::from_state(duel(MatchConfig::default(), 10, 10));

    let report = arena.submit_action(PlayerAction::Move {
        direction: Direction::Right,
    });

    assert_eq!(report.snapshot.player.position, Position::new(2, 2));
    assert_eq!(report.snapshot.turn, 2);
    assert!(report.log.iter().any(|entry| matches!(
        entry.event,
        Event::MoveBlocked {
            side: Side::Player,
            ..
        }
    )));
}

#[test]
fn log_entries_are_stamped_with_their_turn() {
    let mut arena = Match::from_state(duel(MatchConfig::default(), 10, 10));

    let report = arena.submit_action(LIGHT);

    let (last, rest) = report.log.split_last().expect("entries");
    assert!(rest.iter().all(|entry| entry.turn == 1));
    assert_eq!(last.event, Event::TurnAdvanced { turn: 2 });
    assert_eq!(arena.log(), report.log.as_slice());
}
