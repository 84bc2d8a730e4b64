#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn orchestration for Knight's Arena.
//!
//! A [`Match`] owns the authoritative state and the systems that act on it.
//! Every call to [`Match::submit_action`] resolves one complete turn: the
//! knight's action, the hazard ticks, the opponent's reply, the result check
//! and the turn increment.

use knights_arena_core::{
    Command, Event, HazardKind, LogEntry, Maneuver, MatchConfig, MatchResult, MatchSnapshot,
    PlayerAction, Side,
};
use knights_arena_system_combat::CombatResolver;
use knights_arena_system_hazards::Hazards;
use knights_arena_system_opponent::OpponentPolicy;
use knights_arena_world::{apply, query, MatchState, Scenario, SetupError};
use serde::{Deserialize, Serialize};

/// Outcome of one resolved turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// State after the turn.
    pub snapshot: MatchSnapshot,
    /// Log entries appended while resolving the turn.
    pub log: Vec<LogEntry>,
}

/// A single isolated match together with the systems that drive it.
#[derive(Clone, Debug)]
pub struct Match {
    state: MatchState,
    combat: CombatResolver,
    hazards: Hazards,
    opponent: OpponentPolicy,
}

impl Match {
    /// Starts a match from the configuration's regular opening.
    pub fn new(config: MatchConfig) -> Result<Self, SetupError> {
        MatchState::new(config).map(Self::from_state)
    }

    /// Starts a match from a scenario overriding parts of the opening.
    pub fn from_scenario(config: MatchConfig, scenario: &Scenario) -> Result<Self, SetupError> {
        MatchState::from_scenario(config, scenario).map(Self::from_state)
    }

    /// Wraps an already prepared match state.
    #[must_use]
    pub fn from_state(state: MatchState) -> Self {
        let config = query::config(&state);
        let combat = CombatResolver::new(config);
        let hazards = Hazards::new(config);
        Self {
            state,
            combat,
            hazards,
            opponent: OpponentPolicy::new(),
        }
    }

    /// Read-only projection of the current match.
    #[must_use]
    pub fn state(&self) -> MatchSnapshot {
        query::snapshot(&self.state)
    }

    /// Every log entry recorded since the match started.
    #[must_use]
    pub fn log(&self) -> &[LogEntry] {
        query::log(&self.state)
    }

    /// Rules the match is played with.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        query::config(&self.state)
    }

    /// Reports whether the match has concluded.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        query::is_terminated(&self.state)
    }

    /// Resolves one full turn driven by the knight's action.
    ///
    /// Once the match has concluded the action is only recorded as ignored
    /// and the state stays untouched.
    pub fn submit_action(&mut self, action: PlayerAction) -> TurnReport {
        let span = tracing::info_span!("turn", turn = query::turn(&self.state), %action);
        let _entered = span.enter();

        let log_start = query::log(&self.state).len();
        let mut commands = Vec::new();
        let mut events = Vec::new();

        if self.is_terminated() {
            commands.push(Command::IgnoreAction { action });
            self.execute(&mut commands, &mut events);
            return self.report(log_start);
        }

        match action {
            PlayerAction::Move { direction } => commands.push(Command::StepCombatant {
                side: Side::Player,
                direction,
                maneuver: Maneuver::Advance,
            }),
            PlayerAction::Attack { kind } => {
                let snapshot = self.state();
                self.combat
                    .handle(Side::Player, kind, &snapshot, &mut commands);
            }
        }
        self.execute(&mut commands, &mut events);

        for kind in HazardKind::TICK_ORDER {
            if !self.hazards.is_enabled(kind) {
                continue;
            }
            let snapshot = self.state();
            self.hazards.tick(kind, &snapshot, &mut commands);
            self.execute(&mut commands, &mut events);
        }

        if !query::pending_result(&self.state).is_terminal() {
            let snapshot = self.state();
            self.opponent.handle(&snapshot, &self.combat, &mut commands);
            self.execute(&mut commands, &mut events);
        }

        let result = query::pending_result(&self.state);
        if result.is_terminal() {
            commands.push(Command::Conclude { result });
        }
        commands.push(Command::AdvanceTurn);
        self.execute(&mut commands, &mut events);

        tracing::debug!(events = events.len(), %result, "turn resolved");
        self.report(log_start)
    }

    /// Final result, or [`MatchResult::Ongoing`] while the match runs.
    #[must_use]
    pub fn result(&self) -> MatchResult {
        query::result(&self.state)
    }

    fn execute(&mut self, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
        for command in commands.drain(..) {
            apply(&mut self.state, command, events);
        }
    }

    fn report(&self, log_start: usize) -> TurnReport {
        TurnReport {
            snapshot: self.state(),
            log: query::log(&self.state)
                .get(log_start..)
                .map(<[LogEntry]>::to_vec)
                .unwrap_or_default(),
        }
    }
}
