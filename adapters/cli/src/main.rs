#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Knight's Arena in the terminal.

mod input;
mod render;
mod report;

use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use knights_arena_core::{HazardKind, MatchConfig, MatchSnapshot};
use knights_arena_engine::Match;
use knights_arena_world::Scenario;
use tracing_subscriber::EnvFilter;

use crate::{
    input::{Input, HELP},
    report::BattleReport,
};

/// Command-line arguments accepted by the Knight's Arena binary.
#[derive(Debug, Parser)]
#[command(name = "knights-arena", about = "Turn-based knight duel on a small grid")]
struct CliArgs {
    /// Seed for obstacle layout and hazard placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Side length of the square grid.
    #[arg(long, value_name = "CELLS")]
    grid_size: Option<u32>,
    /// Hit points both combatants start with.
    #[arg(long, value_name = "HP")]
    start_hp: Option<i32>,
    /// Number of obstacles on the board.
    #[arg(long, value_name = "COUNT")]
    obstacles: Option<usize>,
    /// Hazard to enable; repeat to enable several. Replaces the configured set.
    #[arg(long = "hazard", value_enum, value_name = "KIND")]
    hazards: Vec<HazardArg>,
    /// TOML file holding a match configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// TOML file fixing positions, hit points or obstacles.
    #[arg(long, value_name = "PATH")]
    scenario: Option<PathBuf>,
    /// Prints snapshots and the final report as JSON.
    #[arg(long)]
    json: bool,
}

/// Hazard names accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum HazardArg {
    PowerUp,
    Bomb,
    DynamicWalls,
    ShrinkingZone,
}

impl From<HazardArg> for HazardKind {
    fn from(value: HazardArg) -> Self {
        match value {
            HazardArg::PowerUp => HazardKind::PowerUp,
            HazardArg::Bomb => HazardKind::Bomb,
            HazardArg::DynamicWalls => HazardKind::DynamicWalls,
            HazardArg::ShrinkingZone => HazardKind::ShrinkingZone,
        }
    }
}

impl CliArgs {
    fn match_config(&self) -> Result<MatchConfig> {
        let mut config = match &self.config {
            Some(path) => read_toml::<MatchConfig>(path)?,
            None => MatchConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(start_hp) = self.start_hp {
            config.start_hp = start_hp;
        }
        if let Some(obstacles) = self.obstacles {
            config.obstacle_count = obstacles;
        }
        if !self.hazards.is_empty() {
            config.hazards = self.hazards.iter().copied().map(HazardKind::from).collect();
        }

        Ok(config)
    }

    fn scenario(&self) -> Result<Scenario> {
        match &self.scenario {
            Some(path) => read_toml(path),
            None => Ok(Scenario::default()),
        }
    }
}

fn read_toml<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

/// Entry point for the Knight's Arena command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    let config = args.match_config()?;
    let scenario = args.scenario()?;
    let mut arena =
        Match::from_scenario(config, &scenario).context("failed to set up the match")?;
    tracing::info!(seed = arena.config().seed, "match created");

    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    writeln!(out, "{HELP}")?;
    show(&mut out, &arena.state(), args.json)?;
    prompt(&mut out)?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        match input::parse(&line) {
            Ok(Input::Action(action)) => {
                let report = arena.submit_action(action);
                for entry in &report.log {
                    writeln!(out, "{entry}")?;
                }
                show(&mut out, &report.snapshot, args.json)?;
                if arena.is_terminated() {
                    break;
                }
            }
            Ok(Input::State) => show(&mut out, &arena.state(), args.json)?,
            Ok(Input::Help) => writeln!(out, "{HELP}")?,
            Ok(Input::Quit) => break,
            Err(error) => writeln!(out, "{error}")?,
        }
        prompt(&mut out)?;
    }

    let report = BattleReport::from_log(arena.log());
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "\n{report}")?;
    }
    Ok(())
}

fn show(out: &mut impl Write, snapshot: &MatchSnapshot, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(snapshot)?)?;
    } else {
        write!(out, "\n{}", render::render_grid(snapshot))?;
        writeln!(out, "{}", render::status_line(snapshot))?;
    }
    Ok(())
}

fn prompt(out: &mut impl Write) -> Result<()> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}
