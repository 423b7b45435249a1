use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use chad_core::search::{SearchConfig, SearchResult, StrategyKind};
use chad_core::{Alliance, Position};
use serde::Serialize;
use tools::selfplay::{MatchConfig, duration_to_millis};

/// 局面を1つ探索して選んだ手を表示する。
///
/// - 詰め問題2を反復深化（深さ4）で:
///   `cargo run -p tools --bin chad_solve -- --puzzle 2 --algorithm iterative_deepening --depth 4`
///
/// - 初期局面をMCTSで5秒、JSONで出力:
///   `cargo run -p tools --bin chad_solve -- --algorithm mcts --time-limit-ms 5000 --json`
#[derive(Parser, Debug)]
#[command(author, version, about = "Search a single chad position and print the chosen move")]
struct Cli {
    /// Puzzle number (1-3). The initial position is used when omitted
    #[arg(long)]
    puzzle: Option<u8>,

    /// Search strategy
    #[arg(long, default_value = "iterative_deepening")]
    algorithm: String,

    /// Search depth
    #[arg(long, default_value_t = 4)]
    depth: u32,

    /// Time limit in milliseconds for timed strategies
    #[arg(long, default_value_t = 5000)]
    time_limit_ms: u64,

    /// Fixed number of MCTS iterations (overrides the time limit)
    #[arg(long)]
    mcts_iterations: Option<u32>,

    /// TOML match config; the side to move's section is used
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the result as one JSON line
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
struct SolveLog<'a> {
    position: String,
    strategy: &'a str,
    #[serde(rename = "move")]
    move_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<i32>,
    state: &'static str,
    depth: u32,
    nodes: u64,
    evaluated: u64,
    tt_hits: u64,
    elapsed_ms: u64,
}

fn parse_algorithm(text: &str) -> Result<StrategyKind> {
    match StrategyKind::ALL.into_iter().find(|k| k.label() == text) {
        Some(kind) => Ok(kind),
        None => bail!("unknown strategy {text:?}"),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();
    let cli = Cli::parse();

    let position = match cli.puzzle {
        Some(number) => Position::puzzle(number).with_context(|| format!("puzzle {number}"))?,
        None => Position::initial(),
    };
    let side = position.side_to_move();

    let config = match cli.config.as_deref() {
        Some(path) => MatchConfig::load(path)?.side(side).clone(),
        None => {
            let mut config = SearchConfig {
                algorithm: parse_algorithm(&cli.algorithm)?,
                depth: cli.depth,
                time_limit_ms: cli.time_limit_ms,
                ..SearchConfig::default()
            };
            config.mcts.iterations = cli.mcts_iterations;
            config
        }
    };

    let mut strategy = config.build_strategy();
    log::info!(
        "searching {} with {} (depth {}, {} to move)",
        cli.puzzle.map_or_else(|| "initial position".to_string(), |n| format!("puzzle {n}")),
        strategy.name(),
        config.depth,
        side
    );
    let result = strategy.search(&position, &config.limits());
    report(&cli, &position, strategy.name(), &result)
}

fn report(cli: &Cli, position: &Position, strategy: &str, result: &SearchResult) -> Result<()> {
    let log = SolveLog {
        position: cli.puzzle.map_or_else(|| "initial".to_string(), |n| format!("puzzle{n}")),
        strategy,
        move_text: result.best_move.to_string(),
        score: result.score,
        state: result.state.label(),
        depth: result.stats.depth_reached,
        nodes: result.stats.nodes,
        evaluated: result.stats.evaluated,
        tt_hits: result.stats.tt_hits,
        elapsed_ms: duration_to_millis(result.stats.elapsed),
    };
    if cli.json {
        println!("{}", serde_json::to_string(&log)?);
        return Ok(());
    }

    println!("{position}");
    let side = position.side_to_move();
    println!("{} to move: {}", side, log.move_text);
    if let Some(score) = log.score {
        let relative = if side == Alliance::White { score } else { -score };
        println!("score {score} (side to move {relative:+})");
    }
    println!(
        "{} / depth {} / nodes {} ({} nps) / evaluated {} / tt hits {} / {} ms",
        log.state,
        log.depth,
        log.nodes,
        result.stats.nps(),
        log.evaluated,
        log.tt_hits,
        log.elapsed_ms
    );
    Ok(())
}
