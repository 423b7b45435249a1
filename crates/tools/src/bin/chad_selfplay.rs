use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use chad_core::search::{SearchConfig, StrategyKind};
use chad_core::{Alliance, Position};
use serde::Serialize;
use tools::selfplay::{
    Engine, GameConfig, GameOutcome, MatchConfig, MoveEvent, run_game, side_label,
};

/// 探索戦略同士の自己対局ハーネス。
///
/// # よく使うコマンド例
///
/// - 反復深化（深さ3）同士で10局:
///   `cargo run -p tools --bin chad_selfplay -- --games 10 --white iterative_deepening --black iterative_deepening --depth 3`
///
/// - 白アルファベータ、黒MCTS（1手1秒）:
///   `cargo run -p tools --bin chad_selfplay -- --white alpha_beta_tt --black mcts --time-limit-ms 1000`
///
/// - 設定ファイルから:
///   `cargo run -p tools --bin chad_selfplay -- --config match.toml --out runs/selfplay/match.jsonl`
///
/// `--out` 未指定時は `runs/selfplay/<timestamp>-selfplay.jsonl` に書き出す。
///
#[derive(Parser, Debug)]
#[command(author, version, about = "chad selfplay harness (strategy vs strategy)")]
struct Cli {
    /// Number of games to run
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Maximum plies per game before declaring a draw
    #[arg(long, default_value_t = 200)]
    max_plies: u32,

    /// TOML file with [white] and [black] search configs
    #[arg(long)]
    config: Option<PathBuf>,

    /// Strategy for White (overrides the config file)
    #[arg(long, value_parser = parse_strategy)]
    white: Option<StrategyKind>,

    /// Strategy for Black (overrides the config file)
    #[arg(long, value_parser = parse_strategy)]
    black: Option<StrategyKind>,

    /// Search depth for both sides
    #[arg(long)]
    depth: Option<u32>,

    /// Time limit per move in milliseconds for timed strategies
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// MCTS seed for both sides
    #[arg(long)]
    seed: Option<u64>,

    /// Start from a numbered puzzle position instead of the initial position
    #[arg(long)]
    puzzle: Option<u8>,

    /// Output JSONL path
    #[arg(long)]
    out: Option<PathBuf>,

    /// Flush the log after every move
    #[arg(long, default_value_t = false)]
    flush_each_move: bool,
}

fn parse_strategy(text: &str) -> Result<StrategyKind, String> {
    StrategyKind::ALL
        .into_iter()
        .find(|k| k.label() == text)
        .ok_or_else(|| {
            let names: Vec<&str> = StrategyKind::ALL.iter().map(|k| k.label()).collect();
            format!("unknown strategy {text:?} (expected one of {})", names.join(", "))
        })
}

#[derive(Serialize)]
struct MetaLog<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    timestamp: String,
    games: u32,
    max_plies: u32,
    start: String,
    white: &'a SearchConfig,
    black: &'a SearchConfig,
}

#[derive(Serialize)]
struct MoveLog<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    game_id: u32,
    ply: u32,
    side_to_move: char,
    fingerprint_before: &'a str,
    #[serde(rename = "move")]
    move_text: &'a str,
    engine: &'a str,
    elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<i32>,
    depth: u32,
    nodes: u64,
    search_state: &'static str,
}

#[derive(Serialize)]
struct ResultLog<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    game_id: u32,
    outcome: &'a str,
    reason: &'a str,
    plies: u32,
    moves: &'a [String],
}

#[derive(Serialize)]
struct SummaryLog {
    #[serde(rename = "type")]
    kind: &'static str,
    total_games: u32,
    white_wins: u32,
    black_wins: u32,
    draws: u32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();
    let cli = Cli::parse();

    let mut match_config = match cli.config.as_deref() {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };
    for (alliance, kind) in [(Alliance::White, cli.white), (Alliance::Black, cli.black)] {
        let side = match_config.side_mut(alliance);
        if let Some(kind) = kind {
            side.algorithm = kind;
        }
        if let Some(depth) = cli.depth {
            side.depth = depth;
        }
        if let Some(ms) = cli.time_limit_ms {
            side.time_limit_ms = ms;
        }
        if let Some(seed) = cli.seed {
            side.mcts.seed = seed;
        }
    }

    let start = match cli.puzzle {
        Some(number) => Position::puzzle(number)?,
        None => Position::initial(),
    };
    let start_label = cli.puzzle.map_or_else(|| "initial".to_string(), |n| format!("puzzle{n}"));

    let timestamp = Local::now();
    let output_path = resolve_output_path(cli.out.as_deref(), &timestamp);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let mut writer = BufWriter::new(
        File::create(&output_path)
            .with_context(|| format!("failed to open {}", output_path.display()))?,
    );

    let meta = MetaLog {
        kind: "meta",
        timestamp: timestamp.to_rfc3339(),
        games: cli.games,
        max_plies: cli.max_plies,
        start: start_label,
        white: &match_config.white,
        black: &match_config.black,
    };
    serde_json::to_writer(&mut writer, &meta)?;
    writer.write_all(b"\n")?;

    let game_config = GameConfig {
        max_plies: cli.max_plies,
    };
    let mut summary = SummaryLog {
        kind: "summary",
        total_games: 0,
        white_wins: 0,
        black_wins: 0,
        draws: 0,
    };

    for game_idx in 0..cli.games {
        let game_id = game_idx + 1;
        // PerGame の置換表を局ごとに捨てるため毎局作り直す
        let mut white = Engine::from_config(&match_config.white);
        let mut black = Engine::from_config(&match_config.black);

        let mut on_move = |event: &MoveEvent| -> Result<()> {
            let log = MoveLog {
                kind: "move",
                game_id,
                ply: event.ply,
                side_to_move: side_label(event.side),
                fingerprint_before: &event.fingerprint_before,
                move_text: &event.move_text,
                engine: &event.engine_label,
                elapsed_ms: event.elapsed_ms,
                score: event.score,
                depth: event.depth,
                nodes: event.nodes,
                search_state: event.search_state.label(),
            };
            serde_json::to_writer(&mut writer, &log)?;
            writer.write_all(b"\n")?;
            if cli.flush_each_move {
                writer.flush()?;
            }
            Ok(())
        };
        let result = run_game(&mut white, &mut black, start.clone(), &game_config, &mut on_move)
            .with_context(|| format!("game {game_id} ({})", output_path.display()))?;

        let result_log = ResultLog {
            kind: "result",
            game_id,
            outcome: result.outcome.label(),
            reason: &result.reason,
            plies: result.plies,
            moves: &result.moves,
        };
        serde_json::to_writer(&mut writer, &result_log)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        summary.total_games += 1;
        match result.outcome {
            GameOutcome::WhiteWin => summary.white_wins += 1,
            GameOutcome::BlackWin => summary.black_wins += 1,
            GameOutcome::Draw | GameOutcome::InProgress => summary.draws += 1,
        }
        log::info!(
            "game {game_id}/{}: {} ({}) after {} plies",
            cli.games,
            result.outcome.label(),
            result.reason,
            result.plies
        );
    }

    serde_json::to_writer(&mut writer, &summary)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    log::info!(
        "white {} / black {} / draw {} -> {}",
        summary.white_wins,
        summary.black_wins,
        summary.draws,
        output_path.display()
    );
    Ok(())
}

fn resolve_output_path(out: Option<&Path>, timestamp: &chrono::DateTime<Local>) -> PathBuf {
    if let Some(path) = out {
        return path.to_path_buf();
    }
    let dir = PathBuf::from("runs/selfplay");
    let name = format!("{}-selfplay.jsonl", timestamp.format("%Y%m%d-%H%M%S"));
    dir.join(name)
}
