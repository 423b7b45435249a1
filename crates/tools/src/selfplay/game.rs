use anyhow::{Context, Result};
use chad_core::player::MoveStatus;
use chad_core::search::SearchState;
use chad_core::{Alliance, Game, Position};

use super::engine::Engine;
use super::types::{GameOutcome, duration_to_millis};

/// ゲーム設定
pub struct GameConfig {
    /// この手数に達したら引き分け
    pub max_plies: u32,
}

/// 1手ごとに呼ばれるイベント
pub struct MoveEvent {
    pub ply: u32,
    pub side: Alliance,
    /// 指す前の局面の指紋
    pub fingerprint_before: String,
    pub move_text: String,
    pub elapsed_ms: u64,
    pub score: Option<i32>,
    pub depth: u32,
    pub nodes: u64,
    pub search_state: SearchState,
    pub engine_label: String,
}

/// 対局結果
pub struct GameResult {
    pub outcome: GameOutcome,
    pub reason: String,
    pub plies: u32,
    /// 棋譜（"D7-H7" 形式）
    pub moves: Vec<String>,
}

/// 1局を実行する。
///
/// - `white`, `black`: 探索エンジン
/// - `start`: 開始局面
/// - `config`: ゲーム設定
/// - `on_move`: 1手ごとに呼ばれるコールバック。エラーを返すと対局を中断してそのまま返す
pub fn run_game(
    white: &mut Engine,
    black: &mut Engine,
    start: Position,
    config: &GameConfig,
    on_move: &mut dyn FnMut(&MoveEvent) -> Result<()>,
) -> Result<GameResult> {
    let mut game = Game::new(start);
    let mut outcome = GameOutcome::InProgress;
    let mut outcome_reason = "max_plies".to_string();
    let mut plies_played = 0u32;

    while plies_played < config.max_plies {
        let (status_outcome, reason) = GameOutcome::from_status(game.status());
        if status_outcome != GameOutcome::InProgress {
            outcome = status_outcome;
            outcome_reason = reason.to_string();
            break;
        }

        let side = game.position().side_to_move();
        let engine = if side.is_white() {
            &mut *white
        } else {
            &mut *black
        };
        let fingerprint_before = game.position().fingerprint().to_hex();
        let search = engine.search(game.position());

        let status = game.play(&search.best_move);
        plies_played += 1;
        let event = MoveEvent {
            ply: plies_played,
            side,
            fingerprint_before,
            move_text: search.best_move.to_string(),
            elapsed_ms: duration_to_millis(search.stats.elapsed),
            score: search.score,
            depth: search.stats.depth_reached,
            nodes: search.stats.nodes,
            search_state: search.state,
            engine_label: engine.label.clone(),
        };
        on_move(&event).with_context(|| format!("move callback failed at ply {plies_played}"))?;

        if status != MoveStatus::Done {
            log::warn!("{} played an unplayable move {} ({:?})", engine.label, search.best_move, status);
            outcome = GameOutcome::win_for(side.opponent());
            outcome_reason = "illegal_move".to_string();
            break;
        }
    }

    if outcome == GameOutcome::InProgress {
        // 最大手数ちょうどで終局している場合もある
        let (status_outcome, reason) = GameOutcome::from_status(game.status());
        if status_outcome == GameOutcome::InProgress {
            outcome = GameOutcome::Draw;
        } else {
            outcome = status_outcome;
            outcome_reason = reason.to_string();
        }
    }

    Ok(GameResult {
        outcome,
        reason: outcome_reason,
        plies: plies_played,
        moves: game.moves().iter().map(ToString::to_string).collect(),
    })
}
