//! ミニマックス

use std::time::Instant;

use super::{
    MoveStrategy, SearchLimits, SearchResult, SearchState, SearchStats, StopHandle, arm_timer,
    improves, worst_score,
};
use crate::eval::Evaluator;
use crate::position::Position;
use crate::types::Move;

/// 枝刈りなしの固定深さ探索
///
/// 合法手を生成順に全て展開する。評価値が並んだら先に見つけた手を選ぶ。
pub struct Minimax {
    evaluator: Box<dyn Evaluator>,
    stats: SearchStats,
}

impl Minimax {
    pub fn new(evaluator: Box<dyn Evaluator>) -> Self {
        Minimax {
            evaluator,
            stats: SearchStats::default(),
        }
    }

    fn minimax(&mut self, position: &Position, depth: u32, stop: Option<&StopHandle>) -> i32 {
        self.stats.nodes += 1;
        if depth == 0 || position.is_game_over() {
            self.stats.evaluated += 1;
            return self.evaluator.evaluate(position, depth);
        }

        let side = position.side_to_move();
        let mut best = worst_score(side);
        for mv in position.legal_moves(side) {
            if stop.is_some_and(StopHandle::is_stopped) {
                break;
            }
            let Ok(child) = position.apply_unchecked(mv) else {
                continue;
            };
            let score = self.minimax(&child, depth - 1, stop);
            if improves(side, score, best) {
                best = score;
            }
        }
        best
    }
}

impl MoveStrategy for Minimax {
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn search(&mut self, position: &Position, limits: &SearchLimits) -> SearchResult {
        let start = Instant::now();
        self.stats = SearchStats::default();
        let (stop, _timer) = arm_timer(limits);
        let stop = stop.as_ref();

        let side = position.side_to_move();
        let moves = position.legal_moves(side);
        if moves.is_empty() {
            self.stats.elapsed = start.elapsed();
            return SearchResult::no_legal_moves(self.stats);
        }

        let depth = limits.depth.max(1);
        let mut best: Option<(Move, i32)> = None;
        let mut cancelled = false;
        for mv in moves {
            let Ok(child) = position.apply_unchecked(mv) else {
                continue;
            };
            let score = self.minimax(&child, depth - 1, stop);
            // 途中で止まった子の値は使わない
            if stop.is_some_and(StopHandle::is_stopped) {
                cancelled = true;
                break;
            }
            if best.as_ref().is_none_or(|(_, b)| improves(side, score, *b)) {
                best = Some((mv.clone(), score));
            }
        }

        self.stats.depth_reached = if cancelled { 0 } else { depth };
        self.stats.elapsed = start.elapsed();
        let (best_move, score) = match best {
            Some((mv, score)) => (mv, Some(score)),
            None => (moves[0].clone(), None),
        };
        SearchResult {
            best_move,
            score,
            state: if cancelled {
                SearchState::Cancelled
            } else {
                SearchState::Done
            },
            stats: self.stats,
        }
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
