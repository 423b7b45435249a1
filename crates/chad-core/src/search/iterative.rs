//! 反復深化
//!
//! 深さ1から目標深さまでアルファベータを繰り返す。各深さの前に、直前の深さでの評価値で
//! ルートの手を並べ替える（白は降順、黒は昇順。同点は元の順）。
//! 時間制限つきで使う場合は、打ち切られた深さの結果を捨てて最後に完了した深さの手を返す。

use std::time::Instant;

use super::alpha_beta::Searcher;
use super::ordering::root_moves;
use super::{
    MoveStrategy, SearchLimits, SearchResult, SearchState, SearchStats, StopHandle, TtScope,
    arm_timer,
};
use crate::eval::Evaluator;
use crate::position::Position;
use crate::tt::TranspositionTable;
use crate::types::Move;

/// 反復深化アルファベータ
pub struct IterativeDeepening {
    evaluator: Box<dyn Evaluator>,
    tt: Option<TranspositionTable>,
    tt_scope: TtScope,
    stats: SearchStats,
}

impl IterativeDeepening {
    /// 置換表なし
    pub fn new(evaluator: Box<dyn Evaluator>) -> Self {
        IterativeDeepening {
            evaluator,
            tt: None,
            tt_scope: TtScope::default(),
            stats: SearchStats::default(),
        }
    }

    /// 置換表つき
    pub fn with_transposition_table(evaluator: Box<dyn Evaluator>, scope: TtScope) -> Self {
        IterativeDeepening {
            evaluator,
            tt: Some(TranspositionTable::new()),
            tt_scope: scope,
            stats: SearchStats::default(),
        }
    }

    pub fn transposition_table(&self) -> Option<&TranspositionTable> {
        self.tt.as_ref()
    }
}

impl MoveStrategy for IterativeDeepening {
    fn name(&self) -> &'static str {
        "iterative_deepening"
    }

    fn search(&mut self, position: &Position, limits: &SearchLimits) -> SearchResult {
        let start = Instant::now();
        self.stats = SearchStats::default();
        let (stop, _timer) = arm_timer(limits);
        let stop = stop.as_ref();

        let side = position.side_to_move();
        let legal = position.legal_moves(side);
        if legal.is_empty() {
            self.stats.elapsed = start.elapsed();
            return SearchResult::no_legal_moves(self.stats);
        }
        if self.tt_scope == TtScope::PerSearch {
            if let Some(tt) = self.tt.as_mut() {
                tt.clear();
            }
        }

        let target = limits.depth.max(1);
        let mut moves = root_moves(position);
        let mut completed: Option<(Move, i32)> = None;

        for depth in 1..=target {
            if stop.is_some_and(StopHandle::is_stopped) {
                break;
            }
            let root = Searcher::new(
                self.evaluator.as_ref(),
                self.tt.as_mut(),
                depth,
                stop,
                &mut self.stats,
            )
            .search_root(position, &moves, depth);
            // 途中で止まった深さは捨てる
            let Some(root) = root else {
                break;
            };

            let (best_move, score) = root.best.unwrap_or_else(|| (moves[0].clone(), root.scores[0]));
            log::debug!(
                "depth {depth}: best {best_move} score {score} nodes {} elapsed {} ms",
                self.stats.nodes,
                start.elapsed().as_millis()
            );
            completed = Some((best_move, score));
            self.stats.depth_reached = depth;

            let mut scored: Vec<(Move, i32)> = moves.into_iter().zip(root.scores).collect();
            if side.is_white() {
                scored.sort_by(|a, b| b.1.cmp(&a.1));
            } else {
                scored.sort_by(|a, b| a.1.cmp(&b.1));
            }
            moves = scored.into_iter().map(|(mv, _)| mv).collect();
        }
        self.stats.elapsed = start.elapsed();
        if let Some(tt) = self.tt.as_ref() {
            log::debug!("tt: {} entries, hit rate {:.1}%", tt.len(), tt.hit_rate() * 100.0);
        }

        let state = if self.stats.depth_reached < target {
            SearchState::Cancelled
        } else {
            SearchState::Done
        };
        let (best_move, score) = match completed {
            Some((mv, score)) => (mv, Some(score)),
            None => {
                log::warn!("search stopped before depth 1 completed, playing the first legal move");
                (legal[0].clone(), None)
            }
        };
        if limits.time_limit.is_some() {
            log::info!(
                "timed search chose {best_move} at depth {}/{target} ({}, {} nodes, {} ms)",
                self.stats.depth_reached,
                state.label(),
                self.stats.nodes,
                self.stats.elapsed.as_millis()
            );
        }
        SearchResult {
            best_move,
            score,
            state,
            stats: self.stats,
        }
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::StandardEvaluator;
    use crate::types::Alliance;
    use std::time::Duration;

    fn strategy() -> IterativeDeepening {
        IterativeDeepening::new(Box::new(StandardEvaluator::default()))
    }

    #[test]
    fn test_completes_every_depth() {
        let pos = Position::initial();
        let result = strategy().search(&pos, &SearchLimits::depth(2));
        assert_eq!(result.state, SearchState::Done);
        assert_eq!(result.stats.depth_reached, 2);
        assert!(pos.legal_moves(Alliance::White).contains(&result.best_move));
    }

    #[test]
    fn test_stopped_search_falls_back_to_first_legal_move() {
        let pos = Position::initial();
        let stop = StopHandle::new();
        stop.request_stop();
        let result = strategy().search(&pos, &SearchLimits::depth(3).with_stop(stop));
        assert_eq!(result.state, SearchState::Cancelled);
        assert_eq!(result.stats.depth_reached, 0);
        assert_eq!(result.best_move, pos.legal_moves(Alliance::White)[0]);
        assert_eq!(result.score, None);
    }

    #[test]
    fn test_time_limit_cancels_deep_search() {
        let pos = Position::initial();
        let limits = SearchLimits::depth(64).with_time_limit(Duration::from_millis(300));
        let begin = Instant::now();
        let result = strategy().search(&pos, &limits);
        assert_eq!(result.state, SearchState::Cancelled);
        assert!(result.stats.depth_reached < 64);
        assert!(pos.legal_moves(Alliance::White).contains(&result.best_move));
        assert!(begin.elapsed() < Duration::from_secs(30));
    }
}
