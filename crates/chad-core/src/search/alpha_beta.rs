//! アルファベータ探索
//!
//! fail-hard。白ノードは alpha を、黒ノードは beta を動かす。
//! 残り深さ1のノードで取る手を指したときは、子局面を静的評価せず静止探索で解決する。

use std::time::Instant;

use super::ordering::{KillerTable, order_moves, ordered_captures, root_moves};
use super::{
    MoveStrategy, SearchLimits, SearchResult, SearchState, SearchStats, StopHandle, TtScope,
    arm_timer, worst_score,
};
use crate::eval::Evaluator;
use crate::position::Position;
use crate::tt::{TranspositionTable, TtProbe};
use crate::types::{Bound, Move};

/// ルート探索の結果
pub(crate) struct RootSearch {
    /// 最善手と評価値（全ての手が最悪値だった場合は `None`）
    pub best: Option<(Move, i32)>,
    /// ルートの各手の評価値（渡した手の順）
    pub scores: Vec<i32>,
}

/// 1回の探索の作業領域
pub(crate) struct Searcher<'a> {
    evaluator: &'a dyn Evaluator,
    tt: Option<&'a mut TranspositionTable>,
    killers: KillerTable,
    stop: Option<&'a StopHandle>,
    stats: &'a mut SearchStats,
}

impl<'a> Searcher<'a> {
    pub(crate) fn new(
        evaluator: &'a dyn Evaluator,
        tt: Option<&'a mut TranspositionTable>,
        depth: u32,
        stop: Option<&'a StopHandle>,
        stats: &'a mut SearchStats,
    ) -> Self {
        Searcher {
            evaluator,
            tt,
            killers: KillerTable::new(depth),
            stop,
            stats,
        }
    }

    #[inline]
    fn stopped(&self) -> bool {
        self.stop.is_some_and(StopHandle::is_stopped)
    }

    #[inline]
    fn evaluate(&mut self, position: &Position, depth: u32) -> i32 {
        self.stats.evaluated += 1;
        self.evaluator.evaluate(position, depth)
    }

    /// `moves` の順にルートの手を調べる。停止したら `None`
    pub(crate) fn search_root(
        &mut self,
        position: &Position,
        moves: &[Move],
        depth: u32,
    ) -> Option<RootSearch> {
        self.stats.nodes += 1;
        let side = position.side_to_move();
        let mut alpha = i32::MIN;
        let mut beta = i32::MAX;
        let mut best: Option<(Move, i32)> = None;
        let mut scores = Vec::with_capacity(moves.len());

        for mv in moves {
            if self.stopped() {
                return None;
            }
            let Ok(child) = position.apply_unchecked(mv) else {
                scores.push(worst_score(side));
                continue;
            };
            let score = self.child_score(mv, &child, depth, alpha, beta);
            if self.stopped() {
                return None;
            }
            scores.push(score);
            if side.is_white() && score > alpha {
                alpha = score;
                best = Some((mv.clone(), score));
            } else if !side.is_white() && score < beta {
                beta = score;
                best = Some((mv.clone(), score));
            }
        }

        if let (Some(tt), Some((_, score))) = (self.tt.as_deref_mut(), best.as_ref()) {
            tt.store(position.fingerprint(), depth, *score, Bound::Exact);
        }
        Some(RootSearch { best, scores })
    }

    /// 子局面の値。残り深さ1で取る手なら静止探索
    fn child_score(&mut self, mv: &Move, child: &Position, depth: u32, alpha: i32, beta: i32) -> i32 {
        if depth == 1 && mv.is_capture() {
            self.quiescence(child, alpha, beta)
        } else {
            self.alpha_beta(child, depth - 1, alpha, beta)
        }
    }

    pub(crate) fn alpha_beta(&mut self, position: &Position, depth: u32, mut alpha: i32, mut beta: i32) -> i32 {
        self.stats.nodes += 1;
        if depth == 0 || position.is_game_over() {
            return self.evaluate(position, depth);
        }

        let key = position.fingerprint();
        if let Some(tt) = self.tt.as_deref_mut() {
            if let TtProbe::Cutoff(score) = tt.probe(key, depth, &mut alpha, &mut beta) {
                self.stats.tt_hits += 1;
                return score;
            }
        }
        // 置換表で狭めた後の窓で分類する
        let (alpha0, beta0) = (alpha, beta);

        let side = position.side_to_move();
        let moves = order_moves(position.legal_moves(side), self.killers.get(depth));
        let white = side.is_white();
        for mv in &moves {
            if self.stopped() {
                break;
            }
            let Ok(child) = position.apply_unchecked(mv) else {
                continue;
            };
            let score = self.child_score(mv, &child, depth, alpha, beta);
            if white {
                if score >= beta {
                    self.killers.store(depth, mv);
                    alpha = beta;
                    break;
                }
                alpha = alpha.max(score);
            } else {
                if score <= alpha {
                    self.killers.store(depth, mv);
                    beta = alpha;
                    break;
                }
                beta = beta.min(score);
            }
        }

        let result = if white { alpha } else { beta };
        if !self.stopped() {
            if let Some(tt) = self.tt.as_deref_mut() {
                tt.store(key, depth, result, Bound::classify(alpha0, beta0, result));
            }
        }
        result
    }

    /// 取る手だけを読み切る。置換表とキラー手は使わない
    fn quiescence(&mut self, position: &Position, mut alpha: i32, mut beta: i32) -> i32 {
        self.stats.nodes += 1;
        if position.is_game_over() {
            return self.evaluate(position, 0);
        }
        let side = position.side_to_move();
        let captures = ordered_captures(position.legal_moves(side));
        if captures.is_empty() {
            return self.evaluate(position, 0);
        }

        let white = side.is_white();
        for mv in &captures {
            if self.stopped() {
                break;
            }
            let Ok(child) = position.apply_unchecked(mv) else {
                continue;
            };
            let score = self.quiescence(&child, alpha, beta);
            if white {
                if score >= beta {
                    return beta;
                }
                alpha = alpha.max(score);
            } else {
                if score <= alpha {
                    return alpha;
                }
                beta = beta.min(score);
            }
        }
        if white { alpha } else { beta }
    }
}

/// 指し手の並べ替え・キラー手・静止探索つきのアルファベータ
///
/// 置換表を持たせると、探索前に局面の指紋で窓を狭め、探索後に境界値種別つきで書き戻す。
pub struct AlphaBeta {
    evaluator: Box<dyn Evaluator>,
    tt: Option<TranspositionTable>,
    tt_scope: TtScope,
    stats: SearchStats,
}

impl AlphaBeta {
    /// 置換表なし
    pub fn new(evaluator: Box<dyn Evaluator>) -> Self {
        AlphaBeta {
            evaluator,
            tt: None,
            tt_scope: TtScope::default(),
            stats: SearchStats::default(),
        }
    }

    /// 置換表つき
    pub fn with_transposition_table(evaluator: Box<dyn Evaluator>, scope: TtScope) -> Self {
        AlphaBeta {
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

impl MoveStrategy for AlphaBeta {
    fn name(&self) -> &'static str {
        if self.tt.is_some() {
            "alpha_beta_tt"
        } else {
            "alpha_beta"
        }
    }

    fn search(&mut self, position: &Position, limits: &SearchLimits) -> SearchResult {
        let start = Instant::now();
        self.stats = SearchStats::default();
        let (stop, _timer) = arm_timer(limits);

        let legal = position.legal_moves(position.side_to_move());
        if legal.is_empty() {
            self.stats.elapsed = start.elapsed();
            return SearchResult::no_legal_moves(self.stats);
        }
        let moves = root_moves(position);
        if self.tt_scope == TtScope::PerSearch {
            if let Some(tt) = self.tt.as_mut() {
                tt.clear();
            }
        }

        let depth = limits.depth.max(1);
        let root = Searcher::new(
            self.evaluator.as_ref(),
            self.tt.as_mut(),
            depth,
            stop.as_ref(),
            &mut self.stats,
        )
        .search_root(position, &moves, depth);

        self.stats.elapsed = start.elapsed();
        let result = match root {
            Some(root) => {
                self.stats.depth_reached = depth;
                let (best_move, score) = match root.best {
                    Some((mv, score)) => (mv, Some(score)),
                    None => (moves[0].clone(), None),
                };
                SearchResult {
                    best_move,
                    score,
                    state: SearchState::Done,
                    stats: self.stats,
                }
            }
            None => {
                log::warn!("alpha-beta search stopped before finishing depth {depth}, playing the first legal move");
                SearchResult {
                    best_move: legal[0].clone(),
                    score: None,
                    state: SearchState::Cancelled,
                    stats: self.stats,
                }
            }
        };
        log::debug!(
            "{}: depth {} best {} nodes {} evaluated {} tt_hits {}",
            self.name(),
            depth,
            result.best_move,
            self.stats.nodes,
            self.stats.evaluated,
            self.stats.tt_hits
        );
        result
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
