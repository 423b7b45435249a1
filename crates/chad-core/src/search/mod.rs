//! 探索
//!
//! 全ての戦略は [`MoveStrategy`] を実装し、局面を書き換えずに指し手を1つ選ぶ。
//! 白は評価値を最大化し、黒は最小化する。
//!
//! - [`Minimax`]: 枝刈りなしの固定深さ探索
//! - [`AlphaBeta`]: 指し手の並べ替え・キラー手・静止探索つきのアルファベータ（置換表は任意）
//! - [`IterativeDeepening`]: 深さ1から目標深さまで繰り返す。時間制限つきでも使う
//! - [`MonteCarloTreeSearch`]: UCT

mod alpha_beta;
mod config;
mod iterative;
mod mcts;
mod minimax;
mod ordering;
mod stats;
mod stop;

pub use alpha_beta::AlphaBeta;
pub use config::{SearchConfig, StrategyKind, TtScope};
pub use iterative::IterativeDeepening;
pub use mcts::{MctsConfig, MonteCarloTreeSearch, RewardPolicy};
pub use minimax::Minimax;
pub use ordering::{KillerTable, order_moves, ordered_captures, root_moves};
pub use stats::SearchStats;
pub use stop::{SearchTimer, StopHandle};

use std::time::Duration;

use crate::position::Position;
use crate::types::{Alliance, Move};

/// 探索の打ち切り条件
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    /// 目標深さ（MCTS では使わない）
    pub depth: u32,
    /// 時間制限。指定するとタイマーが `stop` を立てる
    pub time_limit: Option<Duration>,
    /// 外部からの停止要求
    pub stop: Option<StopHandle>,
}

impl SearchLimits {
    /// 深さだけを指定する
    pub fn depth(depth: u32) -> Self {
        SearchLimits {
            depth,
            ..Self::default()
        }
    }

    /// 時間制限を付ける
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// 停止ハンドルを付ける
    pub fn with_stop(mut self, stop: StopHandle) -> Self {
        self.stop = Some(stop);
        self
    }

    /// 停止が要求されているか
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stop.as_ref().is_some_and(StopHandle::is_stopped)
    }
}

/// 探索の終わり方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    /// 最後まで探索した
    #[default]
    Done,
    /// 時間切れ・停止要求で打ち切った（代わりの手を返している）
    Cancelled,
    /// 手番側に合法手がない
    NoLegalMoves,
}

impl SearchState {
    pub const fn label(self) -> &'static str {
        match self {
            SearchState::Done => "done",
            SearchState::Cancelled => "cancelled",
            SearchState::NoLegalMoves => "no_legal_moves",
        }
    }
}

/// 探索結果
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// 選んだ手（合法手がなければ `Move::Null`）
    pub best_move: Move,
    /// 白から見た評価値（MCTS では `None`）
    pub score: Option<i32>,
    pub state: SearchState,
    pub stats: SearchStats,
}

impl SearchResult {
    /// 合法手がない局面の結果
    pub fn no_legal_moves(stats: SearchStats) -> Self {
        SearchResult {
            best_move: Move::Null,
            score: None,
            state: SearchState::NoLegalMoves,
            stats,
        }
    }
}

/// 指し手選択戦略
pub trait MoveStrategy: Send {
    /// ログ用の名前
    fn name(&self) -> &'static str;

    /// 探索して結果を返す
    fn search(&mut self, position: &Position, limits: &SearchLimits) -> SearchResult;

    /// 探索して手だけを返す
    fn execute(&mut self, position: &Position, limits: &SearchLimits) -> Move {
        self.search(position, limits).best_move
    }

    /// 直前の探索の統計
    fn stats(&self) -> &SearchStats;
}

/// 時間制限があればタイマーを起動し、探索が見る停止ハンドルを返す
///
/// タイマーは呼び出し側のハンドルの子を立てるので、同じ `SearchLimits` で次の探索ができる。
/// タイマーは返り値を drop するまで生きている。
pub(crate) fn arm_timer(limits: &SearchLimits) -> (Option<StopHandle>, Option<SearchTimer>) {
    match limits.time_limit {
        Some(budget) => {
            let stop = limits.stop.as_ref().map_or_else(StopHandle::new, StopHandle::child);
            let timer = SearchTimer::start(budget, stop.clone());
            (Some(stop), Some(timer))
        }
        None => (limits.stop.clone(), None),
    }
}

/// `side` から見て `a` が `b` より良いか（白は大きい方、黒は小さい方）
#[inline]
pub(crate) fn improves(side: Alliance, a: i32, b: i32) -> bool {
    if side.is_white() { a > b } else { a < b }
}

/// 探索の初期値（手番側にとって最悪の値）
#[inline]
pub(crate) fn worst_score(side: Alliance) -> i32 {
    if side.is_white() { i32::MIN } else { i32::MAX }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improves_depends_on_side() {
        assert!(improves(Alliance::White, 10, 5));
        assert!(!improves(Alliance::White, 5, 5));
        assert!(improves(Alliance::Black, 5, 10));
        assert!(!improves(Alliance::Black, 10, 5));
    }

    #[test]
    fn test_limits_stop() {
        let stop = StopHandle::new();
        let limits = SearchLimits::depth(3).with_stop(stop.clone());
        assert!(!limits.is_stopped());
        stop.request_stop();
        assert!(limits.is_stopped());
        assert!(!SearchLimits::depth(3).is_stopped());
    }

    #[test]
    fn test_expired_timer_leaves_caller_handle_untouched() {
        let caller = StopHandle::new();
        let limits = SearchLimits::depth(3)
            .with_time_limit(Duration::from_millis(5))
            .with_stop(caller.clone());
        for _ in 0..2 {
            let (stop, timer) = arm_timer(&limits);
            let stop = stop.unwrap();
            assert!(!stop.is_stopped());
            let deadline = std::time::Instant::now() + Duration::from_secs(5);
            while !stop.is_stopped() && std::time::Instant::now() < deadline {
                std::thread::sleep(Duration::from_millis(1));
            }
            assert!(stop.is_stopped());
            drop(timer);
            assert!(!caller.is_stopped());
            assert!(!limits.is_stopped());
        }
    }

    #[test]
    fn test_external_stop_reaches_timed_search() {
        let caller = StopHandle::new();
        let limits = SearchLimits::depth(3)
            .with_time_limit(Duration::from_secs(60))
            .with_stop(caller.clone());
        let (stop, _timer) = arm_timer(&limits);
        caller.request_stop();
        assert!(stop.unwrap().is_stopped());
    }
}
