//! 探索設定
//!
//! 設定ファイル（TOML）から読める形で戦略の種類とパラメータを持ち、
//! [`SearchConfig::build_strategy`] で戦略を組み立てる。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{
    AlphaBeta, IterativeDeepening, MctsConfig, Minimax, MonteCarloTreeSearch, MoveStrategy,
    SearchLimits,
};
use crate::eval::{EvalParams, StandardEvaluator};

/// 戦略の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Minimax,
    AlphaBeta,
    AlphaBetaTt,
    #[default]
    IterativeDeepening,
    TimedIterativeDeepening,
    Mcts,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::Minimax,
        StrategyKind::AlphaBeta,
        StrategyKind::AlphaBetaTt,
        StrategyKind::IterativeDeepening,
        StrategyKind::TimedIterativeDeepening,
        StrategyKind::Mcts,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            StrategyKind::Minimax => "minimax",
            StrategyKind::AlphaBeta => "alpha_beta",
            StrategyKind::AlphaBetaTt => "alpha_beta_tt",
            StrategyKind::IterativeDeepening => "iterative_deepening",
            StrategyKind::TimedIterativeDeepening => "timed_iterative_deepening",
            StrategyKind::Mcts => "mcts",
        }
    }

    /// 時間で打ち切る戦略か
    pub const fn is_timed(self) -> bool {
        matches!(self, StrategyKind::TimedIterativeDeepening | StrategyKind::Mcts)
    }
}

/// 置換表の寿命
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtScope {
    /// 探索ごとに空にする
    #[default]
    PerSearch,
    /// 戦略オブジェクトが生きている間（1局の間）持ち越す
    PerGame,
}

/// 探索設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub algorithm: StrategyKind,
    /// 目標深さ
    pub depth: u32,
    /// 時間制限（ミリ秒）。時間で打ち切る戦略だけが使う
    pub time_limit_ms: u64,
    /// 反復深化で置換表を使うか（`alpha_beta_tt` は常に使う）
    pub use_tt: bool,
    pub tt_scope: TtScope,
    pub mcts: MctsConfig,
    pub eval: EvalParams,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            algorithm: StrategyKind::default(),
            depth: 4,
            time_limit_ms: 5000,
            use_tt: true,
            tt_scope: TtScope::default(),
            mcts: MctsConfig::default(),
            eval: EvalParams::default(),
        }
    }
}

impl SearchConfig {
    /// 戦略を組み立てる
    pub fn build_strategy(&self) -> Box<dyn MoveStrategy> {
        let evaluator = Box::new(StandardEvaluator::new(self.eval));
        match self.algorithm {
            StrategyKind::Minimax => Box::new(Minimax::new(evaluator)),
            StrategyKind::AlphaBeta => Box::new(AlphaBeta::new(evaluator)),
            StrategyKind::AlphaBetaTt => {
                Box::new(AlphaBeta::with_transposition_table(evaluator, self.tt_scope))
            }
            StrategyKind::IterativeDeepening | StrategyKind::TimedIterativeDeepening => {
                if self.use_tt {
                    Box::new(IterativeDeepening::with_transposition_table(evaluator, self.tt_scope))
                } else {
                    Box::new(IterativeDeepening::new(evaluator))
                }
            }
            StrategyKind::Mcts => Box::new(MonteCarloTreeSearch::new(self.mcts)),
        }
    }

    /// 探索の打ち切り条件
    pub fn limits(&self) -> SearchLimits {
        let limits = SearchLimits::depth(self.depth);
        if self.algorithm.is_timed() {
            limits.with_time_limit(Duration::from_millis(self.time_limit_ms))
        } else {
            limits
        }
    }
}
