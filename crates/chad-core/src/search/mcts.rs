//! モンテカルロ木探索（UCT）
//!
//! 木は配列上に持ち、親子は添字で辿る。既定の報酬はプレイアウトの終局でルートの手番側が
//! 勝ったかどうか（終局局面の手番がルートの手番と異なれば 1、同じなら 0）で、
//! 経路上の全ノードに同じ値を足す。[`RewardPolicy::PerMover`] を選ぶと、各ノードへ指した側から
//! 見た値（勝ち 1、引き分け 0.5、負け 0）で累積する。

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

use super::{MoveStrategy, SearchLimits, SearchResult, SearchState, SearchStats};
use crate::position::Position;
use crate::types::{Alliance, Move};

/// プレイアウト結果の報酬の付け方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardPolicy {
    /// 終局局面の手番がルートの手番と異なれば 1、同じなら 0。打ち切りは 0。全ノード共通
    #[default]
    RootSide,
    /// ノードへ指した側から見て勝ち 1、引き分け・打ち切り 0.5、負け 0
    PerMover,
}

/// プレイアウトの終わり方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Playout {
    /// 終局（詰み・ステイルメイト・駒不足）に達した
    Terminal {
        /// 終局局面の手番
        side_to_move: Alliance,
        /// 詰ませた側。引き分けなら `None`
        winner: Option<Alliance>,
    },
    /// 最大手数で打ち切った
    Truncated,
}

impl RewardPolicy {
    /// `mover` はノードへ指した側、`root` はルートの手番
    pub(crate) fn reward(self, root: Alliance, mover: Alliance, playout: Playout) -> f64 {
        match (self, playout) {
            (RewardPolicy::RootSide, Playout::Terminal { side_to_move, .. }) => {
                if side_to_move != root { 1.0 } else { 0.0 }
            }
            (RewardPolicy::RootSide, Playout::Truncated) => 0.0,
            (RewardPolicy::PerMover, Playout::Terminal { winner: Some(w), .. }) => {
                if w == mover { 1.0 } else { 0.0 }
            }
            (RewardPolicy::PerMover, _) => 0.5,
        }
    }
}

/// MCTS の設定
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// 乱数シード（探索ごとに初期化する）
    pub seed: u64,
    /// UCB1 の探索係数 C
    pub exploration: f64,
    /// プレイアウトの最大手数
    pub max_playout_plies: u32,
    /// 反復回数。`None` なら時間制限まで回す
    pub iterations: Option<u32>,
    pub reward: RewardPolicy,
}

impl MctsConfig {
    /// 反復回数も時間制限も与えられなかったときの反復回数
    pub const DEFAULT_ITERATIONS: u32 = 1000;
}

impl Default for MctsConfig {
    fn default() -> Self {
        MctsConfig {
            seed: 31,
            exploration: std::f64::consts::SQRT_2,
            max_playout_plies: 512,
            iterations: None,
            reward: RewardPolicy::default(),
        }
    }
}

/// 木のノード
struct Node {
    position: Position,
    /// このノードに来た手（ルートは `Move::Null`）
    mv: Move,
    parent: Option<usize>,
    children: Vec<usize>,
    untried: Vec<Move>,
    visits: u32,
    reward: f64,
    depth: u32,
}

impl Node {
    fn new(position: Position, mv: Move, parent: Option<usize>, depth: u32) -> Self {
        let untried = if position.is_game_over() {
            Vec::new()
        } else {
            position.legal_moves(position.side_to_move()).to_vec()
        };
        Node {
            position,
            mv,
            parent,
            children: Vec::new(),
            untried,
            visits: 0,
            reward: 0.0,
            depth,
        }
    }

    /// このノードへ指した側
    #[inline]
    fn mover(&self) -> Alliance {
        self.position.side_to_move().opponent()
    }

    #[inline]
    fn mean(&self) -> f64 {
        self.reward / f64::from(self.visits)
    }
}

/// モンテカルロ木探索
pub struct MonteCarloTreeSearch {
    config: MctsConfig,
    stats: SearchStats,
}

impl MonteCarloTreeSearch {
    pub fn new(config: MctsConfig) -> Self {
        MonteCarloTreeSearch {
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// UCB1 で子を選ぶ。未訪問の子があれば最初のものを選ぶ
    fn select_child(&self, tree: &[Node], index: usize) -> usize {
        let node = &tree[index];
        let log_visits = f64::from(node.visits.max(1)).ln();
        let mut best = node.children[0];
        let mut best_value = f64::NEG_INFINITY;
        for &child in &node.children {
            let c = &tree[child];
            if c.visits == 0 {
                return child;
            }
            let value = c.mean() + self.config.exploration * (log_visits / f64::from(c.visits)).sqrt();
            if value > best_value {
                best_value = value;
                best = child;
            }
        }
        best
    }

    /// 選択と展開。新しく作ったノード（作れなければ到達した葉）を返す
    fn tree_policy(&mut self, tree: &mut Vec<Node>, rng: &mut Xoshiro256PlusPlus) -> usize {
        let mut index = 0;
        while tree[index].untried.is_empty() && !tree[index].children.is_empty() {
            index = self.select_child(tree, index);
        }
        while !tree[index].untried.is_empty() {
            let pick = rng.random_range(0..tree[index].untried.len());
            let mv = tree[index].untried.swap_remove(pick);
            let Ok(child) = tree[index].position.apply_unchecked(&mv) else {
                continue;
            };
            let depth = tree[index].depth + 1;
            tree.push(Node::new(child, mv, Some(index), depth));
            let child_index = tree.len() - 1;
            tree[index].children.push(child_index);
            self.stats.nodes += 1;
            self.stats.depth_reached = self.stats.depth_reached.max(depth);
            return child_index;
        }
        index
    }

    /// 終局までランダムに指す
    ///
    /// 擬似合法手から無作為に選び、自玉が取られる手なら候補から外して引き直す。
    fn rollout(&self, start: &Position, rng: &mut Xoshiro256PlusPlus) -> Playout {
        let mut position = start.clone();
        for _ in 0..self.config.max_playout_plies {
            let side = position.side_to_move();
            if position.is_draw() {
                return Playout::Terminal {
                    side_to_move: side,
                    winner: None,
                };
            }
            let mut candidates: Vec<&Move> = position.pseudo_legal_moves(side).iter().collect();
            let mut next = None;
            while !candidates.is_empty() {
                let pick = rng.random_range(0..candidates.len());
                let mv = candidates.swap_remove(pick);
                match position.apply_unchecked(mv) {
                    Ok(child) if !child.is_in_check(side) => {
                        next = Some(child);
                        break;
                    }
                    _ => {}
                }
            }
            match next {
                Some(child) => position = child,
                // 合法手なし: 王手されていれば詰み、そうでなければステイルメイト
                None => {
                    return Playout::Terminal {
                        side_to_move: side,
                        winner: position.is_in_check(side).then(|| side.opponent()),
                    };
                }
            }
        }
        Playout::Truncated
    }

    fn backpropagate(&self, tree: &mut [Node], leaf: usize, root: Alliance, playout: Playout) {
        let mut cursor = Some(leaf);
        while let Some(index) = cursor {
            let node = &mut tree[index];
            node.visits += 1;
            node.reward += self.config.reward.reward(root, node.mover(), playout);
            cursor = node.parent;
        }
    }
}

impl MoveStrategy for MonteCarloTreeSearch {
    fn name(&self) -> &'static str {
        "mcts"
    }

    fn search(&mut self, position: &Position, limits: &SearchLimits) -> SearchResult {
        let start = Instant::now();
        self.stats = SearchStats::default();

        let root_side = position.side_to_move();
        let legal = position.legal_moves(root_side);
        if legal.is_empty() {
            self.stats.elapsed = start.elapsed();
            return SearchResult::no_legal_moves(self.stats);
        }

        let iterations = match (self.config.iterations, limits.time_limit) {
            (Some(n), _) => Some(n),
            (None, Some(_)) => None,
            (None, None) => Some(MctsConfig::DEFAULT_ITERATIONS),
        };
        let deadline = limits.time_limit.map(|budget: Duration| start + budget);

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.config.seed);
        let mut tree = vec![Node::new(position.clone(), Move::Null, None, 0)];
        self.stats.nodes = 1;
        let mut cancelled = false;
        let mut playouts: u32 = 0;

        loop {
            if iterations.is_some_and(|n| playouts >= n) {
                break;
            }
            if iterations.is_none() && deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }
            if limits.is_stopped() {
                cancelled = true;
                break;
            }
            let leaf = self.tree_policy(&mut tree, &mut rng);
            let playout = self.rollout(&tree[leaf].position, &mut rng);
            self.backpropagate(&mut tree, leaf, root_side, playout);
            playouts += 1;
        }
        self.stats.evaluated = u64::from(playouts);

        let mut best: Option<(usize, f64)> = None;
        for &child in &tree[0].children {
            let node = &tree[child];
            if node.visits == 0 {
                continue;
            }
            let mean = node.mean();
            if best.is_none_or(|(_, b)| mean > b) {
                best = Some((child, mean));
            }
        }
        let best_move = match best {
            Some((child, _)) => tree[child].mv.clone(),
            None => legal[0].clone(),
        };

        self.stats.elapsed = start.elapsed();
        log::debug!(
            "mcts: {playouts} playouts, {} nodes, tree depth {}, best {best_move} ({} ms)",
            tree.len(),
            self.stats.depth_reached,
            self.stats.elapsed.as_millis()
        );
        SearchResult {
            best_move,
            score: None,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::StopHandle;
    use crate::types::PieceKind;

    fn small_config() -> MctsConfig {
        MctsConfig {
            iterations: Some(30),
            max_playout_plies: 24,
            ..MctsConfig::default()
        }
    }

    fn build(pieces: &[(PieceKind, Alliance, &str)], side: Alliance) -> Position {
        let mut builder = Position::builder();
        for &(kind, alliance, sq) in pieces {
            builder.add_at(kind, alliance, sq).unwrap();
        }
        builder.set_side_to_move(side);
        builder.build().unwrap()
    }

    /// 黒番で黒が詰んでいる
    fn black_mated() -> Position {
        build(
            &[
                (PieceKind::King, Alliance::White, "d4"),
                (PieceKind::King, Alliance::Black, "i9"),
                (PieceKind::Rook, Alliance::White, "a8"),
                (PieceKind::Rook, Alliance::White, "a9"),
                (PieceKind::Rook, Alliance::White, "a10"),
            ],
            Alliance::Black,
        )
    }

    /// 黒番で黒がステイルメイト（i9 は利いていないが逃げ場がない）
    fn black_stalemated() -> Position {
        build(
            &[
                (PieceKind::King, Alliance::White, "d4"),
                (PieceKind::King, Alliance::Black, "i9"),
                (PieceKind::Rook, Alliance::White, "a8"),
                (PieceKind::Rook, Alliance::White, "a10"),
                (PieceKind::Rook, Alliance::White, "h1"),
                (PieceKind::Rook, Alliance::White, "j1"),
            ],
            Alliance::Black,
        )
    }

    #[test]
    fn test_root_side_reward() {
        let policy = RewardPolicy::RootSide;
        let mate = Playout::Terminal {
            side_to_move: Alliance::Black,
            winner: Some(Alliance::White),
        };
        let stalemate = Playout::Terminal {
            side_to_move: Alliance::Black,
            winner: None,
        };
        // 経路上のどのノードでも同じ値
        for mover in [Alliance::White, Alliance::Black] {
            assert_eq!(policy.reward(Alliance::White, mover, mate), 1.0);
            assert_eq!(policy.reward(Alliance::Black, mover, mate), 0.0);
            assert_eq!(policy.reward(Alliance::White, mover, stalemate), 1.0);
            assert_eq!(policy.reward(Alliance::Black, mover, stalemate), 0.0);
            assert_eq!(policy.reward(Alliance::White, mover, Playout::Truncated), 0.0);
        }
    }

    #[test]
    fn test_per_mover_reward() {
        let policy = RewardPolicy::PerMover;
        let mate = Playout::Terminal {
            side_to_move: Alliance::Black,
            winner: Some(Alliance::White),
        };
        let stalemate = Playout::Terminal {
            side_to_move: Alliance::Black,
            winner: None,
        };
        assert_eq!(policy.reward(Alliance::White, Alliance::White, mate), 1.0);
        assert_eq!(policy.reward(Alliance::White, Alliance::Black, mate), 0.0);
        assert_eq!(policy.reward(Alliance::White, Alliance::White, stalemate), 0.5);
        assert_eq!(policy.reward(Alliance::Black, Alliance::Black, Playout::Truncated), 0.5);
    }

    #[test]
    fn test_reward_policy_serde_names() {
        let config: MctsConfig = serde_json::from_str(r#"{"reward":"per_mover"}"#).unwrap();
        assert_eq!(config.reward, RewardPolicy::PerMover);
        assert_eq!(MctsConfig::default().reward, RewardPolicy::RootSide);
    }

    #[test]
    fn test_iteration_budget_is_exact() {
        let pos = Position::initial();
        let mut mcts = MonteCarloTreeSearch::new(small_config());
        let result = mcts.search(&pos, &SearchLimits::default());
        assert_eq!(result.state, SearchState::Done);
        assert_eq!(result.stats.evaluated, 30);
        // ルートは30回で子を30個作る（初期局面の合法手は54）
        assert_eq!(result.stats.nodes, 31);
        assert!(pos.legal_moves(Alliance::White).contains(&result.best_move));
    }

    #[test]
    fn test_two_kings_rollout_is_terminal_draw() {
        let pos = build(
            &[
                (PieceKind::King, Alliance::White, "d4"),
                (PieceKind::King, Alliance::Black, "i9"),
            ],
            Alliance::White,
        );
        let mcts = MonteCarloTreeSearch::new(small_config());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let playout = mcts.rollout(&pos, &mut rng);
        assert_eq!(
            playout,
            Playout::Terminal {
                side_to_move: Alliance::White,
                winner: None
            }
        );
        assert_eq!(RewardPolicy::RootSide.reward(Alliance::White, Alliance::Black, playout), 0.0);
    }

    #[test]
    fn test_rollout_from_checkmate() {
        let pos = black_mated();
        assert!(pos.player(Alliance::Black).is_in_checkmate());
        let mcts = MonteCarloTreeSearch::new(small_config());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let playout = mcts.rollout(&pos, &mut rng);
        assert_eq!(
            playout,
            Playout::Terminal {
                side_to_move: Alliance::Black,
                winner: Some(Alliance::White)
            }
        );
        assert_eq!(RewardPolicy::RootSide.reward(Alliance::White, Alliance::White, playout), 1.0);
    }

    #[test]
    fn test_rollout_from_stalemate() {
        let pos = black_stalemated();
        assert!(pos.player(Alliance::Black).is_in_stalemate());
        let mcts = MonteCarloTreeSearch::new(small_config());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let playout = mcts.rollout(&pos, &mut rng);
        assert_eq!(
            playout,
            Playout::Terminal {
                side_to_move: Alliance::Black,
                winner: None
            }
        );
        // 相手番で終わったのでルート（白）の勝ち扱い
        assert_eq!(RewardPolicy::RootSide.reward(Alliance::White, Alliance::White, playout), 1.0);
        assert_eq!(RewardPolicy::RootSide.reward(Alliance::Black, Alliance::White, playout), 0.0);
    }

    #[test]
    fn test_mate_in_one_child_has_full_reward() {
        // 詰みの子は毎回報酬1。他の子は最初のプレイアウトが2手で打ち切られて報酬0（0.5）を含む
        let pos = build(
            &[
                (PieceKind::King, Alliance::White, "d4"),
                (PieceKind::King, Alliance::Black, "i9"),
                (PieceKind::Rook, Alliance::White, "a8"),
                (PieceKind::Rook, Alliance::White, "a10"),
                (PieceKind::Rook, Alliance::White, "b12"),
            ],
            Alliance::White,
        );
        let legal = pos.legal_moves(Alliance::White).len() as u32;
        for reward in [RewardPolicy::RootSide, RewardPolicy::PerMover] {
            let config = MctsConfig {
                iterations: Some(legal + 100),
                max_playout_plies: 2,
                reward,
                ..MctsConfig::default()
            };
            let result = MonteCarloTreeSearch::new(config).search(&pos, &SearchLimits::default());
            assert_eq!(result.best_move.to_string(), "B12-B9", "{reward:?}");
        }
    }

    #[test]
    fn test_external_stop_cancels() {
        let pos = Position::initial();
        let stop = StopHandle::new();
        stop.request_stop();
        let mut mcts = MonteCarloTreeSearch::new(small_config());
        let result = mcts.search(&pos, &SearchLimits::default().with_stop(stop));
        assert_eq!(result.state, SearchState::Cancelled);
        assert_eq!(result.best_move, pos.legal_moves(Alliance::White)[0]);
    }
}
