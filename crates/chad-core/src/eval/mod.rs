//! 静的評価
//!
//! 白から見た点数（白の点 − 黒の点）。大きいほど白が良い。

use serde::{Deserialize, Serialize};

use crate::geometry::ORTHOGONAL_DIRECTIONS;
use crate::position::Position;
use crate::types::Alliance;

/// 評価関数
pub trait Evaluator: Send + Sync {
    /// `depth` は残り深さ。詰みを早く見つけるほど高く評価するために使う
    fn evaluate(&self, position: &Position, depth: u32) -> i32;
}

/// 評価パラメータ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalParams {
    /// 相手に王手をかけているボーナス
    pub check_bonus: i32,
    /// 相手を詰ませているボーナス（深さ係数を掛ける）
    pub checkmate_bonus: i32,
    /// 深さ係数（残り深さ × この値、深さ0なら1）
    pub depth_bonus: i32,
    /// キングに縦横で隣接する自駒1枚あたりのボーナス
    pub king_guard_bonus: i32,
}

impl Default for EvalParams {
    fn default() -> Self {
        EvalParams {
            check_bonus: 50,
            checkmate_bonus: 10_000,
            depth_bonus: 100,
            king_guard_bonus: 50,
        }
    }
}

/// 標準の評価関数
///
/// 駒の価値 + 合法手の数 + 王手ボーナス + 詰みボーナス + キングの守り。
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEvaluator {
    params: EvalParams,
}

impl StandardEvaluator {
    pub fn new(params: EvalParams) -> Self {
        StandardEvaluator { params }
    }

    #[inline]
    pub fn params(&self) -> &EvalParams {
        &self.params
    }

    fn score_player(&self, position: &Position, alliance: Alliance, depth: u32) -> i32 {
        let player = position.player(alliance);
        let opponent = player.opponent();

        let material: i32 = player.active_pieces().iter().map(|p| p.value()).sum();
        let mobility = player.legal_moves().len() as i32;
        let check = if opponent.is_in_check() {
            self.params.check_bonus
        } else {
            0
        };
        let checkmate = if opponent.is_in_checkmate() {
            self.params.checkmate_bonus.saturating_mul(self.depth_factor(depth))
        } else {
            0
        };

        (material + mobility + check)
            .saturating_add(checkmate)
            .saturating_add(self.king_guard(position, alliance))
    }

    fn depth_factor(&self, depth: u32) -> i32 {
        if depth == 0 {
            1
        } else {
            let depth = i32::try_from(depth).unwrap_or(i32::MAX);
            self.params.depth_bonus.saturating_mul(depth)
        }
    }

    fn king_guard(&self, position: &Position, alliance: Alliance) -> i32 {
        let Some(king) = position.king_square(alliance) else {
            return 0;
        };
        let guards = ORTHOGONAL_DIRECTIONS
            .iter()
            .filter_map(|&(dr, dc)| king.shift(dr, dc))
            .filter_map(|sq| position.piece_at(sq))
            .filter(|p| p.alliance == alliance)
            .count() as i32;
        guards * self.params.king_guard_bonus
    }
}

impl Evaluator for StandardEvaluator {
    fn evaluate(&self, position: &Position, depth: u32) -> i32 {
        self.score_player(position, Alliance::White, depth)
            .saturating_sub(self.score_player(position, Alliance::Black, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_initial_position_is_balanced() {
        // 初期配置は点対称なので差は0
        let pos = Position::initial();
        assert_eq!(StandardEvaluator::default().evaluate(&pos, 0), 0);
    }

    #[test]
    fn test_material_advantage() {
        let mut builder = Position::builder();
        builder.add_at(PieceKind::King, Alliance::White, "d4").unwrap();
        builder.add_at(PieceKind::King, Alliance::Black, "i9").unwrap();
        builder.add_at(PieceKind::Rook, Alliance::White, "a1").unwrap();
        let pos = builder.build().unwrap();
        let score = StandardEvaluator::default().evaluate(&pos, 0);
        assert!(score > 500, "score = {score}");
    }

    #[test]
    fn test_checkmate_bonus_scales_with_depth() {
        let mut builder = Position::builder();
        builder.add_at(PieceKind::King, Alliance::White, "d4").unwrap();
        builder.add_at(PieceKind::King, Alliance::Black, "i9").unwrap();
        builder.add_at(PieceKind::Rook, Alliance::White, "a8").unwrap();
        builder.add_at(PieceKind::Rook, Alliance::White, "a9").unwrap();
        builder.add_at(PieceKind::Rook, Alliance::White, "a10").unwrap();
        builder.set_side_to_move(Alliance::Black);
        let pos = builder.build().unwrap();

        let eval = StandardEvaluator::default();
        let at_leaf = eval.evaluate(&pos, 0);
        let early = eval.evaluate(&pos, 2);
        assert!(at_leaf > 10_000);
        assert_eq!(early - at_leaf, 10_000 * 200 - 10_000);
    }

    #[test]
    fn test_king_guard_bonus() {
        let mut builder = Position::builder();
        builder.add_at(PieceKind::King, Alliance::White, "d4").unwrap();
        builder.add_at(PieceKind::King, Alliance::Black, "i9").unwrap();
        let bare = builder.build().unwrap();
        builder.add_at(PieceKind::Rook, Alliance::White, "d5").unwrap();
        let guarded = builder.build().unwrap();

        let eval = StandardEvaluator::default();
        assert_eq!(eval.king_guard(&bare, Alliance::White), 0);
        assert_eq!(eval.king_guard(&guarded, Alliance::White), 50);
    }

    #[test]
    fn test_checkmate_bonus_saturates_at_extreme_depth() {
        let mut builder = Position::builder();
        builder.add_at(PieceKind::King, Alliance::White, "d4").unwrap();
        builder.add_at(PieceKind::King, Alliance::Black, "i9").unwrap();
        for sq in ["a8", "a9", "a10"] {
            builder.add_at(PieceKind::Rook, Alliance::White, sq).unwrap();
        }
        builder.set_side_to_move(Alliance::Black);
        let pos = builder.build().unwrap();

        let eval = StandardEvaluator::default();
        assert_eq!(eval.depth_factor(u32::MAX), i32::MAX);
        let huge = eval.evaluate(&pos, 1_000_000);
        assert!(huge > eval.evaluate(&pos, 2));
    }
}
