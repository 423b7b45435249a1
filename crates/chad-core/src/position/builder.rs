//! 局面ビルダー

use crate::error::{ChadError, Result};
use crate::types::{Alliance, Piece, PieceKind, Square};

use super::{Board, Position};

/// `{マス → 駒}` と手番を貯めて不変の `Position` を作る
///
/// 初期配置・問題局面の作成と、指し手適用（コピーオンライト）の両方で使う。
#[derive(Debug, Clone)]
pub struct PositionBuilder {
    board: Board,
    side_to_move: Alliance,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        PositionBuilder::new()
    }
}

impl PositionBuilder {
    /// 空の盤・白番
    pub fn new() -> Self {
        PositionBuilder {
            board: Board::empty(),
            side_to_move: Alliance::White,
        }
    }

    /// 駒を置く（同じマスの駒は上書き）
    pub fn set_piece(&mut self, piece: Piece) -> &mut Self {
        self.board.place(piece);
        self
    }

    /// 駒を置く。すでに駒があればエラー
    pub fn add_piece(&mut self, kind: PieceKind, alliance: Alliance, square: Square) -> Result<&mut Self> {
        if self.board.is_occupied(square) {
            return Err(ChadError::OccupiedSquare(square));
        }
        self.board.place(Piece::new(kind, alliance, square));
        Ok(self)
    }

    /// 代数表記で駒を置く
    pub fn add_at(&mut self, kind: PieceKind, alliance: Alliance, square: &str) -> Result<&mut Self> {
        let square: Square = square.parse()?;
        self.add_piece(kind, alliance, square)
    }

    /// 手番を設定
    pub fn set_side_to_move(&mut self, side: Alliance) -> &mut Self {
        self.side_to_move = side;
        self
    }

    /// 局面を作る。各陣営にキングがちょうど1枚あること
    pub fn build(&self) -> Result<Position> {
        for alliance in [Alliance::White, Alliance::Black] {
            let kings = self
                .board
                .pieces_of(alliance)
                .filter(|p| p.kind == PieceKind::King)
                .count();
            match kings {
                0 => return Err(ChadError::MissingKing(alliance)),
                1 => {}
                _ => return Err(ChadError::DuplicateKing(alliance)),
            }
        }
        Ok(Position::from_parts(self.board.clone(), self.side_to_move))
    }
}
