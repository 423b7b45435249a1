//! 指し手生成
//!
//! 駒種ごとに擬似合法手（自玉の安全は未確認）を列挙する。
//! 自玉が取られる手の除外は `Position::legal_moves` が行う。

mod attack;
mod factory;
mod king;
mod sliders;

pub use attack::is_king_attacked;
pub use factory::MoveFactory;

use crate::geometry::{ALL_DIRECTIONS, ORTHOGONAL_DIRECTIONS};
use crate::position::Board;
use crate::types::{Alliance, Move, Piece, PieceKind};

/// 駒1つの擬似合法手を `out` に追加する
pub fn generate_piece_moves(board: &Board, piece: Piece, out: &mut Vec<Move>) {
    match piece.kind {
        PieceKind::King => king::generate(board, piece, out),
        PieceKind::Rook => sliders::generate(board, piece, &ORTHOGONAL_DIRECTIONS, true, out),
        PieceKind::Queen => sliders::generate(board, piece, &ALL_DIRECTIONS, false, out),
    }
}

/// 指定陣営の全擬似合法手（駒はマス順）
pub fn generate_moves(board: &Board, alliance: Alliance) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    for piece in board.pieces_of(alliance) {
        generate_piece_moves(board, piece, &mut moves);
    }
    moves
}
