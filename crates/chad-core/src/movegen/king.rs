//! キングの指し手

use crate::geometry::KING_OFFSETS;
use crate::position::Board;
use crate::types::{Move, Piece};

/// 移動先はどちらかの城の中に限る。取れるのも城の中にいる相手の駒だけ。
pub(super) fn generate(board: &Board, king: Piece, out: &mut Vec<Move>) {
    for (dr, dc) in KING_OFFSETS {
        let Some(to) = king.square.shift(dr, dc) else {
            continue;
        };
        if !(king.alliance.is_castle_tile(to) || king.alliance.opponent().is_castle_tile(to)) {
            continue;
        }
        match board.piece_at(to) {
            None => out.push(Move::quiet(king, to)),
            Some(target) if target.alliance != king.alliance => {
                out.push(Move::capture(king, target));
            }
            Some(_) => {}
        }
    }
}
