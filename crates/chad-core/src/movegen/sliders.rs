//! ルーク・クイーンの指し手（走り駒）

use crate::position::Board;
use crate::types::{Move, Piece};

/// 走り駒の指し手生成
///
/// 駒に当たった時点でその方向は終わる。相手の駒を取れるのは次のいずれかの場合のみ:
/// - 相手がキング
/// - 自分が相手の城壁の上にいて、相手が相手の城の中にいる（壁からの攻撃、ルークは昇格）
/// - 自分が自分の城の中にいて、相手が自分の城壁の上にいる（城から壁への攻撃）
pub(super) fn generate(
    board: &Board,
    piece: Piece,
    directions: &[(i32, i32)],
    promotes: bool,
    out: &mut Vec<Move>,
) {
    for &(dr, dc) in directions {
        let mut cursor = piece.square;
        while let Some(to) = cursor.shift(dr, dc) {
            cursor = to;
            match board.piece_at(to) {
                None => {
                    let mv = Move::quiet(piece, to);
                    if promotes && piece.alliance.is_promotion_tile(to) {
                        out.push(Move::promote(mv));
                    } else {
                        out.push(mv);
                    }
                }
                Some(target) => {
                    if target.alliance != piece.alliance {
                        push_capture(piece, target, promotes, out);
                    }
                    break;
                }
            }
        }
    }
}

fn push_capture(piece: Piece, target: Piece, promotes: bool, out: &mut Vec<Move>) {
    let defender = target.alliance;
    if target.kind.is_king() {
        out.push(Move::capture(piece, target));
    } else if defender.is_wall_tile(piece.square) && defender.is_castle_tile(target.square) {
        let mv = Move::capture(piece, target);
        out.push(if promotes { Move::promote(mv) } else { mv });
    } else if piece.alliance.is_castle_tile(piece.square) && piece.alliance.is_wall_tile(target.square)
    {
        out.push(Move::capture(piece, target));
    }
}
