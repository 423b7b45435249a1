//! 王手判定

use crate::geometry::{ALL_DIRECTIONS, KING_OFFSETS};
use crate::position::Board;
use crate::types::{Alliance, PieceKind, Square};

/// `by` 陣営の擬似合法手に `king_sq` のキングを取る手があるか
///
/// キングからの逆方向の利きで判定する。走り駒はキングならどこでも取れるので
/// 最初に当たる駒だけを見ればよい。相手キングは城の中でしか取れない。
pub fn is_king_attacked(board: &Board, king_sq: Square, by: Alliance) -> bool {
    for (dr, dc) in ALL_DIRECTIONS {
        let diagonal = dr != 0 && dc != 0;
        let mut cursor = king_sq;
        while let Some(sq) = cursor.shift(dr, dc) {
            cursor = sq;
            let Some(piece) = board.piece_at(sq) else {
                continue;
            };
            if piece.alliance == by {
                let slides_here = match piece.kind {
                    PieceKind::Queen => true,
                    PieceKind::Rook => !diagonal,
                    PieceKind::King => false,
                };
                if slides_here {
                    return true;
                }
            }
            break;
        }
    }

    let in_castle = by.is_castle_tile(king_sq) || by.opponent().is_castle_tile(king_sq);
    in_castle
        && KING_OFFSETS.iter().any(|&(dr, dc)| {
            king_sq.shift(dr, dc).and_then(|sq| board.piece_at(sq)).is_some_and(|p| {
                p.alliance == by && p.kind == PieceKind::King
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::generate_moves;
    use crate::types::Piece;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn naive(board: &Board, king_sq: Square, by: Alliance) -> bool {
        generate_moves(board, by)
            .iter()
            .any(|m| m.captured_piece().is_some_and(|p| p.square == king_sq))
    }

    #[test]
    fn test_rook_attack_blocked_by_piece() {
        let mut board = Board::empty();
        board.place(Piece::new(PieceKind::King, Alliance::Black, sq("i9")));
        board.place(Piece::new(PieceKind::Rook, Alliance::White, sq("i2")));
        assert!(is_king_attacked(&board, sq("i9"), Alliance::White));

        board.place(Piece::new(PieceKind::Rook, Alliance::Black, sq("i5")));
        assert!(!is_king_attacked(&board, sq("i9"), Alliance::White));
    }

    #[test]
    fn test_rook_does_not_attack_diagonally() {
        let mut board = Board::empty();
        board.place(Piece::new(PieceKind::King, Alliance::Black, sq("i9")));
        board.place(Piece::new(PieceKind::Rook, Alliance::White, sq("h8")));
        assert!(!is_king_attacked(&board, sq("i9"), Alliance::White));

        board.place(Piece::new(PieceKind::Queen, Alliance::White, sq("h8")));
        assert!(is_king_attacked(&board, sq("i9"), Alliance::White));
    }

    #[test]
    fn test_matches_move_generation_on_start_like_boards() {
        let layouts: [&[(&str, PieceKind, Alliance)]; 3] = [
            &[
                ("i9", PieceKind::King, Alliance::Black),
                ("d4", PieceKind::King, Alliance::White),
                ("c9", PieceKind::Queen, Alliance::White),
            ],
            &[
                ("i9", PieceKind::King, Alliance::Black),
                ("d4", PieceKind::King, Alliance::White),
                ("l12", PieceKind::Queen, Alliance::White),
                ("j10", PieceKind::Rook, Alliance::Black),
            ],
            &[
                ("h10", PieceKind::King, Alliance::Black),
                ("e3", PieceKind::King, Alliance::White),
                ("h1", PieceKind::Rook, Alliance::White),
                ("a10", PieceKind::Rook, Alliance::White),
            ],
        ];
        for layout in layouts {
            let mut board = Board::empty();
            for &(s, kind, alliance) in layout {
                board.place(Piece::new(kind, alliance, sq(s)));
            }
            for alliance in [Alliance::White, Alliance::Black] {
                let king = board.king_square(alliance).unwrap();
                assert_eq!(
                    is_king_attacked(&board, king, alliance.opponent()),
                    naive(&board, king, alliance.opponent()),
                    "{board}"
                );
            }
        }
    }
}
