//! 初期配置と問題局面

use crate::error::{ChadError, Result};
use crate::types::{Alliance, Piece, PieceKind, Square};

use super::{Board, Position, PositionBuilder};

/// 詰み問題
#[derive(Debug, Clone, Copy)]
pub struct Puzzle {
    /// 問題番号（1始まり）
    pub number: u8,
    /// 白のルーク（マス番号）
    pub white_rooks: &'static [usize],
    pub white_king: usize,
    /// 黒のルーク（マス番号）
    pub black_rooks: &'static [usize],
    pub black_king: usize,
    /// 正解手順の初手（代数表記）
    pub first_move: (&'static str, &'static str),
}

/// 収録済みの詰み問題（いずれも白番）
pub static PUZZLES: [Puzzle; 3] = [
    Puzzle {
        number: 1,
        white_rooks: &[63, 86, 88, 100, 110, 114, 115],
        white_king: 98,
        black_rooks: &[26, 28, 33, 43, 56, 57, 105],
        black_king: 44,
        first_move: ("d7", "h7"),
    },
    Puzzle {
        number: 2,
        white_rooks: &[7, 50, 62, 87, 88, 102, 112, 123],
        white_king: 111,
        black_rooks: &[8, 31, 43, 56, 77, 93, 114, 129],
        black_king: 44,
        first_move: ("c8", "h8"),
    },
    Puzzle {
        number: 3,
        white_rooks: &[50, 75, 88, 100, 115, 117],
        white_king: 99,
        black_rooks: &[26, 32, 43, 55, 56, 92],
        black_king: 44,
        first_move: ("h3", "h7"),
    },
];

impl Puzzle {
    /// 局面を作る
    pub fn position(&self) -> Result<Position> {
        let mut builder = PositionBuilder::new();
        place(&mut builder, PieceKind::Rook, Alliance::White, self.white_rooks)?;
        place(&mut builder, PieceKind::King, Alliance::White, &[self.white_king])?;
        place(&mut builder, PieceKind::Rook, Alliance::Black, self.black_rooks)?;
        place(&mut builder, PieceKind::King, Alliance::Black, &[self.black_king])?;
        builder.set_side_to_move(Alliance::White);
        builder.build()
    }
}

fn place(
    builder: &mut PositionBuilder,
    kind: PieceKind,
    alliance: Alliance,
    squares: &[usize],
) -> Result<()> {
    for &index in squares {
        builder.add_piece(kind, alliance, Square::try_from(index)?)?;
    }
    Ok(())
}

/// 初期配置の駒（城の中央にキング、残り8マスにルーク）
fn castle_army(alliance: Alliance) -> impl Iterator<Item = Piece> {
    alliance.castle().squares().map(move |sq| {
        let center = alliance.castle().squares().nth(4) == Some(sq);
        let kind = if center {
            PieceKind::King
        } else {
            PieceKind::Rook
        };
        Piece::new(kind, alliance, sq)
    })
}

impl Position {
    /// 標準の初期局面（白番）
    pub fn initial() -> Position {
        let mut board = Board::empty();
        for alliance in [Alliance::Black, Alliance::White] {
            for piece in castle_army(alliance) {
                board.place(piece);
            }
        }
        Position::from_parts(board, Alliance::White)
    }

    /// 詰み問題の局面（1〜3）
    pub fn puzzle(number: u8) -> Result<Position> {
        PUZZLES
            .iter()
            .find(|p| p.number == number)
            .ok_or(ChadError::UnknownPuzzle(number))?
            .position()
    }
}
