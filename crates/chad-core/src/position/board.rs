//! 盤（144マスの駒配置）

use std::fmt;

use crate::error::{ChadError, Result};
use crate::types::{Alliance, Move, Piece, PieceKind, Square};

/// 144マスの駒配置
///
/// `Position` の中身であり、合法性判定の仮想実行にも使う。
/// `Option<Piece>` は3バイトなので丸ごとコピーしても安い。
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    tiles: [Option<Piece>; Square::NUM],
}

impl Board {
    /// 空の盤
    pub const fn empty() -> Board {
        Board {
            tiles: [None; Square::NUM],
        }
    }

    /// マスの駒
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.tiles[sq.index()]
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.tiles[sq.index()].is_some()
    }

    /// 駒を置く（既存の駒は上書き）
    ///
    /// 駒が持つマス情報がそのまま配置先になる。
    #[inline]
    pub fn place(&mut self, piece: Piece) {
        self.tiles[piece.square.index()] = Some(piece);
    }

    /// マスを空にして、あった駒を返す
    #[inline]
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.tiles[sq.index()].take()
    }

    /// 盤上の駒をマス順に列挙
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.tiles.iter().flatten().copied()
    }

    /// 指定陣営の駒をマス順に列挙
    pub fn pieces_of(&self, alliance: Alliance) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |p| p.alliance == alliance)
    }

    /// 盤上の駒数
    pub fn count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }

    /// 指定陣営のキングの位置
    pub fn king_square(&self, alliance: Alliance) -> Option<Square> {
        self.pieces_of(alliance)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.square)
    }

    /// 指し手を盤に適用する（合法性は見ない）
    ///
    /// 取りは移動先の駒を除去し、昇格は移動後の駒をクイーンに置き換える。
    pub fn apply(&mut self, mv: &Move) -> Result<()> {
        let (Some(piece), Some(to)) = (mv.moved_piece(), mv.to()) else {
            return Err(ChadError::NullMoveExecuted);
        };
        self.remove(piece.square);
        if let Some(captured) = mv.captured_piece() {
            self.remove(captured.square);
        }
        let moved = piece.moved_to(to);
        self.place(if mv.is_promotion() {
            moved.promoted()
        } else {
            moved
        });
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl fmt::Display for Board {
    /// 12行 x 12マス、1マス3文字右寄せ。空きは '-'
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sq in Square::all() {
            let symbol = self.piece_at(sq).map_or('-', |p| p.symbol());
            write!(f, "{symbol:>3}")?;
            if sq.col() == Square::WIDTH - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
