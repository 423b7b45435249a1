//! 駒（Piece）

use serde::{Deserialize, Serialize};

use super::{Alliance, Square};

/// 駒種
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    Rook = 0,
    Queen = 1,
    King = 2,
}

impl PieceKind {
    /// 駒種の数
    pub const NUM: usize = 3;

    /// 全駒種
    pub const ALL: [PieceKind; 3] = [PieceKind::Rook, PieceKind::Queen, PieceKind::King];

    /// インデックスとして使用
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 駒の価値
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 10_000,
        }
    }

    /// 表示用の1文字（白の大文字）
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        matches!(self, PieceKind::King)
    }
}

/// 盤上の駒
///
/// 不変値。移動すると新しい `Piece` が移動先に作られる。
/// 同一性は (駒種, 陣営, マス) で決まる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub alliance: Alliance,
    pub square: Square,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, alliance: Alliance, square: Square) -> Piece {
        Piece {
            kind,
            alliance,
            square,
        }
    }

    /// 駒の価値
    #[inline]
    pub const fn value(&self) -> i32 {
        self.kind.value()
    }

    /// 移動後の駒
    #[inline]
    pub const fn moved_to(&self, square: Square) -> Piece {
        Piece::new(self.kind, self.alliance, square)
    }

    /// 昇格後の駒（同じマスでクイーンになる）
    #[inline]
    pub const fn promoted(&self) -> Piece {
        Piece::new(PieceKind::Queen, self.alliance, self.square)
    }

    /// 盤面表示用の1文字（白は大文字、黒は小文字）
    pub fn symbol(&self) -> char {
        let c = self.kind.letter();
        if self.alliance.is_white() {
            c
        } else {
            c.to_ascii_lowercase()
        }
    }
}
