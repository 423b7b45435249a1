//! 陣営（Alliance）

use serde::{Deserialize, Serialize};

use crate::geometry::{BLACK_CASTLE, BLACK_WALL, WHITE_CASTLE, WHITE_WALL, ZoneTable};

use super::Square;

/// 陣営（先手=白 / 後手=黒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Alliance {
    White = 0,
    Black = 1,
}

impl Alliance {
    /// 陣営の数
    pub const NUM: usize = 2;

    /// 相手陣営を返す
    #[inline]
    pub const fn opponent(self) -> Alliance {
        match self {
            Alliance::White => Alliance::Black,
            Alliance::Black => Alliance::White,
        }
    }

    /// インデックスとして使用（配列アクセス用）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Alliance::White)
    }

    /// 自陣の城
    #[inline]
    pub fn castle(self) -> &'static ZoneTable {
        match self {
            Alliance::White => &WHITE_CASTLE,
            Alliance::Black => &BLACK_CASTLE,
        }
    }

    /// 自陣の城壁
    #[inline]
    pub fn wall(self) -> &'static ZoneTable {
        match self {
            Alliance::White => &WHITE_WALL,
            Alliance::Black => &BLACK_WALL,
        }
    }

    #[inline]
    pub fn is_castle_tile(self, sq: Square) -> bool {
        self.castle().contains(sq)
    }

    #[inline]
    pub fn is_wall_tile(self, sq: Square) -> bool {
        self.wall().contains(sq)
    }

    /// 昇格マス（相手の城）
    #[inline]
    pub fn is_promotion_tile(self, sq: Square) -> bool {
        self.opponent().is_castle_tile(sq)
    }

    /// 白用・黒用の組から自分の側を選ぶ
    #[inline]
    pub fn choose<T>(self, white: T, black: T) -> T {
        match self {
            Alliance::White => white,
            Alliance::Black => black,
        }
    }

    /// 表示名
    pub const fn label(self) -> &'static str {
        match self {
            Alliance::White => "White",
            Alliance::Black => "Black",
        }
    }
}

impl std::ops::Not for Alliance {
    type Output = Alliance;

    #[inline]
    fn not(self) -> Alliance {
        self.opponent()
    }
}

impl std::fmt::Display for Alliance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
