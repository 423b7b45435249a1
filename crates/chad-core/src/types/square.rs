//! マス（Square）

use std::fmt;
use std::str::FromStr;

use crate::error::ChadError;

/// マス（0-143）
///
/// 配置: 行優先、1行12マス
/// a12=0, b12=1, ..., l12=11, a11=12, ..., l1=143
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// マスの数
    pub const NUM: usize = 144;
    /// 1行あたりのマス数
    pub const WIDTH: usize = 12;

    /// 行と列から生成（範囲チェックあり）
    #[inline]
    pub const fn new(row: usize, col: usize) -> Option<Square> {
        if row < Self::WIDTH && col < Self::WIDTH {
            Some(Square((row * Self::WIDTH + col) as u8))
        } else {
            None
        }
    }

    /// インデックスから生成（範囲チェックあり）
    #[inline]
    pub const fn from_index(index: usize) -> Option<Square> {
        if index < Self::NUM {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    /// インデックスから生成（テーブル初期化用、範囲外はパニック）
    pub(crate) const fn at(index: usize) -> Square {
        assert!(index < Self::NUM);
        Square(index as u8)
    }

    /// インデックスとして使用
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 行（0 = 12段目）
    #[inline]
    pub const fn row(self) -> usize {
        self.0 as usize / Self::WIDTH
    }

    /// 列（0 = a筋）
    #[inline]
    pub const fn col(self) -> usize {
        self.0 as usize % Self::WIDTH
    }

    /// 行・列方向にずらしたマス。盤外なら None
    #[inline]
    pub const fn shift(self, dr: i32, dc: i32) -> Option<Square> {
        let row = self.row() as i32 + dr;
        let col = self.col() as i32 + dc;
        if row < 0 || col < 0 {
            return None;
        }
        Square::new(row as usize, col as usize)
    }

    /// 代数表記（"a12"〜"l1"）
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.col() as u8) as char;
        let rank = Self::WIDTH - self.row();
        format!("{file}{rank}")
    }

    /// 代数表記から変換。大文字も受け付ける
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file = chars.next()?.to_ascii_lowercase();
        if !file.is_ascii_lowercase() {
            return None;
        }
        let col = (file as u8 - b'a') as usize;
        // 段は1〜2桁の数字のみ（符号・先頭の0は不可）
        let digits = chars.as_str().as_bytes();
        if digits.is_empty() || digits.len() > 2 || digits[0] == b'0' {
            return None;
        }
        let mut rank = 0usize;
        for &d in digits {
            if !d.is_ascii_digit() {
                return None;
            }
            rank = rank * 10 + usize::from(d - b'0');
        }
        if !(1..=Self::WIDTH).contains(&rank) {
            return None;
        }
        Square::new(Self::WIDTH - rank, col)
    }

    /// 全てのマスを返すイテレータ
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::NUM as u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_algebraic())
    }
}

impl FromStr for Square {
    type Err = ChadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s).ok_or_else(|| ChadError::InvalidCoordinate(s.to_string()))
    }
}

impl TryFrom<usize> for Square {
    type Error = ChadError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Square::from_index(index).ok_or(ChadError::InvalidSquare(index))
    }
}
