//! 置換表エントリ

use crate::types::Bound;

/// 置換表エントリ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    /// 計算したときの残り深さ
    pub depth: u32,
    /// 評価値（白から見た点）
    pub score: i32,
    /// 境界値種別
    pub bound: Bound,
}

impl TtEntry {
    #[inline]
    pub const fn new(depth: u32, score: i32, bound: Bound) -> Self {
        TtEntry {
            depth,
            score,
            bound,
        }
    }
}
