//! 指し手適用の結果

use crate::position::Position;
use crate::types::Move;

/// 指し手適用の結果種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveStatus {
    /// 適用済み
    Done,
    /// 不正な手（自玉を晒す手を含む）
    IllegalMove,
    /// 番兵の指し手
    NoLegalMove,
}

impl MoveStatus {
    #[inline]
    pub const fn is_done(self) -> bool {
        matches!(self, MoveStatus::Done)
    }
}

/// 指し手適用の結果
///
/// 失敗時は元の局面を指したまま。成功時は新しい局面を持つ。
#[derive(Debug)]
pub struct MoveTransition<'a> {
    original: &'a Position,
    next: Option<Position>,
    mv: Move,
    status: MoveStatus,
}

impl<'a> MoveTransition<'a> {
    pub(crate) fn done(original: &'a Position, mv: Move, next: Position) -> Self {
        MoveTransition {
            original,
            next: Some(next),
            mv,
            status: MoveStatus::Done,
        }
    }

    pub(crate) fn failed(original: &'a Position, mv: Move, status: MoveStatus) -> Self {
        MoveTransition {
            original,
            next: None,
            mv,
            status,
        }
    }

    #[inline]
    pub fn status(&self) -> MoveStatus {
        self.status
    }

    #[inline]
    pub fn mv(&self) -> &Move {
        &self.mv
    }

    /// 適用前の局面
    #[inline]
    pub fn original(&self) -> &'a Position {
        self.original
    }

    /// 遷移後の局面（失敗時は元の局面）
    #[inline]
    pub fn position(&self) -> &Position {
        self.next.as_ref().unwrap_or(self.original)
    }

    /// 遷移後の局面を取り出す（失敗時は元の局面のコピー）
    pub fn into_position(self) -> Position {
        self.next.unwrap_or_else(|| self.original.clone())
    }

    /// 成功時のみ新しい局面を取り出す
    pub fn into_next(self) -> Option<Position> {
        self.next
    }
}
