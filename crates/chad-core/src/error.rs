//! エラー型

use thiserror::Error;

use crate::types::{Alliance, Square};

/// chad-core のエラー
///
/// 不正な指し手はエラーではなく `MoveStatus` で報告する。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChadError {
    #[error("square index out of range: {0}")]
    InvalidSquare(usize),

    #[error("invalid coordinate: {0:?}")]
    InvalidCoordinate(String),

    #[error("{0} has no king")]
    MissingKing(Alliance),

    #[error("{0} has more than one king")]
    DuplicateKing(Alliance),

    #[error("square {0} is already occupied")]
    OccupiedSquare(Square),

    #[error("unknown puzzle number: {0}")]
    UnknownPuzzle(u8),

    #[error("the null move cannot be executed")]
    NullMoveExecuted,
}

pub type Result<T> = std::result::Result<T, ChadError>;
