//! 移動方向表
//!
//! (行差, 列差) で表す。線形インデックスの差分ではなく行列で持つので、
//! a筋・l筋をまたぐ折り返しは盤外判定だけで除外される。

/// 縦横4方向（飛車型）
pub const ORTHOGONAL_DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// 8方向（クイーン型）
pub const ALL_DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// キングの16方向（隣接8マス + 桂馬跳び8マス）
pub const KING_OFFSETS: [(i32, i32); 16] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (-1, 2),
    (0, -1),
    (0, 1),
    (1, -2),
    (1, -1),
    (1, 0),
    (1, 1),
    (1, 2),
    (2, -1),
    (2, 1),
];
