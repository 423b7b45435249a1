//! 盤面の幾何情報
//!
//! 城（castle）・壁（wall）・昇格マスのメンバーシップ表と、駒ごとの移動方向表。
//! どちらもプロセス起動時に const で確定し、以後は読み取り専用。

mod offsets;
mod zones;

pub use offsets::{ALL_DIRECTIONS, KING_OFFSETS, ORTHOGONAL_DIRECTIONS};
pub use zones::{BLACK_CASTLE, BLACK_WALL, WHITE_CASTLE, WHITE_WALL, ZoneTable};
