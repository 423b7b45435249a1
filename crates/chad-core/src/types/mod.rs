//! 基本型

mod alliance;
mod bound;
mod moves;
mod piece;
mod square;

pub use alliance::Alliance;
pub use bound::Bound;
pub use moves::Move;
pub use piece::{Piece, PieceKind};
pub use square::Square;
