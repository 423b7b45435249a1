//! 指し手（Move）

use std::fmt;

use super::{Piece, Square};

/// 指し手
///
/// 昇格は内側の指し手（移動または取り）を包み、盤面生成後に駒種をクイーンへ置き換える。
/// `Null` は番兵で、実行すると失敗する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Move {
    /// 何もしない指し手（番兵）
    #[default]
    Null,
    /// 空きマスへの移動
    Quiet { piece: Piece, to: Square },
    /// 相手の駒を取る
    Capture {
        piece: Piece,
        to: Square,
        captured: Piece,
    },
    /// ルークの昇格（内側の指し手を包む）
    Promotion(Box<Move>),
}

impl Move {
    #[inline]
    pub fn quiet(piece: Piece, to: Square) -> Move {
        Move::Quiet { piece, to }
    }

    #[inline]
    pub fn capture(piece: Piece, captured: Piece) -> Move {
        Move::Capture {
            piece,
            to: captured.square,
            captured,
        }
    }

    /// 指し手を昇格で包む
    #[inline]
    pub fn promote(inner: Move) -> Move {
        debug_assert!(matches!(inner, Move::Quiet { .. } | Move::Capture { .. }));
        Move::Promotion(Box::new(inner))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Move::Null)
    }

    /// 取る手かどうか（昇格は内側に委譲）
    pub fn is_capture(&self) -> bool {
        match self {
            Move::Capture { .. } => true,
            Move::Promotion(inner) => inner.is_capture(),
            _ => false,
        }
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        matches!(self, Move::Promotion(_))
    }

    /// 動かす駒（移動前）
    pub fn moved_piece(&self) -> Option<Piece> {
        match self {
            Move::Null => None,
            Move::Quiet { piece, .. } | Move::Capture { piece, .. } => Some(*piece),
            Move::Promotion(inner) => inner.moved_piece(),
        }
    }

    /// 取られる駒
    pub fn captured_piece(&self) -> Option<Piece> {
        match self {
            Move::Capture { captured, .. } => Some(*captured),
            Move::Promotion(inner) => inner.captured_piece(),
            _ => None,
        }
    }

    /// 移動元
    #[inline]
    pub fn from(&self) -> Option<Square> {
        self.moved_piece().map(|p| p.square)
    }

    /// 移動先
    pub fn to(&self) -> Option<Square> {
        match self {
            Move::Null => None,
            Move::Quiet { to, .. } | Move::Capture { to, .. } => Some(*to),
            Move::Promotion(inner) => inner.to(),
        }
    }

    /// 移動後の駒（昇格ならクイーン）
    pub fn piece_after(&self) -> Option<Piece> {
        let piece = self.moved_piece()?.moved_to(self.to()?);
        if self.is_promotion() {
            Some(piece.promoted())
        } else {
            Some(piece)
        }
    }

    /// MVV-LVA の値（取られる駒の価値 − 取る駒の価値）。取りでなければ None
    pub fn mvv_lva(&self) -> Option<i32> {
        let captured = self.captured_piece()?;
        let piece = self.moved_piece()?;
        Some(captured.value() - piece.value())
    }
}

impl fmt::Display for Move {
    /// "D7-H7"、取りは "D7xH7"、昇格は末尾に "=Q"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(from), Some(to)) = (self.from(), self.to()) else {
            return f.write_str("--");
        };
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(
            f,
            "{}{}{}",
            from.to_algebraic().to_uppercase(),
            sep,
            to.to_algebraic().to_uppercase()
        )?;
        if self.is_promotion() {
            f.write_str("=Q")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Alliance, PieceKind};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_null_move() {
        let mv = Move::Null;
        assert!(mv.is_null());
        assert_eq!(mv.moved_piece(), None);
        assert_eq!(mv.to(), None);
        assert_eq!(mv.to_string(), "--");
        assert_eq!(Move::default(), Move::Null);
    }

    #[test]
    fn test_promotion_delegates_to_inner() {
        let rook = Piece::new(PieceKind::Rook, Alliance::White, sq("c8"));
        let victim = Piece::new(PieceKind::Rook, Alliance::Black, sq("h8"));
        let mv = Move::promote(Move::capture(rook, victim));
        assert!(mv.is_capture());
        assert!(mv.is_promotion());
        assert_eq!(mv.from(), Some(sq("c8")));
        assert_eq!(mv.to(), Some(sq("h8")));
        assert_eq!(mv.captured_piece(), Some(victim));
        assert_eq!(mv.piece_after().map(|p| p.kind), Some(PieceKind::Queen));
        assert_eq!(mv.to_string(), "C8xH8=Q");
    }

    #[test]
    fn test_mvv_lva() {
        let rook = Piece::new(PieceKind::Rook, Alliance::White, sq("a1"));
        let queen = Piece::new(PieceKind::Queen, Alliance::Black, sq("a5"));
        assert_eq!(Move::capture(rook, queen).mvv_lva(), Some(400));
        assert_eq!(Move::quiet(rook, sq("a2")).mvv_lva(), None);
    }

    #[test]
    fn test_move_display() {
        let rook = Piece::new(PieceKind::Rook, Alliance::White, sq("d7"));
        assert_eq!(Move::quiet(rook, sq("h7")).to_string(), "D7-H7");
    }

    #[test]
    fn test_move_equality_is_structural() {
        let rook = Piece::new(PieceKind::Rook, Alliance::White, sq("d7"));
        assert_eq!(Move::quiet(rook, sq("h7")), Move::quiet(rook, sq("h7")));
        assert_ne!(Move::quiet(rook, sq("h7")), Move::quiet(rook, sq("g7")));
    }
}
