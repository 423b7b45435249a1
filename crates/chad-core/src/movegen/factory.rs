//! 座標の組から指し手を引く

use crate::position::Position;
use crate::types::{Move, Square};

/// 外部入力（UIのクリックや代数表記）を型付きの指し手に変換する
pub struct MoveFactory;

impl MoveFactory {
    /// 手番側の擬似合法手から (from, to) が一致するものを返す。無ければ `Move::Null`
    ///
    /// 自玉を晒す手もそのまま返るので、`Player::make_move` が `IllegalMove` を報告する。
    pub fn create_move(position: &Position, from: Square, to: Square) -> Move {
        position
            .current_player()
            .pseudo_legal_moves()
            .iter()
            .find(|m| m.from() == Some(from) && m.to() == Some(to))
            .cloned()
            .unwrap_or(Move::Null)
    }

    /// 代数表記の組（"d7", "h7"）から指し手を引く
    pub fn from_algebraic(position: &Position, from: &str, to: &str) -> Move {
        match (Square::from_algebraic(from), Square::from_algebraic(to)) {
            (Some(from), Some(to)) => Self::create_move(position, from, to),
            _ => Move::Null,
        }
    }

    /// "D7-H7" / "d7h7" / "c8xh8=Q" 形式の文字列から指し手を引く
    pub fn parse(position: &Position, text: &str) -> Move {
        let cleaned: String = text
            .trim()
            .trim_end_matches("=Q")
            .trim_end_matches("=q")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        let lower = cleaned.to_ascii_lowercase();
        // 2文字目以降で次の英字が出たところが移動先
        let Some(split) = lower
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_lowercase() && *c != 'x')
            .map(|(i, _)| i)
        else {
            return Move::Null;
        };
        let (from, to) = lower.split_at(split);
        let from = from.trim_end_matches('x');
        Self::from_algebraic(position, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_move_on_initial_position() {
        let pos = Position::initial();
        let mv = MoveFactory::from_algebraic(&pos, "d6", "d7");
        assert_eq!(mv, Move::Null, "d6 is empty in the initial position");

        let mv = MoveFactory::from_algebraic(&pos, "c5", "c6");
        assert!(!mv.is_null());
        assert_eq!(mv.to_string(), "C5-C6");
    }

    #[test]
    fn test_create_move_rejects_opponent_piece() {
        let pos = Position::initial();
        // 白番なので黒のルークは動かせない
        assert_eq!(MoveFactory::from_algebraic(&pos, "h8", "h7"), Move::Null);
    }

    #[test]
    fn test_parse_formats() {
        let pos = Position::initial();
        let expected = MoveFactory::from_algebraic(&pos, "c5", "c6");
        assert_eq!(MoveFactory::parse(&pos, "C5-C6"), expected);
        assert_eq!(MoveFactory::parse(&pos, "c5c6"), expected);
        assert_eq!(MoveFactory::parse(&pos, "c5 c6"), expected);
        assert_eq!(MoveFactory::parse(&pos, "garbage"), Move::Null);
        assert_eq!(MoveFactory::parse(&pos, ""), Move::Null);
    }
}
