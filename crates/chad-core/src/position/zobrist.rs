//! Zobristハッシュ（局面の指紋）

use std::fmt;

use crate::types::{Alliance, Piece, PieceKind, Square};

/// Zobristハッシュ用乱数テーブル
pub struct Zobrist {
    /// 黒番用
    pub side: u64,
    /// [Alliance][PieceKind][Square]
    pub psq: [[[u64; Square::NUM]; PieceKind::NUM]; Alliance::NUM],
}

impl Zobrist {
    /// テーブル初期化
    pub const fn init() -> Self {
        let mut zobrist = Zobrist {
            side: 0,
            psq: [[[0; Square::NUM]; PieceKind::NUM]; Alliance::NUM],
        };

        // XorShift64で疑似乱数生成
        let mut seed = 0x123456789ABCDEF0u64;

        seed = xorshift64(seed);
        zobrist.side = seed;

        let mut a = 0;
        while a < Alliance::NUM {
            let mut k = 0;
            while k < PieceKind::NUM {
                let mut sq = 0;
                while sq < Square::NUM {
                    seed = xorshift64(seed);
                    zobrist.psq[a][k][sq] = seed;
                    sq += 1;
                }
                k += 1;
            }
            a += 1;
        }

        zobrist
    }
}

/// XorShift64疑似乱数生成（const fn対応）
const fn xorshift64(mut x: u64) -> u64 {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

/// グローバルZobristテーブル
pub static ZOBRIST: Zobrist = Zobrist::init();

/// 駒のハッシュを取得
#[inline]
pub fn zobrist_piece(piece: &Piece) -> u64 {
    ZOBRIST.psq[piece.alliance.index()][piece.kind.index()][piece.square.index()]
}

/// 手番のハッシュを取得
#[inline]
pub fn zobrist_side(side: Alliance) -> u64 {
    match side {
        Alliance::White => 0,
        Alliance::Black => ZOBRIST.side,
    }
}

/// 局面の指紋（64bit Zobrist）
///
/// 置換表・千日手判定のキー。表示は固定幅16桁の16進数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// 駒の集合と手番から計算する
    pub fn compute<'a>(pieces: impl IntoIterator<Item = &'a Piece>, side: Alliance) -> Self {
        let key = pieces.into_iter().fold(0u64, |acc, p| acc ^ zobrist_piece(p));
        Fingerprint(key ^ zobrist_side(side))
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// 固定幅の16進文字列
    pub fn to_hex(self) -> String {
        format!("{:016x}", self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rook(alliance: Alliance, index: usize) -> Piece {
        Piece::new(PieceKind::Rook, alliance, Square::from_index(index).unwrap())
    }

    #[test]
    fn test_zobrist_init() {
        assert_ne!(ZOBRIST.side, 0);
        assert_ne!(
            zobrist_piece(&rook(Alliance::White, 0)),
            zobrist_piece(&rook(Alliance::White, 1))
        );
        assert_ne!(
            zobrist_piece(&rook(Alliance::White, 0)),
            zobrist_piece(&rook(Alliance::Black, 0))
        );
    }

    #[test]
    fn test_fingerprint_is_order_independent() {
        let a = rook(Alliance::White, 10);
        let b = rook(Alliance::Black, 20);
        assert_eq!(
            Fingerprint::compute([&a, &b], Alliance::White),
            Fingerprint::compute([&b, &a], Alliance::White)
        );
    }

    #[test]
    fn test_fingerprint_depends_on_side() {
        let a = rook(Alliance::White, 10);
        assert_ne!(
            Fingerprint::compute([&a], Alliance::White),
            Fingerprint::compute([&a], Alliance::Black)
        );
    }

    #[test]
    fn test_fingerprint_hex_is_fixed_width() {
        let fp = Fingerprint::compute(std::iter::empty::<&Piece>(), Alliance::White);
        assert_eq!(fp.to_hex(), "0000000000000000");
        assert_eq!(fp.to_string().len(), 16);
    }
}
