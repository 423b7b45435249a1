//! 局面（Position）
//!
//! 不変の盤面スナップショット。生成時に両陣営の擬似合法手・王手状態・指紋を計算し、
//! 合法手は初回参照時に一度だけ絞り込む。指し手の適用は常に新しい `Position` を作る。

mod board;
mod builder;
mod setup;
mod zobrist;

pub use board::Board;
pub use builder::PositionBuilder;
pub use setup::{PUZZLES, Puzzle};
pub use zobrist::{Fingerprint, ZOBRIST, Zobrist, zobrist_piece, zobrist_side};

use std::fmt;
use std::sync::OnceLock;

use smallvec::SmallVec;

use crate::error::Result;
use crate::movegen::{generate_moves, is_king_attacked};
use crate::player::Player;
use crate::types::{Alliance, Move, Piece, Square};

/// 陣営ごとの駒リスト（初期配置で9枚）
pub type PieceList = SmallVec<[Piece; 16]>;

/// 局面
#[derive(Clone)]
pub struct Position {
    board: Board,
    pieces: [PieceList; Alliance::NUM],
    kings: [Option<Square>; Alliance::NUM],
    side_to_move: Alliance,
    pseudo_moves: [Vec<Move>; Alliance::NUM],
    legal_moves: [OnceLock<Vec<Move>>; Alliance::NUM],
    in_check: [bool; Alliance::NUM],
    fingerprint: Fingerprint,
}

impl Position {
    /// ビルダーを返す
    pub fn builder() -> PositionBuilder {
        PositionBuilder::new()
    }

    pub(crate) fn from_parts(board: Board, side_to_move: Alliance) -> Position {
        let pieces = [
            board.pieces_of(Alliance::White).collect::<PieceList>(),
            board.pieces_of(Alliance::Black).collect::<PieceList>(),
        ];
        let kings = [
            board.king_square(Alliance::White),
            board.king_square(Alliance::Black),
        ];
        let pseudo_moves = [
            generate_moves(&board, Alliance::White),
            generate_moves(&board, Alliance::Black),
        ];
        let in_check = [Alliance::White, Alliance::Black].map(|a| {
            kings[a.index()].is_some_and(|k| is_king_attacked(&board, k, a.opponent()))
        });
        let fingerprint = Fingerprint::compute(pieces[0].iter().chain(pieces[1].iter()), side_to_move);
        Position {
            board,
            pieces,
            kings,
            side_to_move,
            pseudo_moves,
            legal_moves: [OnceLock::new(), OnceLock::new()],
            in_check,
            fingerprint,
        }
    }

    /// 盤
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// マスの駒
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    /// 指定陣営の盤上の駒（マス順）
    #[inline]
    pub fn active_pieces(&self, alliance: Alliance) -> &[Piece] {
        &self.pieces[alliance.index()]
    }

    /// 盤上の全ての駒
    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces[0].iter().chain(self.pieces[1].iter())
    }

    /// キングの位置
    #[inline]
    pub fn king_square(&self, alliance: Alliance) -> Option<Square> {
        self.kings[alliance.index()]
    }

    /// 手番
    #[inline]
    pub fn side_to_move(&self) -> Alliance {
        self.side_to_move
    }

    /// 指紋（Zobristハッシュ）
    #[inline]
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// 陣営ごとのプレイヤー視点
    #[inline]
    pub fn player(&self, alliance: Alliance) -> Player<'_> {
        Player::new(self, alliance)
    }

    /// 手番側のプレイヤー
    #[inline]
    pub fn current_player(&self) -> Player<'_> {
        self.player(self.side_to_move)
    }

    /// 擬似合法手（自玉の安全は未確認）
    #[inline]
    pub fn pseudo_legal_moves(&self, alliance: Alliance) -> &[Move] {
        &self.pseudo_moves[alliance.index()]
    }

    /// 合法手（指した後に自玉が取られない手）
    pub fn legal_moves(&self, alliance: Alliance) -> &[Move] {
        self.legal_moves[alliance.index()].get_or_init(|| {
            self.pseudo_moves[alliance.index()]
                .iter()
                .filter(|mv| self.keeps_king_safe(mv, alliance))
                .cloned()
                .collect()
        })
    }

    /// 王手されているか
    #[inline]
    pub fn is_in_check(&self, alliance: Alliance) -> bool {
        self.in_check[alliance.index()]
    }

    /// 盤上の駒がちょうど2枚（両キングのみ）なら引き分け
    #[inline]
    pub fn is_draw(&self) -> bool {
        self.pieces[0].len() + self.pieces[1].len() == 2
    }

    /// 終局（詰み・ステイルメイト・駒不足の引き分け）
    ///
    /// 全ての探索はこれを残り深さと無関係な打ち切り条件として使う。
    pub fn is_game_over(&self) -> bool {
        self.is_draw() || self.legal_moves(self.side_to_move).is_empty()
    }

    /// 指し手を適用した新しい局面（合法性は見ない）
    ///
    /// 手番は動かした駒の相手に移る。`Move::Null` はエラー。
    pub fn apply_unchecked(&self, mv: &Move) -> Result<Position> {
        let mut board = self.board.clone();
        board.apply(mv)?;
        let mover = mv.moved_piece().map_or(self.side_to_move, |p| p.alliance);
        Ok(Position::from_parts(board, mover.opponent()))
    }

    /// 指した後に `alliance` のキングが取られないか
    fn keeps_king_safe(&self, mv: &Move, alliance: Alliance) -> bool {
        let mut board = self.board.clone();
        if board.apply(mv).is_err() {
            return false;
        }
        let king = match mv.moved_piece() {
            Some(p) if p.kind.is_king() => mv.to(),
            _ => self.king_square(alliance),
        };
        king.is_none_or(|k| !is_king_attacked(&board, k, alliance.opponent()))
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.side_to_move == other.side_to_move && self.board == other.board
    }
}

impl Eq for Position {}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.board, f)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "side_to_move: {}, fingerprint: {}", self.side_to_move, self.fingerprint)?;
        fmt::Display::fmt(&self.board, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_fingerprint_matches_fresh_computation() {
        let pos = Position::initial();
        let mv = pos.legal_moves(Alliance::White)[0].clone();
        let next = pos.apply_unchecked(&mv).unwrap();
        let fresh = Fingerprint::compute(next.all_pieces(), next.side_to_move());
        assert_eq!(next.fingerprint(), fresh);
        assert_ne!(next.fingerprint(), pos.fingerprint());
    }

    #[test]
    fn test_apply_flips_side_to_move() {
        let pos = Position::initial();
        let mv = pos.legal_moves(Alliance::White)[0].clone();
        let next = pos.apply_unchecked(&mv).unwrap();
        assert_eq!(next.side_to_move(), Alliance::Black);
        assert_eq!(next.all_pieces().count(), 18);
    }

    #[test]
    fn test_two_kings_is_draw() {
        let mut builder = Position::builder();
        builder.add_at(PieceKind::King, Alliance::White, "d4").unwrap();
        builder.add_at(PieceKind::King, Alliance::Black, "i9").unwrap();
        let pos = builder.build().unwrap();
        assert!(pos.is_draw());
        assert!(pos.is_game_over());
    }

    #[test]
    fn test_pinned_rook_cannot_leave_file() {
        // 黒クイーンが d8 から d4 の白キングを狙い、d5 の白ルークが間に入っている
        let mut builder = Position::builder();
        builder.add_at(PieceKind::King, Alliance::White, "d4").unwrap();
        builder.add_at(PieceKind::Rook, Alliance::White, "d5").unwrap();
        builder.add_at(PieceKind::Queen, Alliance::Black, "d8").unwrap();
        builder.add_at(PieceKind::King, Alliance::Black, "i9").unwrap();
        let pos = builder.build().unwrap();
        assert!(!pos.is_in_check(Alliance::White));

        let legal = pos.legal_moves(Alliance::White);
        let rook_moves: Vec<&Move> = legal.iter().filter(|m| m.from() == Some(sq("d5"))).collect();
        assert!(!rook_moves.is_empty());
        assert!(rook_moves.iter().all(|m| m.to().unwrap().col() == sq("d5").col()));
        assert!(legal.len() < pos.pseudo_legal_moves(Alliance::White).len());
    }

    #[test]
    fn test_apply_null_move_is_error() {
        let pos = Position::initial();
        assert!(pos.apply_unchecked(&Move::Null).is_err());
    }
}
