//! プレイヤー視点と指し手の適用
//!
//! `Player` は局面を片方の陣営から見たビュー。王手・詰み・ステイルメイトの判定と、
//! 指し手を適用して次の局面を作る `make_move` を持つ。

mod transition;

pub use transition::{MoveStatus, MoveTransition};

use crate::position::Position;
use crate::types::{Alliance, Move, Piece};

/// 局面の終局状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// 対局中
    Ongoing,
    /// 詰み
    Checkmate { winner: Alliance },
    /// ステイルメイト（引き分け）
    Stalemate,
    /// 盤上がキング2枚のみ（引き分け）
    MaterialDraw,
    /// 同一局面3回（引き分け）
    Repetition,
}

impl GameStatus {
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }

    /// 勝者（引き分け・対局中なら None）
    #[inline]
    pub const fn winner(self) -> Option<Alliance> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Checkmate { .. } => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::MaterialDraw => "material_draw",
            GameStatus::Repetition => "repetition",
        }
    }
}

/// 片方の陣営から見た局面
#[derive(Clone, Copy)]
pub struct Player<'a> {
    position: &'a Position,
    alliance: Alliance,
}

impl<'a> Player<'a> {
    pub(crate) fn new(position: &'a Position, alliance: Alliance) -> Self {
        Player { position, alliance }
    }

    #[inline]
    pub fn alliance(&self) -> Alliance {
        self.alliance
    }

    #[inline]
    pub fn position(&self) -> &'a Position {
        self.position
    }

    /// 合法手
    #[inline]
    pub fn legal_moves(&self) -> &'a [Move] {
        self.position.legal_moves(self.alliance)
    }

    /// 擬似合法手
    #[inline]
    pub fn pseudo_legal_moves(&self) -> &'a [Move] {
        self.position.pseudo_legal_moves(self.alliance)
    }

    /// 盤上の自分の駒
    #[inline]
    pub fn active_pieces(&self) -> &'a [Piece] {
        self.position.active_pieces(self.alliance)
    }

    /// 相手プレイヤー
    #[inline]
    pub fn opponent(&self) -> Player<'a> {
        Player::new(self.position, self.alliance.opponent())
    }

    /// 自分のキング
    pub fn king(&self) -> Option<Piece> {
        self.position
            .king_square(self.alliance)
            .and_then(|sq| self.position.piece_at(sq))
    }

    /// 相手の擬似合法手に自玉を取る手がある
    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.position.is_in_check(self.alliance)
    }

    /// 王手されていて逃れる合法手がない
    #[inline]
    pub fn is_in_checkmate(&self) -> bool {
        self.is_in_check() && self.legal_moves().is_empty()
    }

    /// 王手されておらず合法手もない
    #[inline]
    pub fn is_in_stalemate(&self) -> bool {
        !self.is_in_check() && self.legal_moves().is_empty()
    }

    /// 指し手を適用する
    ///
    /// - `Move::Null` は `NoLegalMove`
    /// - 手番でない、擬似合法手に無い、指した後に自玉が取られる手は `IllegalMove`
    /// - それ以外は `Done` と新しい局面
    ///
    /// 失敗時の遷移は元の局面をそのまま指す。
    pub fn make_move(&self, mv: &Move) -> MoveTransition<'a> {
        if mv.is_null() {
            return MoveTransition::failed(self.position, mv.clone(), MoveStatus::NoLegalMove);
        }
        if self.alliance != self.position.side_to_move() || !self.legal_moves().contains(mv) {
            return MoveTransition::failed(self.position, mv.clone(), MoveStatus::IllegalMove);
        }
        match self.position.apply_unchecked(mv) {
            Ok(next) => MoveTransition::done(self.position, mv.clone(), next),
            Err(_) => MoveTransition::failed(self.position, mv.clone(), MoveStatus::NoLegalMove),
        }
    }
}

impl std::fmt::Display for Player<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.alliance.label())
    }
}

impl Position {
    /// 局面単体で決まる終局状態（千日手は `Game` が判定する）
    pub fn status(&self) -> GameStatus {
        let player = self.current_player();
        if player.is_in_checkmate() {
            GameStatus::Checkmate {
                winner: player.alliance().opponent(),
            }
        } else if player.is_in_stalemate() {
            GameStatus::Stalemate
        } else if self.is_draw() {
            GameStatus::MaterialDraw
        } else {
            GameStatus::Ongoing
        }
    }
}
