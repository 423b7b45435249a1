//! 対局の記録
//!
//! 局面の履歴・棋譜・取られた駒を持ち、1手戻しと千日手（同一局面3回）を扱う。

use std::collections::HashMap;

use crate::player::MoveStatus;
use crate::position::{Fingerprint, Position};
use crate::types::{Alliance, Move, Piece};

pub use crate::player::GameStatus;

/// 同じ局面がこの回数現れたら引き分け
pub const REPETITION_LIMIT: u32 = 3;

/// 1局分の記録
#[derive(Debug, Clone)]
pub struct Game {
    /// 開始局面から現局面まで（末尾が現局面）
    positions: Vec<Position>,
    moves: Vec<Move>,
    seen: HashMap<Fingerprint, u32>,
}

impl Default for Game {
    fn default() -> Self {
        Game::new(Position::initial())
    }
}

impl Game {
    pub fn new(start: Position) -> Self {
        let mut seen = HashMap::new();
        seen.insert(start.fingerprint(), 1);
        Game {
            positions: vec![start],
            moves: Vec::new(),
            seen,
        }
    }

    /// 現局面
    #[inline]
    pub fn position(&self) -> &Position {
        // positions は空にならない
        &self.positions[self.positions.len() - 1]
    }

    /// 開始局面
    #[inline]
    pub fn start_position(&self) -> &Position {
        &self.positions[0]
    }

    /// 局面の履歴
    pub fn history(&self) -> &[Position] {
        &self.positions
    }

    /// 棋譜
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// 手数
    #[inline]
    pub fn ply(&self) -> usize {
        self.moves.len()
    }

    /// `alliance` の駒で相手に取られたもの（取られた順）
    pub fn captured_pieces(&self, alliance: Alliance) -> Vec<Piece> {
        self.moves
            .iter()
            .filter_map(Move::captured_piece)
            .filter(|p| p.alliance == alliance)
            .collect()
    }

    /// 局面が履歴に現れた回数
    pub fn repetition_count(&self, fingerprint: Fingerprint) -> u32 {
        self.seen.get(&fingerprint).copied().unwrap_or(0)
    }

    /// 手番側の指し手を適用する。失敗時は何も変えない
    pub fn play(&mut self, mv: &Move) -> MoveStatus {
        let transition = self.position().current_player().make_move(mv);
        let status = transition.status();
        if let Some(next) = transition.into_next() {
            *self.seen.entry(next.fingerprint()).or_insert(0) += 1;
            self.positions.push(next);
            self.moves.push(mv.clone());
        }
        status
    }

    /// 最後の手を取り消す
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.moves.pop()?;
        if let Some(undone) = self.positions.pop() {
            if let Some(count) = self.seen.get_mut(&undone.fingerprint()) {
                *count -= 1;
                if *count == 0 {
                    self.seen.remove(&undone.fingerprint());
                }
            }
        }
        Some(mv)
    }

    /// 終局状態。詰み・ステイルメイト・駒不足を先に見て、その次に千日手
    pub fn status(&self) -> GameStatus {
        let position = self.position();
        match position.status() {
            GameStatus::Ongoing if self.repetition_count(position.fingerprint()) >= REPETITION_LIMIT => {
                GameStatus::Repetition
            }
            status => status,
        }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.status().is_over()
    }
}
