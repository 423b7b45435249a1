use std::time::Duration;

use chad_core::Alliance;
use chad_core::game::GameStatus;
use serde::{Deserialize, Serialize};

/// 対局結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    InProgress,
    WhiteWin,
    BlackWin,
    Draw,
}

impl GameOutcome {
    pub fn label(self) -> &'static str {
        match self {
            GameOutcome::InProgress => "in_progress",
            GameOutcome::WhiteWin => "white_win",
            GameOutcome::BlackWin => "black_win",
            GameOutcome::Draw => "draw",
        }
    }

    /// `winner` の勝ち
    pub fn win_for(winner: Alliance) -> Self {
        winner.choose(GameOutcome::WhiteWin, GameOutcome::BlackWin)
    }

    /// 終局状態から結果と理由を決める
    pub fn from_status(status: GameStatus) -> (Self, &'static str) {
        let outcome = match status {
            GameStatus::Ongoing => GameOutcome::InProgress,
            GameStatus::Checkmate { winner } => GameOutcome::win_for(winner),
            GameStatus::Stalemate | GameStatus::MaterialDraw | GameStatus::Repetition => {
                GameOutcome::Draw
            }
        };
        (outcome, status.label())
    }
}

pub fn side_label(alliance: Alliance) -> char {
    if alliance.is_white() { 'w' } else { 'b' }
}

pub fn duration_to_millis(d: Duration) -> u64 {
    d.as_millis().min(u128::from(u64::MAX)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_from_status() {
        assert_eq!(
            GameOutcome::from_status(GameStatus::Checkmate { winner: Alliance::Black }),
            (GameOutcome::BlackWin, "checkmate")
        );
        assert_eq!(
            GameOutcome::from_status(GameStatus::Repetition),
            (GameOutcome::Draw, "repetition")
        );
        assert_eq!(GameOutcome::from_status(GameStatus::Ongoing).0, GameOutcome::InProgress);
    }

    #[test]
    fn labels() {
        assert_eq!(side_label(Alliance::White), 'w');
        assert_eq!(side_label(Alliance::Black), 'b');
        assert_eq!(GameOutcome::WhiteWin.label(), "white_win");
        assert_eq!(duration_to_millis(Duration::from_micros(2_500)), 2);
    }
}
