//! # chad-core
//!
//! 12×12 盤の chad（城と城壁を持つチェス変種）の指し手生成と探索。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Alliance, PieceKind, Piece, Square, Move, Bound）
//! - `geometry`: 城・城壁の表と移動方向
//! - `position`: 不変の局面、ビルダー、Zobrist指紋、初期配置と詰め問題
//! - `movegen`: 擬似合法手生成、利きの判定、座標からの指し手生成
//! - `player`: 陣営ごとのビュー、指し手の適用、終局判定
//! - `game`: 対局の記録（1手戻し・千日手）
//! - `eval`: 静的評価
//! - `tt`: 置換表（Transposition Table）
//! - `search`: ミニマックス・アルファベータ・反復深化・MCTS
//!

pub mod error;
pub mod types;

pub mod geometry;
pub mod position;

pub mod movegen;
pub mod player;

pub mod game;

pub mod eval;
pub mod tt;

pub mod search;

pub use error::{ChadError, Result};
pub use game::Game;
pub use position::Position;
pub use types::{Alliance, Move, Piece, PieceKind, Square};
