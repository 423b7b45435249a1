pub mod config;
pub mod engine;
pub mod game;
pub mod types;

pub use config::MatchConfig;
pub use engine::Engine;
pub use game::{GameConfig, GameResult, MoveEvent, run_game};
pub use types::{GameOutcome, duration_to_millis, side_label};
