//! Simulation core: constants, difficulty, game state and the frame engine.

pub mod constants;
pub mod difficulty;
pub mod engine;
pub mod game_state;

pub use difficulty::Difficulty;
pub use engine::*;
pub use game_state::*;
