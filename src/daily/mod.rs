//! Date-seeded daily challenges: one shared objective per UTC day, with
//! per-player progress, streaks and history kept in the progress store.

pub mod logic;
pub mod messages;
pub mod templates;
pub mod types;

pub use logic::*;
pub use messages::*;
pub use templates::{ChallengeTemplate, CHALLENGE_TEMPLATES};
pub use types::*;
