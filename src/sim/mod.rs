//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick = one 60 Hz frame)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod state;
pub mod tick;

pub use collision::{check_collision, hits_ceiling, hits_ground, hits_pipe};
pub use difficulty::Difficulty;
pub use state::{Bird, Cloud, GameEvent, GamePhase, GameState, Pipe};
pub use tick::{TickInput, tick};
