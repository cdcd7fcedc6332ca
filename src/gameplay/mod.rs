//! Gameplay module - player, coin, score and the per-frame loop.

mod audio;
mod components;
pub mod geometry;
mod plugin;
mod session;

pub use components::*;
pub use plugin::{GameplayPlugin, SessionRng};
pub use session::{GameSession, TickOutcome};
