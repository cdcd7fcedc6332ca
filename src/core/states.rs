//! Game state definitions that control the overall flow of the game.
//!
//! The frame loop only runs in `InGame`. Asset readiness moves the game out
//! of `Loading`; whether a failed asset ever leaves `Loading` depends on the
//! configured [`AssetFailurePolicy`](super::AssetFailurePolicy).

use bevy::prelude::*;

/// Main game states.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Waiting for the sprite sheets and background tile
    #[default]
    Loading,
    /// Active gameplay: the per-frame loop is running
    InGame,
    /// A required asset failed and the policy is to abort with a message
    LoadFailed,
}

/// Ordering of the per-frame work inside `Update`.
///
/// Input is sampled first, then pending load completions are applied, then
/// the world advances one tick, then sprites and text are synced.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Persistence,
    Simulation,
    Presentation,
}
