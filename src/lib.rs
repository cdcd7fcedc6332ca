//! Coin Meadow - a small 2D coin-collecting game in Bevy.
//!
//! A player sprite walks a grass field, picks up a spinning coin that
//! respawns somewhere else half a second later, and can save or load its
//! progress through a host bridge.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, configuration
//! - **Assets**: Loading sprite sheets and sound, start-up readiness
//! - **Controls**: Keyboard state sampled once per frame
//! - **Gameplay**: The game session, frame tick, sprites and sound cue
//! - **Persistence**: Save/load through the host bridge
//! - **UI**: Score, notifications, error line, save/load buttons

pub mod assets;
pub mod controls;
pub mod core;
pub mod gameplay;
pub mod persistence;
pub mod ui;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct CoinMeadowPlugin;

impl Plugin for CoinMeadowPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Asset loading
            .add_plugins(assets::AssetLoadingPlugin)

            // Keyboard state
            .add_plugins(controls::ControlsPlugin)

            // Frame loop
            .add_plugins(gameplay::GameplayPlugin)

            // Save/load
            .add_plugins(persistence::PersistencePlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
