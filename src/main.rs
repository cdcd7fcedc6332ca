//! Coin Meadow - Entry Point
//!
//! Controls:
//! - Arrow keys: Move
//! - F5 / Save Game button: Save
//! - F9 / Load Game button: Load
//! - Escape: Quit

use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy_kira_audio::AudioPlugin;

use coin_meadow::core::GameConfig;

fn main() {
    let config = GameConfig::load();

    App::new()
        // Bevy default plugins
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Coin Meadow".to_string(),
                        resolution: (config.canvas_width, config.canvas_height).into(),
                        resizable: false,
                        // One frame per display refresh
                        present_mode: PresentMode::AutoVsync,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )

        // Audio
        .add_plugins(AudioPlugin)

        // Our game plugin
        .insert_resource(config)
        .add_plugins(coin_meadow::CoinMeadowPlugin)

        .run();
}
