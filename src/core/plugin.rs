//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;

use super::config::GameConfig;
use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, LoadFailed)
/// - Global events (CoinCollectedEvent, SaveRequested, ...)
/// - The `GameSet` ordering used by every per-frame system
/// - The `GameConfig` resource, unless the app already provides one
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<GameConfig>() {
            app.insert_resource(GameConfig::load());
        }

        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<CoinCollectedEvent>()
            .add_event::<SaveRequested>()
            .add_event::<LoadRequested>()
            .add_event::<NotifyEvent>()

            .configure_sets(
                Update,
                (
                    GameSet::Input,
                    GameSet::Persistence,
                    GameSet::Simulation,
                    GameSet::Presentation,
                )
                    .chain(),
            )

            // Escape quits from any state
            .add_systems(Update, exit_on_escape);
    }
}

/// Handle Escape key to shut the game down cleanly.
fn exit_on_escape(keyboard: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        info!("Escape pressed, exiting");
        exit.send(AppExit::Success);
    }
}
