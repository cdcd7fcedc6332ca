//! Controls plugin - feeds key events into `InputState`.

use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;
use bevy::window::WindowFocused;

use super::state::InputState;
use crate::core::GameSet;

/// Controls plugin - keeps `InputState` in sync with the keyboard.
pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>()
            .add_systems(
                Update,
                (record_key_events, release_keys_on_blur).in_set(GameSet::Input),
            );
    }
}

/// Apply every key event since last frame, in arrival order.
fn record_key_events(mut events: EventReader<KeyboardInput>, mut input: ResMut<InputState>) {
    for event in events.read() {
        input.set(event.key_code, event.state);
    }
}

/// Key-up events are lost while unfocused, so drop held keys on blur.
fn release_keys_on_blur(mut events: EventReader<WindowFocused>, mut input: ResMut<InputState>) {
    for event in events.read() {
        if !event.focused {
            debug!("Window lost focus, releasing held keys");
            input.release_all();
        }
    }
}
