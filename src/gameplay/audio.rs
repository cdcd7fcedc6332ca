//! Coin pickup sound.

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy_kira_audio::prelude::*;

use crate::assets::GameAssets;
use crate::core::CoinCollectedEvent;

/// Play the pickup cue once per collection, restarting it if the previous
/// cue is still ringing. Sound is best-effort: failures are only logged.
pub fn play_coin_sound(
    mut collected: EventReader<CoinCollectedEvent>,
    assets: Res<GameAssets>,
    asset_server: Res<AssetServer>,
    audio: Res<Audio>,
    mut instances: ResMut<Assets<AudioInstance>>,
    mut current: Local<Option<Handle<AudioInstance>>>,
) {
    for _ in collected.read() {
        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(assets.coin_sound.id()) {
            error!("Error playing sound: {}", err);
            continue;
        }

        restart_cue(
            &mut *current,
            |handle| {
                if let Some(instance) = instances.get_mut(handle) {
                    instance.stop(AudioTween::default());
                }
            },
            || audio.play(assets.coin_sound.clone()).handle(),
        );
    }
}

/// Stop the cue in `current`, if any, before starting the next one.
fn restart_cue<H>(current: &mut Option<H>, stop: impl FnOnce(&H), play: impl FnOnce() -> H) {
    if let Some(previous) = current.as_ref() {
        stop(previous);
    }
    *current = Some(play());
}
