//! Asset loading plugin - starts every load at startup and leaves `Loading`
//! once the required images are in.

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy_kira_audio::prelude::AudioSource;

use super::bundle::{AssetBundle, Readiness};
use crate::core::{AssetFailurePolicy, GameConfig, GameState};
use crate::gameplay::{COIN_FRAMES, COIN_SIZE, PLAYER_FRAMES, PLAYER_ROWS, PLAYER_SIZE};

const PLAYER_SHEET_PATH: &str = "sprite_sheets/char.png";
const COIN_SHEET_PATH: &str = "sprite_sheets/coin.png";
const GRASS_TILE_PATH: &str = "tiles/grass.png";
const COIN_SOUND_PATH: &str = "sounds/coin.wav";

/// Handles to everything the game draws or plays.
#[derive(Resource, Clone)]
pub struct GameAssets {
    pub player_sheet: Handle<Image>,
    pub coin_sheet: Handle<Image>,
    pub grass: Handle<Image>,
    pub coin_sound: Handle<AudioSource>,
    pub player_layout: Handle<TextureAtlasLayout>,
    pub coin_layout: Handle<TextureAtlasLayout>,
}

/// The images gating game start, with their load bookkeeping.
///
/// The coin sound is deliberately not listed here: a missing sound only
/// silences the pickup cue.
#[derive(Resource)]
pub struct RequiredAssets {
    pub bundle: AssetBundle,
    handles: Vec<(&'static str, UntypedHandle)>,
}

/// Asset loading plugin - drives `GameState::Loading`.
pub struct AssetLoadingPlugin;

impl Plugin for AssetLoadingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, start_loading).add_systems(
            Update,
            poll_asset_loading.run_if(in_state(GameState::Loading)),
        );
    }
}

/// Kick off every load and register the atlas layouts.
fn start_loading(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    let player_layout = TextureAtlasLayout::from_grid(
        PLAYER_SIZE.as_uvec2(),
        PLAYER_FRAMES,
        PLAYER_ROWS,
        None,
        None,
    );
    let coin_layout = TextureAtlasLayout::from_grid(COIN_SIZE.as_uvec2(), COIN_FRAMES, 1, None, None);

    let assets = GameAssets {
        player_sheet: asset_server.load(PLAYER_SHEET_PATH),
        coin_sheet: asset_server.load(COIN_SHEET_PATH),
        grass: asset_server.load(GRASS_TILE_PATH),
        coin_sound: asset_server.load(COIN_SOUND_PATH),
        player_layout: layouts.add(player_layout),
        coin_layout: layouts.add(coin_layout),
    };

    let handles = vec![
        ("player", assets.player_sheet.clone().untyped()),
        ("coin", assets.coin_sheet.clone().untyped()),
        ("grass", assets.grass.clone().untyped()),
    ];
    let bundle = AssetBundle::new(handles.iter().map(|(name, _)| *name));

    info!("Loading {} required images", handles.len());
    commands.insert_resource(RequiredAssets { bundle, handles });
    commands.insert_resource(assets);
}

/// Poll load states and fire the one-shot transition into the game.
fn poll_asset_loading(
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
    mut required: ResMut<RequiredAssets>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let RequiredAssets { bundle, handles } = &mut *required;

    for (name, handle) in handles.iter() {
        match asset_server.get_load_state(handle.id()) {
            Some(LoadState::Loaded) => {
                if bundle.mark_loaded(name) {
                    debug!("Loaded {} image", name);
                }
            }
            Some(LoadState::Failed(err)) => {
                if bundle.mark_failed(name, err.to_string()) {
                    error!("Failed to load {} image: {}", name, err);
                }
            }
            _ => {}
        }
    }

    if let Some(state) = loading_outcome(bundle, config.asset_failure_policy) {
        next_state.set(state);
    }
}

/// Where loading goes next, if anywhere. `Stall` never leaves `Loading`
/// once an image has failed.
fn loading_outcome(bundle: &mut AssetBundle, policy: AssetFailurePolicy) -> Option<GameState> {
    if bundle.take_ready() {
        info!("All required images loaded, starting game");
        return Some(GameState::InGame);
    }

    match bundle.readiness() {
        Readiness::Failed(failed) if policy == AssetFailurePolicy::Abort => {
            error!("Aborting start-up, failed images: {}", failed.join(", "));
            Some(GameState::LoadFailed)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use bevy::state::app::StatesPlugin;

    use super::*;

    fn loading_app(policy: AssetFailurePolicy, bundle: AssetBundle) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin))
            .insert_resource(GameConfig {
                asset_failure_policy: policy,
                ..default()
            })
            .insert_resource(RequiredAssets {
                bundle,
                // Never requested, so its load state stays unknown
                handles: vec![("grass", Handle::<Image>::default().untyped())],
            })
            .init_state::<GameState>()
            .add_systems(
                Update,
                poll_asset_loading.run_if(in_state(GameState::Loading)),
            );
        app
    }

    fn failed_bundle() -> AssetBundle {
        let mut bundle = AssetBundle::new(["player", "grass"]);
        bundle.mark_failed("player", "file not found");
        bundle
    }

    fn state(app: &App) -> GameState {
        *app.world().resource::<State<GameState>>().get()
    }

    #[test]
    fn abort_policy_shows_the_failure_screen() {
        let mut app = loading_app(AssetFailurePolicy::Abort, failed_bundle());
        app.update();
        app.update();
        assert_eq!(state(&app), GameState::LoadFailed);
    }

    #[test]
    fn stall_policy_stays_in_loading() {
        let mut app = loading_app(AssetFailurePolicy::Stall, failed_bundle());
        for _ in 0..5 {
            app.update();
        }
        assert_eq!(state(&app), GameState::Loading);
    }

    #[test]
    fn loaded_bundle_starts_the_game_once() {
        let mut bundle = AssetBundle::new(["player"]);
        bundle.mark_loaded("player");
        assert_eq!(
            loading_outcome(&mut bundle, AssetFailurePolicy::Stall),
            Some(GameState::InGame)
        );
        assert_eq!(loading_outcome(&mut bundle, AssetFailurePolicy::Stall), None);
    }

    #[test]
    fn pending_bundle_waits_under_either_policy() {
        let mut bundle = AssetBundle::new(["player", "grass"]);
        bundle.mark_loaded("player");
        assert_eq!(loading_outcome(&mut bundle, AssetFailurePolicy::Abort), None);
        assert_eq!(loading_outcome(&mut bundle, AssetFailurePolicy::Stall), None);
    }
}
