//! Gameplay plugin - scene setup, the frame tick, and sprite syncing.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::audio::play_coin_sound;
use super::components::*;
use super::geometry::{canvas_to_world, tile_grid};
use super::session::GameSession;
use crate::assets::GameAssets;
use crate::controls::InputState;
use crate::core::{CoinCollectedEvent, GameConfig, GameSet, GameState};

const TILE_Z: f32 = 0.0;
const COIN_Z: f32 = 1.0;
const PLAYER_Z: f32 = 2.0;

/// Random source for coin respawn positions.
#[derive(Resource)]
pub struct SessionRng(pub StdRng);

impl Default for SessionRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Gameplay plugin - owns the `GameSession` and drives it every frame.
pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        let session = GameSession::new(app.world().resource::<GameConfig>());

        app.insert_resource(session)
            .init_resource::<SessionRng>()
            .add_systems(Startup, spawn_camera)
            .add_systems(OnEnter(GameState::InGame), spawn_scene)
            .add_systems(
                Update,
                (tick_respawn_timer, advance_frame, exit_after_frame_limit)
                    .chain()
                    .in_set(GameSet::Simulation)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                (sync_player_sprite, sync_coin_sprite, play_coin_sound)
                    .in_set(GameSet::Presentation)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Lay down the background and spawn the two sprites.
fn spawn_scene(mut commands: Commands, assets: Res<GameAssets>, session: Res<GameSession>) {
    let canvas = session.canvas();
    let tile = Vec2::splat(TILE_SIZE);

    let mut tiles = 0;
    for corner in tile_grid(canvas, TILE_SIZE) {
        commands.spawn((
            Sprite {
                image: assets.grass.clone(),
                rect: Some(Rect::new(0.0, 0.0, TILE_SIZE, TILE_SIZE)),
                ..default()
            },
            Transform::from_translation(canvas_to_world(corner, tile, canvas).extend(TILE_Z)),
            BackgroundTile,
        ));
        tiles += 1;
    }

    commands.spawn((
        Sprite::from_atlas_image(
            assets.coin_sheet.clone(),
            TextureAtlas {
                layout: assets.coin_layout.clone(),
                index: session.coin.frame_x as usize,
            },
        ),
        Transform::from_translation(
            canvas_to_world(session.coin.position, COIN_SIZE, canvas).extend(COIN_Z),
        ),
        CoinSprite,
    ));

    commands.spawn((
        Sprite::from_atlas_image(
            assets.player_sheet.clone(),
            TextureAtlas {
                layout: assets.player_layout.clone(),
                index: session.player.atlas_index(),
            },
        ),
        Transform::from_translation(
            canvas_to_world(session.player.position, PLAYER_SIZE, canvas).extend(PLAYER_Z),
        ),
        PlayerSprite,
    ));

    info!("Scene ready: {} background tiles", tiles);
}

/// Run the coin respawn countdown on wall-clock time.
fn tick_respawn_timer(
    time: Res<Time<Real>>,
    mut session: ResMut<GameSession>,
    mut rng: ResMut<SessionRng>,
) {
    if session.tick_respawn(time.delta(), &mut rng.0) {
        let position = session.coin.position;
        debug!("Coin respawned at ({:.1}, {:.1})", position.x, position.y);
    }
}

/// One tick of the world using this frame's key snapshot.
fn advance_frame(
    input: Res<InputState>,
    mut session: ResMut<GameSession>,
    mut collected: EventWriter<CoinCollectedEvent>,
) {
    let outcome = session.tick(input.snapshot());
    if outcome.coin_collected {
        info!("Coin collected, score {}", session.score);
        collected.send(CoinCollectedEvent {
            score: session.score,
        });
    }
}

/// Stop condition for unattended runs.
fn exit_after_frame_limit(
    config: Res<GameConfig>,
    session: Res<GameSession>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(limit) = config.max_frames else {
        return;
    };
    if session.frame_counter >= limit {
        info!("Reached frame limit ({}), exiting", limit);
        exit.send(AppExit::Success);
    }
}

fn sync_player_sprite(
    session: Res<GameSession>,
    mut query: Query<(&mut Sprite, &mut Transform), With<PlayerSprite>>,
) {
    let Ok((mut sprite, mut transform)) = query.get_single_mut() else {
        return;
    };

    let center = canvas_to_world(session.player.position, PLAYER_SIZE, session.canvas());
    transform.translation = center.extend(PLAYER_Z);
    if let Some(atlas) = sprite.texture_atlas.as_mut() {
        atlas.index = session.player.atlas_index();
    }
}

fn sync_coin_sprite(
    session: Res<GameSession>,
    mut query: Query<(&mut Sprite, &mut Transform, &mut Visibility), With<CoinSprite>>,
) {
    let Ok((mut sprite, mut transform, mut visibility)) = query.get_single_mut() else {
        return;
    };

    if session.coin.collected {
        *visibility = Visibility::Hidden;
        return;
    }

    *visibility = Visibility::Inherited;
    let center = canvas_to_world(session.coin.position, COIN_SIZE, session.canvas());
    transform.translation = center.extend(COIN_Z);
    if let Some(atlas) = sprite.texture_atlas.as_mut() {
        atlas.index = session.coin.frame_x as usize;
    }
}
