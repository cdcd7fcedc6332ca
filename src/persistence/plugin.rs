//! Persistence plugin - turns save/load requests into bridge calls and
//! applies load results between frames.

use bevy::prelude::*;

use super::bridge::{BridgeChannel, FileBridge, LOAD_TASK_ID};
use super::error::PersistenceError;
use super::saved_game::LoadPayload;
use crate::core::{GameConfig, GameSet, LoadRequested, NotifyEvent, SaveRequested};
use crate::gameplay::GameSession;

pub const SAVED_MESSAGE: &str = "Game Saved";
pub const LOADED_MESSAGE: &str = "Game Loaded";

/// Persistence plugin - connects the file bridge unless the app already
/// provides a `BridgeChannel`.
pub struct PersistencePlugin;

impl Plugin for PersistencePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<BridgeChannel>() {
            let config = app.world().resource::<GameConfig>();
            let bridge = if config.bridge_enabled {
                let path = config.save_path.clone();
                info!("Host bridge: save file {}", path.display());
                BridgeChannel::connect(move |completions| FileBridge::new(path, completions))
            } else {
                warn!("Host bridge disabled, save and load are unavailable");
                BridgeChannel::absent()
            };
            app.insert_resource(bridge);
        }

        app.add_systems(
            Update,
            (handle_save_requests, handle_load_requests, apply_load_completions)
                .chain()
                .in_set(GameSet::Persistence),
        );
    }
}

/// Report a failed bridge call. Only an unavailable bridge is shown to the
/// player; everything else is log-only.
fn report(err: PersistenceError, notify: &mut EventWriter<NotifyEvent>) {
    error!("{}", err);
    if let PersistenceError::BridgeUnavailable(_) = err {
        notify.send(NotifyEvent::Error(err.to_string()));
    }
}

fn handle_save_requests(
    mut requests: EventReader<SaveRequested>,
    bridge: Res<BridgeChannel>,
    session: Res<GameSession>,
    mut notify: EventWriter<NotifyEvent>,
) {
    for _ in requests.read() {
        match bridge.save(&session) {
            Ok(()) => {
                info!("Game state sent to host for saving");
                notify.send(NotifyEvent::Info(SAVED_MESSAGE.to_string()));
            }
            Err(e) => report(e, &mut notify),
        }
    }
}

fn handle_load_requests(
    mut requests: EventReader<LoadRequested>,
    bridge: Res<BridgeChannel>,
    mut notify: EventWriter<NotifyEvent>,
) {
    for _ in requests.read() {
        match bridge.request_load() {
            Ok(()) => info!("Requested game state from host"),
            Err(e) => report(e, &mut notify),
        }
    }
}

/// Drain host completions. Runs before the simulation, and each payload is
/// applied whole, so no frame sees a half-loaded state.
fn apply_load_completions(
    bridge: Res<BridgeChannel>,
    mut session: ResMut<GameSession>,
    mut notify: EventWriter<NotifyEvent>,
) {
    for completion in bridge.drain_completions() {
        if completion.task_id != LOAD_TASK_ID {
            debug!("Ignoring completion for task '{}'", completion.task_id);
            continue;
        }

        match LoadPayload::parse(&completion.result) {
            Ok(payload) => {
                payload.apply(&mut session);
                info!("Game state loaded, score {}", session.score);
                notify.send(NotifyEvent::Info(LOADED_MESSAGE.to_string()));
            }
            Err(e) => error!("Error parsing game state from host: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::Sender;

    use crate::persistence::{HostBridge, SavedGame, TaskCompleted};

    /// Answers every load with a fixed payload.
    struct CannedBridge {
        payload: String,
        completions: Sender<TaskCompleted>,
    }

    impl HostBridge for CannedBridge {
        fn save_game_state(&self, _json: &str) {}

        fn load_game_state(&self) {
            let _ = self.completions.send(TaskCompleted {
                task_id: LOAD_TASK_ID.to_string(),
                result: self.payload.clone(),
            });
        }
    }

    fn app_with(bridge: BridgeChannel) -> App {
        let config = GameConfig::default();
        let mut app = App::new();
        app.insert_resource(GameSession::new(&config))
            .insert_resource(config)
            .insert_resource(bridge)
            .add_event::<SaveRequested>()
            .add_event::<LoadRequested>()
            .add_event::<NotifyEvent>()
            .add_plugins(PersistencePlugin);
        app
    }

    fn canned(payload: &str) -> BridgeChannel {
        let payload = payload.to_string();
        BridgeChannel::connect(move |completions| CannedBridge {
            payload,
            completions,
        })
    }

    fn notifications(app: &App) -> Vec<NotifyEvent> {
        let events = app.world().resource::<Events<NotifyEvent>>();
        events.get_cursor().read(events).cloned().collect()
    }

    fn snapshot(app: &App) -> SavedGame {
        SavedGame::capture(app.world().resource::<GameSession>())
    }

    #[test]
    fn save_without_bridge_shows_inline_error() {
        let mut app = app_with(BridgeChannel::absent());
        let before = snapshot(&app);

        app.world_mut().send_event(SaveRequested);
        app.update();

        assert_eq!(
            notifications(&app),
            vec![NotifyEvent::Error(
                "Error: host bridge not available for saving".to_string()
            )]
        );
        assert_eq!(snapshot(&app), before);
    }

    #[test]
    fn load_without_bridge_shows_inline_error() {
        let mut app = app_with(BridgeChannel::absent());
        app.world_mut().send_event(LoadRequested);
        app.update();

        assert_eq!(
            notifications(&app),
            vec![NotifyEvent::Error(
                "Error: host bridge not available for loading".to_string()
            )]
        );
    }

    #[test]
    fn save_with_bridge_confirms() {
        let mut app = app_with(canned("{}"));
        app.world_mut().send_event(SaveRequested);
        app.update();

        assert_eq!(
            notifications(&app),
            vec![NotifyEvent::Info(SAVED_MESSAGE.to_string())]
        );
    }

    #[test]
    fn load_applies_within_the_same_frame() {
        let mut app = app_with(canned(r#"{"score": 8}"#));
        let before = snapshot(&app);

        app.world_mut().send_event(LoadRequested);
        app.update();

        let after = snapshot(&app);
        assert_eq!(after.score, 8);
        assert_eq!(after.player, before.player);
        assert_eq!(after.coin, before.coin);
        assert_eq!(
            notifications(&app),
            vec![NotifyEvent::Info(LOADED_MESSAGE.to_string())]
        );
    }

    #[test]
    fn malformed_load_is_silent_and_harmless() {
        let mut app = app_with(canned(r#"{"score": "lots"}"#));
        let before = snapshot(&app);

        app.world_mut().send_event(LoadRequested);
        app.update();

        assert_eq!(snapshot(&app), before);
        assert!(notifications(&app).is_empty());
    }
}
