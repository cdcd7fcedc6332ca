//! The host bridge: where saves go and where loads come from.
//!
//! Outbound calls are fire-and-forget. A load result comes back later as a
//! [`TaskCompleted`] message on a channel that the game drains once per
//! frame.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, TaskPool};
use crossbeam_channel::{Receiver, Sender};

use super::error::{BridgeOperation, PersistenceError};
use super::saved_game::SavedGame;
use crate::gameplay::GameSession;

/// Task id the game listens for.
pub const LOAD_TASK_ID: &str = "loadGameState";

/// Completion signal posted by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCompleted {
    pub task_id: String,
    pub result: String,
}

/// Calls the game makes into its host.
pub trait HostBridge: Send + Sync + 'static {
    /// Persist a JSON-encoded [`SavedGame`]. Must not block.
    fn save_game_state(&self, json: &str);

    /// Ask for the saved state; the answer arrives as a [`TaskCompleted`]
    /// with [`LOAD_TASK_ID`]. Must not block.
    fn load_game_state(&self);
}

/// The connection to the host, or the lack of one.
#[derive(Resource)]
pub struct BridgeChannel {
    host: Option<Box<dyn HostBridge>>,
    completions: Receiver<TaskCompleted>,
}

impl BridgeChannel {
    /// Connect a host. The closure gets the sender for completion messages.
    pub fn connect<B, F>(make_host: F) -> Self
    where
        B: HostBridge,
        F: FnOnce(Sender<TaskCompleted>) -> B,
    {
        let (sender, completions) = crossbeam_channel::unbounded();
        Self {
            host: Some(Box::new(make_host(sender))),
            completions,
        }
    }

    /// No host at all: every save or load reports the bridge as unavailable.
    pub fn absent() -> Self {
        let (_, completions) = crossbeam_channel::unbounded();
        Self {
            host: None,
            completions,
        }
    }

    /// Snapshot the session and hand it to the host.
    pub fn save(&self, session: &GameSession) -> Result<(), PersistenceError> {
        let host = self
            .host
            .as_ref()
            .ok_or(PersistenceError::BridgeUnavailable(BridgeOperation::Save))?;
        let json = SavedGame::capture(session).to_json()?;
        host.save_game_state(&json);
        Ok(())
    }

    /// Ask the host for the saved state.
    pub fn request_load(&self) -> Result<(), PersistenceError> {
        let host = self
            .host
            .as_ref()
            .ok_or(PersistenceError::BridgeUnavailable(BridgeOperation::Load))?;
        host.load_game_state();
        Ok(())
    }

    /// Completions that have arrived since the last call.
    pub fn drain_completions(&self) -> impl Iterator<Item = TaskCompleted> + '_ {
        self.completions.try_iter()
    }
}

/// Host bridge backed by a JSON file on disk.
pub struct FileBridge {
    path: PathBuf,
    completions: Sender<TaskCompleted>,
}

impl FileBridge {
    pub fn new(path: impl Into<PathBuf>, completions: Sender<TaskCompleted>) -> Self {
        Self {
            path: path.into(),
            completions,
        }
    }
}

impl HostBridge for FileBridge {
    fn save_game_state(&self, json: &str) {
        let path = self.path.clone();
        let json = json.to_string();
        IoTaskPool::get_or_init(TaskPool::new)
            .spawn(async move {
                match write_save_file(&path, &json) {
                    Ok(()) => info!("Game state saved to {}", path.display()),
                    Err(e) => error!("Error saving game state: {}", e),
                }
            })
            .detach();
    }

    fn load_game_state(&self) {
        let path = self.path.clone();
        let completions = self.completions.clone();
        IoTaskPool::get_or_init(TaskPool::new)
            .spawn(async move {
                match read_save_file(&path) {
                    Ok(Some(contents)) => {
                        info!("Game state loaded from {}", path.display());
                        let message = TaskCompleted {
                            task_id: LOAD_TASK_ID.to_string(),
                            result: contents,
                        };
                        if completions.send(message).is_err() {
                            debug!("Game closed before the load completed");
                        }
                    }
                    Ok(None) => warn!("No saved game at {}", path.display()),
                    Err(e) => error!("Error loading game state: {}", e),
                }
            })
            .detach();
    }
}

fn io_error(path: &Path, details: impl ToString) -> PersistenceError {
    PersistenceError::Io {
        path: path.display().to_string(),
        details: details.to_string(),
    }
}

/// Write a save as pretty-printed JSON.
pub fn write_save_file(path: &Path, json: &str) -> Result<(), PersistenceError> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(PersistenceError::Parse)?;
    let pretty = serde_json::to_string_pretty(&value).map_err(PersistenceError::Encode)?;
    fs::write(path, pretty).map_err(|e| io_error(path, e))
}

/// Read a save file. A missing file is `Ok(None)`.
pub fn read_save_file(path: &Path) -> Result<Option<String>, PersistenceError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_error(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use crate::core::GameConfig;
    use crate::persistence::LoadPayload;

    /// Keeps saves in memory and answers loads synchronously.
    struct MemoryBridge {
        saved: Arc<Mutex<Option<String>>>,
        completions: Sender<TaskCompleted>,
    }

    impl HostBridge for MemoryBridge {
        fn save_game_state(&self, json: &str) {
            *self.saved.lock().unwrap() = Some(json.to_string());
        }

        fn load_game_state(&self) {
            if let Some(json) = self.saved.lock().unwrap().clone() {
                self.completions
                    .send(TaskCompleted {
                        task_id: LOAD_TASK_ID.to_string(),
                        result: json,
                    })
                    .unwrap();
            }
        }
    }

    fn memory_channel() -> (BridgeChannel, Arc<Mutex<Option<String>>>) {
        let saved = Arc::new(Mutex::new(None));
        let store = saved.clone();
        let channel = BridgeChannel::connect(move |completions| MemoryBridge {
            saved: store,
            completions,
        });
        (channel, saved)
    }

    #[test]
    fn absent_bridge_reports_documented_messages() {
        let bridge = BridgeChannel::absent();
        let session = GameSession::new(&GameConfig::default());

        let err = bridge.save(&session).unwrap_err();
        assert_eq!(err.to_string(), "Error: host bridge not available for saving");

        let err = bridge.request_load().unwrap_err();
        assert_eq!(err.to_string(), "Error: host bridge not available for loading");

        assert_eq!(bridge.drain_completions().count(), 0);
    }

    #[test]
    fn save_then_load_through_the_channel() {
        let (bridge, saved) = memory_channel();
        let mut session = GameSession::new(&GameConfig::default());
        session.score = 5;
        session.player.position = Vec2::new(64.0, 96.0);

        bridge.save(&session).unwrap();
        assert!(saved.lock().unwrap().is_some());

        let mut fresh = GameSession::new(&GameConfig::default());
        bridge.request_load().unwrap();
        let completions: Vec<TaskCompleted> = bridge.drain_completions().collect();
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].task_id, LOAD_TASK_ID);

        LoadPayload::parse(&completions[0].result)
            .unwrap()
            .apply(&mut fresh);
        assert_eq!(fresh.score, 5);
        assert_eq!(fresh.player.position, Vec2::new(64.0, 96.0));
    }

    #[test]
    fn save_file_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        write_save_file(&path, r#"{"score":1}"#).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "{\n  \"score\": 1\n}");
    }

    #[test]
    fn missing_save_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_save_file(&dir.path().join("nope.json")).unwrap(), None);
    }

    #[test]
    fn file_bridge_posts_load_completion() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        write_save_file(&path, r#"{"score":12}"#).unwrap();

        let (sender, receiver) = crossbeam_channel::unbounded();
        let bridge = FileBridge::new(&path, sender);
        bridge.load_game_state();

        let completion = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(completion.task_id, LOAD_TASK_ID);
        assert_eq!(LoadPayload::parse(&completion.result).unwrap().score, Some(12));
    }
}
