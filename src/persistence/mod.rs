//! Persistence module - save/load through the host bridge.

mod bridge;
mod error;
mod plugin;
mod saved_game;

pub use bridge::{
    read_save_file, write_save_file, BridgeChannel, FileBridge, HostBridge, TaskCompleted,
    LOAD_TASK_ID,
};
pub use error::{BridgeOperation, PersistenceError};
pub use plugin::PersistencePlugin;
pub use saved_game::{CoinPatch, LoadPayload, PlayerPatch, SavedCoin, SavedGame, SavedPlayer};
