//! Global events used for cross-system communication.

use bevy::prelude::*;

/// Sent by the simulation when the player picks up the coin.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinCollectedEvent {
    /// Score after this collection
    pub score: u32,
}

/// The player asked to save (button or shortcut).
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SaveRequested;

/// The player asked to load (button or shortcut).
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct LoadRequested;

/// Feedback for the player, routed to the notification banner.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum NotifyEvent {
    /// Short-lived message that fades out
    Info(String),
    /// Persistent inline error line
    Error(String),
}
