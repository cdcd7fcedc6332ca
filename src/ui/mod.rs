//! UI module - HUD, notifications and error screens.

mod hud;
mod notification;
mod plugin;

pub use hud::{ErrorText, NotificationText, ScoreText};
pub use notification::{ErrorBanner, Notification};
pub use plugin::UiPlugin;
