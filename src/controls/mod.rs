//! Controls module - keyboard state sampled once per frame.

mod plugin;
mod state;

pub use plugin::ControlsPlugin;
pub use state::{DirectionKeys, InputState};
