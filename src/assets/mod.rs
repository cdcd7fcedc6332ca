//! Asset module - loading the sprite sheets, tile and sound, and signalling
//! readiness.

mod bundle;
mod plugin;

pub use bundle::{AssetBundle, AssetStatus, Readiness};
pub use plugin::{AssetLoadingPlugin, GameAssets, RequiredAssets};
