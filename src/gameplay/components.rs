//! Player and coin state, plus the sprite markers that render them.
//!
//! Positions are canvas coordinates: origin at the top-left corner, y grows
//! downward, units are pixels.

use bevy::prelude::*;

use crate::core::GameConfig;

pub const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 32.0);
pub const COIN_SIZE: Vec2 = Vec2::new(12.0, 16.0);
pub const TILE_SIZE: f32 = 32.0;

/// Columns in the player sheet (walk cycle length).
pub const PLAYER_FRAMES: u32 = 3;
/// Rows in the player sheet, one per facing.
pub const PLAYER_ROWS: u32 = 4;
/// Frames in the coin spin cycle.
pub const COIN_FRAMES: u32 = 8;

pub const PLAYER_START: Vec2 = Vec2::new(200.0, 300.0);
pub const COIN_START: Vec2 = Vec2::new(400.0, 150.0);

/// Which way the player faces. The discriminant is the sprite sheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Down = 0,
    Left = 1,
    Right = 2,
    Up = 3,
}

impl Facing {
    pub fn row(self) -> u32 {
        self as u32
    }

    pub fn from_row(row: u32) -> Option<Self> {
        match row {
            0 => Some(Facing::Down),
            1 => Some(Facing::Left),
            2 => Some(Facing::Right),
            3 => Some(Facing::Up),
            _ => None,
        }
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Vec2,
    /// Pixels per frame along each pressed axis
    pub speed: f32,
    /// Column in the walk cycle, 0..PLAYER_FRAMES
    pub frame_x: u32,
    pub facing: Facing,
    pub moving: bool,
    /// Walk cycle advances once every `frame_delay` frames
    pub frame_delay: u32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: PLAYER_START,
            speed: config.player_speed,
            frame_x: 0,
            facing: Facing::Down,
            moving: false,
            frame_delay: config.player_frame_delay,
        }
    }

    /// Index into the player texture atlas (row-major).
    pub fn atlas_index(&self) -> usize {
        (self.facing.row() * PLAYER_FRAMES + self.frame_x) as usize
    }
}

/// The collectible coin.
#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub position: Vec2,
    /// Frame of the spin cycle, 0..frame_count
    pub frame_x: u32,
    pub frame_count: u32,
    /// Spin advances once every `animation_delay` frames
    pub animation_delay: u32,
    pub collected: bool,
}

impl Coin {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: COIN_START,
            frame_x: 0,
            frame_count: COIN_FRAMES,
            animation_delay: config.coin_animation_delay,
            collected: false,
        }
    }
}

/// Marker for the entity drawing the player.
#[derive(Component)]
pub struct PlayerSprite;

/// Marker for the entity drawing the coin.
#[derive(Component)]
pub struct CoinSprite;

/// Marker for background tile entities.
#[derive(Component)]
pub struct BackgroundTile;
