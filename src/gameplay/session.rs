//! The game session: all mutable world state and the per-frame update.
//!
//! Everything here is plain data and plain functions. Bevy systems in the
//! plugin call into it once per frame, which keeps the rules testable
//! without an `App`.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use super::components::*;
use super::geometry::{clamp_to_canvas, Aabb};
use crate::controls::DirectionKeys;
use crate::core::GameConfig;

/// What happened during one tick that the rest of the game may react to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub coin_collected: bool,
}

/// Player, coin, score and the frame clock for one play session.
#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    pub player: Player,
    pub coin: Coin,
    pub score: u32,
    /// Frames since the loop started; wraps on overflow
    pub frame_counter: u64,
    canvas: Vec2,
    spawn_margin: f32,
    respawn_delay: Duration,
    respawn: Option<Timer>,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            player: Player::new(config),
            coin: Coin::new(config),
            score: 0,
            frame_counter: 0,
            canvas: Vec2::new(config.canvas_width, config.canvas_height),
            spawn_margin: config.spawn_margin,
            respawn_delay: config.respawn_delay(),
            respawn: None,
        }
    }

    pub fn canvas(&self) -> Vec2 {
        self.canvas
    }

    pub fn respawn_pending(&self) -> bool {
        self.respawn.is_some()
    }

    /// Advance the world by one frame.
    ///
    /// Order matters: the clock ticks first, animations read the new count,
    /// then the player moves and the coin is tested against the new position.
    pub fn tick(&mut self, keys: DirectionKeys) -> TickOutcome {
        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.animate_player();
        self.animate_coin();
        self.move_player(keys);
        TickOutcome {
            coin_collected: self.check_collision(),
        }
    }

    fn animate_player(&mut self) {
        if self.player.moving && self.frame_counter % u64::from(self.player.frame_delay) == 0 {
            self.player.frame_x = (self.player.frame_x + 1) % PLAYER_FRAMES;
        }
    }

    fn animate_coin(&mut self) {
        if !self.coin.collected && self.frame_counter % u64::from(self.coin.animation_delay) == 0 {
            self.coin.frame_x = (self.coin.frame_x + 1) % self.coin.frame_count;
        }
    }

    /// Apply held keys. Left, right, up, down are handled in that order, so
    /// with several keys held the last one decides the facing. Diagonals are
    /// the plain sum of both axes.
    pub fn move_player(&mut self, keys: DirectionKeys) {
        let player = &mut self.player;
        player.moving = false;

        if keys.left {
            player.position.x -= player.speed;
            player.facing = Facing::Left;
            player.moving = true;
        }
        if keys.right {
            player.position.x += player.speed;
            player.facing = Facing::Right;
            player.moving = true;
        }
        if keys.up {
            player.position.y -= player.speed;
            player.facing = Facing::Up;
            player.moving = true;
        }
        if keys.down {
            player.position.y += player.speed;
            player.facing = Facing::Down;
            player.moving = true;
        }

        player.position = clamp_to_canvas(player.position, PLAYER_SIZE, self.canvas);
    }

    /// Collect the coin if the player overlaps it. Returns whether it was
    /// collected this call.
    pub fn check_collision(&mut self) -> bool {
        if self.coin.collected {
            return false;
        }

        let player_box = Aabb::new(self.player.position, PLAYER_SIZE);
        let coin_box = Aabb::new(self.coin.position, COIN_SIZE);
        if !player_box.overlaps(&coin_box) {
            return false;
        }

        self.coin.collected = true;
        // Never wraps back to zero, even from a loaded maximum
        self.score = self.score.saturating_add(1);
        self.schedule_respawn();
        true
    }

    /// Start the respawn countdown unless one is already running.
    pub fn schedule_respawn(&mut self) {
        if self.respawn.is_none() {
            self.respawn = Some(Timer::new(self.respawn_delay, TimerMode::Once));
        }
    }

    /// Advance the respawn countdown by wall-clock time. Returns `true` on the
    /// call that brings the coin back.
    pub fn tick_respawn(&mut self, delta: Duration, rng: &mut impl Rng) -> bool {
        let Some(timer) = self.respawn.as_mut() else {
            return false;
        };
        if !timer.tick(delta).finished() {
            return false;
        }

        self.respawn = None;
        self.coin.position = Vec2::new(
            rng.gen_range(self.spawn_margin..self.canvas.x - self.spawn_margin),
            rng.gen_range(self.spawn_margin..self.canvas.y - self.spawn_margin),
        );
        self.coin.collected = false;
        true
    }
}
