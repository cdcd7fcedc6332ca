//! Player feedback: a fading banner and a persistent error line.

use std::time::Duration;

use bevy::prelude::*;

use crate::core::GameConfig;

/// Short-lived message. Fully opaque for `delay`, then fades out over
/// `fade`. Showing a new message replaces the old one and restarts the clock.
#[derive(Resource, Debug, Clone)]
pub struct Notification {
    message: String,
    elapsed: Duration,
    delay: Duration,
    fade: Duration,
    visible: bool,
}

impl Notification {
    pub fn new(delay: Duration, fade: Duration) -> Self {
        Self {
            message: String::new(),
            elapsed: Duration::ZERO,
            delay,
            fade,
            visible: false,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            Duration::from_secs_f32(config.notification_delay_secs),
            Duration::from_secs_f32(config.notification_fade_secs),
        )
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.elapsed = Duration::ZERO;
        self.visible = true;
    }

    pub fn tick(&mut self, delta: Duration) {
        if self.visible {
            self.elapsed += delta;
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn opacity(&self) -> f32 {
        if !self.visible {
            return 0.0;
        }
        let Some(fading_for) = self.elapsed.checked_sub(self.delay) else {
            return 1.0;
        };
        if self.fade.is_zero() {
            return 0.0;
        }
        1.0 - (fading_for.as_secs_f32() / self.fade.as_secs_f32()).min(1.0)
    }
}

/// Inline error line. Stays until replaced.
#[derive(Resource, Debug, Clone, Default)]
pub struct ErrorBanner(pub Option<String>);
