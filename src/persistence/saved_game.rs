//! The save snapshot and the partial load payload.
//!
//! Saving always writes every field. Loading is a merge: blocks and fields
//! missing from the payload keep their current values.

use serde::{Deserialize, Serialize};

use super::error::PersistenceError;
use crate::gameplay::{Facing, GameSession, PLAYER_FRAMES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlayer {
    pub x: f32,
    pub y: f32,
    pub frame_x: u32,
    pub frame_y: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCoin {
    pub x: f32,
    pub y: f32,
    pub collected: bool,
}

/// Full snapshot of the persisted fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub player: SavedPlayer,
    pub coin: SavedCoin,
    pub score: u32,
}

impl SavedGame {
    pub fn capture(session: &GameSession) -> Self {
        Self {
            player: SavedPlayer {
                x: session.player.position.x,
                y: session.player.position.y,
                frame_x: session.player.frame_x,
                frame_y: session.player.facing.row(),
            },
            coin: SavedCoin {
                x: session.coin.position.x,
                y: session.coin.position.y,
                collected: session.coin.collected,
            },
            score: session.score,
        }
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string(self).map_err(PersistenceError::Encode)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub frame_x: Option<u32>,
    pub frame_y: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CoinPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub collected: Option<bool>,
}

/// A parsed and validated load payload, ready to merge into a session.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoadPayload {
    pub player: Option<PlayerPatch>,
    pub coin: Option<CoinPatch>,
    pub score: Option<u32>,
}

impl LoadPayload {
    /// Parse and validate. Nothing is applied here, so a bad payload can
    /// never leave a session half-updated.
    pub fn parse(json: &str) -> Result<Self, PersistenceError> {
        let payload: Self = serde_json::from_str(json).map_err(PersistenceError::Parse)?;

        if let Some(player) = &payload.player {
            if let Some(frame_x) = player.frame_x.filter(|&f| f >= PLAYER_FRAMES) {
                return Err(PersistenceError::InvalidField {
                    field: "player.frameX",
                    value: frame_x.to_string(),
                });
            }
            if let Some(frame_y) = player.frame_y.filter(|&f| Facing::from_row(f).is_none()) {
                return Err(PersistenceError::InvalidField {
                    field: "player.frameY",
                    value: frame_y.to_string(),
                });
            }
        }

        Ok(payload)
    }

    /// Merge into the session. Must be called with exclusive access so the
    /// whole payload lands between two frames.
    ///
    /// A coin that ends up collected starts the respawn countdown if none is
    /// running yet.
    pub fn apply(&self, session: &mut GameSession) {
        if let Some(patch) = &self.player {
            let player = &mut session.player;
            if let Some(x) = patch.x {
                player.position.x = x;
            }
            if let Some(y) = patch.y {
                player.position.y = y;
            }
            if let Some(frame_x) = patch.frame_x {
                player.frame_x = frame_x;
            }
            if let Some(facing) = patch.frame_y.and_then(Facing::from_row) {
                player.facing = facing;
            }
            player.moving = false;
        }

        if let Some(patch) = &self.coin {
            if let Some(x) = patch.x {
                session.coin.position.x = x;
            }
            if let Some(y) = patch.y {
                session.coin.position.y = y;
            }
            if let Some(collected) = patch.collected {
                session.coin.collected = collected;
            }
            // A coin loaded as collected still needs to come back
            if session.coin.collected {
                session.schedule_respawn();
            }
        }

        if let Some(score) = self.score {
            session.score = score;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::Vec2;

    use crate::core::GameConfig;

    fn session() -> GameSession {
        GameSession::new(&GameConfig::default())
    }

    #[test]
    fn snapshot_uses_documented_field_names() {
        let mut s = session();
        s.player.facing = Facing::Right;
        s.player.frame_x = 1;
        s.score = 3;

        let json = SavedGame::capture(&s).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["player"]["x"], 200.0);
        assert_eq!(value["player"]["frameX"], 1);
        assert_eq!(value["player"]["frameY"], 2);
        assert_eq!(value["coin"]["y"], 150.0);
        assert_eq!(value["coin"]["collected"], false);
        assert_eq!(value["score"], 3);
    }

    #[test]
    fn round_trip_restores_persisted_fields() {
        let mut saved = session();
        saved.player.position = Vec2::new(123.5, 456.25);
        saved.player.frame_x = 2;
        saved.player.facing = Facing::Left;
        saved.player.moving = true;
        saved.coin.position = Vec2::new(33.0, 44.5);
        saved.coin.collected = true;
        saved.score = 17;
        let json = SavedGame::capture(&saved).to_json().unwrap();

        let mut restored = session();
        LoadPayload::parse(&json).unwrap().apply(&mut restored);

        assert_eq!(SavedGame::capture(&restored), SavedGame::capture(&saved));
        assert!(!restored.player.moving);
    }

    #[test]
    fn score_only_payload_leaves_entities_alone() {
        let mut s = session();
        s.player.position = Vec2::new(10.0, 20.0);
        let player_before = s.player.clone();
        let coin_before = s.coin.clone();

        LoadPayload::parse(r#"{"score": 9}"#).unwrap().apply(&mut s);

        assert_eq!(s.score, 9);
        assert_eq!(s.player, player_before);
        assert_eq!(s.coin, coin_before);
    }

    #[test]
    fn partial_blocks_merge_field_by_field() {
        let mut s = session();
        s.score = 4;
        LoadPayload::parse(r#"{"player": {"x": 50}, "coin": {"collected": false}}"#)
            .unwrap()
            .apply(&mut s);

        assert_eq!(s.player.position, Vec2::new(50.0, 300.0));
        assert_eq!(s.coin.position, Vec2::new(400.0, 150.0));
        assert_eq!(s.score, 4);
    }

    #[test]
    fn loading_a_collected_coin_schedules_its_respawn() {
        let mut s = session();
        LoadPayload::parse(r#"{"coin": {"x": 60, "y": 70, "collected": true}}"#)
            .unwrap()
            .apply(&mut s);
        assert!(s.coin.collected);
        assert!(s.respawn_pending());
    }

    #[test]
    fn loaded_maximum_score_survives_the_next_pickup() {
        let mut s = session();
        LoadPayload::parse(r#"{"score": 4294967295}"#)
            .unwrap()
            .apply(&mut s);
        assert_eq!(s.score, u32::MAX);

        s.player.position = s.coin.position;
        assert!(s.check_collision());
        assert_eq!(s.score, u32::MAX);
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        for bad in [
            "",
            "{not json",
            "42",
            r#"{"score": -1}"#,
            r#"{"score": "ten"}"#,
            r#"{"player": {"x": "left"}}"#,
            r#"{"coin": {"collected": 1}}"#,
        ] {
            assert!(
                matches!(LoadPayload::parse(bad), Err(PersistenceError::Parse(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn out_of_range_frames_are_rejected() {
        let err = LoadPayload::parse(r#"{"player": {"frameY": 4}}"#).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidField { field: "player.frameY", .. }));

        let err = LoadPayload::parse(r#"{"player": {"frameX": 3}}"#).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidField { field: "player.frameX", .. }));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let payload = LoadPayload::parse(r#"{"score": 2, "level": 5}"#).unwrap();
        assert_eq!(payload.score, Some(2));
    }
}
