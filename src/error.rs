//! Error types.
//!
//! `GameError` covers everything that stops the game from starting or from
//! loading a level.  Terminal failures belong to the binary.  Audio playback
//! has its own error type because it is always swallowed (see
//! [`crate::audio::play_sound`]).

use thiserror::Error;

use crate::entities::Category;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("{kind} asset not found: {name}")]
    AssetNotFound { kind: &'static str, name: String },

    #[error("invalid setting {name}={value}")]
    InvalidSetting { name: &'static str, value: String },

    #[error("{0:?} is not an enemy category")]
    NotAnEnemy(Category),
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device unavailable")]
    Unavailable,

    #[error("playback failed: {0}")]
    Playback(#[from] std::io::Error),
}
