use thiserror::Error;

use crate::core::types::SeatId;

#[derive(Error, Debug)]
pub enum RandomiserError {
    #[error("Seat not found: {0}")]
    SeatNotFound(SeatId),

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Unknown {kind} referenced: {id}")]
    UnknownReference { kind: &'static str, id: String },

    #[error("Specific combo {0} names neither a leader nor a civilization")]
    UnanchoredCombo(String),

    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RandomiserError>;
