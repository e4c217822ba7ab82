use thiserror::Error;

use crate::core::types::{SessionId, UserId};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("GPS accuracy {accuracy_m:.1} m exceeds the {limit_m:.0} m limit")]
    LowAccuracy { accuracy_m: f64, limit_m: f64 },

    #[error("Sample timestamp does not advance (dt = {dt_seconds:.3} s)")]
    NonMonotonicTime { dt_seconds: f64 },

    #[error("Implied speed {speed_kmh:.1} km/h exceeds the {limit_kmh:.0} km/h limit")]
    ExcessiveSpeed { speed_kmh: f64, limit_kmh: f64 },

    #[error("Session not found or already ended: {0:?}")]
    SessionNotFound(SessionId),

    #[error("User {0:?} already has an active session")]
    DuplicateActiveSession(UserId),

    #[error("Path needs at least 2 points, got {0}")]
    InsufficientPoints(usize),

    #[error("Territory write conflict persisted after {0} attempts")]
    StorageConflict(u32),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
