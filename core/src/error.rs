use crate::role::Role;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KioskError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Staffing is not ready: every active role needs an employee")]
    NotReady,

    #[error("No active shift session")]
    NoActiveSession,

    #[error("A shift session is active; change staffing first")]
    SessionActive,

    #[error("Solo assignment requires solo mode")]
    NotSolo,

    #[error("Role '{role}' is not active")]
    RoleInactive { role: Role },

    #[error("Unknown employee '{id}'")]
    UnknownEmployee { id: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KioskError {
    /// True for rejected intents that left every piece of state untouched.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotReady
                | Self::NoActiveSession
                | Self::SessionActive
                | Self::NotSolo
                | Self::RoleInactive { .. }
                | Self::UnknownEmployee { .. }
        )
    }
}

pub type KioskResult<T> = Result<T, KioskError>;
