use manor_core::PuzzleError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid stage")]
    InvalidStage,
    #[error("User not found")]
    Unauthenticated,
    #[error("Progress store failed: {0}")]
    Store(String),
    #[error(transparent)]
    Core(#[from] PuzzleError),
}

impl ProtocolError {
    /// HTTP status the API answers with.
    pub const fn status(&self) -> u16 {
        match self {
            Self::InvalidStage | Self::Core(_) => 400,
            Self::Unauthenticated => 401,
            Self::Store(_) => 500,
        }
    }
}

pub type Result<T> = core::result::Result<T, ProtocolError>;
