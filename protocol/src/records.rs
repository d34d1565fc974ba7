use chrono::{DateTime, Utc};
use manor_core::{ProgressEvent, Stage};
use serde::{Deserialize, Serialize};

use crate::*;

/// Persisted progress for one (user, stage) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    pub id: i64,
    pub user_id: UserId,
    pub stage: Stage,
    pub completed_puzzles: Option<String>,
    pub current_stage_progress: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/progress`. The stage is kept raw so it can be validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveProgressRequest {
    pub stage: u8,
    #[serde(default)]
    pub completed_puzzles: Option<String>,
    #[serde(default)]
    pub current_stage_progress: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

impl SaveProgressRequest {
    pub fn stage(&self) -> Result<Stage> {
        Stage::try_from(self.stage).map_err(|_| ProtocolError::InvalidStage)
    }
}

impl From<ProgressEvent> for SaveProgressRequest {
    fn from(event: ProgressEvent) -> Self {
        Self {
            stage: event.stage.number(),
            completed_puzzles: Some(event.completed_puzzles),
            current_stage_progress: Some(event.current_stage_progress),
            is_completed: event.is_completed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl From<&ProtocolError> for ApiError {
    fn from(err: &ProtocolError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Parses the `:stage` path segment of `/api/puzzles/:stage`.
pub fn parse_stage_param(param: &str) -> Result<Stage> {
    param
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(|number| Stage::try_from(number).ok())
        .ok_or(ProtocolError::InvalidStage)
}
