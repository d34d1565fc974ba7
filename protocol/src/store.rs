use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use manor_core::Stage;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Updated,
}

/// Progress rows keyed by (user, stage). Saves upsert; the last write wins.
pub trait ProgressStore {
    /// Every row of `user`, ordered by stage.
    fn list(&self, user: &UserId) -> Result<Vec<UserProgress>>;

    fn save(
        &mut self,
        user: &UserId,
        request: &SaveProgressRequest,
        at: DateTime<Utc>,
    ) -> Result<SaveOutcome>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryProgressStore {
    rows: HashMap<(UserId, Stage), UserProgress>,
    next_id: i64,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn list(&self, user: &UserId) -> Result<Vec<UserProgress>> {
        let mut rows: Vec<UserProgress> = self
            .rows
            .values()
            .filter(|row| &row.user_id == user)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.stage);
        Ok(rows)
    }

    fn save(
        &mut self,
        user: &UserId,
        request: &SaveProgressRequest,
        at: DateTime<Utc>,
    ) -> Result<SaveOutcome> {
        let stage = request.stage()?;

        if let Some(row) = self.rows.get_mut(&(user.clone(), stage)) {
            row.completed_puzzles = request.completed_puzzles.clone();
            row.current_stage_progress = request.current_stage_progress.clone();
            row.is_completed = request.is_completed;
            row.updated_at = at;
            log::debug!("updated progress {} for {user} stage {stage}", row.id);
            return Ok(SaveOutcome::Updated);
        }

        self.next_id += 1;
        let row = UserProgress {
            id: self.next_id,
            user_id: user.clone(),
            stage,
            completed_puzzles: request.completed_puzzles.clone(),
            current_stage_progress: request.current_stage_progress.clone(),
            is_completed: request.is_completed,
            created_at: at,
            updated_at: at,
        };
        log::debug!("inserted progress {} for {user} stage {stage}", row.id);
        self.rows.insert((user.clone(), stage), row);
        Ok(SaveOutcome::Inserted)
    }
}
