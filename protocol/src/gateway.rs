use chrono::{DateTime, Utc};
use manor_core::{ProgressEvent, Stage};

use crate::*;

/// Front door to a [`ProgressStore`]: checks the session and stage before
/// touching storage.
#[derive(Clone, Debug, Default)]
pub struct ProgressGateway<S> {
    store: S,
}

impl<S: ProgressStore> ProgressGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn user(session: Option<&Session>) -> Result<&UserId> {
        session.map(Session::user_id).ok_or(ProtocolError::Unauthenticated)
    }

    /// `GET /api/progress`
    pub fn load(&self, session: Option<&Session>) -> Result<Vec<UserProgress>> {
        self.store.list(Self::user(session)?)
    }

    /// `POST /api/progress`
    pub fn save(
        &mut self,
        session: Option<&Session>,
        request: &SaveProgressRequest,
        at: DateTime<Utc>,
    ) -> Result<SaveResponse> {
        let user = Self::user(session)?;
        request.stage()?;
        self.store.save(user, request, at)?;
        Ok(SaveResponse { success: true })
    }

    pub fn save_event(
        &mut self,
        session: Option<&Session>,
        event: ProgressEvent,
        at: DateTime<Utc>,
    ) -> Result<SaveResponse> {
        self.save(session, &event.into(), at)
    }

    /// Saves and forgets. A failed save is logged and leaves the stored row stale.
    pub fn save_quietly(
        &mut self,
        session: Option<&Session>,
        event: ProgressEvent,
        at: DateTime<Utc>,
    ) -> bool {
        let stage = event.stage;
        match self.save_event(session, event, at) {
            Ok(_) => true,
            Err(err) => {
                log::error!("Error saving progress for stage {stage}: {err}");
                false
            }
        }
    }

    pub fn unlocked_stages(&self, session: Option<&Session>) -> Result<Vec<Stage>> {
        Ok(unlocked_stages(&self.load(session)?))
    }
}
