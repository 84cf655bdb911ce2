use std::sync::Arc;

use juggle_core::model::{ModuleId, PracticeSession, SessionId};
use storage::records::PracticeSessionRecord;
use storage::repository::{PracticeSessionRepository, StorageError};

use crate::api::ApiClient;
use crate::config::Endpoint;
use crate::error::ApiError;

/// Read access to recorded practice sessions, plus publishing to the backend.
#[derive(Clone)]
pub struct PracticeService {
    api: ApiClient,
    repo: Arc<dyn PracticeSessionRepository>,
}

impl PracticeService {
    #[must_use]
    pub fn new(api: ApiClient, repo: Arc<dyn PracticeSessionRepository>) -> Self {
        Self { api, repo }
    }

    /// # Errors
    ///
    /// Returns `StorageError` only if the local fallback cannot be read.
    pub async fn all_sessions(&self) -> Result<Vec<PracticeSession>, StorageError> {
        let local = self.repo.list_sessions().await?;
        if !self.api.config().is_configured() {
            return Ok(local);
        }
        let remote: Option<Vec<PracticeSessionRecord>> =
            self.api.get_or(Endpoint::PracticeSessions, None).await;
        Ok(remote.map_or(local, |records| {
            records
                .into_iter()
                .map(PracticeSessionRecord::into_session)
                .collect()
        }))
    }

    /// # Errors
    ///
    /// Returns `StorageError` only if the local fallback cannot be read.
    pub async fn sessions_for_module(
        &self,
        module_id: &ModuleId,
    ) -> Result<Vec<PracticeSession>, StorageError> {
        let sessions = self.all_sessions().await?;
        Ok(sessions
            .into_iter()
            .filter(|s| &s.module_id == module_id)
            .collect())
    }

    /// # Errors
    ///
    /// Returns `StorageError` only if the local fallback cannot be read.
    pub async fn session_by_id(
        &self,
        id: &SessionId,
    ) -> Result<Option<PracticeSession>, StorageError> {
        let sessions = self.all_sessions().await?;
        Ok(sessions.into_iter().find(|s| &s.id == id))
    }

    /// Send a recorded session to the backend.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any failure, including an unconfigured backend.
    pub async fn publish(&self, session: &PracticeSession) -> Result<(), ApiError> {
        let record = PracticeSessionRecord::from_session(session);
        let _: serde_json::Value = self.api.post(Endpoint::PracticeSessions, &record).await?;
        tracing::info!(session = %session.id, "practice session published");
        Ok(())
    }

    #[must_use]
    pub fn can_publish(&self) -> bool {
        self.api.config().is_configured()
    }
}
