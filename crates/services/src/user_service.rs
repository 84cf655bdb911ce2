use std::sync::Arc;

use juggle_core::model::User;
use storage::records::UserRecord;
use storage::repository::{StorageError, UserRepository};

use crate::api::ApiClient;
use crate::config::Endpoint;

#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    #[must_use]
    pub fn new(api: ApiClient, repo: Arc<dyn UserRepository>) -> Self {
        Self { api, repo }
    }

    /// The learner profile from the API, or the local one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only if the local fallback cannot be read.
    pub async fn current_user(&self) -> Result<Option<User>, StorageError> {
        let local = self.repo.current_user().await?;
        if !self.api.config().is_configured() {
            return Ok(local);
        }
        let remote: Option<UserRecord> = self.api.get_or(Endpoint::CurrentUser, None).await;
        match remote.map(UserRecord::into_user) {
            Some(Ok(user)) => Ok(Some(user)),
            Some(Err(err)) => {
                tracing::warn!(error = %err, "API returned an invalid user, using fallback data");
                Ok(local)
            }
            None => Ok(local),
        }
    }
}
