use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use juggle_core::model::{LearningStyle, ProfileUpdate, User, UserId};
use rand::Rng;
use storage::repository::UserRepository;

use crate::config::{SimulatedLatency, simulate};
use crate::error::AuthError;

pub const LOGIN_FAILED: &str = "Failed to login. Please check your credentials.";
pub const REGISTER_FAILED: &str = "Failed to register. Please try again.";
pub const LOGOUT_FAILED: &str = "Failed to logout.";
pub const PROFILE_FAILED: &str = "Failed to update profile.";

const DEFAULT_AVATAR: &str = "https://i.pravatar.cc/300";

/// Read-only view of who is signed in, for stores that scope data to a user.
pub trait UserSession: Send + Sync {
    fn signed_in_user(&self) -> Option<User>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub authenticated: bool,
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Simulated sign-in state for the single local learner.
///
/// Credentials are not checked beyond presence; every call succeeds after a
/// fixed delay unless input is missing or invalid.
pub struct AuthStore {
    latency: SimulatedLatency,
    users: Arc<dyn UserRepository>,
    state: Mutex<AuthSnapshot>,
    gate: tokio::sync::Mutex<()>,
}

impl AuthStore {
    #[must_use]
    pub fn new(latency: SimulatedLatency, users: Arc<dyn UserRepository>) -> Self {
        Self {
            latency,
            users,
            state: Mutex::new(AuthSnapshot::default()),
            gate: tokio::sync::Mutex::new(()),
        }
    }

    fn state(&self) -> MutexGuard<'_, AuthSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        self.state().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state().authenticated
    }

    /// Sign in as the stored profile without delay, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the profile cannot be read.
    pub async fn restore_session(&self) -> Result<Option<User>, AuthError> {
        let user = self.users.current_user().await?;
        let mut state = self.state();
        state.authenticated = user.is_some();
        state.user.clone_from(&user);
        if let Some(user) = &user {
            tracing::debug!(user = %user.id(), "session restored");
        }
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for a blank email or when no
    /// local profile exists, `AuthError::Profile` for a malformed email.
    pub async fn login(&self, email: &str, _password: &str) -> Result<User, AuthError> {
        let _turn = self.gate.lock().await;
        self.begin();
        simulate(self.latency.auth).await;

        let result = self.sign_in(email).await;
        self.finish(&result, LOGIN_FAILED);
        result
    }

    async fn sign_in(&self, email: &str) -> Result<User, AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        let mut user = self
            .users
            .current_user()
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        user.apply(ProfileUpdate {
            email: Some(email.to_string()),
            ..ProfileUpdate::default()
        })?;
        self.users.save_user(&user).await?;

        let mut state = self.state();
        state.authenticated = true;
        state.user = Some(user.clone());
        tracing::info!(user = %user.id(), "signed in");
        Ok(user)
    }

    /// Create a fresh level-1 profile and sign in as it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for a blank email and
    /// `AuthError::Profile` when the name or email fails validation.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        _password: &str,
        learning_style: LearningStyle,
    ) -> Result<User, AuthError> {
        let _turn = self.gate.lock().await;
        self.begin();
        simulate(self.latency.auth).await;

        let result = self.create_account(name, email, learning_style).await;
        self.finish(&result, REGISTER_FAILED);
        result
    }

    async fn create_account(
        &self,
        name: &str,
        email: &str,
        learning_style: LearningStyle,
    ) -> Result<User, AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        let suffix: u32 = rand::rng().random_range(0..1000);
        let user = User::new(
            UserId::new(format!("user-{suffix}")),
            name,
            email,
            Some(DEFAULT_AVATAR.to_string()),
            learning_style,
            1,
        )?;
        self.users.save_user(&user).await?;

        let mut state = self.state();
        state.authenticated = true;
        state.user = Some(user.clone());
        tracing::info!(user = %user.id(), "registered");
        Ok(user)
    }

    /// # Errors
    ///
    /// Currently infallible; the signature matches the other mutations.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let _turn = self.gate.lock().await;
        self.begin();
        simulate(self.latency.logout).await;

        let result: Result<(), AuthError> = {
            let mut state = self.state();
            state.authenticated = false;
            state.user = None;
            Ok(())
        };
        self.finish(&result, LOGOUT_FAILED);
        tracing::info!("signed out");
        result
    }

    /// Merge `update` into the signed-in profile.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn` without a session and
    /// `AuthError::Profile` when a field fails validation.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User, AuthError> {
        let _turn = self.gate.lock().await;
        self.begin();
        simulate(self.latency.profile).await;

        let result = self.apply_profile(update).await;
        self.finish(&result, PROFILE_FAILED);
        result
    }

    async fn apply_profile(&self, update: ProfileUpdate) -> Result<User, AuthError> {
        let mut user = self.state().user.clone().ok_or(AuthError::NotSignedIn)?;
        user.apply(update)?;
        self.users.save_user(&user).await?;
        self.state().user = Some(user.clone());
        tracing::info!(user = %user.id(), "profile updated");
        Ok(user)
    }

    fn begin(&self) {
        let mut state = self.state();
        state.loading = true;
        state.error = None;
    }

    fn finish<T>(&self, result: &Result<T, AuthError>, failure: &str) {
        let mut state = self.state();
        state.loading = false;
        if let Err(err) = result {
            tracing::error!(error = %err, "{failure}");
            state.error = Some(failure.to_string());
        }
    }
}

impl UserSession for AuthStore {
    fn signed_in_user(&self) -> Option<User> {
        let state = self.state();
        if state.authenticated {
            state.user.clone()
        } else {
            None
        }
    }
}
