use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use juggle_core::Clock;
use juggle_core::model::{
    Achievement, AchievementId, Module, ModuleId, PracticeSession, PracticeSessionDraft,
    ProgressChange, SessionId,
};
use storage::repository::{
    AchievementRepository, ModuleRepository, PracticeSessionRepository, Storage,
};

use crate::auth::UserSession;
use crate::config::{SimulatedLatency, simulate};
use crate::error::ProgressError;

pub const LOAD_FAILED: &str = "Failed to load user progress data.";
pub const UPDATE_FAILED: &str = "Failed to update module progress.";
pub const SESSION_FAILED: &str = "Failed to add practice session.";
pub const UNLOCK_FAILED: &str = "Failed to unlock achievement.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// Point-in-time copy of everything the store holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressSnapshot {
    pub phase: LoadPhase,
    pub modules: Vec<Module>,
    pub achievements: Vec<Achievement>,
    /// Insertion order; consumers sort for display.
    pub sessions: Vec<PracticeSession>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    SignedOut,
    Loaded,
    /// A later `load_progress` call started before this one committed.
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub module: Module,
    pub change: ProgressChange,
    /// The next module in sequence, if completing this one unlocked it.
    pub unlocked_next: Option<ModuleId>,
}

/// Single source of truth for the signed-in learner's modules,
/// achievements, and practice sessions.
///
/// Mutations run one at a time through an async gate; each simulates a round
/// trip, writes through the repositories, then updates the in-memory copy.
/// A failed mutation returns its error and leaves a message in `error`.
pub struct ProgressStore {
    clock: Clock,
    latency: SimulatedLatency,
    modules: Arc<dyn ModuleRepository>,
    achievements: Arc<dyn AchievementRepository>,
    sessions: Arc<dyn PracticeSessionRepository>,
    user_session: Arc<dyn UserSession>,
    state: Mutex<ProgressSnapshot>,
    gate: tokio::sync::Mutex<()>,
    generation: AtomicU64,
}

impl ProgressStore {
    #[must_use]
    pub fn new(
        clock: Clock,
        latency: SimulatedLatency,
        storage: &Storage,
        user_session: Arc<dyn UserSession>,
    ) -> Self {
        Self {
            clock,
            latency,
            modules: Arc::clone(&storage.modules),
            achievements: Arc::clone(&storage.achievements),
            sessions: Arc::clone(&storage.sessions),
            user_session,
            state: Mutex::new(ProgressSnapshot::default()),
            gate: tokio::sync::Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, ProgressSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.state().clone()
    }

    #[must_use]
    pub fn module(&self, id: &ModuleId) -> Option<Module> {
        self.state().modules.iter().find(|m| m.id() == id).cloned()
    }

    #[must_use]
    pub fn module_achievements(&self, module_id: &ModuleId) -> Vec<Achievement> {
        self.state()
            .achievements
            .iter()
            .filter(|a| a.module_id() == Some(module_id))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn module_sessions(&self, module_id: &ModuleId) -> Vec<PracticeSession> {
        self.state()
            .sessions
            .iter()
            .filter(|s| &s.module_id == module_id)
            .cloned()
            .collect()
    }

    /// Populate the store for the signed-in user, or reset it when nobody is.
    ///
    /// Safe to call repeatedly; when calls overlap only the latest commits.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the repositories cannot be read.
    pub async fn load_progress(&self) -> Result<LoadOutcome, ProgressError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _turn = self.gate.lock().await;

        if self.user_session.signed_in_user().is_none() {
            *self.state() = ProgressSnapshot::default();
            tracing::debug!("no signed-in user, progress left idle");
            return Ok(LoadOutcome::SignedOut);
        }

        {
            let mut state = self.state();
            state.phase = LoadPhase::Loading;
            state.loading = true;
            state.error = None;
        }
        simulate(self.latency.load).await;

        let fetched = self.fetch_all().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "discarding superseded progress load");
            return Ok(LoadOutcome::Superseded);
        }

        let mut state = self.state();
        state.loading = false;
        match fetched {
            Ok((modules, achievements, sessions)) => {
                tracing::info!(
                    modules = modules.len(),
                    achievements = achievements.len(),
                    sessions = sessions.len(),
                    "progress loaded"
                );
                state.modules = modules;
                state.achievements = achievements;
                state.sessions = sessions;
                state.phase = LoadPhase::Ready;
                Ok(LoadOutcome::Loaded)
            }
            Err(err) => {
                tracing::error!(error = %err, "{LOAD_FAILED}");
                state.error = Some(LOAD_FAILED.to_string());
                state.phase = if state.modules.is_empty() {
                    LoadPhase::Idle
                } else {
                    LoadPhase::Ready
                };
                Err(err)
            }
        }
    }

    async fn fetch_all(
        &self,
    ) -> Result<(Vec<Module>, Vec<Achievement>, Vec<PracticeSession>), ProgressError> {
        let modules = self.modules.list_modules().await?;
        let achievements = self.achievements.list_achievements().await?;
        let sessions = self.sessions.list_sessions().await?;
        Ok((modules, achievements, sessions))
    }

    /// Set a module's progress, clamped to [0, 100].
    ///
    /// Reaching 100 completes the module and unlocks the next one in sequence.
    ///
    /// # Errors
    ///
    /// Returns `ModuleNotFound` for an unknown id, `ModuleLocked` for a module
    /// that has not been unlocked, or a storage error.
    pub async fn update_module_progress(
        &self,
        module_id: &ModuleId,
        percent: i32,
    ) -> Result<ProgressUpdate, ProgressError> {
        let percent = u8::try_from(percent.clamp(0, 100)).unwrap_or(100);
        self.mutate(UPDATE_FAILED, || self.apply_progress(module_id, percent))
            .await
    }

    async fn apply_progress(
        &self,
        module_id: &ModuleId,
        percent: u8,
    ) -> Result<ProgressUpdate, ProgressError> {
        let (mut module, next) = {
            let state = self.state();
            let module = state
                .modules
                .iter()
                .find(|m| m.id() == module_id)
                .cloned()
                .ok_or_else(|| ProgressError::ModuleNotFound(module_id.clone()))?;
            let next = state
                .modules
                .iter()
                .filter(|m| m.order() > module.order())
                .min_by_key(|m| m.order())
                .cloned();
            (module, next)
        };

        let change = module.set_progress(percent)?;
        self.modules.upsert_module(&module).await?;

        let mut unlocked = None;
        if change.completed_now {
            if let Some(mut next) = next {
                if next.unlock() {
                    self.modules.upsert_module(&next).await?;
                    unlocked = Some(next);
                }
            }
        }

        {
            let mut state = self.state();
            replace_module(&mut state.modules, &module);
            if let Some(next) = &unlocked {
                replace_module(&mut state.modules, next);
            }
        }

        tracing::info!(
            module = %module_id,
            from = change.previous,
            to = change.current,
            status = %change.status,
            "module progress updated"
        );
        let unlocked_next = unlocked.map(|next| {
            tracing::info!(module = %next.id(), "next module unlocked");
            next.id().clone()
        });

        Ok(ProgressUpdate {
            module,
            change,
            unlocked_next,
        })
    }

    /// Validate and append a practice session stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `ModuleNotFound` when the session names an unknown module,
    /// `Session` for invalid input, or a storage error.
    pub async fn add_practice_session(
        &self,
        draft: PracticeSessionDraft,
    ) -> Result<PracticeSession, ProgressError> {
        self.mutate(SESSION_FAILED, || self.append_session(draft))
            .await
    }

    async fn append_session(
        &self,
        draft: PracticeSessionDraft,
    ) -> Result<PracticeSession, ProgressError> {
        let now = self.clock.now();
        let id = {
            let state = self.state();
            if !state.modules.iter().any(|m| m.id() == &draft.module_id) {
                return Err(ProgressError::ModuleNotFound(draft.module_id.clone()));
            }
            next_session_id(&state.sessions, now.timestamp_millis())
        };

        let session = draft.validate(id, now)?;
        self.sessions.append_session(&session).await?;
        self.state().sessions.push(session.clone());

        tracing::info!(
            session = %session.id,
            module = %session.module_id,
            minutes = session.duration_minutes,
            "practice session recorded"
        );
        Ok(session)
    }

    /// Unlock an achievement, keeping the first unlock time on repeat calls.
    ///
    /// Returns `Ok(false)` when the id is unknown or already unlocked.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the unlock cannot be persisted.
    pub async fn unlock_achievement(&self, id: &AchievementId) -> Result<bool, ProgressError> {
        self.mutate(UNLOCK_FAILED, || self.apply_unlock(id)).await
    }

    async fn apply_unlock(&self, id: &AchievementId) -> Result<bool, ProgressError> {
        let found = self
            .state()
            .achievements
            .iter()
            .find(|a| a.id() == id)
            .cloned();
        let Some(mut achievement) = found else {
            tracing::warn!(achievement = %id, "unknown achievement, nothing unlocked");
            return Ok(false);
        };
        if !achievement.unlock(self.clock.now()) {
            tracing::debug!(achievement = %id, "achievement already unlocked");
            return Ok(false);
        }

        self.achievements.upsert_achievement(&achievement).await?;
        if let Some(slot) = self
            .state()
            .achievements
            .iter_mut()
            .find(|a| a.id() == id)
        {
            *slot = achievement;
        }
        tracing::info!(achievement = %id, "achievement unlocked");
        Ok(true)
    }

    async fn mutate<T, F, Fut>(&self, failure: &'static str, op: F) -> Result<T, ProgressError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ProgressError>>,
    {
        let _turn = self.gate.lock().await;
        {
            let mut state = self.state();
            state.loading = true;
            state.error = None;
        }
        simulate(self.latency.mutation).await;

        let result = op().await;

        let mut state = self.state();
        state.loading = false;
        if let Err(err) = &result {
            tracing::error!(error = %err, "{failure}");
            state.error = Some(failure.to_string());
        }
        result
    }
}

fn replace_module(modules: &mut [Module], updated: &Module) {
    if let Some(slot) = modules.iter_mut().find(|m| m.id() == updated.id()) {
        *slot = updated.clone();
    }
}

/// `session-<millis>`, bumped past any id already taken.
fn next_session_id(existing: &[PracticeSession], millis: i64) -> SessionId {
    let mut millis = millis;
    loop {
        let candidate = SessionId::from_millis(millis);
        if existing.iter().all(|s| s.id != candidate) {
            return candidate;
        }
        millis += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use juggle_core::model::{ModuleStatus, User};
    use juggle_core::time::fixed_now;

    struct FixedSession(Option<User>);

    impl UserSession for FixedSession {
        fn signed_in_user(&self) -> Option<User> {
            self.0.clone()
        }
    }

    async fn loaded_store() -> ProgressStore {
        let storage = Storage::with_fixtures().unwrap();
        let user = storage.users.current_user().await.unwrap();
        let store = ProgressStore::new(
            Clock::fixed(fixed_now()),
            SimulatedLatency::none(),
            &storage,
            Arc::new(FixedSession(user)),
        );
        assert_eq!(store.load_progress().await.unwrap(), LoadOutcome::Loaded);
        store
    }

    #[tokio::test]
    async fn signed_out_load_is_idle_and_empty() {
        let storage = Storage::with_fixtures().unwrap();
        let store = ProgressStore::new(
            Clock::fixed(fixed_now()),
            SimulatedLatency::none(),
            &storage,
            Arc::new(FixedSession(None)),
        );
        assert_eq!(store.load_progress().await.unwrap(), LoadOutcome::SignedOut);
        let snapshot = store.snapshot();
        assert_eq!(snapshot.phase, LoadPhase::Idle);
        assert!(snapshot.modules.is_empty());
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn load_populates_from_storage() {
        let store = loaded_store().await;
        let snapshot = store.snapshot();
        assert_eq!(snapshot.phase, LoadPhase::Ready);
        assert_eq!(snapshot.modules.len(), 6);
        assert_eq!(snapshot.sessions.len(), 3);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn progress_is_clamped_and_status_derived() {
        let store = loaded_store().await;
        let id = ModuleId::new("module-2");

        let update = store.update_module_progress(&id, 250).await.unwrap();
        assert_eq!(update.change.current, 100);
        assert_eq!(update.module.status(), ModuleStatus::Completed);
        assert_eq!(update.unlocked_next, Some(ModuleId::new("module-3")));

        let update = store.update_module_progress(&id, -5).await.unwrap();
        assert_eq!(update.change.current, 0);
        assert_eq!(update.module.status(), ModuleStatus::InProgress);
        assert_eq!(update.unlocked_next, None);

        for module in store.snapshot().modules {
            assert_eq!(module.is_completed(), module.progress() == 100);
        }
    }

    #[tokio::test]
    async fn locked_and_unknown_modules_are_rejected() {
        let store = loaded_store().await;

        let err = store
            .update_module_progress(&ModuleId::new("module-4"), 20)
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::ModuleLocked(_)));
        assert_eq!(store.snapshot().error.as_deref(), Some(UPDATE_FAILED));

        let err = store
            .update_module_progress(&ModuleId::new("module-42"), 20)
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::ModuleNotFound(_)));

        store
            .update_module_progress(&ModuleId::new("module-2"), 60)
            .await
            .unwrap();
        let snapshot = store.snapshot();
        assert!(snapshot.error.is_none());
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn practice_sessions_are_append_only() {
        let store = loaded_store().await;
        let before = store.snapshot().sessions;

        let first = store
            .add_practice_session(
                PracticeSessionDraft::new(ModuleId::new("module-2"), 20, 4).with_notes(" rings "),
            )
            .await
            .unwrap();
        let second = store
            .add_practice_session(PracticeSessionDraft::new(ModuleId::new("module-1"), 10, 5))
            .await
            .unwrap();

        let after = store.snapshot().sessions;
        assert_eq!(after.len(), before.len() + 2);
        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(first.notes, "rings");
        assert_eq!(first.date, fixed_now());
        // Same fixed millisecond, so the second id is bumped.
        assert_ne!(first.id, second.id);
        assert_eq!(
            second.id,
            SessionId::from_millis(fixed_now().timestamp_millis() + 1)
        );
        assert_eq!(store.module_sessions(&ModuleId::new("module-2")).len(), 2);
    }

    #[tokio::test]
    async fn invalid_session_sets_error() {
        let store = loaded_store().await;
        let err = store
            .add_practice_session(PracticeSessionDraft::new(ModuleId::new("module-1"), 10, 9))
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::Session(_)));
        assert_eq!(store.snapshot().error.as_deref(), Some(SESSION_FAILED));
        assert_eq!(store.snapshot().sessions.len(), 3);
    }

    #[tokio::test]
    async fn unlock_is_idempotent_and_keeps_first_timestamp() {
        let store = loaded_store().await;
        let id = AchievementId::new("achievement-4");

        assert!(store.unlock_achievement(&id).await.unwrap());
        assert!(!store.unlock_achievement(&id).await.unwrap());

        let unlocked: Vec<Achievement> = store
            .module_achievements(&ModuleId::new("module-2"))
            .into_iter()
            .filter(|a| a.id() == &id)
            .collect();
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].unlocked_at(), Some(fixed_now()));
    }

    #[tokio::test]
    async fn unknown_achievement_is_a_quiet_no_op() {
        let store = loaded_store().await;
        let unlocked = store
            .unlock_achievement(&AchievementId::new("achievement-nope"))
            .await
            .unwrap();
        assert!(!unlocked);
        assert!(store.snapshot().error.is_none());
    }

    async fn slow_store() -> ProgressStore {
        let storage = Storage::with_fixtures().unwrap();
        let user = storage.users.current_user().await.unwrap();
        ProgressStore::new(
            Clock::fixed(fixed_now()),
            SimulatedLatency::default(),
            &storage,
            Arc::new(FixedSession(user)),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_session_appends_both_land() {
        let store = slow_store().await;
        store.load_progress().await.unwrap();

        let (first, second) = tokio::join!(
            store.add_practice_session(PracticeSessionDraft::new(ModuleId::new("module-2"), 20, 4)),
            store.add_practice_session(PracticeSessionDraft::new(ModuleId::new("module-1"), 10, 5)),
        );
        let (first, second) = (first.unwrap(), second.unwrap());
        assert_ne!(first.id, second.id);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.sessions.len(), 5);
        assert!(snapshot.sessions.iter().any(|s| s.id == first.id));
        assert!(snapshot.sessions.iter().any(|s| s.id == second.id));
        assert!(!snapshot.loading);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_progress_updates_apply_in_call_order() {
        let store = slow_store().await;
        store.load_progress().await.unwrap();
        let id = ModuleId::new("module-2");

        let (first, second) = tokio::join!(
            store.update_module_progress(&id, 60),
            store.update_module_progress(&id, 80),
        );
        assert_eq!(first.unwrap().change.current, 60);
        let second = second.unwrap();
        assert_eq!(second.change.previous, 60);
        assert_eq!(second.change.current, 80);

        let snapshot = store.snapshot();
        assert_eq!(store.module(&id).map(|m| m.progress()), Some(80));
        assert!(!snapshot.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_loads_commit_only_the_latest() {
        let store = slow_store().await;

        let (first, second) = tokio::join!(store.load_progress(), store.load_progress());
        assert_eq!(first.unwrap(), LoadOutcome::Superseded);
        assert_eq!(second.unwrap(), LoadOutcome::Loaded);
        assert_eq!(store.snapshot().phase, LoadPhase::Ready);
    }

    #[test]
    fn session_ids_skip_taken_values() {
        let taken = PracticeSession {
            id: SessionId::from_millis(5),
            module_id: ModuleId::new("module-1"),
            date: fixed_now(),
            duration_minutes: 1,
            notes: String::new(),
            rating: juggle_core::model::SessionRating::new(3).unwrap(),
            prop: None,
            metrics: Default::default(),
        };
        assert_eq!(next_session_id(&[taken], 5), SessionId::from_millis(6));
        assert_eq!(next_session_id(&[], 5), SessionId::from_millis(5));
    }
}
