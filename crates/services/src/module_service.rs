use std::sync::Arc;

use juggle_core::model::{JugglingProp, Module, ModuleId, ModuleStatus};
use storage::records::{ModuleRecord, modules_from_records};
use storage::repository::{ModuleRepository, StorageError};

use crate::api::ApiClient;
use crate::config::Endpoint;

/// Search and facet filters for the module list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleFilter {
    pub query: String,
    pub prop: Option<JugglingProp>,
    pub status: Option<ModuleStatus>,
}

impl ModuleFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.prop.is_none() && self.status.is_none()
    }

    #[must_use]
    pub fn matches(&self, module: &Module) -> bool {
        let needle = self.query.trim().to_lowercase();
        module.matches_text(&needle)
            && self.prop.is_none_or(|prop| module.prop() == prop)
            && self.status.is_none_or(|status| module.status() == status)
    }

    /// Modules that pass every active filter, in their original order.
    #[must_use]
    pub fn apply(&self, modules: &[Module]) -> Vec<Module> {
        modules.iter().filter(|m| self.matches(m)).cloned().collect()
    }
}

/// Module catalog backed by the API, with local data as the fallback.
#[derive(Clone)]
pub struct ModuleCatalogService {
    api: ApiClient,
    repo: Arc<dyn ModuleRepository>,
}

impl ModuleCatalogService {
    #[must_use]
    pub fn new(api: ApiClient, repo: Arc<dyn ModuleRepository>) -> Self {
        Self { api, repo }
    }

    /// All modules in program order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only if the local fallback cannot be read.
    pub async fn all_modules(&self) -> Result<Vec<Module>, StorageError> {
        let fallback = self.repo.list_modules().await?;
        if !self.api.config().is_configured() {
            return Ok(fallback);
        }

        let records: Vec<ModuleRecord> = self
            .api
            .get_or(
                Endpoint::Modules,
                fallback.iter().map(ModuleRecord::from_module).collect(),
            )
            .await;
        match modules_from_records(records) {
            Ok(modules) => Ok(modules),
            Err(err) => {
                tracing::warn!(error = %err, "API returned invalid modules, using fallback data");
                Ok(fallback)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError` only if the local fallback cannot be read.
    pub async fn module_by_id(&self, id: &ModuleId) -> Result<Option<Module>, StorageError> {
        let modules = self.all_modules().await?;
        Ok(modules.into_iter().find(|m| m.id() == id))
    }

    /// # Errors
    ///
    /// Returns `StorageError` only if the local fallback cannot be read.
    pub async fn filter(&self, filter: &ModuleFilter) -> Result<Vec<Module>, StorageError> {
        let modules = self.all_modules().await?;
        Ok(filter.apply(&modules))
    }
}
