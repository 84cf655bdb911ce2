use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Fixed API routes, relative to `ApiConfig::base_url`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Users,
    CurrentUser,
    Modules,
    UserProgress,
    PracticeSessions,
    News,
    Health,
}

impl Endpoint {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Users => "/users",
            Endpoint::CurrentUser => "/users/current",
            Endpoint::Modules => "/modules",
            Endpoint::UserProgress => "/user-progress",
            Endpoint::PracticeSessions => "/practice-sessions",
            Endpoint::News => "/news",
            Endpoint::Health => "/health",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Empty means no backend; every read serves fixture data.
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

    #[must_use]
    pub fn offline() -> Self {
        Self {
            base_url: String::new(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::offline()
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    /// Absolute URL for an endpoint, or `None` when no backend is configured.
    #[must_use]
    pub fn url(&self, endpoint: Endpoint) -> Option<String> {
        self.is_configured().then(|| {
            format!(
                "{}{}",
                self.base_url.trim().trim_end_matches('/'),
                endpoint.path()
            )
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::offline()
    }
}

/// Cloud settings surfaced on the profile page. Nothing in the app calls AWS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AwsConfig {
    pub region: String,
    pub user_pool_id: String,
    pub user_pool_client_id: String,
    pub media_bucket: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: "us-west-2".into(),
            user_pool_id: "mock-user-pool-id".into(),
            user_pool_client_id: "mock-client-id".into(),
            media_bucket: "mock-media-bucket".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
    pub use_mock_data: bool,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            name: "Juggling Dashboard".into(),
            version: "1.0.0".into(),
            environment: "development".into(),
            use_mock_data: true,
        }
    }
}

/// Artificial delays standing in for network round trips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub load: Duration,
    pub mutation: Duration,
    pub auth: Duration,
    pub logout: Duration,
    pub profile: Duration,
    pub submit: Duration,
}

impl SimulatedLatency {
    #[must_use]
    pub fn none() -> Self {
        Self {
            load: Duration::ZERO,
            mutation: Duration::ZERO,
            auth: Duration::ZERO,
            logout: Duration::ZERO,
            profile: Duration::ZERO,
            submit: Duration::ZERO,
        }
    }

    /// Multiply every delay by `factor`. Non-finite or negative factors disable latency.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return Self::none();
        }
        let scale = |d: Duration| d.mul_f64(factor);
        Self {
            load: scale(self.load),
            mutation: scale(self.mutation),
            auth: scale(self.auth),
            logout: scale(self.logout),
            profile: scale(self.profile),
            submit: scale(self.submit),
        }
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            load: Duration::from_millis(800),
            mutation: Duration::from_millis(500),
            auth: Duration::from_millis(1000),
            logout: Duration::from_millis(500),
            profile: Duration::from_millis(1000),
            submit: Duration::from_millis(1500),
        }
    }
}

/// Sleep for a simulated round trip. Zero durations return immediately.
pub(crate) async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub aws: AwsConfig,
    pub app: AppInfo,
    pub latency: SimulatedLatency,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to development defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a numeric variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|val| val.trim().to_string())
                .filter(|val| !val.is_empty())
        };

        let mut config = Self::default();

        if let Some(url) = get("JUGGLE_API_URL") {
            config.api.base_url = url;
        }
        if let Some(raw) = get("JUGGLE_API_TIMEOUT_MS") {
            let millis = raw.parse::<u64>().map_err(|_| ConfigError::InvalidInteger {
                key: "JUGGLE_API_TIMEOUT_MS",
                value: raw.clone(),
            })?;
            config.api.timeout = Duration::from_millis(millis);
        }

        if let Some(region) = get("JUGGLE_AWS_REGION") {
            config.aws.region = region;
        }
        if let Some(pool) = get("JUGGLE_USER_POOL_ID") {
            config.aws.user_pool_id = pool;
        }
        if let Some(client) = get("JUGGLE_USER_POOL_CLIENT_ID") {
            config.aws.user_pool_client_id = client;
        }
        if let Some(bucket) = get("JUGGLE_S3_MEDIA_BUCKET") {
            config.aws.media_bucket = bucket;
        }

        if let Some(environment) = get("JUGGLE_ENV") {
            config.app.environment = environment;
        }

        if let Some(raw) = get("JUGGLE_LATENCY_SCALE") {
            let factor = raw
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .ok_or_else(|| ConfigError::InvalidScale {
                    key: "JUGGLE_LATENCY_SCALE",
                    value: raw.clone(),
                })?;
            config.latency = config.latency.scaled(factor);
        }

        Ok(config)
    }
}
