use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{ApiConfig, Endpoint};
use crate::error::ApiError;

/// Thin HTTP client for the dashboard API.
///
/// Reads fall back to a caller-supplied payload on any failure; writes always
/// propagate their error.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Client with no backend; every read serves its fallback.
    #[must_use]
    pub fn offline() -> Self {
        Self::new(ApiConfig::offline())
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fetch and decode `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when no backend is configured, the request fails,
    /// the status is not 2xx, or the body does not decode.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let url = self.config.url(endpoint).ok_or(ApiError::NotConfigured)?;
        let response = self
            .client
            .get(url)
            .timeout(self.config.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Fetch `endpoint`, returning `fallback` on any failure.
    pub async fn get_or<T: DeserializeOwned>(&self, endpoint: Endpoint, fallback: T) -> T {
        match self.get(endpoint).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(endpoint = endpoint.path(), error = %err, "API request failed, using fallback data");
                fallback
            }
        }
    }

    /// Post a JSON body to `endpoint` and decode the response.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any failure; there is no fallback for writes.
    pub async fn post<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.url(endpoint).ok_or(ApiError::NotConfigured)?;
        let response = self
            .client
            .post(url)
            .timeout(self.config.timeout)
            .json(body)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(endpoint = endpoint.path(), error = %err, "API POST request failed");
                return Err(err.into());
            }
        };
        if !response.status().is_success() {
            tracing::error!(endpoint = endpoint.path(), status = %response.status(), "API POST request rejected");
            return Err(ApiError::HttpStatus(response.status()));
        }
        Ok(response.json().await?)
    }

    /// `true` when the backend answers its health check with 2xx.
    pub async fn health(&self) -> bool {
        let Some(url) = self.config.url(Endpoint::Health) else {
            return false;
        };
        match self
            .client
            .get(url)
            .timeout(self.config.timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                tracing::debug!(error = %err, "health check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_client_serves_fallback() {
        let client = ApiClient::offline();
        let value: Vec<u32> = client.get_or(Endpoint::Modules, vec![1, 2, 3]).await;
        assert_eq!(value, vec![1, 2, 3]);
        assert!(!client.health().await);
    }

    #[tokio::test]
    async fn offline_post_propagates() {
        let client = ApiClient::offline();
        let err = client
            .post::<_, serde_json::Value>(Endpoint::PracticeSessions, &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotConfigured));
    }
}
