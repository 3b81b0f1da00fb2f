use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::RecentSource;
use crate::config::DashboardConfig;
use crate::models::{ActorRecord, RepositoryRecord};

// ============================================================================
// Events REST API Client
// ============================================================================
//
// Thin reqwest wrapper for the two recent-items routes. No query parameters
// are sent on either route; the backend takes none. A request timeout is the
// only hardening at this layer - failures of any kind collapse into one
// FetchError bucket for the caller to log and count.
//
// ============================================================================

/// One bucket for everything that can go wrong in a fetch cycle:
/// transport errors, non-2xx responses, and bodies that fail to decode.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("backend returned {status} for {url}")]
    Status { url: String, status: StatusCode },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &DashboardConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("events-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.backend_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET {base_url}/actors/recent
    pub async fn recent_actors(&self) -> Result<Vec<ActorRecord>, FetchError> {
        self.fetch_list("/actors/recent").await
    }

    /// GET {base_url}/repositories/recent
    pub async fn recent_repositories(&self) -> Result<Vec<RepositoryRecord>, FetchError> {
        self.fetch_list("/repositories/recent").await
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, FetchError> {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(url = %url, "Fetching recent items");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|source| FetchError::Decode { url, source })
    }
}

// ============================================================================
// RecentSource implementations, one per route
// ============================================================================

pub struct RecentActorsEndpoint {
    client: Arc<BackendClient>,
}

impl RecentActorsEndpoint {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecentSource for RecentActorsEndpoint {
    type Record = ActorRecord;

    fn name(&self) -> &'static str {
        "recent_actors"
    }

    async fn fetch_recent(&self) -> Result<Vec<ActorRecord>, FetchError> {
        self.client.recent_actors().await
    }
}

pub struct RecentRepositoriesEndpoint {
    client: Arc<BackendClient>,
}

impl RecentRepositoriesEndpoint {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecentSource for RecentRepositoriesEndpoint {
    type Record = RepositoryRecord;

    fn name(&self) -> &'static str {
        "recent_repositories"
    }

    async fn fetch_recent(&self) -> Result<Vec<RepositoryRecord>, FetchError> {
        self.client.recent_repositories().await
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> BackendClient {
        let config = DashboardConfig {
            backend_base_url: server.url(),
            ..Default::default()
        };
        BackendClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_recent_actors_decodes_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/actors/recent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": 3, "login": "c"}, {"id": 1, "login": "a"}]"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let actors = client.recent_actors().await.unwrap();

        assert_eq!(actors.len(), 2);
        assert_eq!(actors[0].id, 3);
        assert_eq!(actors[1].login.as_deref(), Some("a"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_recent_actors_sends_no_query_parameters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/actors/recent")
            .match_query(mockito::Matcher::Missing)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = client_for(&server);
        client.recent_actors().await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_2xx_is_a_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/actors/recent")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.recent_actors().await.unwrap_err();

        assert!(matches!(
            err,
            FetchError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repositories/recent")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.recent_repositories().await.unwrap_err();

        assert!(matches!(err, FetchError::Decode { .. }));
    }
}
