use async_trait::async_trait;

use crate::models::DisplayRecord;

// ============================================================================
// Backend API Module
// ============================================================================
//
// HTTP access to the events REST API. The pollers consume the `RecentSource`
// trait rather than the concrete client, so tests can script responses
// without a server.
//
// ============================================================================

mod backend;

pub use backend::{BackendClient, FetchError, RecentActorsEndpoint, RecentRepositoriesEndpoint};

/// A remote source of "recent items" for one displayed list
#[async_trait]
pub trait RecentSource: Send + Sync + 'static {
    type Record: DisplayRecord + std::fmt::Debug + Clone + Send + Sync + 'static;

    /// Component name used in logs, metrics labels, and health reports
    fn name(&self) -> &'static str;

    /// One fetch: request, decode, and return the raw (unsorted) records
    async fn fetch_recent(&self) -> Result<Vec<Self::Record>, FetchError>;
}
