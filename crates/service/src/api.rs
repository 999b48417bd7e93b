//! Seam between the query gateway and the remote query service.

use async_trait::async_trait;

use crate::error::AthenaError;
use crate::result::{DatabaseInfo, QueryStatus};

/// One query submission, built per invocation and dropped when the call
/// returns.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub sql: String,
    pub database: String,
    pub output_location: String,
}

/// Remote query-service operations the gateway drives.
///
/// Implemented by [`AwsAthenaApi`](crate::aws::AwsAthenaApi) in production
/// and by scripted stubs in tests. Implementations must be safe for
/// concurrent use; one instance is shared across in-flight tool calls.
#[async_trait]
pub trait AthenaApi: Send + Sync {
    /// List the databases in a data catalog.
    async fn list_databases(&self, catalog: &str) -> Result<Vec<DatabaseInfo>, AthenaError>;

    /// Submit a query, returning the opaque execution identifier.
    async fn start_query(&self, request: &QueryRequest) -> Result<String, AthenaError>;

    /// Observe the current lifecycle state of an execution.
    async fn query_status(&self, query_id: &str) -> Result<QueryStatus, AthenaError>;

    /// Fetch the raw result payload of a succeeded execution.
    ///
    /// Rows are returned verbatim, header row first; `None` cells are SQL
    /// NULL.
    async fn fetch_results(&self, query_id: &str)
        -> Result<Vec<Vec<Option<String>>>, AthenaError>;

    /// Request cancellation of a running execution.
    async fn stop_query(&self, query_id: &str) -> Result<(), AthenaError>;
}
