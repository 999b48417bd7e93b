//! High-level Athena operations: catalog listing, query execution, and
//! schema description.
//!
//! [`AthenaService`] drives one query from submission to terminal outcome:
//! validate the output location, submit, poll until terminal, fetch, format.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::api::{AthenaApi, QueryRequest};
use crate::config::AthenaConfig;
use crate::error::AthenaError;
use crate::format::{format_database_list, format_result_table, truncate_for_log};
use crate::result::{QueryHandle, QueryOutcome, QueryState, ResultTable};
use crate::validate::{is_valid_database_name, validate_output_location};

/// Passive wait between poll observations.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Statement patterns worth a log warning before submission.
const MUTATING_PATTERNS: &[&str] = &[
    "DROP DATABASE",
    "DROP TABLE",
    "DELETE FROM",
    "TRUNCATE",
    "ALTER TABLE",
    "GRANT",
    "REVOKE",
];

/// Gateway for Athena operations.
///
/// Holds the shared service handle and read-only configuration. Calls carry
/// no mutable shared state, so one instance serves concurrent tool calls;
/// each call's poll loop suspends independently.
pub struct AthenaService {
    api: Arc<dyn AthenaApi>,
    config: AthenaConfig,
}

impl AthenaService {
    pub fn new(api: Arc<dyn AthenaApi>, config: AthenaConfig) -> Self {
        Self { api, config }
    }

    /// List all databases in the configured data catalog.
    ///
    /// An empty catalog is a success rendering the fixed no-databases
    /// message, not an error.
    pub async fn list_databases(&self) -> Result<String, AthenaError> {
        info!(catalog = %self.config.data_catalog, "listing available databases");

        let databases = self.api.list_databases(&self.config.data_catalog).await?;
        info!(count = databases.len(), "listed databases");

        Ok(format_database_list(&databases))
    }

    /// Execute a SQL query and return the formatted result table.
    pub async fn execute_query(&self, sql: &str, database: &str) -> Result<String, AthenaError> {
        info!(
            database = %database,
            sql = %truncate_for_log(sql, 100),
            "executing query"
        );
        warn_on_mutating_statement(sql);

        let output_location =
            validate_output_location(self.config.output_location.as_deref())?.to_string();

        let request = QueryRequest {
            sql: sql.to_string(),
            database: database.to_string(),
            output_location,
        };

        let handle = self.submit(request).await?;
        let query_id = handle.id.clone();

        match self.resolve(handle).await? {
            QueryOutcome::Succeeded { table } => {
                info!(query_id = %query_id, rows = table.row_count(), "query succeeded");
                Ok(format!(
                    "Query executed successfully:\n\n{}",
                    format_result_table(&table, self.config.max_display_rows)
                ))
            }
            QueryOutcome::Failed { reason } => {
                error!(query_id = %query_id, reason = %reason, "query failed");
                Err(AthenaError::QueryFailed { query_id, reason })
            }
            QueryOutcome::Cancelled => {
                warn!(query_id = %query_id, "query was cancelled");
                Err(AthenaError::QueryCancelled { query_id })
            }
        }
    }

    /// Describe a database by listing its tables.
    pub async fn describe_structure(&self, database: &str) -> Result<String, AthenaError> {
        info!(database = %database, "describing database structure");

        // The database name is interpolated into the statement, so it must
        // be a plain identifier.
        if !is_valid_database_name(database) {
            return Err(AthenaError::InvalidDatabaseName(database.to_string()));
        }

        let output_location =
            validate_output_location(self.config.output_location.as_deref())?.to_string();

        let request = QueryRequest {
            sql: format!("SHOW TABLES IN {database}"),
            database: database.to_string(),
            output_location,
        };

        let handle = self.submit(request).await?;
        let query_id = handle.id.clone();

        match self.resolve(handle).await? {
            QueryOutcome::Succeeded { table } => Ok(format!(
                "Tables available in database '{}':\n\n{}",
                database,
                format_result_table(&table, self.config.max_display_rows)
            )),
            QueryOutcome::Failed { reason } => {
                error!(query_id = %query_id, reason = %reason, "SHOW TABLES failed");
                Err(AthenaError::QueryFailed { query_id, reason })
            }
            QueryOutcome::Cancelled => Err(AthenaError::QueryCancelled { query_id }),
        }
    }

    /// Probe connectivity by listing databases, returning how many exist.
    ///
    /// Called once at startup. A credentials failure here is the signal to
    /// degrade every tool call to a configuration-error response.
    pub async fn test_connectivity(&self) -> Result<usize, AthenaError> {
        info!("testing connectivity with AWS Athena");

        let databases = self.api.list_databases(&self.config.data_catalog).await?;

        let preview: Vec<&str> = databases.iter().take(5).map(|db| db.name.as_str()).collect();
        info!(
            count = databases.len(),
            first = %preview.join(", "),
            "connection with AWS Athena established"
        );

        Ok(databases.len())
    }

    async fn submit(&self, request: QueryRequest) -> Result<QueryHandle, AthenaError> {
        let query_id = self.api.start_query(&request).await?;
        info!(query_id = %query_id, "query submitted");
        Ok(QueryHandle::new(query_id))
    }

    /// Poll until the handle reaches a terminal state and consume it into an
    /// outcome.
    ///
    /// One passive wait per non-terminal observation. Without a configured
    /// ceiling the loop runs until the service itself resolves the query.
    async fn resolve(&self, mut handle: QueryHandle) -> Result<QueryOutcome, AthenaError> {
        let deadline = self
            .config
            .poll_timeout_seconds
            .map(|secs| tokio::time::Instant::now() + Duration::from_secs(secs));

        loop {
            let status = self.api.query_status(&handle.id).await?;
            handle.state = status.state;

            match handle.state {
                QueryState::Succeeded => {
                    let rows = self.api.fetch_results(&handle.id).await?;
                    return Ok(QueryOutcome::Succeeded {
                        table: ResultTable::from_raw_rows(rows),
                    });
                }
                QueryState::Failed => {
                    return Ok(QueryOutcome::Failed {
                        reason: status
                            .reason
                            .unwrap_or_else(|| "Unknown error".to_string()),
                    });
                }
                QueryState::Cancelled => return Ok(QueryOutcome::Cancelled),
                QueryState::Submitted | QueryState::Running => {}
            }

            if let Some(deadline) = deadline {
                if tokio::time::Instant::now() >= deadline {
                    let seconds = self.config.poll_timeout_seconds.unwrap_or_default();
                    warn!(
                        query_id = %handle.id,
                        seconds,
                        "query timed out, requesting cancellation"
                    );
                    // Best-effort cancel; the timeout is reported either way.
                    let _ = self.api.stop_query(&handle.id).await;
                    return Err(AthenaError::QueryTimeout {
                        query_id: handle.id,
                        seconds,
                    });
                }
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

fn warn_on_mutating_statement(sql: &str) {
    let upper = sql.to_uppercase();
    for pattern in MUTATING_PATTERNS {
        if upper.contains(pattern) {
            warn!(pattern = %pattern, "potentially destructive SQL pattern in query");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests — scripted stub service, no AWS calls
// ---------------------------------------------------------------------------
