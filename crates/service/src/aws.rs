//! AWS SDK implementation of [`AthenaApi`].

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_athena::config::{Credentials, Region};
use aws_sdk_athena::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_athena::types::{QueryExecutionContext, QueryExecutionState, ResultConfiguration};
use tracing::{debug, info};

use crate::api::{AthenaApi, QueryRequest};
use crate::config::AthenaConfig;
use crate::error::AthenaError;
use crate::result::{DatabaseInfo, QueryState, QueryStatus};

/// Provider error codes that indicate a credentials problem rather than a
/// generic service failure.
const CREDENTIAL_ERROR_CODES: &[&str] = &[
    "UnrecognizedClientException",
    "InvalidSignatureException",
    "AccessDeniedException",
    "ExpiredTokenException",
];

/// [`AthenaApi`] implementation over the AWS SDK client.
pub struct AwsAthenaApi {
    client: aws_sdk_athena::Client,
}

impl AwsAthenaApi {
    /// Build the SDK client using whichever credential source is configured:
    /// explicit key pair, named profile, or the default provider chain.
    ///
    /// Construction never fails; credential problems surface on the first
    /// call and are classified by [`classify`](Self::classify).
    pub async fn connect(config: &AthenaConfig) -> Self {
        let region = Region::new(config.region.clone());
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);

        if let (Some(key), Some(secret)) =
            (&config.aws_access_key_id, &config.aws_secret_access_key)
        {
            info!("using explicit AWS credentials");
            loader = loader.credentials_provider(Credentials::new(
                key.clone(),
                secret.clone(),
                None,
                None,
                "athena-connector",
            ));
        } else if let Some(profile) = &config.aws_profile {
            info!(profile = %profile, "using AWS profile credentials");
            loader = loader.profile_name(profile);
        } else {
            info!("using default AWS credential chain");
        }

        let sdk_config = loader.load().await;

        info!(
            region = %config.region,
            catalog = %config.data_catalog,
            "Athena client initialised"
        );

        Self {
            client: aws_sdk_athena::Client::new(&sdk_config),
        }
    }

    /// Map an SDK error into the service error taxonomy.
    ///
    /// Provider errors keep their code and message verbatim;
    /// credential-flavoured codes become [`AthenaError::Credentials`];
    /// everything else is stringified with its source chain.
    fn classify<E, R>(err: SdkError<E, R>) -> AthenaError
    where
        E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
        R: std::fmt::Debug,
    {
        if let Some(service_err) = err.as_service_error() {
            let code = service_err.code().unwrap_or("Unknown").to_string();
            let message = service_err
                .message()
                .unwrap_or("no error message")
                .to_string();

            if CREDENTIAL_ERROR_CODES.contains(&code.as_str()) {
                return AthenaError::Credentials(format!("{code}: {message}"));
            }
            return AthenaError::Service { code, message };
        }

        // Dispatch and construction failures carry no provider code; missing
        // credentials from the default chain land here.
        let text = format!("{}", DisplayErrorContext(err));
        if text.to_lowercase().contains("credential") {
            AthenaError::Credentials(text)
        } else {
            AthenaError::Unexpected(text)
        }
    }
}

#[async_trait]
impl AthenaApi for AwsAthenaApi {
    async fn list_databases(&self, catalog: &str) -> Result<Vec<DatabaseInfo>, AthenaError> {
        let output = self
            .client
            .list_databases()
            .catalog_name(catalog)
            .send()
            .await
            .map_err(Self::classify)?;

        let databases = output
            .database_list()
            .iter()
            .map(|db| DatabaseInfo {
                name: db.name().to_string(),
                description: db.description().map(|d| d.to_string()),
            })
            .collect();

        Ok(databases)
    }

    async fn start_query(&self, request: &QueryRequest) -> Result<String, AthenaError> {
        let output = self
            .client
            .start_query_execution()
            .query_string(&request.sql)
            .query_execution_context(
                QueryExecutionContext::builder()
                    .database(&request.database)
                    .build(),
            )
            .result_configuration(
                ResultConfiguration::builder()
                    .output_location(&request.output_location)
                    .build(),
            )
            .send()
            .await
            .map_err(Self::classify)?;

        let query_id = output
            .query_execution_id()
            .ok_or_else(|| AthenaError::Unexpected("no query execution id returned".into()))?
            .to_string();

        debug!(query_id = %query_id, "query execution started");
        Ok(query_id)
    }

    async fn query_status(&self, query_id: &str) -> Result<QueryStatus, AthenaError> {
        let output = self
            .client
            .get_query_execution()
            .query_execution_id(query_id)
            .send()
            .await
            .map_err(Self::classify)?;

        let status = output.query_execution().and_then(|qe| qe.status());

        let state = match status.and_then(|s| s.state()) {
            Some(QueryExecutionState::Succeeded) => QueryState::Succeeded,
            Some(QueryExecutionState::Failed) => QueryState::Failed,
            Some(QueryExecutionState::Cancelled) => QueryState::Cancelled,
            Some(QueryExecutionState::Running) => QueryState::Running,
            // Queued or an unknown future variant: not terminal yet.
            _ => QueryState::Submitted,
        };

        Ok(QueryStatus {
            state,
            reason: status
                .and_then(|s| s.state_change_reason())
                .map(|r| r.to_string()),
        })
    }

    async fn fetch_results(
        &self,
        query_id: &str,
    ) -> Result<Vec<Vec<Option<String>>>, AthenaError> {
        let output = self
            .client
            .get_query_results()
            .query_execution_id(query_id)
            .send()
            .await
            .map_err(Self::classify)?;

        let rows = output
            .result_set()
            .map(|rs| {
                rs.rows()
                    .iter()
                    .map(|row| {
                        row.data()
                            .iter()
                            .map(|datum| datum.var_char_value().map(|v| v.to_string()))
                            .collect()
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(rows)
    }

    async fn stop_query(&self, query_id: &str) -> Result<(), AthenaError> {
        self.client
            .stop_query_execution()
            .query_execution_id(query_id)
            .send()
            .await
            .map_err(Self::classify)?;

        debug!(query_id = %query_id, "query cancellation requested");
        Ok(())
    }
}
