//! Error types for Athena operations.

use crate::validate::LocationError;

/// Errors produced by Athena operations.
///
/// Every public service operation returns one of these instead of panicking;
/// the tool layer renders them as error responses, so nothing here crosses
/// the protocol boundary unhandled.
#[derive(Debug, thiserror::Error)]
pub enum AthenaError {
    /// The S3 output location failed validation.
    #[error("{0}")]
    Configuration(#[from] LocationError),

    /// AWS could not find or refused the supplied credentials.
    #[error("AWS credentials not found or incomplete: {0}. Configure AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY.")]
    Credentials(String),

    /// The provider API rejected a call; code and message are kept verbatim.
    #[error("AWS error ({code}): {message}")]
    Service { code: String, message: String },

    /// The query reached the FAILED state.
    #[error("Query {query_id} failed: {reason}")]
    QueryFailed { query_id: String, reason: String },

    /// The query reached the CANCELLED state.
    #[error("Query {query_id} was cancelled")]
    QueryCancelled { query_id: String },

    /// The configured poll ceiling elapsed before a terminal state.
    #[error("Query {query_id} timed out after {seconds}s")]
    QueryTimeout { query_id: String, seconds: u64 },

    /// A database name unsafe to interpolate into synthesized SQL.
    #[error("Invalid database name: '{0}'")]
    InvalidDatabaseName(String),

    /// Anything the other variants do not cover; raw message preserved.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = AthenaError::QueryFailed {
            query_id: "abc-123".into(),
            reason: "syntax error".into(),
        };
        assert!(err.to_string().contains("abc-123"));
        assert!(err.to_string().contains("syntax error"));

        let err = AthenaError::Service {
            code: "ThrottlingException".into(),
            message: "Rate exceeded".into(),
        };
        assert_eq!(
            err.to_string(),
            "AWS error (ThrottlingException): Rate exceeded"
        );

        let err = AthenaError::Credentials("no providers in chain".into());
        assert!(err.to_string().contains("AWS_ACCESS_KEY_ID"));

        let err = AthenaError::QueryTimeout {
            query_id: "t-1".into(),
            seconds: 60,
        };
        assert!(err.to_string().contains("60s"));
    }

    #[test]
    fn location_error_converts_to_configuration() {
        let err: AthenaError = LocationError::Missing.into();
        assert!(matches!(err, AthenaError::Configuration(_)));
        assert!(err.to_string().contains("AWS_S3_OUTPUT_LOCATION"));
    }
}
