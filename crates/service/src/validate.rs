//! Input validation for query submission.

/// Reasons an S3 output location is rejected.
///
/// Display messages include a corrective example so the rejection is
/// user-actionable as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    /// No location configured at all.
    #[error("AWS_S3_OUTPUT_LOCATION is required to execute queries. Configure it in your MCP settings.\n\nExample: s3://your-bucket/athena-results/")]
    Missing,

    /// The location does not use the `s3://` scheme.
    #[error("AWS_S3_OUTPUT_LOCATION must start with 's3://'. Current value: '{0}'\n\nExample: s3://your-bucket/athena-results/")]
    WrongScheme(String),

    /// `s3://` is present but no bucket precedes the first path separator.
    #[error("Invalid AWS_S3_OUTPUT_LOCATION format: '{0}'\n\nExample: s3://your-bucket/athena-results/")]
    EmptyBucket(String),
}

/// Validate an S3 output location before query submission.
///
/// Checks run in order: present, `s3://` scheme, non-empty bucket segment.
/// Pure function with no side effects; callers re-validate before every
/// submission since the configured value is only fixed per process.
pub fn validate_output_location(location: Option<&str>) -> Result<&str, LocationError> {
    let location = match location {
        Some(l) if !l.is_empty() => l,
        _ => return Err(LocationError::Missing),
    };

    let Some(rest) = location.strip_prefix("s3://") else {
        return Err(LocationError::WrongScheme(location.to_string()));
    };

    let bucket = rest.split('/').next().unwrap_or("");
    if bucket.is_empty() {
        return Err(LocationError::EmptyBucket(location.to_string()));
    }

    Ok(location)
}

/// Returns `true` when `name` is non-empty and contains only alphanumerics
/// and underscores, making it safe to interpolate into synthesized SQL.
pub fn is_valid_database_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
