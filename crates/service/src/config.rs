use std::env;

use serde::{Deserialize, Serialize};

/// Region used when neither `AWS_DEFAULT_REGION` nor `AWS_REGION` is set.
const DEFAULT_REGION: &str = "us-east-1";

/// Data catalog queried for database listings.
const DEFAULT_DATA_CATALOG: &str = "AwsDataCatalog";

/// Database assumed when a tool call does not name one.
const DEFAULT_DATABASE: &str = "default";

/// Data rows rendered per result table before truncation.
const DEFAULT_MAX_DISPLAY_ROWS: usize = 20;

// ── Env helpers ──────────────────────────────────────────────────

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

fn env_usize(key: &str, default: usize) -> usize {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u64_opt(key: &str) -> Option<u64> {
    env_opt(key).and_then(|v| v.parse().ok())
}

// ── AthenaConfig ─────────────────────────────────────────────────

/// Configuration for the Athena connector.
///
/// Built once from environment variables at process start and passed into
/// every component constructor; read-only after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthenaConfig {
    /// AWS region for Athena calls.
    pub region: String,
    /// Explicit AWS access key id, if provided.
    pub aws_access_key_id: Option<String>,
    /// Explicit AWS secret access key, if provided.
    pub aws_secret_access_key: Option<String>,
    /// Named AWS profile, if provided.
    pub aws_profile: Option<String>,
    /// Data catalog queried for database listings.
    pub data_catalog: String,
    /// Database assumed when a tool call does not name one.
    pub default_database: String,
    /// S3 location where Athena writes query results.
    pub output_location: Option<String>,
    /// Data rows rendered per result table.
    pub max_display_rows: usize,
    /// Optional ceiling on the poll loop, in seconds. When unset the loop
    /// runs until the service resolves the query on its own.
    pub poll_timeout_seconds: Option<u64>,
}

impl AthenaConfig {
    /// Build config from environment variables.
    ///
    /// `AWS_DEFAULT_REGION` takes precedence over `AWS_REGION` for the
    /// region, matching the AWS CLI convention.
    pub fn from_env() -> Self {
        let region = env_opt("AWS_DEFAULT_REGION")
            .or_else(|| env_opt("AWS_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Self {
            region,
            aws_access_key_id: env_opt("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: env_opt("AWS_SECRET_ACCESS_KEY"),
            aws_profile: env_opt("AWS_PROFILE"),
            data_catalog: env_or("ATHENA_DATA_CATALOG", DEFAULT_DATA_CATALOG),
            default_database: env_or("ATHENA_DATABASE", DEFAULT_DATABASE),
            output_location: env_opt("AWS_S3_OUTPUT_LOCATION"),
            max_display_rows: env_usize("ATHENA_MAX_DISPLAY_ROWS", DEFAULT_MAX_DISPLAY_ROWS),
            poll_timeout_seconds: env_u64_opt("ATHENA_POLL_TIMEOUT_SECONDS"),
        }
    }

    /// Returns `true` when both halves of an explicit key pair are present.
    pub fn has_explicit_credentials(&self) -> bool {
        self.aws_access_key_id.is_some() && self.aws_secret_access_key.is_some()
    }

    /// Returns `true` when a named profile is configured.
    pub fn has_profile(&self) -> bool {
        self.aws_profile.is_some()
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env-based tests must run serially to avoid interfering with each other.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_config_env() {
        let keys = [
            "AWS_DEFAULT_REGION",
            "AWS_REGION",
            "AWS_ACCESS_KEY_ID",
            "AWS_SECRET_ACCESS_KEY",
            "AWS_PROFILE",
            "AWS_S3_OUTPUT_LOCATION",
            "ATHENA_DATA_CATALOG",
            "ATHENA_DATABASE",
            "ATHENA_MAX_DISPLAY_ROWS",
            "ATHENA_POLL_TIMEOUT_SECONDS",
        ];
        for k in keys {
            env::remove_var(k);
        }
    }

    #[test]
    fn defaults_when_no_env_vars() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_config_env();

        let cfg = AthenaConfig::from_env();

        assert_eq!(cfg.region, "us-east-1");
        assert_eq!(cfg.data_catalog, "AwsDataCatalog");
        assert_eq!(cfg.default_database, "default");
        assert_eq!(cfg.output_location, None);
        assert_eq!(cfg.max_display_rows, 20);
        assert_eq!(cfg.poll_timeout_seconds, None);
        assert!(!cfg.has_explicit_credentials());
        assert!(!cfg.has_profile());
    }

    #[test]
    fn from_env_reads_vars() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_config_env();

        env::set_var("AWS_S3_OUTPUT_LOCATION", "s3://my-bucket/results/");
        env::set_var("ATHENA_DATABASE", "analytics");
        env::set_var("ATHENA_MAX_DISPLAY_ROWS", "50");
        env::set_var("ATHENA_POLL_TIMEOUT_SECONDS", "120");

        let cfg = AthenaConfig::from_env();

        assert_eq!(
            cfg.output_location.as_deref(),
            Some("s3://my-bucket/results/")
        );
        assert_eq!(cfg.default_database, "analytics");
        assert_eq!(cfg.max_display_rows, 50);
        assert_eq!(cfg.poll_timeout_seconds, Some(120));

        clear_config_env();
    }

    #[test]
    fn default_region_takes_precedence_over_region() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_config_env();

        env::set_var("AWS_REGION", "us-west-2");
        env::set_var("AWS_DEFAULT_REGION", "eu-west-1");

        let cfg = AthenaConfig::from_env();
        assert_eq!(cfg.region, "eu-west-1");

        clear_config_env();
    }

    #[test]
    fn region_falls_back_to_aws_region() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_config_env();

        env::set_var("AWS_REGION", "ap-southeast-1");

        let cfg = AthenaConfig::from_env();
        assert_eq!(cfg.region, "ap-southeast-1");

        clear_config_env();
    }

    #[test]
    fn explicit_credentials_require_both_halves() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_config_env();

        env::set_var("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE");

        let cfg = AthenaConfig::from_env();
        assert!(!cfg.has_explicit_credentials());

        env::set_var("AWS_SECRET_ACCESS_KEY", "secret");

        let cfg = AthenaConfig::from_env();
        assert!(cfg.has_explicit_credentials());

        clear_config_env();
    }

    #[test]
    fn invalid_numeric_falls_back_to_default() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_config_env();

        env::set_var("ATHENA_MAX_DISPLAY_ROWS", "not_a_number");

        let cfg = AthenaConfig::from_env();
        assert_eq!(cfg.max_display_rows, 20);

        clear_config_env();
    }

    #[test]
    fn empty_env_var_counts_as_unset() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_config_env();

        env::set_var("AWS_S3_OUTPUT_LOCATION", "");

        let cfg = AthenaConfig::from_env();
        assert_eq!(cfg.output_location, None);

        clear_config_env();
    }
}
