//! AWS Athena query service.
//!
//! Owns the full lifecycle of a query behind the connector's tools:
//! configuration, output-location validation, submission, polling until a
//! terminal state, result fetching, and rendering for display.
//!
//! # Architecture
//!
//! - **config**: environment-sourced [`AthenaConfig`], built once at startup
//! - **api**: the [`AthenaApi`] seam between the gateway and the remote service
//! - **aws**: AWS SDK implementation of the seam
//! - **service**: [`AthenaService`], the submit / poll / fetch / format gateway
//! - **validate** / **format** / **result**: pure helpers and result types

pub mod api;
pub mod aws;
pub mod config;
pub mod error;
pub mod format;
pub mod result;
pub mod service;
pub mod validate;

pub use api::{AthenaApi, QueryRequest};
pub use aws::AwsAthenaApi;
pub use config::AthenaConfig;
pub use error::AthenaError;
pub use format::{format_database_list, format_result_table, truncate_for_log};
pub use result::{DatabaseInfo, QueryHandle, QueryOutcome, QueryState, QueryStatus, ResultTable};
pub use service::AthenaService;
pub use validate::{is_valid_database_name, validate_output_location, LocationError};
