//! Club API - two Lambda functions giving CRUD access to the club's content
//! and member registrations.
//!
//! # Architecture
//!
//! - `content-api` serves news, achievements and gallery items, selected by a
//!   `type` query parameter
//! - `register-api` serves member registrations, including partial updates
//!
//! Each invocation parses the API Gateway event, validates it, opens one
//! PostgreSQL connection, runs a single statement and returns a JSON response
//! with permissive CORS headers.
//!
//! # Example
//!
//! ```no_run
//! use club_api::core::config::AppConfig;
//! use club_api::store::PgConnector;
//! use lambda_runtime::{LambdaEvent, service_fn};
//! use serde_json::Value;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     club_api::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let connector = PgConnector::new(&config);
//!
//!     lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
//!         club_api::api::content::function_handler(&connector, event)
//!     }))
//!     .await
//! }
//! ```

pub mod api;
pub mod core;
pub mod errors;
pub mod store;

pub use errors::ApiError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Output goes to `CloudWatch` Logs. The level is taken from `RUST_LOG` and
/// defaults to `info`. Calling this more than once is harmless.
///
/// # Example
///
/// ```
/// club_api::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
