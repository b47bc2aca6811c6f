use club_api::api::registration;
use club_api::core::config::AppConfig;
use club_api::store::PgConnector;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    club_api::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let connector = PgConnector::new(&config);

    run(service_fn(|event: LambdaEvent<Value>| {
        registration::function_handler(&connector, event)
    }))
    .await
}
