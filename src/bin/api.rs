use lambda_runtime::LambdaEvent;
use linebot::core::config::AppConfig;
use serde_json::Value;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    linebot::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        lambda_runtime::Error::from(e)
    })?;

    let dispatcher = linebot::build_dispatcher(&config).map_err(|e| {
        error!("Failed to initialize dispatcher: {}", e);
        lambda_runtime::Error::from(e)
    })?;
    info!(model = %config.gemini_model, "LINE webhook handler ready");

    let dispatcher = &dispatcher;
    lambda_runtime::run(lambda_runtime::service_fn(
        move |event: LambdaEvent<Value>| async move { linebot::api::handler(dispatcher, event).await },
    ))
    .await
}
