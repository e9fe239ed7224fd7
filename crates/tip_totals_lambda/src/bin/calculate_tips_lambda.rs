use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tip_totals_core::config::TipTotalsConfig;
use tip_totals_lambda::adapters::dynamodb::DynamoRecordStore;
use tip_totals_lambda::adapters::sns::SnsNotifier;
use tip_totals_lambda::handlers::calculate_tips::{handle_invocation, ApiGatewayResponse};
use tip_totals_lambda::logging::init_logging;

#[derive(Clone)]
struct RuntimeDependencies {
    dynamodb_client: aws_sdk_dynamodb::Client,
    sns_client: aws_sdk_sns::Client,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<Option<ApiGatewayResponse>, Error> {
    Ok(handle_invocation(
        TipTotalsConfig::from_env(),
        DynamoRecordStore::new(deps.dynamodb_client.clone()),
        SnsNotifier::new(deps.sns_client.clone()),
        event.payload,
    )
    .await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging()?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        dynamodb_client: aws_sdk_dynamodb::Client::new(&aws_config),
        sns_client: aws_sdk_sns::Client::new(&aws_config),
    };

    lambda_runtime::run(service_fn(|event| handle_request(event, &deps))).await
}
