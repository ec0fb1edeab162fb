use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use reaction_etl::adapters::http::{handle_request, ApiRequest, ApiResponse};
use reaction_etl::utils::{logger, validation::Validate};
use reaction_etl::{LambdaConfig, PostsFetcher, S3Storage};

struct Handler {
    fetcher: PostsFetcher,
    storage: S3Storage,
}

async fn function_handler(
    handler: &Handler,
    event: LambdaEvent<ApiRequest>,
) -> Result<ApiResponse, Error> {
    tracing::info!(request_id = %event.context.request_id, "Handling request");
    Ok(handle_request(&event.payload, &handler.fetcher, &handler.storage).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let lambda_config = LambdaConfig::from_env();
    lambda_config.validate()?;

    // 創建AWS配置和S3客戶端
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let config = aws_sdk_s3::config::Builder::from(&config)
        .region(Region::new(lambda_config.s3_region.clone()))
        .force_path_style(true)
        .build();
    let s3_client = S3Client::from_conf(config);

    let handler = Handler {
        fetcher: PostsFetcher::new(lambda_config.endpoint_template.clone()),
        storage: S3Storage::new(s3_client, lambda_config.s3_bucket.clone()),
    };
    let handler = &handler;

    run(service_fn(move |event| function_handler(handler, event))).await
}
