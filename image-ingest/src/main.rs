use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use image_ingest::{
    fetcher::HttpImageFetcher,
    handler::{self, InvocationEvent},
    ingest::ImageIngestor,
    media_storage::MediaStorage,
    types::{Environment, IngestConfig},
};
use image_metadata_storage::image_record::ImageMetadataStorage;
use lambda_runtime::{service_fn, LambdaEvent};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();

    // JSON for the deployed stages, the log sink adds timestamps
    if environment.json_logs() {
        fmt()
            .json()
            .without_time()
            .with_env_filter(env_filter)
            .init();
    } else {
        fmt().with_env_filter(env_filter).init();
    }

    let config = IngestConfig::from_env()?;

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let dynamodb_client = Arc::new(DynamoDbClient::from_conf(
        environment.dynamodb_client_config().await,
    ));

    let ingestor = Arc::new(ImageIngestor::new(
        Arc::new(HttpImageFetcher::new()?),
        Arc::new(MediaStorage::new(s3_client, config.bucket_name.clone())),
        Arc::new(ImageMetadataStorage::new(
            dynamodb_client,
            config.table_name.clone(),
        )),
    ));

    tracing::info!(
        bucket = %config.bucket_name,
        table = %config.table_name,
        "image ingest handler ready"
    );

    lambda_runtime::run(service_fn(move |event: LambdaEvent<InvocationEvent>| {
        let ingestor = Arc::clone(&ingestor);
        async move { handler::handle_event(&ingestor, event).await }
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))
}
