use std::sync::Arc;
use std::time::Duration;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use image_ingest::{
    fetcher::HttpImageFetcher, ingest::ImageIngestor, media_storage::MediaStorage,
    types::IngestConfig,
};
use image_metadata_storage::image_record::{ImageMetadataStorage, ImageRecordAttribute};
use uuid::Uuid;

/// Test configuration for LocalStack
const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";
const TEST_REGION: &str = "us-east-1";

/// Initialize tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

async fn localstack_config() -> SdkConfig {
    let credentials = Credentials::from_keys("test", "test", None);
    aws_config::defaults(BehaviorVersion::latest())
        .endpoint_url(LOCALSTACK_ENDPOINT)
        .region(Region::new(TEST_REGION))
        .credentials_provider(credentials)
        .load()
        .await
}

/// Ingestor wired to a fresh LocalStack bucket and table
///
/// Tests end with [`TestContext::teardown`] so nothing is left in LocalStack.
pub struct TestContext {
    pub config: IngestConfig,
    pub s3_client: Arc<S3Client>,
    pub dynamodb_client: Arc<DynamoDbClient>,
    pub metadata_storage: Arc<ImageMetadataStorage>,
    pub ingestor: ImageIngestor,
}

impl TestContext {
    pub async fn new() -> Self {
        setup_test_env();

        let config = IngestConfig::new(
            format!("test-images-{}", Uuid::new_v4()),
            format!("test-image-records-{}", Uuid::new_v4()),
        );
        let aws_config = localstack_config().await;

        // Path style addressing for LocalStack
        let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
            .force_path_style(true)
            .build();
        let s3_client = Arc::new(S3Client::from_conf(s3_config));
        s3_client
            .create_bucket()
            .bucket(&config.bucket_name)
            .send()
            .await
            .expect("Failed to create test bucket");

        let dynamodb_client = Arc::new(DynamoDbClient::new(&aws_config));
        dynamodb_client
            .create_table()
            .table_name(&config.table_name)
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(ImageRecordAttribute::Name.to_string())
                    .attribute_type(ScalarAttributeType::S)
                    .build()
                    .unwrap(),
            )
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name(ImageRecordAttribute::Name.to_string())
                    .key_type(KeyType::Hash)
                    .build()
                    .unwrap(),
            )
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await
            .expect("Failed to create test table");

        // Wait for table to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        let metadata_storage = Arc::new(ImageMetadataStorage::new(
            dynamodb_client.clone(),
            config.table_name.clone(),
        ));
        let ingestor = ImageIngestor::new(
            Arc::new(HttpImageFetcher::new().expect("Failed to build fetcher")),
            Arc::new(MediaStorage::new(
                s3_client.clone(),
                config.bucket_name.clone(),
            )),
            metadata_storage.clone(),
        );

        Self {
            config,
            s3_client,
            dynamodb_client,
            metadata_storage,
            ingestor,
        }
    }

    /// Keys currently stored in the test bucket
    pub async fn object_keys(&self) -> Vec<String> {
        let response = self
            .s3_client
            .list_objects_v2()
            .bucket(&self.config.bucket_name)
            .send()
            .await
            .expect("Failed to list objects");

        response
            .contents()
            .iter()
            .filter_map(|object| object.key().map(ToString::to_string))
            .collect()
    }

    /// Body of an object in the test bucket
    pub async fn object_bytes(&self, key: &str) -> Vec<u8> {
        let response = self
            .s3_client
            .get_object()
            .bucket(&self.config.bucket_name)
            .key(key)
            .send()
            .await
            .expect("Failed to get object");

        response
            .body
            .collect()
            .await
            .expect("Failed to read object body")
            .into_bytes()
            .to_vec()
    }

    /// Empties and deletes the test bucket, then deletes the test table
    ///
    /// A table already dropped by the test is not an error.
    pub async fn teardown(self) {
        for key in self.object_keys().await {
            self.s3_client
                .delete_object()
                .bucket(&self.config.bucket_name)
                .key(key)
                .send()
                .await
                .expect("Failed to delete object");
        }

        self.s3_client
            .delete_bucket()
            .bucket(&self.config.bucket_name)
            .send()
            .await
            .expect("Failed to delete test bucket");

        let _ = self
            .dynamodb_client
            .delete_table()
            .table_name(&self.config.table_name)
            .send()
            .await;
    }

    /// Number of items in the test table
    pub async fn record_count(&self) -> i32 {
        self.dynamodb_client
            .scan()
            .table_name(&self.config.table_name)
            .send()
            .await
            .expect("Failed to scan table")
            .count()
    }
}
