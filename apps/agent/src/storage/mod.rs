//! Object storage: publishes rendered artifacts to an S3-compatible bucket.

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use bytes::Bytes;
use thiserror::Error;
use tracing::info;

use crate::config::StorageConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object storage is not configured")]
    NotConfigured,

    #[error("upload of {key} failed: {message}")]
    Upload { key: String, message: String },
}

/// Uploads one object and returns its public URL.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError>;
}

/// Public-read uploads to S3, MinIO or DigitalOcean Spaces.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    endpoint_url: String,
    region: String,
}

impl S3ObjectStore {
    /// Constructs an S3 client for the configured endpoint.
    pub async fn connect(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "interview-agent-static",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&config.endpoint_url)
            .load()
            .await;

        // Spaces serves virtual-hosted URLs; everything else is addressed path-style
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(!is_spaces_endpoint(&config.endpoint_url))
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            endpoint_url: config.endpoint_url.clone(),
            region: config.region.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let size = body.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let url = public_url(&self.endpoint_url, &self.bucket, &self.region, key);
        info!("Uploaded {} bytes to s3://{}/{}", size, self.bucket, key);
        Ok(url)
    }
}

/// Stand-in used when the S3 variables are missing: every upload fails.
pub struct UnconfiguredStore;

#[async_trait]
impl ObjectStore for UnconfiguredStore {
    async fn upload(
        &self,
        _key: &str,
        _body: Bytes,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        Err(StorageError::NotConfigured)
    }
}

fn is_spaces_endpoint(endpoint_url: &str) -> bool {
    endpoint_url.contains("digitaloceanspaces")
}

/// Public URL of an uploaded object.
pub fn public_url(endpoint_url: &str, bucket: &str, region: &str, key: &str) -> String {
    if is_spaces_endpoint(endpoint_url) {
        format!("https://{bucket}.{region}.digitaloceanspaces.com/{key}")
    } else {
        format!("{}/{bucket}/{key}", endpoint_url.trim_end_matches('/'))
    }
}
