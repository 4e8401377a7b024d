// wblogtool/src/storage/s3.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3 as s3;
use s3::config::Region;
use s3::presigning::PresigningConfig;
use std::time::Duration;

use crate::config::ObjectStoreConfig;
use crate::errors::StorageError;
use crate::storage::{ArtifactStore, UploadReceipt};

/// Upload tokens are valid just long enough for one PUT.
const UPLOAD_TOKEN_TTL: Duration = Duration::from_secs(300);
/// Cap on any single network call so a slow store never stalls the
/// scheduler loop indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A short-lived, single-object upload capability.
///
/// Produced by presigning a PUT against the configured bucket and key: the
/// signature is computed from the access/secret pair but the secret itself
/// never appears in the token or on the wire.
pub struct UploadToken {
    uri: String,
    headers: Vec<(String, String)>,
}

/// Artifact store backed by an S3-compatible service (DigitalOcean Spaces,
/// MinIO, etc.) with a public CDN/base URL for the download side.
pub struct S3ArtifactStore {
    client: s3::Client,
    http: reqwest::Client,
    bucket: String,
    public_base_url: String,
}

impl S3ArtifactStore {
    pub async fn connect(store_config: &ObjectStoreConfig) -> Result<Self> {
        let sdk_config = aws_config::defaults(s3::config::BehaviorVersion::latest())
            .endpoint_url(&store_config.endpoint_url)
            .region(Region::new(store_config.region.clone()))
            .credentials_provider(s3::config::Credentials::new(
                &store_config.access_key_id,
                &store_config.secret_access_key,
                None,     // session_token
                None,     // expiry
                "Static", // provider_name
            ))
            .load()
            .await;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for object store")?;

        Ok(Self {
            client: s3::Client::new(&sdk_config),
            http,
            bucket: store_config.bucket_name.clone(),
            public_base_url: store_config.public_base_url.clone(),
        })
    }

    /// Generates a fresh upload token scoped to `name` in the configured
    /// bucket. One token per upload; never reused.
    pub async fn upload_token(&self, name: &str) -> Result<UploadToken, StorageError> {
        let presigning = PresigningConfig::expires_in(UPLOAD_TOKEN_TTL)
            .map_err(|e| StorageError::NetworkFailure(format!("invalid presign TTL: {}", e)))?;
        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(name)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::AuthRejected(format!("presigning upload failed: {}", e)))?;

        Ok(UploadToken {
            uri: presigned.uri().to_string(),
            headers: presigned
                .headers()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn upload(&self, name: &str, payload: Vec<u8>) -> Result<UploadReceipt, StorageError> {
        let token = self.upload_token(name).await?;
        let size = payload.len() as u64;

        let mut request = self.http.put(&token.uri).body(payload);
        for (key, value) in &token.headers {
            request = request.header(key, value);
        }
        let response = request
            .send()
            .await
            .map_err(|e| StorageError::NetworkFailure(format!("upload of {} failed: {}", name, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_http_status(status, name));
        }

        Ok(UploadReceipt {
            name: name.to_string(),
            size,
        })
    }

    async fn fetch(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let file_url = join_download_url(&self.public_base_url, name);
        let response = self.http.get(&file_url).send().await.map_err(|e| {
            StorageError::NetworkFailure(format!("download of {} failed: {}", file_url, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::NetworkFailure(format!(
                "download of {} returned HTTP {}",
                file_url, status
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            StorageError::NetworkFailure(format!("reading body of {} failed: {}", file_url, e))
        })?;
        Ok(body.to_vec())
    }
}

/// Maps a non-success upload response onto the provider-error taxonomy.
fn classify_http_status(status: reqwest::StatusCode, name: &str) -> StorageError {
    match status.as_u16() {
        401 | 403 => StorageError::AuthRejected(format!(
            "upload of {} rejected with HTTP {}",
            name, status
        )),
        413 | 429 | 507 => StorageError::QuotaExceeded(format!(
            "upload of {} refused with HTTP {}",
            name, status
        )),
        _ => StorageError::NetworkFailure(format!(
            "upload of {} returned HTTP {}",
            name, status
        )),
    }
}

/// Joins the public base URL and an artifact name into a download URL.
fn join_download_url(base_url: &str, name: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), name)
}
