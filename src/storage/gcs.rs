use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::interface::{ObjectBackend, StorageError};
use crate::google_auth::GoogleAuth;

/// Google Cloud Storage bucket accessed through the JSON API
pub struct GcsBackend {
    client: Client,
    auth: Arc<GoogleAuth>,
    base_url: Url,
    bucket: String,
}

impl GcsBackend {
    /// Build a backend and check that the bucket is reachable with our credentials
    pub async fn connect(
        base_url: &str,
        bucket: &str,
        auth: Arc<GoogleAuth>,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StorageError::Request(format!("invalid storage url {}: {}", base_url, e)))?;
        let backend = Self {
            client: Client::builder().timeout(timeout).build()?,
            auth,
            base_url,
            bucket: bucket.to_string(),
        };

        let url = backend.url(&["storage", "v1", "b", bucket])?;
        let response = backend.authorized(backend.client.get(url)).await?.send().await?;
        check(response).await?;

        info!("Connected to storage bucket {}", bucket);
        Ok(backend)
    }

    fn url(&self, segments: &[&str]) -> Result<Url, StorageError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StorageError::Request(format!("storage url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn authorized(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, StorageError> {
        let token = self.auth.access_token().await?;
        Ok(request.bearer_auth(token))
    }
}

async fn check(response: Response) -> Result<Response, StorageError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(StorageError::Status { status, body })
}

#[async_trait]
impl ObjectBackend for GcsBackend {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put_object(&self, name: &str, data: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        let url = self.url(&["upload", "storage", "v1", "b", &self.bucket, "o"])?;
        let size = data.len();
        let request = self
            .client
            .post(url)
            .query(&[("uploadType", "media"), ("name", name)])
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data);
        let response = self.authorized(request).await?.send().await?;
        check(response).await?;
        debug!("Uploaded {} bytes to gs://{}/{}", size, self.bucket, name);
        Ok(())
    }

    async fn make_public(&self, name: &str) -> Result<(), StorageError> {
        let url = self.url(&["storage", "v1", "b", &self.bucket, "o", name, "acl"])?;
        let request = self.client.post(url).json(&json!({
            "entity": "allUsers",
            "role": "READER"
        }));
        let response = self.authorized(request).await?.send().await?;
        check(response).await?;
        Ok(())
    }

    async fn delete_object(&self, name: &str) -> Result<(), StorageError> {
        let url = self.url(&["storage", "v1", "b", &self.bucket, "o", name])?;
        let response = self.authorized(self.client.delete(url)).await?.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("Object gs://{}/{} already gone", self.bucket, name);
            return Ok(());
        }
        check(response).await?;
        debug!("Deleted gs://{}/{}", self.bucket, name);
        Ok(())
    }
}
