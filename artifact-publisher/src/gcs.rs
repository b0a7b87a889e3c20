//! # Google Cloud Storage client
//!
//! Implements the core [`ObjectStore`] trait against the Cloud Storage JSON API:
//!
//! - media upload: `POST {api}/upload/storage/v1/b/{bucket}/o?uploadType=media&name={object}`
//! - public read: `POST {api}/storage/v1/b/{bucket}/o/{object}/acl` granting `allUsers` `READER`
//!
//! Authentication is a ready-made OAuth access token (see
//! [`STORAGE_TOKEN_VAR`](crate::load_config::STORAGE_TOKEN_VAR)); obtaining it is up
//! to the CI step.

use artifact_publisher_core::contract::{BoxError, NewObject, ObjectStore, StoredObject};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use sha2::{Digest, Sha256};

pub struct GcsClient {
    http: reqwest::Client,
    api_base: Url,
    bucket: String,
    access_token: String,
}

/// The subset of the object resource the publisher cares about.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectResource {
    name: String,
    bucket: String,
    media_link: String,
}

impl GcsClient {
    pub fn new(api_base: &str, bucket: &str, access_token: String) -> Result<Self, BoxError> {
        let api_base = Url::parse(api_base).map_err(|e| {
            tracing::error!(error = ?e, api_base, "Invalid storage API base URL");
            e
        })?;
        tracing::info!(
            api_base = %api_base,
            bucket,
            token_set = !access_token.is_empty(),
            "Initialized GcsClient"
        );
        Ok(GcsClient {
            http: reqwest::Client::new(),
            api_base,
            bucket: bucket.to_string(),
            access_token,
        })
    }

    /// Media upload endpoint for `object_name`.
    pub fn upload_url(&self, object_name: &str) -> Result<Url, BoxError> {
        let mut url = self.endpoint(&["upload", "storage", "v1", "b", self.bucket.as_str(), "o"])?;
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", object_name);
        Ok(url)
    }

    /// ACL endpoint of `object_name`; the object name is one encoded path segment.
    pub fn acl_url(&self, object_name: &str) -> Result<Url, BoxError> {
        self.endpoint(&["storage", "v1", "b", self.bucket.as_str(), "o", object_name, "acl"])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, BoxError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| format!("storage API base URL cannot be a base: {}", self.api_base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl ObjectStore for GcsClient {
    async fn upload_object<'a>(&self, req: NewObject<'a>) -> Result<StoredObject, BoxError> {
        let url = self.upload_url(req.name)?;
        let sha256 = format!("{:x}", Sha256::digest(req.content));
        tracing::info!(
            bucket = %self.bucket,
            object = req.name,
            content_type = req.content_type,
            size = req.content.len(),
            "Uploading object"
        );

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::CONTENT_TYPE, req.content_type)
            .body(req.content.to_vec())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, object = req.name, "Failed to send object upload");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<Failed to decode response body>"));
            tracing::error!(status = %status, object = req.name, "Object upload rejected. Response body: {text}");
            return Err(format!("object upload for {} failed with {status}: {text}", req.name).into());
        }

        let resource: ObjectResource = response.json().await?;
        tracing::info!(
            object = %resource.name,
            media_link = %resource.media_link,
            "Successfully uploaded object"
        );
        Ok(StoredObject {
            name: resource.name,
            bucket: resource.bucket,
            media_link: resource.media_link,
            sha256,
        })
    }

    async fn make_public(&self, object_name: &str) -> Result<(), BoxError> {
        let url = self.acl_url(object_name)?;
        tracing::info!(bucket = %self.bucket, object = object_name, "Granting public read access");

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({ "entity": "allUsers", "role": "READER" }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, object = object_name, "Public ACL rejected. Response body: {text}");
            return Err(format!("making {object_name} public failed with {status}: {text}").into());
        }
        tracing::info!(object = object_name, "Object is now publicly readable");
        Ok(())
    }
}
