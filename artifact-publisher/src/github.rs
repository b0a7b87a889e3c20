#![doc = "GitHub REST client: commit statuses, release lookup by tag and release asset uploads."]
//
//! Wires the core [`SourceHost`] trait to the GitHub API. Requests carry
//! `Authorization: token <GITHUB_ACCESS_TOKEN>`; asset uploads go to the
//! separate uploads host.
//!
//! The client reports HTTP outcomes without judging them where the pipeline
//! needs to decide: the commit status response code is returned as-is.

use artifact_publisher_core::contract::{
    BoxError, CommitStatusResponse, NewCommitStatus, NewReleaseAsset, Release, ReleaseAsset,
    SourceHost,
};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

const USER_AGENT: &str = concat!("artifact-publisher/", env!("CARGO_PKG_VERSION"));
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

pub struct GitHubClient {
    http: reqwest::Client,
    api_base: Url,
    uploads_base: Url,
    owner: String,
    repo: String,
    token: String,
}

#[derive(Serialize)]
struct StatusPayload<'a> {
    state: &'a str,
    target_url: &'a str,
    description: &'a str,
    context: &'a str,
}

#[derive(Deserialize)]
struct ReleaseResource {
    id: u64,
    tag_name: String,
}

#[derive(Deserialize)]
struct AssetResource {
    id: u64,
    name: String,
}

impl GitHubClient {
    pub fn new(
        api_base: &str,
        uploads_base: &str,
        owner: &str,
        repo: &str,
        token: String,
    ) -> Result<Self, BoxError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let client = GitHubClient {
            http,
            api_base: Url::parse(api_base)?,
            uploads_base: Url::parse(uploads_base)?,
            owner: owner.to_string(),
            repo: repo.to_string(),
            token,
        };
        tracing::info!(
            api_base = %client.api_base,
            owner,
            repo,
            token_set = !client.token.is_empty(),
            "Initialized GitHubClient"
        );
        Ok(client)
    }

    pub fn status_url(&self, commit: &str) -> Result<Url, BoxError> {
        self.repo_endpoint(&self.api_base, &["statuses", commit])
    }

    pub fn release_by_tag_url(&self, tag: &str) -> Result<Url, BoxError> {
        self.repo_endpoint(&self.api_base, &["releases", "tags", tag])
    }

    pub fn release_assets_url(&self, release_id: u64, name: &str, label: &str) -> Result<Url, BoxError> {
        let id = release_id.to_string();
        let mut url = self.repo_endpoint(&self.uploads_base, &["releases", id.as_str(), "assets"])?;
        url.query_pairs_mut()
            .append_pair("name", name)
            .append_pair("label", label);
        Ok(url)
    }

    fn repo_endpoint(&self, base: &Url, segments: &[&str]) -> Result<Url, BoxError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| format!("GitHub base URL cannot be a base: {base}"))?
            .pop_if_empty()
            .extend(["repos", self.owner.as_str(), self.repo.as_str()])
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(reqwest::header::AUTHORIZATION, format!("token {}", self.token))
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
    }
}

#[async_trait]
impl SourceHost for GitHubClient {
    async fn create_commit_status<'a>(
        &self,
        req: NewCommitStatus<'a>,
    ) -> Result<CommitStatusResponse, BoxError> {
        let url = self.status_url(req.commit)?;
        tracing::info!(commit = req.commit, target_url = req.target_url, "Creating commit status");

        let payload = StatusPayload {
            state: req.state,
            target_url: req.target_url,
            description: req.description,
            context: req.context,
        };
        let response = self
            .authorized(self.http.post(url.clone()))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, url = %url, "Failed to send commit status");
                e
            })?;

        let status = response.status();
        if status == StatusCode::CREATED {
            tracing::info!(url = %url, "Successfully created GitHub status");
        } else {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, url = %url, "GitHub status not created. Response body: {text}");
        }
        Ok(CommitStatusResponse {
            status_code: status.as_u16(),
        })
    }

    async fn find_release_by_tag(&self, tag: &str) -> Result<Option<Release>, BoxError> {
        let url = self.release_by_tag_url(tag)?;
        tracing::info!(tag, url = %url, "Looking up release by tag");

        let response = self.authorized(self.http.get(url)).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            tracing::info!(tag, status = %status, "No release found for tag");
            return Ok(None);
        }

        let release: ReleaseResource = response.json().await?;
        tracing::info!(tag, release_id = release.id, "Found release");
        Ok(Some(Release {
            id: release.id,
            tag_name: release.tag_name,
        }))
    }

    async fn upload_release_asset<'a>(
        &self,
        req: NewReleaseAsset<'a>,
    ) -> Result<ReleaseAsset, BoxError> {
        let url = self.release_assets_url(req.release_id, req.name, req.label)?;
        tracing::info!(
            release_id = req.release_id,
            name = req.name,
            size = req.content.len(),
            "Uploading release asset"
        );

        let response = self
            .authorized(self.http.post(url))
            .header(reqwest::header::CONTENT_TYPE, req.content_type)
            .body(req.content.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(format!("release asset {} rejected with {status}: {text}", req.name).into());
        }

        let asset: AssetResource = response.json().await?;
        tracing::info!(asset_id = asset.id, name = %asset.name, "Successfully uploaded release asset");
        Ok(ReleaseAsset {
            id: asset.id,
            name: asset.name,
        })
    }
}
