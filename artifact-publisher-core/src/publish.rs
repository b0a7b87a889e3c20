//! High-level pipeline: discover → upload → report → notify → attach.
//!
//! This module provides the top-level orchestration for publishing the
//! outputs of one CI build:
//!   - Collects artifacts from the configured local directories
//!   - Uploads each one to the bucket and makes it publicly readable
//!   - Renders and uploads the HTML status report
//!   - Posts a commit status pointing at the report
//!   - When building from a tag, attaches the artifacts to the matching release
//!
//! # Error Handling
//! Every step up to and including the commit status is fail-fast: the first
//! error is returned and nothing after it runs. A commit status response other
//! than 201 is reported as [`PublishError::CommitStatusRejected`]. Release
//! attachment never fails the run; its errors are logged and dropped.
//!
//! # Navigation
//! - Main entrypoint: [`publish`]
//! - The individual steps are public so they can be exercised on their own.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::artifact::ArtifactSet;
use crate::config::PublishConfig;
use crate::context::BuildContext;
use crate::contract::{
    NewCommitStatus, NewObject, NewReleaseAsset, ObjectStore, SourceHost, COMMIT_STATUS_CREATED,
};
use crate::discover::collect_local_artifacts;
use crate::error::PublishError;
use crate::layout::{artifact_object_name, report_object_name};
use crate::report::{render_status_report, REPORT_CONTENT_TYPE};

pub const COMMIT_STATUS_STATE: &str = "success";

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub artifacts: Vec<UploadedArtifact>,
    pub report_url: String,
    /// Names of the files attached to a release; empty when not building a tag.
    pub release_assets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedArtifact {
    pub extension: String,
    pub object_name: String,
    pub media_url: String,
    pub sha256: String,
}

/// Runs the whole pipeline for one build.
pub async fn publish<S, H>(
    config: &PublishConfig,
    context: &BuildContext,
    store: &S,
    host: &H,
) -> Result<PublishReport, PublishError>
where
    S: ObjectStore + Sync,
    H: SourceHost + Sync,
{
    info!(
        build_id = %context.build_id,
        commit = %context.commit,
        is_release = context.is_release,
        "[PUBLISH] Starting artifact publication"
    );

    let mut artifacts = collect_local_artifacts(&config.artifact_dirs)?;
    if artifacts.is_empty() {
        warn!("[PUBLISH] No artifacts found in the configured directories");
    }

    let uploaded = upload_artifacts(&config.object_prefix, context, &mut artifacts, store).await?;
    let report_url = upload_report(&config.object_prefix, context, &artifacts, store).await?;
    create_commit_status(config, context, &report_url, host).await?;

    let release_assets = match context.tag.as_deref() {
        Some(tag) => attach_release_assets(tag, &artifacts, host).await,
        None => {
            debug!("[PUBLISH] Not building from a tag, skipping release assets");
            Vec::new()
        }
    };

    info!(
        artifacts = uploaded.len(),
        release_assets = release_assets.len(),
        report_url = %report_url,
        "[PUBLISH] Publication complete"
    );
    Ok(PublishReport {
        artifacts: uploaded,
        report_url,
        release_assets,
    })
}

/// Uploads every artifact in order, makes it public and records its URL on
/// the artifact.
pub async fn upload_artifacts<S>(
    prefix: &str,
    context: &BuildContext,
    artifacts: &mut ArtifactSet,
    store: &S,
) -> Result<Vec<UploadedArtifact>, PublishError>
where
    S: ObjectStore + Sync,
{
    let extensions: Vec<String> = artifacts.ordered().map(|a| a.extension.clone()).collect();
    let mut uploaded = Vec::with_capacity(extensions.len());

    for extension in extensions {
        let Some(artifact) = artifacts.get_mut(&extension) else {
            continue;
        };
        let object_name = artifact_object_name(prefix, context, &artifact.name);
        info!(file = %artifact.name, object = %object_name, "[PUBLISH][UPLOAD] Uploading artifact");

        let content = std::fs::read(&artifact.source_path).map_err(|e| {
            error!(error = ?e, path = %artifact.source_path.display(), "[PUBLISH][ERROR] Failed to read artifact");
            PublishError::ReadArtifact {
                path: artifact.source_path.clone(),
                source: e,
            }
        })?;

        let stored = store
            .upload_object(NewObject {
                name: &object_name,
                content: &content,
                content_type: &artifact.content_type,
            })
            .await
            .map_err(|e| storage_error(&object_name, e))?;

        store
            .make_public(&object_name)
            .await
            .map_err(|e| storage_error(&object_name, e))?;

        info!(
            file = %artifact.name,
            media_url = %stored.media_link,
            size = content.len(),
            "[PUBLISH][UPLOAD] Artifact uploaded and made public"
        );
        artifact.media_url = Some(stored.media_link.clone());
        uploaded.push(UploadedArtifact {
            extension,
            object_name,
            media_url: stored.media_link,
            sha256: stored.sha256,
        });
    }
    Ok(uploaded)
}

/// Renders the status report and uploads it; returns its media URL.
pub async fn upload_report<S>(
    prefix: &str,
    context: &BuildContext,
    artifacts: &ArtifactSet,
    store: &S,
) -> Result<String, PublishError>
where
    S: ObjectStore + Sync,
{
    let html = render_status_report(artifacts);
    let object_name = report_object_name(prefix, context);
    info!(object = %object_name, bytes = html.len(), "[PUBLISH][REPORT] Uploading status report");

    let stored = store
        .upload_object(NewObject {
            name: &object_name,
            content: html.as_bytes(),
            content_type: REPORT_CONTENT_TYPE,
        })
        .await
        .map_err(|e| storage_error(&object_name, e))?;

    info!(report_url = %stored.media_link, "[PUBLISH][REPORT] Status report uploaded");
    Ok(stored.media_link)
}

/// Posts the commit status. Anything but 201 Created is an error.
pub async fn create_commit_status<H>(
    config: &PublishConfig,
    context: &BuildContext,
    report_url: &str,
    host: &H,
) -> Result<(), PublishError>
where
    H: SourceHost + Sync,
{
    let response = host
        .create_commit_status(NewCommitStatus {
            commit: &context.commit,
            state: COMMIT_STATUS_STATE,
            target_url: report_url,
            description: &config.status.description,
            context: &config.status.context,
        })
        .await
        .map_err(|e| {
            error!(error = ?e, commit = %context.commit, "[PUBLISH][ERROR] Commit status request failed");
            PublishError::SourceHost(e)
        })?;

    if response.status_code != COMMIT_STATUS_CREATED {
        error!(
            status = response.status_code,
            commit = %context.commit,
            "[PUBLISH][ERROR] Commit status was not created"
        );
        return Err(PublishError::CommitStatusRejected {
            status: response.status_code,
        });
    }
    info!(commit = %context.commit, "[PUBLISH][STATUS] Created commit status");
    Ok(())
}

/// Attaches every artifact to the release for `tag`, if one exists.
/// Failures are logged and skipped; returns the names attached.
pub async fn attach_release_assets<H>(tag: &str, artifacts: &ArtifactSet, host: &H) -> Vec<String>
where
    H: SourceHost + Sync,
{
    let release = match host.find_release_by_tag(tag).await {
        Ok(Some(release)) => release,
        Ok(None) => {
            info!(tag, "[PUBLISH][RELEASE] No release for tag, skipping assets");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = ?e, tag, "[PUBLISH][RELEASE] Release lookup failed, skipping assets");
            return Vec::new();
        }
    };
    info!(tag, release_id = release.id, "[PUBLISH][RELEASE] Attaching artifacts to release");

    let mut attached = Vec::new();
    for artifact in artifacts.ordered() {
        let content = match std::fs::read(&artifact.source_path) {
            Ok(content) => content,
            Err(e) => {
                warn!(error = ?e, path = %artifact.source_path.display(), "[PUBLISH][RELEASE] Could not read artifact, skipping");
                continue;
            }
        };
        let result = host
            .upload_release_asset(NewReleaseAsset {
                release_id: release.id,
                name: &artifact.name,
                label: &artifact.description,
                content_type: &artifact.content_type,
                content: &content,
            })
            .await;
        match result {
            Ok(asset) => {
                info!(asset_id = asset.id, name = %asset.name, "[PUBLISH][RELEASE] Attached release asset");
                attached.push(artifact.name.clone());
            }
            Err(e) => {
                warn!(error = ?e, name = %artifact.name, "[PUBLISH][RELEASE] Release asset upload failed, ignoring");
            }
        }
    }
    attached
}

fn storage_error(object_name: &str, source: crate::error::BoxError) -> PublishError {
    error!(error = ?source, object = %object_name, "[PUBLISH][ERROR] Object store request failed");
    PublishError::Storage {
        object: object_name.to_string(),
        source,
    }
}
