#![allow(unused)]

//! # contract: interfaces to the object store and the source host
//!
//! The publish pipeline talks to two remote services through the traits in
//! this module:
//!
//! - [`ObjectStore`]: a bucket that accepts uploads and can make objects
//!   publicly readable.
//! - [`SourceHost`]: the code host receiving commit statuses and owning
//!   releases.
//!
//! ## Mocking & Testing
//! - Both traits are annotated for `mockall`, so tests drive the pipeline with
//!   `MockObjectStore` / `MockSourceHost` instead of live services.
//!
//! ## Errors
//! - All methods return boxed errors; the pipeline decides which failures are
//!   fatal and which are only logged.

use async_trait::async_trait;
use serde::Serialize;

use mockall::{automock, predicate::*};

pub use crate::error::BoxError;

/// An object to write into the bucket.
pub struct NewObject<'a> {
    /// Full object name, e.g. `kolibri/release/42/kolibri.exe`.
    pub name: &'a str,
    pub content: &'a [u8],
    pub content_type: &'a str,
}

/// The stored object as reported back by the bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredObject {
    pub name: String,
    pub bucket: String,
    /// URL that serves the object's bytes.
    pub media_link: String,
    /// Hex SHA-256 of the uploaded bytes.
    pub sha256: String,
}

/// Payload of a commit status.
pub struct NewCommitStatus<'a> {
    pub commit: &'a str,
    pub state: &'a str,
    pub target_url: &'a str,
    pub description: &'a str,
    pub context: &'a str,
}

/// Only the HTTP status matters to the pipeline: 201 means created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitStatusResponse {
    pub status_code: u16,
}

pub const COMMIT_STATUS_CREATED: u16 = 201;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
}

/// A binary file to attach to a release.
pub struct NewReleaseAsset<'a> {
    pub release_id: u64,
    pub name: &'a str,
    pub label: &'a str,
    pub content_type: &'a str,
    pub content: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub id: u64,
    pub name: String,
}

/// Trait for writing build outputs to a bucket.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload (create or overwrite) an object.
    async fn upload_object<'a>(&self, req: NewObject<'a>) -> Result<StoredObject, BoxError>;

    /// Grant anonymous read access to an existing object.
    async fn make_public(&self, object_name: &str) -> Result<(), BoxError>;
}

/// Trait for the code host's status and release endpoints.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait SourceHost: Send + Sync {
    /// Post a commit status. Implementors return the HTTP status without
    /// judging it; transport failures are errors.
    async fn create_commit_status<'a>(
        &self,
        req: NewCommitStatus<'a>,
    ) -> Result<CommitStatusResponse, BoxError>;

    /// Look up the release for a tag. `Ok(None)` when the host has no such release.
    async fn find_release_by_tag(&self, tag: &str) -> Result<Option<Release>, BoxError>;

    /// Attach a binary asset to a release.
    async fn upload_release_asset<'a>(
        &self,
        req: NewReleaseAsset<'a>,
    ) -> Result<ReleaseAsset, BoxError>;
}
