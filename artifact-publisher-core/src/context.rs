//! Build metadata handed to the publisher by the CI agent.

use serde::Serialize;
use tracing::{error, info};

use crate::error::PublishError;

pub const BUILD_NUMBER_VAR: &str = "BUILDKITE_BUILD_NUMBER";
pub const PULL_REQUEST_VAR: &str = "BUILDKITE_PULL_REQUEST";
pub const TAG_VAR: &str = "BUILDKITE_TAG";
pub const COMMIT_VAR: &str = "BUILDKITE_COMMIT";
pub const RELEASE_FLAG_VAR: &str = "IS_KOLIBRI_RELEASE";

/// Buildkite reports `false` as the pull request of a non-PR build.
const NO_PULL_REQUEST: &str = "false";

/// Immutable build context, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildContext {
    pub build_id: String,
    pub pull_request: String,
    pub tag: Option<String>,
    pub commit: String,
    pub is_release: bool,
}

impl BuildContext {
    pub fn from_env() -> Result<Self, PublishError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the context from an arbitrary variable source. Empty values
    /// count as unset; any non-empty release flag marks a release build.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PublishError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let required = |key: &'static str| {
            non_empty(key).ok_or_else(|| {
                error!(var = key, "Required build variable missing");
                PublishError::Config(format!("{key} environment variable not set"))
            })
        };

        let context = BuildContext {
            build_id: required(BUILD_NUMBER_VAR)?,
            pull_request: non_empty(PULL_REQUEST_VAR)
                .unwrap_or_else(|| NO_PULL_REQUEST.to_string()),
            tag: non_empty(TAG_VAR),
            commit: required(COMMIT_VAR)?,
            is_release: non_empty(RELEASE_FLAG_VAR).is_some(),
        };

        info!(
            build_id = %context.build_id,
            pull_request = %context.pull_request,
            tag = context.tag.as_deref().unwrap_or(""),
            commit = %context.commit,
            is_release = context.is_release,
            "Loaded build context"
        );
        Ok(context)
    }
}
