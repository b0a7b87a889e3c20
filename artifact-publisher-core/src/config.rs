use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

pub const DEFAULT_OBJECT_PREFIX: &str = "kolibri";
pub const DEFAULT_STATUS_CONTEXT: &str = "buildkite/kolibri/assets";
pub const DEFAULT_STATUS_DESCRIPTION: &str = "Kolibri Buildkite assets";

/// What the publish pipeline needs besides the build context and its clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Leading path segment of every object written to the bucket.
    pub object_prefix: String,
    /// Directories scanned for artifacts, in order.
    pub artifact_dirs: Vec<PathBuf>,
    pub status: StatusConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusConfig {
    pub context: String,
    pub description: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            object_prefix: DEFAULT_OBJECT_PREFIX.to_string(),
            artifact_dirs: vec![PathBuf::from("dist"), PathBuf::from("installer")],
            status: StatusConfig::default(),
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            context: DEFAULT_STATUS_CONTEXT.to_string(),
            description: DEFAULT_STATUS_DESCRIPTION.to_string(),
        }
    }
}

impl PublishConfig {
    pub fn trace_loaded(&self) {
        info!(
            object_prefix = %self.object_prefix,
            artifact_dirs = self.artifact_dirs.len(),
            status_context = %self.status.context,
            "Loaded PublishConfig"
        );
        debug!(?self, "PublishConfig loaded (full debug)");
    }
}
