use std::path::PathBuf;

use thiserror::Error;

/// Boxed error used at the client trait seams (object store, source host).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can stop a publish run.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to read artifact directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read artifact {}: {source}", .path.display())]
    ReadArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("object store failed for {object}: {source}")]
    Storage {
        object: String,
        #[source]
        source: BoxError,
    },

    #[error("commit status was not created (HTTP {status})")]
    CommitStatusRejected { status: u16 },

    #[error("source host request failed: {0}")]
    SourceHost(#[source] BoxError),
}
