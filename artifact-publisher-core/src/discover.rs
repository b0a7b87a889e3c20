//! Local artifact discovery.
//!
//! Each configured directory is listed (no recursion) and every regular file
//! whose extension is a known [`ArtifactKind`](crate::artifact::ArtifactKind)
//! becomes an [`Artifact`]. Entries are visited in file-name order and
//! directories in the order given, so when several files share an extension
//! the last one visited wins.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::artifact::{kind_for_extension, Artifact, ArtifactSet};
use crate::error::PublishError;

/// Extension as the kind table sees it: the text after the final dot.
/// Dotfiles such as `.gz` have no extension.
pub fn artifact_extension(file_name: &str) -> Option<&str> {
    Path::new(file_name).extension().and_then(|e| e.to_str())
}

/// Scans every directory in turn and merges the results into one set.
/// A directory that cannot be listed aborts discovery.
pub fn collect_local_artifacts<P: AsRef<Path>>(dirs: &[P]) -> Result<ArtifactSet, PublishError> {
    let mut artifacts = ArtifactSet::new();
    for dir in dirs {
        scan_dir(dir.as_ref(), &mut artifacts)?;
    }
    info!(
        count = artifacts.len(),
        dirs = dirs.len(),
        "Collected local artifacts"
    );
    Ok(artifacts)
}

fn scan_dir(dir: &Path, artifacts: &mut ArtifactSet) -> Result<(), PublishError> {
    let read_dir_error = |source: std::io::Error| {
        error!(error = ?source, path = %dir.display(), "Failed to list artifact directory");
        PublishError::ReadDir {
            path: dir.to_path_buf(),
            source,
        }
    };

    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(read_dir_error)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()
        .map_err(read_dir_error)?;
    entries.sort();

    for path in entries {
        if !path.is_file() {
            debug!(path = %path.display(), "Skipping non-file entry");
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            debug!(path = %path.display(), "Skipping entry with non UTF-8 name");
            continue;
        };
        let Some(kind) = artifact_extension(file_name).and_then(kind_for_extension) else {
            continue;
        };

        let artifact = Artifact::from_kind(kind, file_name, path.clone());
        info!(
            name = %artifact.name,
            extension = %artifact.extension,
            category = %artifact.category,
            path = %path.display(),
            "Collected artifact"
        );
        if let Some(previous) = artifacts.insert(artifact) {
            debug!(
                replaced = %previous.name,
                extension = %previous.extension,
                "Artifact replaced by a later file with the same extension"
            );
        }
    }
    Ok(())
}
