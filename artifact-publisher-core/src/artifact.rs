//! Artifact kinds and the discovered artifact set.
//!
//! The kind table is static: an artifact is only published when its file
//! extension appears in [`ARTIFACT_KINDS`]. [`ARTIFACT_ORDER`] fixes the order
//! in which artifacts are uploaded, rendered in the status report and
//! attached to a release, which keeps report categories contiguous.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Static metadata for one publishable file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactKind {
    pub extension: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub content_type: &'static str,
}

pub const INSTALLER_CATEGORY: &str = "installer";
pub const PYTHON_PACKAGE_CATEGORY: &str = "Python package";

pub const ARTIFACT_KINDS: [ArtifactKind; 6] = [
    ArtifactKind {
        extension: "exe",
        description: "Windows Installer",
        category: INSTALLER_CATEGORY,
        content_type: "application/x-ms-dos-executable",
    },
    ArtifactKind {
        extension: "pex",
        description: "Pex file",
        category: PYTHON_PACKAGE_CATEGORY,
        content_type: "application/octet-stream",
    },
    ArtifactKind {
        extension: "whl",
        description: "Whl file",
        category: PYTHON_PACKAGE_CATEGORY,
        content_type: "application/zip",
    },
    ArtifactKind {
        extension: "zip",
        description: "Zip file",
        category: PYTHON_PACKAGE_CATEGORY,
        content_type: "application/zip",
    },
    ArtifactKind {
        extension: "gz",
        description: "Tar file",
        category: PYTHON_PACKAGE_CATEGORY,
        content_type: "application/gzip",
    },
    ArtifactKind {
        extension: "apk",
        description: "Android Installer",
        category: INSTALLER_CATEGORY,
        content_type: "application/vnd.android.package-archive",
    },
];

/// Upload, report and release order. Installers first, then Python packages.
pub const ARTIFACT_ORDER: [&str; 6] = ["exe", "apk", "pex", "whl", "zip", "gz"];

/// Looks up the kind registered for a file extension (case-sensitive).
pub fn kind_for_extension(extension: &str) -> Option<&'static ArtifactKind> {
    ARTIFACT_KINDS.iter().find(|k| k.extension == extension)
}

/// A discovered build output, enriched with its kind metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub name: String,
    pub source_path: PathBuf,
    pub extension: String,
    pub description: String,
    pub category: String,
    pub content_type: String,
    /// Public URL of the uploaded object; `None` until the artifact is uploaded.
    pub media_url: Option<String>,
}

impl Artifact {
    pub fn from_kind(kind: &ArtifactKind, name: impl Into<String>, source_path: PathBuf) -> Self {
        Self {
            name: name.into(),
            source_path,
            extension: kind.extension.to_string(),
            description: kind.description.to_string(),
            category: kind.category.to_string(),
            content_type: kind.content_type.to_string(),
            media_url: None,
        }
    }
}

/// Discovered artifacts keyed by extension. At most one artifact per extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArtifactSet {
    by_extension: BTreeMap<String, Artifact>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an artifact, replacing (and returning) any previous artifact
    /// with the same extension.
    pub fn insert(&mut self, artifact: Artifact) -> Option<Artifact> {
        self.by_extension.insert(artifact.extension.clone(), artifact)
    }

    pub fn get(&self, extension: &str) -> Option<&Artifact> {
        self.by_extension.get(extension)
    }

    pub fn get_mut(&mut self, extension: &str) -> Option<&mut Artifact> {
        self.by_extension.get_mut(extension)
    }

    pub fn len(&self) -> usize {
        self.by_extension.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_extension.is_empty()
    }

    /// Artifacts in [`ARTIFACT_ORDER`]; kinds that were not discovered are skipped.
    pub fn ordered(&self) -> impl Iterator<Item = &Artifact> + '_ {
        ARTIFACT_ORDER
            .iter()
            .filter_map(move |ext| self.by_extension.get(*ext))
    }
}

impl FromIterator<Artifact> for ArtifactSet {
    fn from_iter<I: IntoIterator<Item = Artifact>>(iter: I) -> Self {
        let mut set = ArtifactSet::new();
        for artifact in iter {
            set.insert(artifact);
        }
        set
    }
}
