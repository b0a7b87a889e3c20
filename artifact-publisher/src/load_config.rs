/// `load_config` module: Loads the optional YAML config and the secrets from the environment.
///
/// This module is the only place where user-supplied YAML is parsed and mapped to the
/// strongly-typed structs used by the clients and the core pipeline.
///
/// # Responsibilities
/// - Parse the YAML file into [`CliConfig`]; every section and key has a default, so an
///   empty file (or no file at all) yields the stock Kolibri setup
/// - Read secrets (API tokens) from the environment only, never from YAML
/// - Produce the core [`PublishConfig`] from the file plus CLI overrides
///
/// # Errors
/// All errors in this module use `anyhow::Error` for context-rich diagnostics, and are surfaced at the CLI boundary.
use anyhow::Result;
use artifact_publisher_core::config::{
    PublishConfig, StatusConfig, DEFAULT_OBJECT_PREFIX, DEFAULT_STATUS_CONTEXT,
    DEFAULT_STATUS_DESCRIPTION,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const GITHUB_TOKEN_VAR: &str = "GITHUB_ACCESS_TOKEN";
pub const STORAGE_TOKEN_VAR: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub repository: RepositorySection,
    pub storage: StorageSection,
    pub artifacts: ArtifactsSection,
    pub status: StatusSection,
    pub endpoints: EndpointsSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositorySection {
    pub owner: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageSection {
    pub bucket: String,
    pub prefix: String,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactsSection {
    pub dirs: Vec<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusSection {
    pub context: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointsSection {
    pub github_api: String,
    pub github_uploads: String,
    pub storage_api: String,
}

impl Default for RepositorySection {
    fn default() -> Self {
        Self {
            owner: "learningequality".to_string(),
            name: "kolibri".to_string(),
        }
    }
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            bucket: "le-downloads".to_string(),
            prefix: DEFAULT_OBJECT_PREFIX.to_string(),
        }
    }
}

impl Default for ArtifactsSection {
    fn default() -> Self {
        Self {
            dirs: PublishConfig::default().artifact_dirs,
        }
    }
}

impl Default for StatusSection {
    fn default() -> Self {
        Self {
            context: DEFAULT_STATUS_CONTEXT.to_string(),
            description: DEFAULT_STATUS_DESCRIPTION.to_string(),
        }
    }
}

impl Default for EndpointsSection {
    fn default() -> Self {
        Self {
            github_api: "https://api.github.com".to_string(),
            github_uploads: "https://uploads.github.com".to_string(),
            storage_api: "https://storage.googleapis.com".to_string(),
        }
    }
}

impl CliConfig {
    /// Core pipeline config. A non-empty `dirs_override` replaces the configured directories.
    pub fn publish_config(&self, dirs_override: &[PathBuf]) -> PublishConfig {
        let artifact_dirs = if dirs_override.is_empty() {
            self.artifacts.dirs.clone()
        } else {
            dirs_override.to_vec()
        };
        PublishConfig {
            object_prefix: self.storage.prefix.clone(),
            artifact_dirs,
            status: StatusConfig {
                context: self.status.context.clone(),
                description: self.status.description.clone(),
            },
        }
    }
}

/// Loads a static YAML config file (no secrets).
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    // An empty document is a valid "all defaults" config.
    if config_content.trim().is_empty() {
        info!(config_path = ?path_ref, "Config file is empty, using defaults");
        return Ok(CliConfig::default());
    }

    match serde_yaml::from_str::<CliConfig>(&config_content) {
        Ok(conf) => {
            info!(
                config_path = ?path_ref,
                owner = %conf.repository.owner,
                repo = %conf.repository.name,
                bucket = %conf.storage.bucket,
                "Parsed config YAML successfully"
            );
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

/// Loads the config at `path`, or the defaults when no path was given.
pub fn load_config_or_default(path: Option<&Path>) -> Result<CliConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            info!("No config file given, using defaults");
            Ok(CliConfig::default())
        }
    }
}

/// API tokens, injected from the environment.
pub struct Secrets {
    pub github_token: String,
    pub storage_token: String,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("github_token", &"<redacted>")
            .field("storage_token", &"<redacted>")
            .finish()
    }
}

impl Secrets {
    pub fn from_env() -> Result<Self> {
        let github_token = required_secret(GITHUB_TOKEN_VAR)?;
        let storage_token = required_secret(STORAGE_TOKEN_VAR)?;
        info!("API tokens found in env");
        Ok(Secrets {
            github_token,
            storage_token,
        })
    }
}

fn required_secret(var: &str) -> Result<String> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => Ok(value),
        Ok(_) => {
            error!(var, "Secret environment variable is empty");
            Err(anyhow::anyhow!("{var} environment variable is empty"))
        }
        Err(e) => {
            error!(error = ?e, var, "Secret environment variable not set");
            Err(anyhow::anyhow!("{var} environment variable not set: {e}"))
        }
    }
}
