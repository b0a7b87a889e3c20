///
/// This module implements the CLI interface for artifact-publisher: command parsing,
/// wiring of the network clients, and user-visible output.
///
/// All pipeline logic (discovery, object layout, report rendering, orchestration) lives in
/// the [`artifact-publisher-core`] crate. This module is CLI glue only.
///
/// ## How To Use
/// - In CI: run `artifact-publisher publish` from the project root after the build step.
/// - Locally: `artifact-publisher discover` shows what would be published.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// [`artifact-publisher-core`]: ../../artifact-publisher-core/
/// [`Cli`]: struct.Cli.html
/// [`run`]: fn.run.html
use crate::gcs::GcsClient;
use crate::github::GitHubClient;
use crate::load_config::{load_config_or_default, Secrets};
use anyhow::Result;
use artifact_publisher_core::context::BuildContext;
use artifact_publisher_core::discover::collect_local_artifacts;
use artifact_publisher_core::publish::publish;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI for artifact-publisher: publish CI build artifacts.
#[derive(Parser)]
#[clap(
    name = "artifact-publisher",
    version,
    about = "Upload build artifacts to Cloud Storage, post a status report and attach release assets"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload artifacts and the status report, then notify the source host
    Publish {
        /// Path to the YAML config file (defaults apply when omitted)
        #[clap(long)]
        config: Option<PathBuf>,
        /// Artifact directory to scan; repeat to scan several. Overrides the config
        #[clap(long = "dir")]
        dirs: Vec<PathBuf>,
    },
    /// Print the artifacts that would be published, as JSON
    Discover {
        /// Path to the YAML config file (defaults apply when omitted)
        #[clap(long)]
        config: Option<PathBuf>,
        /// Artifact directory to scan; repeat to scan several. Overrides the config
        #[clap(long = "dir")]
        dirs: Vec<PathBuf>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Publish { config, dirs } => {
            let cli_config = load_config_or_default(config.as_deref())?;
            let publish_config = cli_config.publish_config(&dirs);
            publish_config.trace_loaded();

            let secrets = Secrets::from_env()?;
            let context = BuildContext::from_env()?;
            tracing::info!(command = "publish", "Starting artifact publication");

            let store = GcsClient::new(
                &cli_config.endpoints.storage_api,
                &cli_config.storage.bucket,
                secrets.storage_token,
            )
            .map_err(|e| anyhow::anyhow!(e))?;
            let host = GitHubClient::new(
                &cli_config.endpoints.github_api,
                &cli_config.endpoints.github_uploads,
                &cli_config.repository.owner,
                &cli_config.repository.name,
                secrets.github_token,
            )
            .map_err(|e| anyhow::anyhow!(e))?;

            match publish(&publish_config, &context, &store, &host).await {
                Ok(report) => {
                    tracing::info!(command = "publish", ?report, "Publication complete");
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "publish", error = %e, "Publication failed");
                    Err(e.into())
                }
            }
        }
        Commands::Discover { config, dirs } => {
            let cli_config = load_config_or_default(config.as_deref())?;
            let publish_config = cli_config.publish_config(&dirs);
            let artifacts = collect_local_artifacts(&publish_config.artifact_dirs)?;
            tracing::info!(command = "discover", count = artifacts.len(), "Discovery complete");
            println!("{}", serde_json::to_string_pretty(&artifacts)?);
            Ok(())
        }
    }
}
