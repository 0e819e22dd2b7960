// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use kube::Client;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing::level_filters::LevelFilter;

use jsctl_operator::config::Config;
use jsctl_operator::error::InstallerError;
use jsctl_operator::kubernetes::{InstallationClient, KubeApplier};
use jsctl_operator::manifests::{
    self, apply_installation_manifest, apply_operator_manifest, render_installation_manifest,
    render_operator_manifest, suggested_actions, InstallationOptions, OperatorManifestOptions,
};
use jsctl_operator::venafi::{VenafiIssuer, VenafiIssuerExpander};

#[derive(Parser, Debug)]
#[command(version, about = "Install and inspect the Jetstack Secure operator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the operator versions that can be deployed
    Versions,
    /// Deploy the operator into the current cluster
    Deploy(DeployArgs),
    /// Manage the operator's Installation resource
    #[command(subcommand)]
    Installation(InstallationCommand),
}

#[derive(Subcommand, Debug)]
enum InstallationCommand {
    /// Apply an Installation resource describing the components to install
    Apply(InstallationArgs),
    /// Show the readiness of the installed components
    Status {
        /// Print the statuses as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct DeployArgs {
    /// Operator version to deploy, defaults to the latest
    #[arg(long)]
    version: Option<String>,

    /// Custom image registry for the operator image
    #[arg(long)]
    registry: Option<String>,

    /// Service account key for the Jetstack Secure registry
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Print the manifests instead of applying them
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct InstallationArgs {
    /// Install the cert-manager CSI driver
    #[arg(long)]
    csi_driver: bool,

    /// Install the cert-manager SPIFFE CSI driver
    #[arg(long)]
    csi_driver_spiffe: bool,

    /// Install istio-csr
    #[arg(long)]
    istio_csr: bool,

    /// Issuer istio-csr requests certificates from
    #[arg(long)]
    istio_csr_issuer: Option<String>,

    /// Install the venafi-oauth-helper
    #[arg(long)]
    venafi_oauth_helper: bool,

    /// YAML file with a list of Venafi issuers to create
    #[arg(long)]
    venafi_issuers: Option<PathBuf>,

    /// Custom image registry for operator components
    #[arg(long)]
    registry: Option<String>,

    /// Registry credentials used for image pull secrets
    #[arg(long)]
    credentials: Option<PathBuf>,

    #[arg(long, default_value_t = 2)]
    cert_manager_replicas: i32,

    /// cert-manager version to deploy, defaults to the operator's choice
    #[arg(long)]
    cert_manager_version: Option<String>,

    #[arg(long, default_value_t = 2)]
    istio_csr_replicas: i32,

    #[arg(long, default_value_t = 1)]
    csi_driver_spiffe_replicas: i32,

    /// Print the manifests instead of applying them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    // Logs go to stderr so rendered manifests on stdout stay pipeable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Command::Versions => {
            for version in manifests::versions()? {
                println!("{}", version);
            }
        }
        Command::Deploy(args) => deploy(args, &config).await?,
        Command::Installation(InstallationCommand::Apply(args)) => {
            apply_installation(args, &config).await?
        }
        Command::Installation(InstallationCommand::Status { json }) => status(json).await?,
    }

    Ok(())
}

async fn deploy(args: DeployArgs, config: &Config) -> Result<()> {
    let credentials = args
        .credentials
        .or_else(|| config.credentials.clone())
        .context("--credentials is required to pull the operator image")?;

    let options = OperatorManifestOptions {
        version: args.version,
        image_registry: args.registry.or_else(|| config.image_registry.clone()),
        credentials,
    };
    if args.dry_run {
        std::io::stdout().write_all(&render_operator_manifest(&options)?)?;
        return Ok(());
    }

    let client = Client::try_default().await?;
    apply_operator_manifest(&KubeApplier::new(client), &options).await?;
    info!("Operator deployed");
    Ok(())
}

async fn apply_installation(args: InstallationArgs, config: &Config) -> Result<()> {
    let venafi_issuers = match &args.venafi_issuers {
        Some(path) => read_venafi_issuers(path)?,
        None => Vec::new(),
    };

    let options = InstallationOptions {
        install_csi_driver: args.csi_driver,
        install_spiffe_csi_driver: args.csi_driver_spiffe,
        install_istio_csr: args.istio_csr,
        install_venafi_oauth_helper: args.venafi_oauth_helper,
        venafi_issuers,
        istio_csr_issuer: args.istio_csr_issuer,
        image_registry: args.registry.or_else(|| config.image_registry.clone()),
        credentials: args.credentials.or_else(|| config.credentials.clone()),
        cert_manager_replicas: args.cert_manager_replicas,
        cert_manager_version: args.cert_manager_version,
        istio_csr_replicas: args.istio_csr_replicas,
        spiffe_csi_driver_replicas: args.csi_driver_spiffe_replicas,
    };
    if args.dry_run {
        let manifest = render_installation_manifest(&options, &VenafiIssuerExpander)?;
        std::io::stdout().write_all(&manifest)?;
        return Ok(());
    }

    let client = Client::try_default().await?;
    apply_installation_manifest(&KubeApplier::new(client), &VenafiIssuerExpander, &options).await?;
    info!("Installation applied");

    for suggestion in suggested_actions(&options) {
        println!("{}", suggestion);
    }
    Ok(())
}

fn read_venafi_issuers(path: &Path) -> Result<Vec<VenafiIssuer>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read Venafi issuers from {}", path.display()))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("invalid Venafi issuers in {}", path.display()))
}

async fn status(json: bool) -> Result<()> {
    let client = Client::try_default().await?;
    let statuses = match InstallationClient::new(client).status().await {
        Ok(statuses) => statuses,
        Err(InstallerError::NoInstallation) => {
            anyhow::bail!("no Installation found, apply one with `installation apply` first")
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    for status in statuses {
        let state = if status.ready { "ready" } else { "not ready" };
        match status.message {
            Some(message) => println!("{:<22} {:<10} {}", status.name, state, message),
            None => println!("{:<22} {}", status.name, state),
        }
    }
    Ok(())
}
