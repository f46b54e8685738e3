// crates/terralock-cli/src/main.rs
// ============================================================================
// Module: Terralock CLI Entry Point
// Description: Command dispatcher for config and state-bucket workflows.
// Purpose: Glue the config store, validator, catalog, and orchestrator.
// Dependencies: clap, serde_yaml, terralock-aws, terralock-config,
//               terralock-core, thiserror, tokio, tokio-util.
// ============================================================================

//! ## Overview
//! The CLI is thin glue: it loads or builds a configuration document, runs
//! the validator, and hands the S3 backend fields to the provisioning
//! orchestrator. Ctrl-C is wired to the orchestrator's cancellation token so
//! an interrupted run surfaces as a cancelled step rather than a killed
//! process.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use terralock_aws::AwsRegionLister;
use terralock_aws::AwsStateBucketClient;
use terralock_config::CloudConfig;
use terralock_config::ConfigDocument;
use terralock_config::ConfigStore;
use terralock_core::BackendTarget;
use terralock_core::BucketProvisioner;
use terralock_core::ProvisionObserver;
use terralock_core::ProvisionStep;
use terralock_core::RegionCatalog;
use terralock_core::provision::PROVIDER_DEFAULT_REGION;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "terralock", version, about = "Provision the Terraform state bucket")]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Region catalog utilities.
    Regions {
        /// Selected regions subcommand.
        #[command(subcommand)]
        command: RegionsCommand,
    },
    /// Provision the state bucket described by the configuration.
    Provision(ProvisionCommand),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a starter configuration document.
    Init(InitCommand),
    /// Print the stored configuration document.
    Show(StorePathArgs),
    /// Validate the stored configuration document.
    Validate(StorePathArgs),
}

/// Region subcommands.
#[derive(Subcommand, Debug)]
enum RegionsCommand {
    /// List every region known to the provider, sorted.
    List(RegionsListCommand),
}

/// Arguments selecting the configuration file location.
#[derive(Args, Debug)]
struct StorePathArgs {
    /// Optional config file path (defaults to `$HOME/.terralock/config.yaml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Configuration for the `config init` command.
#[derive(Args, Debug)]
struct InitCommand {
    /// Location options.
    #[command(flatten)]
    store: StorePathArgs,
    /// Overwrite an existing configuration file.
    #[arg(long)]
    force: bool,
}

/// Configuration for the `regions list` command.
#[derive(Args, Debug)]
struct RegionsListCommand {
    /// Region used for the listing endpoint itself.
    #[arg(long, value_name = "REGION", default_value = PROVIDER_DEFAULT_REGION)]
    region: String,
}

/// Configuration for the `provision` command.
#[derive(Args, Debug)]
struct ProvisionCommand {
    /// Location options.
    #[command(flatten)]
    store: StorePathArgs,
}

// ============================================================================
// SECTION: Error Type
// ============================================================================

/// User-facing CLI failure.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Rendered failure message.
    message: String,
}

impl CliError {
    /// Creates a CLI error from anything displayable.
    fn new(message: impl std::fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Result alias for CLI operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Config {
            command,
        } => run_config(command),
        Commands::Regions {
            command,
        } => run_regions(command).await,
        Commands::Provision(command) => run_provision(command).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => emit_error(&error.message),
    }
}

// ============================================================================
// SECTION: Command Handlers
// ============================================================================

/// Dispatches `config` subcommands.
fn run_config(command: ConfigCommand) -> CliResult<()> {
    match command {
        ConfigCommand::Init(command) => {
            let store = resolve_store(command.store.config)?;
            if store.exists() && !command.force {
                return Err(CliError::new(format!(
                    "refusing to overwrite {} (pass --force to replace it)",
                    store.path().display()
                )));
            }
            store.save(&ConfigDocument::default()).map_err(CliError::new)?;
            write_line(&format!(
                "wrote starter configuration to {}; edit it before provisioning",
                store.path().display()
            ))
        }
        ConfigCommand::Show(args) => {
            let store = resolve_store(args.config)?;
            let document = store.load().map_err(CliError::new)?;
            let rendered = serde_yaml::to_string(&document).map_err(CliError::new)?;
            write_line(rendered.trim_end())
        }
        ConfigCommand::Validate(args) => {
            let store = resolve_store(args.config)?;
            let document = store.load().map_err(CliError::new)?;
            document.validate().map_err(CliError::new)?;
            write_line(&format!("configuration at {} is valid", store.path().display()))
        }
    }
}

/// Dispatches `regions` subcommands.
async fn run_regions(command: RegionsCommand) -> CliResult<()> {
    match command {
        RegionsCommand::List(command) => {
            let lister = AwsRegionLister::connect(&command.region).await;
            let catalog = RegionCatalog::new(lister);
            let regions = catalog.list_regions().await.map_err(CliError::new)?;
            for code in regions {
                write_line(&format!("{code}  {}", catalog.describe(&code)))?;
            }
            Ok(())
        }
    }
}

/// Loads, validates, and provisions the configured state bucket.
async fn run_provision(command: ProvisionCommand) -> CliResult<()> {
    let store = resolve_store(command.store.config)?;
    let document = store.load().map_err(CliError::new)?;
    document.validate().map_err(CliError::new)?;

    // Only the AWS workflow is implemented; the GCP selection is a stub.
    if matches!(document.cloud, CloudConfig::Gcp {}) {
        return Err(CliError::new(
            "gcp state-backend provisioning is not implemented; select the aws cloud provider",
        ));
    }

    let backend = &document.terraform.s3;
    let target =
        BackendTarget::new(&backend.bucket_name, &backend.bucket_region).map_err(CliError::new)?;

    let cancel = CancellationToken::new();
    let interrupt_target = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt_target.cancel();
        }
    });

    let client = AwsStateBucketClient::connect(target.region()).await;
    let provisioner =
        BucketProvisioner::new(client).with_observer(Arc::new(ProgressObserver));
    let outcome =
        provisioner.ensure_state_bucket(&target, &cancel).await.map_err(CliError::new)?;

    if outcome.bucket_was_created {
        write_line(&format!("created state bucket {}", target.bucket_name()))
    } else {
        write_line(&format!(
            "state bucket {} already existed; configuration re-applied",
            target.bucket_name()
        ))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Observer printing step progress as the orchestrator advances.
struct ProgressObserver;

impl ProvisionObserver for ProgressObserver {
    fn step_started(&self, step: ProvisionStep) {
        // Observers must not fail; a closed stdout is ignored here.
        let _ = write_stdout_line(&format!("  -> {step}"));
    }
}

/// Resolves the store from an optional path override.
fn resolve_store(path: Option<PathBuf>) -> CliResult<ConfigStore> {
    path.map_or_else(|| ConfigStore::default_location().map_err(CliError::new), |path| {
        Ok(ConfigStore::new(path))
    })
}

/// Writes a single line to stdout, mapping failures to CLI errors.
fn write_line(message: &str) -> CliResult<()> {
    write_stdout_line(message).map_err(|err| CliError::new(format!("stdout write failed: {err}")))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(&format!("error: {message}"));
    ExitCode::FAILURE
}
