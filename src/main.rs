//! `netprofile` command line: resolve and inspect toolchain network profiles.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use network_profiles::{
    constants, utils, NetworkProfileResolver, ProfileError, ProjectConfig, SecretsLoading,
};

#[derive(Parser, Debug)]
#[command(name = "netprofile", version, about = "Resolve smart-contract network profiles")]
struct Cli {
    /// Secrets file with gateway key and per-network private keys
    #[arg(long, global = true, default_value = constants::DEFAULT_SECRETS_FILE_NAME)]
    secrets: PathBuf,

    /// Read the secrets file only when a remote profile is resolved
    #[arg(long, global = true)]
    deferred: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List declared profiles
    List,
    /// Resolve a profile and print its connection descriptor
    Resolve { profile: String },
    /// Resolve a remote profile and check the endpoint's chain id
    Check { profile: String },
    /// Report secret fields missing for declared profiles
    Validate,
    /// Print the project configuration as json
    Config,
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .compact()
        .with_target(false);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_tracing() {
        eprintln!("failed to initialize logging: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ProfileError> {
    let loading = if cli.deferred {
        SecretsLoading::Deferred
    } else {
        SecretsLoading::Eager
    };
    let resolver = || {
        NetworkProfileResolver::builder()
            .secrets_path(cli.secrets.clone())
            .loading(loading)
            .build()
    };

    match cli.command {
        Command::List => {
            utils::pprint_profiles(&ProjectConfig::declared().networks);
        }
        Command::Config => {
            println!("{}", pretty(&ProjectConfig::declared().to_json()));
        }
        Command::Resolve { profile } => {
            let descriptor = resolver()?.resolve(&profile)?;
            println!("{}", pretty(&descriptor.summary()));
        }
        Command::Check { profile } => {
            let descriptor = resolver()?.resolve(&profile)?;
            match descriptor.as_provider() {
                Some(provider) => {
                    let chain_id = provider.verify_chain_id().await?;
                    println!("{}: endpoint reports chain id {}", profile, chain_id);
                }
                None => println!("{}: local profile, nothing to check", profile),
            }
        }
        Command::Validate => {
            let gaps = resolver()?.validate_secrets()?;
            if gaps.is_empty() {
                println!("all declared secret fields present");
            } else {
                println!("{}", pretty(&serde_json::json!(gaps)));
            }
        }
    }
    Ok(())
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
