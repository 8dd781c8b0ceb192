//! QC-Genesis: Quantum-Chain genesis block generator
//!
//! Writes the genesis document (genesis wallet, signed block, delegate
//! passphrases) as JSON. Logs go to stderr so stdout stays machine-readable.
//!
//! Exit status: 0 on success, 2 when the configuration or parameters are
//! rejected, 1 for any other failure.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use qc_genesis::domain::verify_block;
use qc_genesis::{GenesisError, GenesisGenerator, GenesisToolConfig, NetworkConfig};

/// QC-Genesis: Quantum-Chain genesis block generator
#[derive(Parser, Debug)]
#[command(name = "qc-genesis")]
#[command(about = "Generate founding delegates, premine and the signed genesis block")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Network preset (mainnet, devnet, testnet)
    #[arg(short, long)]
    network: Option<String>,

    /// Number of founding delegates
    #[arg(short, long)]
    forgers: Option<u32>,

    /// Premine in minor units
    #[arg(short, long)]
    premine: Option<String>,

    /// Write the genesis document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Re-verify the block before writing it
    #[arg(long)]
    verify: bool,
}

/// Resolve configuration: file, then environment, then flags.
fn load_config(args: &Args) -> Result<GenesisToolConfig> {
    let mut config = GenesisToolConfig::load(args.config.as_deref())?;
    config.apply_env_overrides()?;

    if let Some(name) = &args.network {
        config.network = NetworkConfig::by_name(name)?;
    }
    if let Some(forgers) = args.forgers {
        config.genesis.forgers = forgers;
    }
    if let Some(premine) = &args.premine {
        config.genesis.premine = premine.clone();
    }

    Ok(config)
}

/// Operator input errors exit with 2, everything else with 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<GenesisError>() {
        Some(genesis) if genesis.is_config_error() => 2,
        _ => 1,
    }
}

fn main() -> ExitCode {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error: cannot install logger: {e}");
        return ExitCode::FAILURE;
    }

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args).context("invalid genesis configuration")?;

    let output = GenesisGenerator::with_os_entropy(config.network, config.genesis)
        .generate()
        .context("genesis generation failed")?;

    if args.verify {
        verify_block(&output.genesis_block).context("generated block failed verification")?;
        info!(id = %output.genesis_block.id, "Genesis block verified");
    }

    let json = serde_json::to_string_pretty(&output)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("cannot write {}", path.display()))?;
            info!(path = %path.display(), "Wrote genesis document");
        }
        None => println!("{json}"),
    }

    Ok(())
}
