use clap::{Parser, Subcommand};
use minter::{
    api::MintApiClient,
    batch::BatchOrchestrator,
    broadcast::RpcBroadcaster,
    config::Config,
    metadata::{assign_work_items, resolve_metadata},
    types::MintOutcome,
    wallet::load_wallets,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

/// Multi-wallet NFT minter for Solana (private RPC, bounded concurrency)
#[derive(Parser, Debug)]
#[command(name = "minter", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (environment variables take precedence)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mint one NFT per wallet
    ///
    /// With --metadata-csv, rows are assigned round-robin to wallets.
    /// Otherwise a single --name/--symbol/--uri triple is used for all.
    Mint {
        /// Wallet keypair JSON files or directories (repeatable)
        #[arg(short = 'w', long = "wallet", required = true)]
        wallets: Vec<PathBuf>,

        /// NFT name (single-descriptor mode)
        #[arg(long)]
        name: Option<String>,

        /// NFT symbol (single-descriptor mode)
        #[arg(long)]
        symbol: Option<String>,

        /// Metadata URI, e.g. Arweave/IPFS/HTTPS (single-descriptor mode)
        #[arg(long)]
        uri: Option<String>,

        /// CSV with columns: name,symbol,uri,seller_fee_basis_points
        #[arg(long = "metadata-csv")]
        metadata_csv: Option<PathBuf>,

        /// Default royalty in basis points when a row omits it
        #[arg(long = "royalty-bps", default_value = "500")]
        royalty_bps: u16,

        /// Maximum concurrent mint pipelines
        #[arg(long = "parallel", default_value = "4")]
        parallel: usize,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("minter=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("minter=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(exit) => exit,
        Err(e) => {
            error!("{e}");
            // Fatal setup errors: nothing was attempted
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    // Configuration failures surface here, before any network client exists
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Mint {
            wallets,
            name,
            symbol,
            uri,
            metadata_csv,
            royalty_bps,
            parallel,
        } => {
            cmd_mint(
                config,
                wallets,
                name,
                symbol,
                uri,
                metadata_csv,
                royalty_bps,
                parallel,
            )
            .await
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn cmd_mint(
    config: Config,
    wallet_paths: Vec<PathBuf>,
    name: Option<String>,
    symbol: Option<String>,
    uri: Option<String>,
    metadata_csv: Option<PathBuf>,
    royalty_bps: u16,
    parallel: usize,
) -> anyhow::Result<ExitCode> {
    let wallets = load_wallets(&wallet_paths)?;
    info!("Loaded {} wallets", wallets.len());

    let descriptors = resolve_metadata(name, symbol, uri, metadata_csv.as_deref(), royalty_bps)?;
    let items = assign_work_items(wallets, &descriptors)?;

    let api = MintApiClient::new(&config.private_api_url)?
        .with_fee_hints(config.priority_fee_microlamports, config.compute_unit_limit);
    let broadcaster = RpcBroadcaster::new(&config.rpc_url, config.commitment_config());

    let orchestrator = BatchOrchestrator::new(Arc::new(api), Arc::new(broadcaster), parallel);
    let outcomes = orchestrator.run(items).await;

    print_outcomes(&outcomes);

    let failures = outcomes.iter().filter(|o| !o.is_success()).count();
    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else if failures == outcomes.len() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    })
}

/// Print one row per outcome; failed items are reported, never omitted
fn print_outcomes(outcomes: &[MintOutcome]) {
    println!("{:<44} {:<44} {}", "Payer", "Mint", "Result");
    for outcome in outcomes {
        match outcome {
            MintOutcome::Success(receipt) => {
                let mint = receipt
                    .mint
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<44} {:<44} {}", receipt.payer, mint, receipt.signature);
            }
            MintOutcome::Failure {
                payer,
                descriptor,
                error,
            } => {
                println!(
                    "{:<44} {:<44} FAILED [{}]: {}",
                    payer, "-", descriptor.name, error
                );
            }
        }
    }
}
