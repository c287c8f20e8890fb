//! Ledger client command line.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────┐   KeyPair   ┌──────────┐  SignedTransaction  ┌──────────────┐
//!   │  KeyManager  │────────────▶│  Signer  │────────────────────▶│ LedgerClient │──▶ ledger server
//!   │ (key store)  │             └──────────┘                     └──────┬───────┘
//!   └──────────────┘                                                     │
//!                                                     GET /chain, /nodes │
//!                                  ┌──────────┐   snapshots   ┌──────────▼───────┐
//!                                  │   View   │◀──────────────│     SyncLoop     │
//!                                  └──────────┘               └──────────────────┘
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use ledger_client::config::{load_config, validate_config, ClientConfig};
use ledger_client::lifecycle::{wait_for_shutdown_signal, Shutdown};
use ledger_client::observability::{logging, metrics};
use ledger_client::sync::Resource;
use ledger_client::view::TerminalView;
use ledger_client::workflow::TransactionForm;
use ledger_client::ClientContext;

#[derive(Parser)]
#[command(name = "ledger-client")]
#[command(about = "Sign transfers and watch a ledger server", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ledger server base URL (overrides config)
    #[arg(short, long)]
    url: Option<String>,

    /// Key store file (overrides config)
    #[arg(short, long)]
    keystore: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new key pair, replacing any stored one
    Keygen,
    /// Show the stored public key
    Keys {
        /// Also print the private key
        #[arg(long)]
        show_private: bool,
    },
    /// Sign and submit a transfer
    Send {
        /// Recipient public key
        #[arg(long)]
        to: String,
        /// Amount to transfer
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
    },
    /// Ask the server to mine a block credited to our key
    Mine,
    /// Fetch and print the chain once
    Chain,
    /// Fetch and print the node list once
    Nodes,
    /// Refresh chain and nodes periodically until interrupted
    Watch {
        /// Refresh interval in milliseconds (overrides config)
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    if let Some(url) = cli.url {
        config.server.base_url = url;
    }
    if let Some(keystore) = cli.keystore {
        config.keystore.path = keystore;
    }
    if let Commands::Watch {
        interval_ms: Some(ms),
    } = cli.command
    {
        config.sync.interval_ms = ms;
    }
    validate_config(&config).map_err(|errors| {
        errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    })?;

    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        server = %config.server.base_url,
        interval_ms = config.sync.interval_ms,
        "ledger-client v0.1.0 starting"
    );

    let ctx = ClientContext::from_config(&config, Arc::new(TerminalView::new()))?;

    let succeeded = match cli.command {
        Commands::Keygen => {
            let outcome = ctx.generate_keys();
            if let Some(pair) = ctx.load_keys() {
                println!("Public key: {}", pair.public_key);
            }
            outcome.is_success()
        }
        Commands::Keys { show_private } => match ctx.load_keys() {
            Some(pair) => {
                println!("Public key: {}", pair.public_key);
                if show_private {
                    println!("Private key: {}", pair.private_key);
                }
                true
            }
            None => {
                println!("{}", ledger_client::workflow::NO_KEYS);
                false
            }
        },
        Commands::Send { to, amount } => {
            let mut form = TransactionForm::new(to, amount);
            ctx.submit(&mut form).await.is_success()
        }
        Commands::Mine => ctx.mine().await.is_success(),
        Commands::Chain => {
            ctx.sync().refresh(Resource::Chain).await;
            ctx.display().chain().is_some()
        }
        Commands::Nodes => {
            ctx.sync().refresh(Resource::Nodes).await;
            ctx.display().nodes().is_some()
        }
        Commands::Watch { .. } => {
            if config.observability.metrics_enabled {
                match config.observability.metrics_address.parse() {
                    Ok(addr) => metrics::init_metrics(addr),
                    Err(e) => tracing::error!(
                        metrics_address = %config.observability.metrics_address,
                        error = %e,
                        "Failed to parse metrics address"
                    ),
                }
            }

            let shutdown = Shutdown::new();
            let handles = ctx.start_sync(&shutdown);
            wait_for_shutdown_signal().await;
            shutdown.trigger();
            handles.join().await;
            true
        }
    };

    tracing::info!("Shutdown complete");
    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
