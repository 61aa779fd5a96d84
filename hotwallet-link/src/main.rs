use std::{error::Error, io::BufRead, path::PathBuf, process, sync::Arc};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tracing::error;

use link_panel::{
    config::{self, Config, ConfigError},
    logger,
    runtime::drive,
    Msg, OperatorNoteUpdate, OperatorNoteWriter, TransactionError, TxHash, WalletClient,
    WalletLinkPanel, WalletRecord,
};

/// Signers note updates need a wallet to sign with; the command line has none.
struct ReadOnlyWriter;

#[async_trait]
impl OperatorNoteWriter for ReadOnlyWriter {
    async fn send(&self, _update: &OperatorNoteUpdate) -> Result<TxHash, TransactionError> {
        Err(TransactionError(
            "Signers note updates are not available from the command line".to_string(),
        ))
    }

    async fn confirm(&self, _tx: &TxHash) -> Result<(), TransactionError> {
        Err(TransactionError("No transaction was sent".to_string()))
    }
}

#[derive(Parser, Debug)]
#[command(name = "hotwallet-link")]
#[command(version = link_panel::VERSION)]
#[command(about = "Manage the hot wallets of a hypergrid operator")]
struct Args {
    /// Path of the configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Operator node URL (e.g., http://127.0.0.1:8080)
    #[arg(long)]
    server: Option<String>,

    /// Dashboard page path the API prefix is derived from
    #[arg(long)]
    page_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show managed and externally linked wallets
    List,
    /// Generate a new managed wallet
    Generate,
    /// Import a wallet from its private key, read from stdin unless given
    Import {
        #[arg(long, env = "HOTWALLET_PRIVATE_KEY", hide_env_values = true)]
        private_key: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
}

fn load_config(args: &Args) -> Result<Config, ConfigError> {
    let path = args.config.clone().or_else(config::default_path);
    let mut config = match path {
        Some(path) => match Config::from_file(&path) {
            Ok(config) => config,
            // Only a file given explicitly has to exist.
            Err(ConfigError::NotFound) if args.config.is_none() => Config::default(),
            Err(e) => return Err(e),
        },
        None => Config::default(),
    };
    if let Some(server) = &args.server {
        config.server_url = server.clone();
    }
    if let Some(page_path) = &args.page_path {
        config.page_path = Some(page_path.clone());
        config.api_base = None;
    }
    Ok(config)
}

fn read_private_key(mut input: impl BufRead) -> Result<String, std::io::Error> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_wallet(wallet: &WalletRecord, selected: bool) {
    println!(
        "  [{}] {} {}{}",
        if selected { "x" } else { " " },
        wallet.address,
        wallet.display_name(),
        if wallet.is_linked_on_chain {
            " (linked)"
        } else {
            ""
        }
    );
}

fn print_directory(panel: &WalletLinkPanel) {
    let directory = panel.directory();
    println!("Managed wallets:");
    for wallet in directory.managed() {
        print_wallet(wallet, panel.selection().contains(&wallet.address));
    }
    println!("External signers:");
    for wallet in directory.external() {
        print_wallet(wallet, panel.selection().contains(&wallet.address));
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let log_level = match logger::parse_log_level()? {
        Some(level) => level,
        None => config.log_level()?,
    };
    logger::setup_logger(log_level, config.log_file.as_deref())?;

    let client = WalletClient::new(&config.server_url, &config.api_base());
    let mut panel = WalletLinkPanel::new(Arc::new(client), Arc::new(ReadOnlyWriter), &config);

    let task = panel.load();
    drive(&mut panel, task).await;

    let action = match args.command {
        Command::List => None,
        Command::Generate => Some(vec![Msg::GenerateWallet]),
        Command::Import { private_key, name } => {
            let private_key = match private_key {
                Some(key) => key,
                None => {
                    eprintln!("Private key:");
                    read_private_key(std::io::stdin().lock())?
                }
            };
            Some(vec![
                Msg::ImportShowForm,
                Msg::ImportUpdatePrivateKey(private_key),
                Msg::ImportUpdateName(name.unwrap_or_default()),
                Msg::ImportSubmit,
            ])
        }
    };
    if let Some(messages) = action {
        for message in messages {
            let task = panel.update(message);
            drive(&mut panel, task).await;
        }
    }

    if let Some(warning) = panel.warning() {
        error!("{}", warning);
        eprintln!("{}", warning);
        process::exit(1);
    }
    print_directory(&panel);
    Ok(())
}
