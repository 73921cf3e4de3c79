
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Parser)]
#[command(
    name = "client-ledger",
    version,
    about = "Record cash movements against a client roster and report balances"
)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,
    #[command(subcommand)]
    pub command: Command,
}

/// Where the roster and persisted transactions live, and how loudly to log.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Client roster document ({ "clientes": [...] })
    #[arg(long, global = true, env = "LEDGER_ROSTER", default_value = "clientes.json")]
    pub roster: PathBuf,
    /// Directory holding persisted ledger state
    #[arg(long = "data-dir", global = true, env = "LEDGER_DATA_DIR", default_value = ".ledger")]
    pub data_dir: PathBuf,
    /// Storage key for the transaction list
    #[arg(
        long = "store-key",
        global = true,
        env = "LEDGER_STORE_KEY",
        default_value = "transacoes"
    )]
    pub store_key: String,
    /// error, warn, info, debug or trace
    #[arg(long = "log-level", global = true, env = "LEDGER_LOG", default_value = "error")]
    pub log_level: String,
}

impl Config {
    pub fn level_filter(&self) -> LevelFilter {
        parse_log_level(&self.log_level)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Roster-wide KPIs plus cash flow inside an optional date window
    Dashboard {
        /// First day included (yyyy-mm-dd)
        #[arg(long)]
        from: Option<String>,
        /// Last day included (yyyy-mm-dd)
        #[arg(long)]
        to: Option<String>,
    },
    /// Balance-annotated client list as CSV
    Clients {
        /// Matches name, company or id, ignoring case
        #[arg(long, short, default_value = "")]
        query: String,
        /// all, positive, 0to500, 501to1000, above1000, negative or zero
        #[arg(long, short, default_value = "all")]
        bucket: String,
    },
    /// Details, totals and latest movements of one client
    Client { id: String },
    /// Record a new entrada or saida
    Add {
        client_id: String,
        /// entrada or saida
        tipo: String,
        /// Amount, e.g. 1.234,56 or 1234.56
        valor: String,
        /// Day of the movement (yyyy-mm-dd), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Replace all transactions with a JSON array from a file
    Import { file: PathBuf },
    /// Write all transactions as pretty JSON
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}
