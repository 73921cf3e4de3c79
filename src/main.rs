use std::io::{stderr, stdout, BufWriter, Write};
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::Parser;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use client_ledger::config::{Cli, Command};
use client_ledger::engine::{
    balances, client_summary, dashboard_stats, filter_clients, recent_entradas, recent_saidas,
    BalanceBucket, ClientWithBalance, DashboardStats, DateRange,
};
use client_ledger::models::{Client, NewTransaction, Transaction, TransactionKind};
use client_ledger::roster::load_roster;
use client_ledger::storage::{FileStorage, TransactionStore};
use client_ledger::types::{format_date, format_percent, parse_date, Brl};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.config.level_filter());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            debug!("Command failed: {error:?}");
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(Cli { config, command }: Cli) -> Result<()> {
    let storage = Arc::new(FileStorage::new(&config.data_dir));
    let store = TransactionStore::open(storage, config.store_key.as_str())?;

    match command {
        Command::Dashboard { from, to } => {
            let range = DateRange::parse(from.as_deref(), to.as_deref())?;
            let clients = load_roster(&config.roster).await?;

            write_dashboard(&dashboard_stats(&store.snapshot(), &clients, range))?;
        }
        Command::Clients { query, bucket } => {
            let bucket = BalanceBucket::from_str(&bucket)?;
            let clients = load_roster(&config.roster).await?;
            let totals = balances(&clients, &store.snapshot());
            let matches = filter_clients(&clients, &totals, &query, bucket);

            if matches.is_empty() {
                eprintln!("no clients found");
            }

            write_client_rows(&matches)?;
        }
        Command::Client { id } => {
            let clients = load_roster(&config.roster).await?;
            let client = clients
                .iter()
                .find(|client| client.id == id)
                .ok_or_else(|| anyhow!("client [{id}] is not in the roster"))?;

            write_client_card(client, &store.snapshot())?;
        }
        Command::Add { client_id, tipo, valor, date } => {
            let data = match date {
                Some(date) => parse_date(&date)?,
                None => Local::now().date_naive(),
            };

            let transaction = store.append(NewTransaction {
                cliente_id: client_id,
                tipo: TransactionKind::from(tipo.as_str()),
                valor: Brl::from_str(&valor)?.amount(),
                data,
            })?;

            info!(
                "Recorded [{}] {} of {} for client [{}]",
                transaction.id,
                transaction.tipo,
                Brl(transaction.valor),
                transaction.cliente_id
            );
            println!("{}", transaction.id);
        }
        Command::Import { file } => {
            let count = store
                .import_file(&file)
                .await
                .with_context(|| {
                    format!("import from {} aborted, existing transactions kept", file.display())
                })?;

            info!("Imported {count} transactions from {}", file.display());
            println!("{count}");
        }
        Command::Export { output } => {
            let json = store.export_json()?;

            match output {
                Some(path) => {
                    tokio::fs::write(&path, format!("{json}\n")).await?;
                    info!("Exported {} transactions to {}", store.len(), path.display());
                }
                None => writeln!(stdout().lock(), "{json}")?,
            }
        }
    }

    Ok(())
}

fn setup_logging(level: LevelFilter) {
    // stdout carries command output, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_dashboard(stats: &DashboardStats) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "clients: {}", stats.client_count)?;
    writeln!(output, "net balance: {}", Brl(stats.net_balance))?;
    writeln!(output, "commission total: {}", Brl(stats.total_commission_value))?;
    writeln!(output, "average commission: {}", format_percent(stats.average_commission_pct))?;

    output.flush()?;

    Ok(())
}

#[derive(Serialize)]
struct ClientRow<'a> {
    id: &'a str,
    nome: &'a str,
    empresa: &'a str,
    saldo: Decimal,
}

fn write_client_rows(entries: &[ClientWithBalance<'_>]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(stdout().lock());

    writer.write_record(["id", "nome", "empresa", "saldo"])?;

    for entry in entries {
        let mut saldo = entry.balance.round_dp(2);
        saldo.rescale(2);

        writer.serialize(ClientRow {
            id: &entry.client.id,
            nome: &entry.client.nome,
            empresa: &entry.client.empresa,
            saldo,
        })?;
    }

    writer.flush()?;

    Ok(())
}

fn write_client_card(client: &Client, transactions: &[Transaction]) -> Result<()> {
    let summary = client_summary(client, transactions);
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "{} ({})", client.nome, client.id)?;
    writeln!(output, "empresa: {}", client.empresa)?;
    writeln!(output, "celular: {}", client.celular)?;
    writeln!(output, "vendedor: {}", client.vendedor)?;
    writeln!(output, "bandeira: {}", client.bandeira)?;
    writeln!(output, "endereco: {}", client.endereco_completo)?;
    writeln!(output, "comissao: {}", format_percent(client.commission_pct()))?;
    writeln!(output, "saldo: {}", Brl(summary.balance))?;
    writeln!(output, "total entradas: {}", Brl(summary.total_entradas))?;
    writeln!(output, "total saidas: {}", Brl(summary.total_saidas))?;
    writeln!(output, "comissao devida: {}", Brl(summary.commission_value))?;

    let sections: [(&str, Vec<&Transaction>); 2] = [
        ("ultimas entradas", recent_entradas(&client.id, transactions).collect()),
        ("ultimas saidas", recent_saidas(&client.id, transactions).collect()),
    ];

    for (title, recent) in sections {
        writeln!(output, "{title}:")?;

        if recent.is_empty() {
            writeln!(output, "  -")?;
        }

        for transaction in recent {
            writeln!(output, "  {}  {}", format_date(transaction.data), Brl(transaction.valor))?;
        }
    }

    output.flush()?;

    Ok(())
}
