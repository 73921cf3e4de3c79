use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::error;

use crate::models::{Client, Transaction, TransactionKind};
use crate::types::{parse_date, ClientId, DateError};

/// Inclusive reporting window. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Builds a range from optional `yyyy-mm-dd` strings; blank strings count as absent.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, DateError> {
        let bound = |value: Option<&str>| match value.map(str::trim) {
            Some(value) if !value.is_empty() => parse_date(value).map(Some),
            _ => Ok(None),
        };

        Ok(Self::new(bound(start)?, bound(end)?))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// Figures shown on the dashboard.
///
/// `client_count` and `average_commission_pct` describe the whole roster and
/// ignore the date range; `net_balance` and `total_commission_value` only
/// count transactions inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub client_count: usize,
    pub net_balance: Decimal,
    pub total_commission_value: Decimal,
    pub average_commission_pct: Decimal,
}

/// Per-client card figures over the client's full history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientSummary {
    pub balance: Decimal,
    pub total_entradas: Decimal,
    pub total_saidas: Decimal,
    pub commission_value: Decimal,
}

/// Balance of one client: entradas minus saidas. Unknown ids yield zero.
pub fn balance_of(client_id: &str, transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|transaction| transaction.cliente_id == client_id)
        .fold(Decimal::ZERO, |mut total, transaction| {
            accumulate(&mut total, transaction.signed_amount());
            total
        })
}

/// Balance of every roster client in a single pass over the transactions.
///
/// Every roster id is present in the result; transactions for ids outside the
/// roster are skipped.
pub fn balances(clients: &[Client], transactions: &[Transaction]) -> HashMap<ClientId, Decimal> {
    let mut totals: HashMap<ClientId, Decimal> = clients
        .iter()
        .map(|client| (client.id.clone(), Decimal::ZERO))
        .collect();

    for transaction in transactions {
        if let Some(total) = totals.get_mut(&transaction.cliente_id) {
            accumulate(total, transaction.signed_amount());
        }
    }

    totals
}

pub fn dashboard_stats(
    transactions: &[Transaction],
    clients: &[Client],
    range: DateRange,
) -> DashboardStats {
    let mut commission_by_client: HashMap<&str, Decimal> = HashMap::with_capacity(clients.len());
    for client in clients {
        // first roster entry wins on duplicate ids
        commission_by_client
            .entry(client.id.as_str())
            .or_insert_with(|| client.commission_pct());
    }

    let mut net_balance = Decimal::ZERO;
    let mut total_commission_value = Decimal::ZERO;

    let in_range = transactions
        .iter()
        .filter(|transaction| range.contains(transaction.data));

    for transaction in in_range {
        accumulate(&mut net_balance, transaction.signed_amount());

        if transaction.is_entrada() {
            if let Some(pct) = commission_by_client.get(transaction.cliente_id.as_str()) {
                accumulate(&mut total_commission_value, commission(transaction.valor, *pct));
            }
        }
    }

    let average_commission_pct = if clients.is_empty() {
        Decimal::ZERO
    } else {
        let mut pct_sum = Decimal::ZERO;
        for client in clients {
            accumulate(&mut pct_sum, client.commission_pct());
        }
        pct_sum / Decimal::from(clients.len())
    };

    DashboardStats {
        client_count: clients.len(),
        net_balance,
        total_commission_value,
        average_commission_pct,
    }
}

pub fn client_summary(client: &Client, transactions: &[Transaction]) -> ClientSummary {
    let mut summary = ClientSummary::default();

    let history = transactions
        .iter()
        .filter(|transaction| transaction.cliente_id == client.id);

    for transaction in history {
        accumulate(&mut summary.balance, transaction.signed_amount());

        match transaction.tipo {
            TransactionKind::Entrada => {
                accumulate(&mut summary.total_entradas, transaction.valor);
                accumulate(
                    &mut summary.commission_value,
                    commission(transaction.valor, client.commission_pct()),
                );
            }
            TransactionKind::Saida => accumulate(&mut summary.total_saidas, transaction.valor),
            TransactionKind::Other(_) => {}
        }
    }

    summary
}

/// Adds `amount` to `total`. On overflow the amount is skipped and `total` keeps its value.
fn accumulate(total: &mut Decimal, amount: Decimal) {
    if let Some(sum) = total.checked_add(amount) {
        *total = sum;
    } else {
        error!("Ledger total overflow: skipped {amount} on top of {total}");
    }
}

fn commission(amount: Decimal, pct: Decimal) -> Decimal {
    match amount.checked_mul(pct / Decimal::ONE_HUNDRED) {
        Some(value) => value,
        None => {
            error!("Commission overflow: {pct}% of {amount}");
            Decimal::ZERO
        }
    }
}
