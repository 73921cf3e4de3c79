//! Pure ledger calculations over a client roster and a transaction snapshot.
//!
//! Nothing here holds state or performs I/O; every function takes the data it
//! needs and returns a fresh result.

mod aggregation;
mod filter;
mod recency;
#[cfg(test)]
mod tests;

pub use aggregation::{
    balance_of, balances, client_summary, dashboard_stats, ClientSummary, DashboardStats, DateRange,
};
pub use filter::{filter_clients, BalanceBucket, ClientWithBalance};
pub use recency::{recent_entradas, recent_saidas, RECENT_LIMIT};
