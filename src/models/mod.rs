mod client;
mod errors;
mod transaction;

pub use client::{Address, Client};
pub use errors::LedgerError;
pub use transaction::{NewTransaction, Transaction, TransactionKind};
