//! Client ledger: a static client roster, a persisted list of cash movements
//! (`entrada`/`saida`) and the pure calculations that turn both into balances,
//! dashboard figures and filtered client lists.

pub mod config;
pub mod engine;
pub mod models;
pub mod roster;
pub mod storage;
pub mod types;
