mod file_storage;
mod memory_storage;
mod transaction_store;

use crate::models::LedgerError;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
pub use transaction_store::TransactionStore;

/// Key-value persistence for serialized ledger state.
///
/// A missing key is not an error; `load` returns `None` for it.
pub trait Storage: Send + Sync + 'static {
    fn load(&self, key: &str) -> Result<Option<String>, LedgerError>;
    fn save(&self, key: &str, value: &str) -> Result<(), LedgerError>;
}
