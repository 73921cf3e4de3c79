use crate::models::{LedgerError, NewTransaction, Transaction, TransactionKind};
use crate::storage::Storage;
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, error, warn};

/// The list of recorded transactions, mirrored to a storage key after every
/// mutation.
///
/// Readers take an `Arc` snapshot and never see a partially applied change.
/// Mutations are serialized: a new list is built, persisted, and only then
/// swapped in, so a failed write leaves the previous list in place.
pub struct TransactionStore<S: Storage> {
    storage: Arc<S>,
    key: String,
    snapshot: RwLock<Arc<Vec<Transaction>>>,
    writer: Mutex<()>,
}

impl<S: Storage> TransactionStore<S> {
    /// Opens the store, reading whatever is persisted under `key`.
    ///
    /// # Errors
    /// Returns `LedgerError::Persistence` if the stored value is not a valid
    /// transaction list, or the storage error if the read itself fails.
    pub fn open(storage: Arc<S>, key: impl Into<String>) -> Result<Self, LedgerError> {
        let key = key.into();

        let transactions = match storage.load(&key)? {
            Some(json) => serde_json::from_str::<Vec<Transaction>>(&json).map_err(|error| {
                LedgerError::Persistence(format!(
                    "stored transactions under '{key}' are corrupt: {error}"
                ))
            })?,
            None => Vec::new(),
        };

        debug!("Opened transaction store [{key}] with {} transactions", transactions.len());

        Ok(Self {
            storage,
            key,
            snapshot: RwLock::new(Arc::new(transactions)),
            writer: Mutex::new(()),
        })
    }

    /// A consistent view of the current transactions.
    pub fn snapshot(&self) -> Arc<Vec<Transaction>> {
        self.snapshot.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Validates, stamps and appends a new transaction, then persists the list.
    pub fn append(&self, transaction: NewTransaction) -> Result<Transaction, LedgerError> {
        let transaction = transaction.into_transaction()?;
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let mut next = Vec::clone(&self.snapshot());
        next.push(transaction.clone());
        self.commit(next)?;

        debug!(
            "Transaction [{}]:[{}] of {} for client [{}] recorded",
            transaction.id, transaction.tipo, transaction.valor, transaction.cliente_id
        );

        Ok(transaction)
    }

    /// Swaps the whole list for `transactions` and persists it.
    pub fn replace(&self, transactions: Vec<Transaction>) -> Result<(), LedgerError> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let count = transactions.len();

        self.commit(transactions)?;

        debug!("Transaction store [{}] replaced with {count} transactions", self.key);

        Ok(())
    }

    /// Replaces the store with the transactions in a JSON array payload.
    ///
    /// # Errors
    /// Returns `LedgerError::Validation` when the payload is not JSON, is not an
    /// array, or holds an element that is not a transaction. The store is left
    /// untouched in every error case.
    pub fn import_json(&self, payload: &str) -> Result<usize, LedgerError> {
        let transactions = parse_import(payload)?;
        let count = transactions.len();

        self.replace(transactions)?;

        Ok(count)
    }

    /// Reads a file and imports it with [`TransactionStore::import_json`].
    pub async fn import_file(&self, path: impl AsRef<Path>) -> Result<usize, LedgerError> {
        let payload = tokio::fs::read_to_string(path.as_ref()).await?;
        self.import_json(&payload)
    }

    /// Pretty-printed JSON array of the current transactions, readable by
    /// [`TransactionStore::import_json`].
    pub fn export_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(self.snapshot().as_slice())?)
    }

    fn commit(&self, transactions: Vec<Transaction>) -> Result<(), LedgerError> {
        let json = serde_json::to_string(&transactions)?;

        if let Err(failure) = self.storage.save(&self.key, &json) {
            error!(
                "Could not persist transaction store [{}], keeping the previous list: {failure}",
                self.key
            );
            return Err(failure);
        }

        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(transactions);

        Ok(())
    }
}

fn parse_import(payload: &str) -> Result<Vec<Transaction>, LedgerError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|error| {
            LedgerError::Validation(format!("import payload is not valid JSON: {error}"))
        })?;

    let Value::Array(items) = value else {
        return Err(LedgerError::not_an_array());
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let transaction: Transaction = serde_json::from_value(item)
                .map_err(|error| LedgerError::invalid_import_element(index, &error))?;

            if let TransactionKind::Other(kind) = &transaction.tipo {
                warn!(
                    "Imported transaction [{}] has unknown tipo '{kind}' and adds nothing",
                    transaction.id
                );
            }

            Ok(transaction)
        })
        .collect()
}
