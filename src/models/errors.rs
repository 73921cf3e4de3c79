use crate::models::NewTransaction;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Initialization error: {0}")]
    Initialization(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LedgerError {
    pub fn not_an_array() -> Self {
        Self::Validation("import payload must be a JSON array of transactions".to_string())
    }

    pub fn invalid_import_element(index: usize, error: &serde_json::Error) -> Self {
        Self::Validation(format!("transaction at position {index} is invalid: {error}"))
    }

    pub fn unsupported_kind(transaction: &NewTransaction) -> Self {
        Self::Validation(format!(
            "tipo '{}' for client [{}] must be 'entrada' or 'saida'",
            transaction.tipo, transaction.cliente_id
        ))
    }

    pub fn non_positive_amount(transaction: &NewTransaction) -> Self {
        Self::Validation(format!(
            "valor {} for client [{}] must be greater than zero",
            transaction.valor, transaction.cliente_id
        ))
    }
}
