use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurrencyError {
    #[error("Currency error: {0}")]
    InvalidFormat(String),
    #[error("Currency error: {0}")]
    Decimal(#[from] rust_decimal::Error),
}

#[derive(Debug, Error)]
pub enum DateError {
    #[error("Date error: {0}")]
    InvalidFormat(String),
}
