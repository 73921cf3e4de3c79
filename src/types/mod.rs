mod currency;
mod dates;
mod errors;

pub use currency::{format_percent, Brl};
pub use dates::{format_date, parse_date, DATE_FORMAT};
pub use errors::{CurrencyError, DateError};

pub type ClientId = String;
pub type TransactionId = String;
