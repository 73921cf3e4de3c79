use crate::types::errors::CurrencyError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DECIMAL_PLACES: u32 = 2;
const SYMBOL: &str = "R$";

/// An amount in Brazilian Real, displayed the way the ledger shows money
/// (`R$ 1.234,56`).
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Brl(pub Decimal);

impl Brl {
    pub fn amount(self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Brl {
    fn from(amount: Decimal) -> Self {
        Brl(amount)
    }
}

impl Display for Brl {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let (sign, integer, fraction) = split_rounded(self.0);
        write!(formatter, "{sign}{SYMBOL} {},{fraction}", group_thousands(&integer))
    }
}

/// Formats a percentage with two decimal places and a comma separator (`10,00%`).
pub fn format_percent(value: Decimal) -> String {
    let (sign, integer, fraction) = split_rounded(value);
    format!("{sign}{integer},{fraction}%")
}

fn split_rounded(value: Decimal) -> (&'static str, String, String) {
    let mut rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };

    rounded = rounded.abs();
    rounded.rescale(DECIMAL_PLACES);

    let text = rounded.to_string();
    match text.split_once('.') {
        Some((integer, fraction)) => (sign, integer.to_string(), fraction.to_string()),
        None => (sign, text, "0".repeat(DECIMAL_PLACES as usize)),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    grouped
}

impl FromStr for Brl {
    type Err = CurrencyError;

    /// Accepts pt-BR input (`1.234,56`, `R$ 10,5`) as well as plain decimals (`1234.56`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let value = value.strip_prefix(SYMBOL).unwrap_or(value).trim();

        if value.is_empty() {
            return Err(CurrencyError::InvalidFormat("Value is an empty string".to_string()));
        }

        // With a comma present '.' can only be a thousands separator
        let normalized = if value.contains(',') {
            value.replace('.', "").replace(',', ".")
        } else {
            value.to_string()
        };

        let (is_negative, unsigned) = match normalized.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, normalized.strip_prefix('+').unwrap_or(&normalized)),
        };

        let parts: Vec<&str> = unsigned.split('.').collect();

        if parts.len() > 2 {
            return Err(CurrencyError::InvalidFormat(
                "Value has more than one decimal separator".to_string(),
            ));
        }

        let integer = parts[0];
        if integer.is_empty() || !integer.chars().all(|c| c.is_ascii_digit()) {
            return Err(CurrencyError::InvalidFormat(format!(
                "Value has an invalid integer part: '{integer}'"
            )));
        }

        let fraction = parts.get(1).copied().unwrap_or("");
        if fraction.len() > DECIMAL_PLACES as usize {
            return Err(CurrencyError::InvalidFormat(
                "Value has too many decimal places".to_string(),
            ));
        }
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(CurrencyError::InvalidFormat(format!(
                "Value has an invalid fraction part: '{fraction}'"
            )));
        }

        let digits = if fraction.is_empty() {
            integer.to_string()
        } else {
            format!("{integer}.{fraction}")
        };

        let amount = Decimal::from_str(&digits)?;

        Ok(Brl(if is_negative { -amount } else { amount }))
    }
}
