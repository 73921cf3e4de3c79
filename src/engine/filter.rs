use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::models::{Client, LedgerError};
use crate::types::ClientId;

/// Balance range used to narrow the client list.
///
/// The `0to500` and `501to1000` edges leave balances strictly between 500 and
/// 501 outside both buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BalanceBucket {
    #[default]
    All,
    Positive,
    UpTo500,
    From501To1000,
    Above1000,
    Negative,
    Zero,
}

impl BalanceBucket {
    pub const VARIANTS: [BalanceBucket; 7] = [
        BalanceBucket::All,
        BalanceBucket::Positive,
        BalanceBucket::UpTo500,
        BalanceBucket::From501To1000,
        BalanceBucket::Above1000,
        BalanceBucket::Negative,
        BalanceBucket::Zero,
    ];

    pub fn contains(self, balance: Decimal) -> bool {
        match self {
            BalanceBucket::All => true,
            BalanceBucket::Positive => balance > Decimal::ZERO,
            BalanceBucket::UpTo500 => balance > Decimal::ZERO && balance <= Decimal::from(500),
            BalanceBucket::From501To1000 => {
                balance >= Decimal::from(501) && balance <= Decimal::from(1000)
            }
            BalanceBucket::Above1000 => balance > Decimal::from(1000),
            BalanceBucket::Negative => balance < Decimal::ZERO,
            BalanceBucket::Zero => balance.is_zero(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BalanceBucket::All => "all",
            BalanceBucket::Positive => "positive",
            BalanceBucket::UpTo500 => "0to500",
            BalanceBucket::From501To1000 => "501to1000",
            BalanceBucket::Above1000 => "above1000",
            BalanceBucket::Negative => "negative",
            BalanceBucket::Zero => "zero",
        }
    }
}

impl Display for BalanceBucket {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for BalanceBucket {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        BalanceBucket::VARIANTS
            .into_iter()
            .find(|bucket| bucket.as_str() == value)
            .ok_or_else(|| {
                let known: Vec<&str> =
                    BalanceBucket::VARIANTS.iter().map(|bucket| bucket.as_str()).collect();
                LedgerError::Validation(format!(
                    "unknown balance filter '{value}', expected one of: {}",
                    known.join(", ")
                ))
            })
    }
}

/// A roster entry annotated with its computed balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientWithBalance<'a> {
    pub client: &'a Client,
    pub balance: Decimal,
}

/// Selects clients by free-text query and balance bucket, keeping roster order.
///
/// The query is trimmed of surrounding whitespace, then matched as a
/// case-insensitive substring of name, company or id. A query that is empty
/// or only whitespace matches everyone. Clients missing from `balances` are
/// treated as having a zero balance. An empty result is a valid outcome.
pub fn filter_clients<'a>(
    clients: &'a [Client],
    balances: &HashMap<ClientId, Decimal>,
    query: &str,
    bucket: BalanceBucket,
) -> Vec<ClientWithBalance<'a>> {
    let needle = query.trim().to_lowercase();

    clients
        .iter()
        .map(|client| ClientWithBalance {
            client,
            balance: balances.get(&client.id).copied().unwrap_or(Decimal::ZERO),
        })
        .filter(|entry| needle.is_empty() || entry.client.matches_query(&needle))
        .filter(|entry| bucket.contains(entry.balance))
        .collect()
}
