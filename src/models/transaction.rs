use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

use crate::models::LedgerError;
use crate::types::{ClientId, TransactionId};

/// Direction of a cash movement.
///
/// Values other than `entrada` and `saida` are kept verbatim in `Other` so a
/// store holding them still round-trips; they never move a balance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Entrada,
    Saida,
    Other(String),
}

impl TransactionKind {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionKind::Entrada => "entrada",
            TransactionKind::Saida => "saida",
            TransactionKind::Other(kind) => kind,
        }
    }
}

impl From<&str> for TransactionKind {
    fn from(value: &str) -> Self {
        match value {
            "entrada" => TransactionKind::Entrada,
            "saida" => TransactionKind::Saida,
            other => TransactionKind::Other(other.to_string()),
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl Serialize for TransactionKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransactionKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(TransactionKind::from(value.as_str()))
    }
}

/// A persisted cash movement against a client.
///
/// `cliente_id` is not checked against the roster; movements for unknown
/// clients are stored and simply never show up in per-client views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub cliente_id: ClientId,
    pub tipo: TransactionKind,
    /// Written as an exact JSON number so every digit survives export and import.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub valor: Decimal,
    pub data: NaiveDate,
}

impl Transaction {
    /// Contribution of this movement to its client's balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.tipo {
            TransactionKind::Entrada => self.valor,
            TransactionKind::Saida => -self.valor,
            TransactionKind::Other(_) => Decimal::ZERO,
        }
    }

    pub fn is_entrada(&self) -> bool {
        self.tipo == TransactionKind::Entrada
    }
}

/// A movement captured from the user, not yet assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub cliente_id: ClientId,
    pub tipo: TransactionKind,
    pub valor: Decimal,
    pub data: NaiveDate,
}

impl NewTransaction {
    /// Validates the input and stamps it with a fresh random id.
    ///
    /// # Errors
    /// Returns `LedgerError::Validation` if the kind is neither `entrada` nor
    /// `saida`, or the amount is not strictly positive.
    pub fn into_transaction(self) -> Result<Transaction, LedgerError> {
        if let TransactionKind::Other(_) = self.tipo {
            return Err(LedgerError::unsupported_kind(&self));
        }

        if self.valor <= Decimal::ZERO {
            return Err(LedgerError::non_positive_amount(&self));
        }

        Ok(Transaction {
            id: Uuid::new_v4().to_string(),
            cliente_id: self.cliente_id,
            tipo: self.tipo,
            valor: self.valor,
            data: self.data,
        })
    }
}
