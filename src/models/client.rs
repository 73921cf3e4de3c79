use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::types::ClientId;

/// A client record from the roster.
///
/// Only `id` and `comissao_pct` take part in any calculation; the remaining
/// fields are descriptive and default to empty when the roster omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub empresa: String,
    #[serde(default)]
    pub celular: String,
    #[serde(default)]
    pub vendedor: String,
    #[serde(default)]
    pub bandeira: String,
    #[serde(default)]
    pub senha: String,
    /// Commission percentage in the 0-100 range.
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub comissao_pct: Option<Decimal>,
    #[serde(default)]
    pub endereco_completo: Address,
}

impl Client {
    /// The commission percentage, with an absent value counting as zero.
    pub fn commission_pct(&self) -> Decimal {
        self.comissao_pct.unwrap_or(Decimal::ZERO)
    }

    /// Case-insensitive substring match against name, company and id.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_query(&self, needle: &str) -> bool {
        [&self.nome, &self.empresa, &self.id]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub logradouro: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,
}

impl Display for Address {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let present = |part: &Option<String>| {
            part.as_deref().map(str::trim).filter(|value| !value.is_empty()).map(str::to_string)
        };

        let locality = match (present(&self.cidade), present(&self.estado)) {
            (Some(cidade), Some(estado)) => Some(format!("{cidade}/{estado}")),
            (cidade, estado) => cidade.or(estado),
        };

        let parts: Vec<String> = [
            present(&self.logradouro),
            present(&self.numero),
            present(&self.complemento),
            present(&self.bairro),
            locality,
            present(&self.cep).map(|cep| format!("CEP {cep}")),
        ]
        .into_iter()
        .flatten()
        .collect();

        write!(formatter, "{}", parts.join(", "))
    }
}
