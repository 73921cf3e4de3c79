
use crate::models::{Client, LedgerError};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, error, warn};

#[derive(Debug, Deserialize)]
struct RosterDocument {
    clientes: Vec<Client>,
}

/// Loads the client roster from a `{ "clientes": [...] }` document.
///
/// # Errors
/// Returns `LedgerError::Initialization` if the document cannot be read or
/// does not have the expected shape. Callers treat this as fatal.
pub async fn load_roster(path: impl AsRef<Path>) -> Result<Vec<Client>, LedgerError> {
    let path = path.as_ref();

    let clients = tokio::fs::read_to_string(path)
        .await
        .map_err(|error| {
            let path = path.display();
            LedgerError::Initialization(format!("could not read client roster at {path}: {error}"))
        })
        .and_then(|payload| parse_roster(&payload))
        .inspect_err(|error| error!("Client roster at {} unavailable: {error}", path.display()))?;

    debug!("Loaded {} clients from {}", clients.len(), path.display());

    Ok(clients)
}

pub fn parse_roster(payload: &str) -> Result<Vec<Client>, LedgerError> {
    let document: RosterDocument = serde_json::from_str(payload)
        .map_err(|error| {
            LedgerError::Initialization(format!("client roster is malformed: {error}"))
        })?;

    let mut seen = HashSet::with_capacity(document.clientes.len());
    for client in &document.clientes {
        if !seen.insert(client.id.as_str()) {
            warn!(
                "Client id [{}] appears more than once in the roster; the first entry is used",
                client.id
            );
        }
    }

    Ok(document.clientes)
}
