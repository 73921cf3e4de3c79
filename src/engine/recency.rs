use crate::models::{Transaction, TransactionKind};

/// Maximum number of movements listed per kind on a client card.
pub const RECENT_LIMIT: usize = 4;

/// A client's most recent entradas, newest first.
pub fn recent_entradas<'a>(
    client_id: &str,
    transactions: &'a [Transaction],
) -> impl Iterator<Item = &'a Transaction> + use<'a> {
    recent(client_id, &TransactionKind::Entrada, transactions)
}

/// A client's most recent saidas, newest first.
pub fn recent_saidas<'a>(
    client_id: &str,
    transactions: &'a [Transaction],
) -> impl Iterator<Item = &'a Transaction> + use<'a> {
    recent(client_id, &TransactionKind::Saida, transactions)
}

// Stable sort: movements on the same day keep their insertion order.
fn recent<'a>(
    client_id: &str,
    kind: &TransactionKind,
    transactions: &'a [Transaction],
) -> impl Iterator<Item = &'a Transaction> + use<'a> {
    let mut matching: Vec<&'a Transaction> = transactions
        .iter()
        .filter(|transaction| transaction.cliente_id == client_id && transaction.tipo == *kind)
        .collect();

    matching.sort_by(|left, right| right.data.cmp(&left.data));
    matching.into_iter().take(RECENT_LIMIT)
}
