use super::{
    balance_of, balances, client_summary, dashboard_stats, filter_clients, recent_entradas,
    recent_saidas, BalanceBucket, DateRange, RECENT_LIMIT,
};

use std::collections::HashMap;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use rand::Rng;
use rust_decimal::Decimal;

use crate::models::{Client, Transaction, TransactionKind};
use crate::types::{parse_date, ClientId};

fn create_client(id: &str, nome: &str, comissao_pct: Option<i64>) -> Client {
    Client {
        id: id.to_string(),
        nome: nome.to_string(),
        empresa: String::new(),
        celular: String::new(),
        vendedor: String::new(),
        bandeira: String::new(),
        senha: String::new(),
        comissao_pct: comissao_pct.map(Decimal::from),
        endereco_completo: Default::default(),
    }
}

fn create_transaction(
    id: &str,
    cliente_id: &str,
    tipo: &str,
    valor: &str,
    data: &str,
) -> Result<Transaction> {
    Ok(Transaction {
        id: id.to_string(),
        cliente_id: cliente_id.to_string(),
        tipo: TransactionKind::from(tipo),
        valor: Decimal::from_str(valor)?,
        data: parse_date(data)?,
    })
}

fn range(start: &str, end: &str) -> Result<DateRange> {
    Ok(DateRange::parse(Some(start), Some(end))?)
}

fn balance_map(entries: &[(&str, i64)]) -> HashMap<ClientId, Decimal> {
    entries.iter().map(|(id, balance)| (id.to_string(), Decimal::from(*balance))).collect()
}

fn ids(entries: &[super::ClientWithBalance<'_>]) -> Vec<String> {
    entries.iter().map(|entry| entry.client.id.clone()).collect()
}

#[test]
fn test_balance_of_empty_transactions_is_zero_for_any_id() {
    assert!(balance_of("c1", &[]).is_zero());
    assert!(balance_of("does-not-exist", &[]).is_zero());
}

#[test]
fn test_balance_of_adds_entradas_and_subtracts_saidas() -> Result<()> {
    let transactions = vec![
        create_transaction("t1", "c1", "entrada", "1000", "2024-01-10")?,
        create_transaction("t2", "c1", "saida", "250.50", "2024-01-11")?,
        create_transaction("t3", "c2", "entrada", "999", "2024-01-12")?,
        create_transaction("t4", "c1", "estorno", "70", "2024-01-13")?,
    ];

    assert_eq!(balance_of("c1", &transactions), Decimal::from_str("749.50")?);
    assert_eq!(balance_of("c2", &transactions), Decimal::from(999));
    assert!(balance_of("c3", &transactions).is_zero());

    Ok(())
}

#[test]
fn test_balance_of_matches_independent_sum_for_random_transaction_sets() -> Result<()> {
    let mut rng = rand::thread_rng();
    let client_ids = ["c1", "c2", "c3"];

    for round in 0..50 {
        let mut transactions = Vec::new();
        let mut expected: HashMap<&str, Decimal> = HashMap::new();

        for index in 0..rng.gen_range(0..40) {
            let client_id = client_ids[rng.gen_range(0..client_ids.len())];
            let cents: i64 = rng.gen_range(1..=500_000);
            let valor = Decimal::new(cents, 2);
            let tipo = if rng.gen_bool(0.5) { "entrada" } else { "saida" };

            let id = format!("{round}-{index}");
            let valor_text = valor.to_string();
            transactions.push(create_transaction(&id, client_id, tipo, &valor_text, "2024-03-01")?);

            let delta = if tipo == "entrada" { valor } else { -valor };
            *expected.entry(client_id).or_insert(Decimal::ZERO) += delta;
        }

        for client_id in client_ids {
            let want = expected.get(client_id).copied().unwrap_or(Decimal::ZERO);
            assert_eq!(balance_of(client_id, &transactions), want);
        }
    }

    Ok(())
}

#[test]
fn test_balances_covers_every_roster_client_and_skips_unknown_ids() -> Result<()> {
    let clients = vec![create_client("c1", "Ana", None), create_client("c2", "Bia", None)];
    let transactions = vec![
        create_transaction("t1", "c1", "entrada", "10", "2024-01-10")?,
        create_transaction("t2", "ghost", "entrada", "500", "2024-01-10")?,
    ];

    let totals = balances(&clients, &transactions);

    assert_eq!(totals.len(), 2);
    assert_eq!(totals.get("c1"), Some(&Decimal::from(10)));
    assert_eq!(totals.get("c2"), Some(&Decimal::ZERO));
    assert!(!totals.contains_key("ghost"));

    Ok(())
}

#[test]
fn test_dashboard_scenario_inside_window() -> Result<()> {
    let clients = vec![create_client("c1", "Ana", Some(10))];
    let transactions = vec![create_transaction("t1", "c1", "entrada", "1000", "2024-01-10")?];

    assert_eq!(balance_of("c1", &transactions), Decimal::from(1000));

    let stats = dashboard_stats(&transactions, &clients, range("2024-01-01", "2024-01-31")?);

    assert_eq!(stats.client_count, 1);
    assert_eq!(stats.net_balance, Decimal::from(1000));
    assert_eq!(stats.total_commission_value, Decimal::from(100));
    assert_eq!(stats.average_commission_pct, Decimal::from(10));

    Ok(())
}

#[test]
fn test_dashboard_scenario_outside_window_keeps_roster_figures() -> Result<()> {
    let clients = vec![create_client("c1", "Ana", Some(10))];
    let transactions = vec![create_transaction("t1", "c1", "entrada", "1000", "2024-01-10")?];

    let stats = dashboard_stats(&transactions, &clients, range("2024-02-01", "2024-02-28")?);

    assert_eq!(stats.client_count, 1);
    assert!(stats.net_balance.is_zero());
    assert!(stats.total_commission_value.is_zero());
    assert_eq!(stats.average_commission_pct, Decimal::from(10));

    Ok(())
}

#[test]
fn test_dashboard_roster_figures_do_not_depend_on_range() -> Result<()> {
    let clients = vec![
        create_client("c1", "Ana", Some(10)),
        create_client("c2", "Bia", Some(20)),
        create_client("c3", "Caio", None),
    ];
    let transactions = vec![
        create_transaction("t1", "c1", "entrada", "100", "2023-06-01")?,
        create_transaction("t2", "c2", "saida", "40", "2024-06-01")?,
    ];

    let ranges = vec![
        DateRange::default(),
        range("2023-01-01", "2023-12-31")?,
        range("2030-01-01", "2030-01-02")?,
        DateRange::parse(Some("2024-01-01"), None)?,
        DateRange::parse(None, Some("2020-01-01"))?,
    ];

    for window in ranges {
        let stats = dashboard_stats(&transactions, &clients, window);
        assert_eq!(stats.client_count, 3);
        assert_eq!(stats.average_commission_pct, Decimal::from(10));
    }

    Ok(())
}

#[test]
fn test_dashboard_empty_roster_has_zero_average() -> Result<()> {
    let transactions = vec![create_transaction("t1", "c1", "entrada", "100", "2024-01-01")?];
    let stats = dashboard_stats(&transactions, &[], DateRange::default());

    assert_eq!(stats.client_count, 0);
    assert!(stats.average_commission_pct.is_zero());
    assert_eq!(stats.net_balance, Decimal::from(100));
    assert!(stats.total_commission_value.is_zero());

    Ok(())
}

#[test]
fn test_dashboard_range_bounds_are_inclusive() -> Result<()> {
    let clients = vec![create_client("c1", "Ana", None)];
    let transactions = vec![
        create_transaction("t1", "c1", "entrada", "1", "2023-12-31")?,
        create_transaction("t2", "c1", "entrada", "10", "2024-01-01")?,
        create_transaction("t3", "c1", "entrada", "100", "2024-01-31")?,
        create_transaction("t4", "c1", "entrada", "1000", "2024-02-01")?,
    ];

    let stats = dashboard_stats(&transactions, &clients, range("2024-01-01", "2024-01-31")?);

    assert_eq!(stats.net_balance, Decimal::from(110));

    Ok(())
}

#[test]
fn test_dashboard_open_bounds_impose_no_constraint() -> Result<()> {
    let clients = vec![create_client("c1", "Ana", None)];
    let transactions = vec![
        create_transaction("t1", "c1", "entrada", "1", "1999-01-01")?,
        create_transaction("t2", "c1", "entrada", "10", "2099-01-01")?,
    ];

    let from_only = DateRange::parse(Some("2000-01-01"), Some(""))?;
    let to_only = DateRange::parse(None, Some("2000-01-01"))?;

    let from_only = dashboard_stats(&transactions, &clients, from_only);
    let to_only = dashboard_stats(&transactions, &clients, to_only);
    let unbounded = dashboard_stats(&transactions, &clients, DateRange::default());

    assert_eq!(from_only.net_balance, Decimal::from(10));
    assert_eq!(to_only.net_balance, Decimal::from(1));
    assert_eq!(unbounded.net_balance, Decimal::from(11));

    Ok(())
}

#[test]
fn test_dashboard_commission_skips_saidas_unknown_clients_and_missing_pct() -> Result<()> {
    let clients = vec![create_client("c1", "Ana", Some(5)), create_client("c2", "Bia", None)];
    let transactions = vec![
        create_transaction("t1", "c1", "entrada", "200", "2024-01-10")?,
        create_transaction("t2", "c1", "saida", "100", "2024-01-10")?,
        create_transaction("t3", "c2", "entrada", "300", "2024-01-10")?,
        create_transaction("t4", "ghost", "entrada", "400", "2024-01-10")?,
    ];

    let stats = dashboard_stats(&transactions, &clients, DateRange::default());

    assert_eq!(stats.total_commission_value, Decimal::from(10));
    assert_eq!(stats.net_balance, Decimal::from(800));

    Ok(())
}

#[test]
fn test_client_summary_splits_totals_and_commission() -> Result<()> {
    let client = create_client("c1", "Ana", Some(10));
    let transactions = vec![
        create_transaction("t1", "c1", "entrada", "300", "2024-01-10")?,
        create_transaction("t2", "c1", "entrada", "200", "2024-01-11")?,
        create_transaction("t3", "c1", "saida", "150", "2024-01-12")?,
        create_transaction("t4", "c2", "entrada", "999", "2024-01-12")?,
    ];

    let summary = client_summary(&client, &transactions);

    assert_eq!(summary.balance, Decimal::from(350));
    assert_eq!(summary.total_entradas, Decimal::from(500));
    assert_eq!(summary.total_saidas, Decimal::from(150));
    assert_eq!(summary.commission_value, Decimal::from(50));

    Ok(())
}

#[test]
fn test_totals_skip_amounts_that_would_overflow() -> Result<()> {
    let huge = "50000000000000000000000000000";
    let clients = vec![create_client("c1", "Ana", Some(200))];
    let transactions = vec![
        create_transaction("t1", "c1", "entrada", huge, "2024-01-10")?,
        create_transaction("t2", "c1", "entrada", huge, "2024-01-11")?,
        create_transaction("t3", "c1", "saida", "1", "2024-01-12")?,
    ];
    let expected = Decimal::from_str(huge)? - Decimal::ONE;

    let stats = dashboard_stats(&transactions, &clients, DateRange::default());
    let summary = client_summary(&clients[0], &transactions);

    assert_eq!(balance_of("c1", &transactions), expected);
    assert_eq!(balances(&clients, &transactions)["c1"], expected);
    assert_eq!(stats.net_balance, expected);
    assert!(stats.total_commission_value.is_zero());
    assert_eq!(summary.balance, expected);
    assert_eq!(summary.total_entradas, Decimal::from_str(huge)?);
    assert_eq!(summary.total_saidas, Decimal::ONE);
    assert!(summary.commission_value.is_zero());

    Ok(())
}

#[test]
fn test_full_commission_on_a_large_amount_is_exact() -> Result<()> {
    let clients = vec![create_client("c1", "Ana", Some(100))];
    let transactions = vec![
        create_transaction("t1", "c1", "entrada", "1000000000000000000000000000", "2024-01-10")?,
    ];

    let stats = dashboard_stats(&transactions, &clients, DateRange::default());

    assert_eq!(stats.total_commission_value, Decimal::from_str("1000000000000000000000000000")?);

    Ok(())
}

#[test]
fn test_bucket_boundaries() -> Result<()> {
    let at = |value: &str| Decimal::from_str(value);

    assert!(BalanceBucket::UpTo500.contains(at("500")?));
    assert!(!BalanceBucket::From501To1000.contains(at("500")?));
    assert!(BalanceBucket::From501To1000.contains(at("501")?));
    assert!(!BalanceBucket::UpTo500.contains(at("501")?));
    assert!(BalanceBucket::From501To1000.contains(at("1000")?));
    assert!(!BalanceBucket::Above1000.contains(at("1000")?));
    assert!(BalanceBucket::Above1000.contains(at("1000.01")?));
    assert!(BalanceBucket::UpTo500.contains(at("0.01")?));

    Ok(())
}

#[test]
fn test_zero_balance_only_falls_in_zero_bucket() {
    let zero = Decimal::ZERO;

    assert!(BalanceBucket::Zero.contains(zero));
    assert!(BalanceBucket::All.contains(zero));
    assert!(!BalanceBucket::Positive.contains(zero));
    assert!(!BalanceBucket::Negative.contains(zero));
    assert!(!BalanceBucket::UpTo500.contains(zero));
}

#[test]
fn test_balances_between_500_and_501_fall_in_no_range_bucket() -> Result<()> {
    // Known gap in the bucket edges, kept as-is.
    let balance = Decimal::from_str("500.50")?;

    assert!(!BalanceBucket::UpTo500.contains(balance));
    assert!(!BalanceBucket::From501To1000.contains(balance));
    assert!(BalanceBucket::Positive.contains(balance));

    Ok(())
}

#[test]
fn test_bucket_parses_known_tokens_only() -> Result<()> {
    for bucket in BalanceBucket::VARIANTS {
        assert_eq!(BalanceBucket::from_str(bucket.as_str())?, bucket);
    }

    assert!(BalanceBucket::from_str("0-500").is_err());
    assert!(BalanceBucket::from_str("ALL").is_err());

    Ok(())
}

#[test]
fn test_filter_keeps_roster_order_and_annotates_balances() {
    let clients = vec![
        create_client("c3", "Caio", None),
        create_client("c1", "Ana", None),
        create_client("c2", "Bia", None),
    ];
    let totals = balance_map(&[("c1", 700), ("c2", -5), ("c3", 1200)]);

    let all = filter_clients(&clients, &totals, "", BalanceBucket::All);

    assert_eq!(ids(&all), vec!["c3", "c1", "c2"]);
    assert_eq!(all[0].balance, Decimal::from(1200));

    let positive = filter_clients(&clients, &totals, "", BalanceBucket::Positive);

    assert_eq!(ids(&positive), vec!["c3", "c1"]);
}

#[test]
fn test_filter_search_is_case_insensitive_across_name_company_and_id() {
    let mut empresa_client = create_client("x9", "Joana", None);
    empresa_client.empresa = "Mercado Central".to_string();
    let clients = vec![
        create_client("c1", "MARIA Souza", None),
        empresa_client,
        create_client("ID-77", "Pedro", None),
    ];
    let totals = balance_map(&[]);

    assert_eq!(ids(&filter_clients(&clients, &totals, "maria", BalanceBucket::All)), vec!["c1"]);
    assert_eq!(ids(&filter_clients(&clients, &totals, "CENTRAL", BalanceBucket::All)), vec!["x9"]);
    assert_eq!(ids(&filter_clients(&clients, &totals, "id-7", BalanceBucket::All)), vec!["ID-77"]);
    assert_eq!(filter_clients(&clients, &totals, "   ", BalanceBucket::All).len(), 3);
}

#[test]
fn test_filter_trims_the_query_before_matching() {
    let clients = vec![
        create_client("c1", "Maria Souza", None),
        create_client("c2", "Pedro", None),
    ];
    let totals = balance_map(&[]);

    let padded = filter_clients(&clients, &totals, "  maria\t", BalanceBucket::All);

    assert_eq!(ids(&padded), vec!["c1"]);
    assert_eq!(ids(&filter_clients(&clients, &totals, "\n", BalanceBucket::All)), vec!["c1", "c2"]);
    assert!(filter_clients(&clients, &totals, " maria souza x ", BalanceBucket::All).is_empty());
}

#[test]
fn test_filter_applies_query_then_bucket_and_allows_empty_result() {
    let clients = vec![create_client("c1", "Ana", None), create_client("c2", "Ana Clara", None)];
    let totals = balance_map(&[("c1", 0), ("c2", 450)]);

    let matches = filter_clients(&clients, &totals, "ana", BalanceBucket::UpTo500);

    assert_eq!(ids(&matches), vec!["c2"]);
    assert!(filter_clients(&clients, &totals, "ana", BalanceBucket::Negative).is_empty());
    assert!(filter_clients(&clients, &totals, "zeca", BalanceBucket::All).is_empty());
}

#[test]
fn test_filter_treats_missing_balance_as_zero() {
    let clients = vec![create_client("c1", "Ana", None)];

    let zero = filter_clients(&clients, &HashMap::new(), "", BalanceBucket::Zero);

    assert_eq!(ids(&zero), vec!["c1"]);
}

#[test]
fn test_recent_views_are_newest_first_and_capped() -> Result<()> {
    let transactions = vec![
        create_transaction("e1", "c1", "entrada", "1", "2024-01-01")?,
        create_transaction("e2", "c1", "entrada", "1", "2024-01-05")?,
        create_transaction("s1", "c1", "saida", "1", "2024-01-02")?,
        create_transaction("e3", "c1", "entrada", "1", "2024-01-03")?,
        create_transaction("e4", "c1", "entrada", "1", "2024-01-09")?,
        create_transaction("e5", "c1", "entrada", "1", "2024-01-07")?,
        create_transaction("x1", "c2", "entrada", "1", "2024-12-31")?,
    ];

    let entradas: Vec<&str> = recent_entradas("c1", &transactions).map(|t| t.id.as_str()).collect();
    let saidas: Vec<&str> = recent_saidas("c1", &transactions).map(|t| t.id.as_str()).collect();

    assert_eq!(entradas.len(), RECENT_LIMIT);
    assert_eq!(entradas, vec!["e4", "e5", "e2", "e3"]);
    assert_eq!(saidas, vec!["s1"]);

    Ok(())
}

#[test]
fn test_recent_views_keep_insertion_order_on_equal_dates() -> Result<()> {
    let transactions = vec![
        create_transaction("a", "c1", "saida", "1", "2024-01-01")?,
        create_transaction("b", "c1", "saida", "1", "2024-01-01")?,
        create_transaction("c", "c1", "saida", "1", "2024-01-02")?,
    ];

    let saidas: Vec<&str> = recent_saidas("c1", &transactions).map(|t| t.id.as_str()).collect();

    assert_eq!(saidas, vec!["c", "a", "b"]);
    assert_eq!(recent_entradas("c1", &transactions).count(), 0);
    assert_eq!(recent_saidas("unknown", &transactions).count(), 0);

    let first = recent_saidas("c1", &transactions)
        .next()
        .ok_or_else(|| anyhow!("expected a saida"))?;
    assert_eq!(first.id, "c");

    Ok(())
}
