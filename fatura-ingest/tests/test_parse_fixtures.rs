use fatura_core::Reconciliation;
use fatura_ingest::{Dialect, SkipReason, parse_statement, sniff};
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}

#[test]
fn test_generic_statement_reconciles() {
    let text = fixture("fatura_generic.txt");
    assert_eq!(sniff(&text), Dialect::Generic);

    let result = parse_statement(&text);
    assert_eq!(result.transactions.len(), 10);
    assert_eq!(result.expected_total, Some(3823.02));
    assert!((result.total_captured - 3823.02).abs() < 1e-6);
    assert_eq!(result.reconcile(), Reconciliation::Reconciled);
}

#[test]
fn test_generic_statement_details() {
    let result = parse_statement(&fixture("fatura_generic.txt"));
    let txns = &result.transactions;

    // refund section comes first in this layout
    assert_eq!(txns[0].description, "ESTORNO LOJA ONLINE");
    assert_eq!(txns[0].category, "Refunds");
    assert_eq!(txns[0].amount, -89.90);

    // previous-bill payment is not a transaction
    assert!(txns.iter().all(|t| !t.description.contains("PGTO DEBITO CONTA")));

    let starbucks = txns.iter().find(|t| t.description == "STARBUCKS LISBOA").unwrap();
    assert_eq!(starbucks.country, "PT");
    assert_eq!(starbucks.category, "Restaurantes");

    let netflix = txns.iter().find(|t| t.description == "NETFLIX.COM").unwrap();
    assert_eq!(netflix.country, "US");
    assert_eq!(netflix.category, "Serviços");

    // category survives the page break
    let market = txns.iter().find(|t| t.description.starts_with("SUPERMERCADO")).unwrap();
    assert_eq!(market.category, "Supermercados");
    assert_eq!(market.amount, 1043.27);

    // a slash inside the description does not break the row
    let hotel = txns.iter().find(|t| t.description.starts_with("HOTEL")).unwrap();
    assert_eq!(hotel.description, "HOTEL MAR AZUL 02/03");
    assert_eq!(hotel.category, "Viagem");
}

#[test]
fn test_generic_statement_skipped_lines() {
    let result = parse_statement(&fixture("fatura_generic.txt"));
    let skipped: Vec<_> = result.skipped.iter().map(|s| s.line.as_str()).collect();
    assert_eq!(
        skipped,
        vec!["Vencimento: 10/03/2024", "Limite disponível: R$ 12.000,00"]
    );
    assert!(result.skipped.iter().all(|s| s.reason == SkipReason::Unmatched));
}

#[test]
fn test_generic_statement_mismatch_when_row_lost() {
    // OCR mangled the amount on one row
    let text = fixture("fatura_generic.txt").replace("R$ 76,30", "R$ 76,3,0");
    let result = parse_statement(&text);
    assert_eq!(result.transactions.len(), 9);
    assert!(result.skipped.iter().any(|s| s.reason == SkipReason::MalformedAmount));
    match result.reconcile() {
        Reconciliation::Mismatch { diff } => assert!((diff + 76.30).abs() < 1e-6),
        other => panic!("expected mismatch, got {other:?}"),
    }
}

#[test]
fn test_bb_statement_reconciles() {
    let text = fixture("fatura_bb.txt");
    assert_eq!(sniff(&text), Dialect::BancoDoBrasil);

    let result = parse_statement(&text);
    assert_eq!(result.dialect, Dialect::BancoDoBrasil);
    assert_eq!(result.transactions.len(), 7);
    assert_eq!(result.expected_total, Some(1710.75));
    assert_eq!(result.reconcile(), Reconciliation::Reconciled);
    assert!(result.skipped.is_empty());
}

#[test]
fn test_bb_statement_details() {
    let result = parse_statement(&fixture("fatura_bb.txt"));
    let txns = &result.transactions;

    assert_eq!(txns[0].date, "07.02.2024");
    assert_eq!(txns[0].category, "Refunds");
    assert_eq!(txns[0].amount, -150.40);

    let aws = txns.iter().find(|t| t.description == "AMAZON WEB SERVICES").unwrap();
    assert_eq!(aws.country, "US");
    assert_eq!(aws.amount, 100.0);
    assert_eq!(aws.category, "SERVICOS");

    let renner = txns.iter().find(|t| t.description.starts_with("LOJAS RENNER")).unwrap();
    assert_eq!(renner.category, "VESTUARIO");

    // nothing after RESUMO EM REAL leaks in
    assert!(txns.iter().all(|t| !t.description.contains("compras")));

    let (lo, hi) = result.period(None).unwrap();
    assert_eq!(lo.to_string(), "2024-02-01");
    assert_eq!(hi.to_string(), "2024-02-15");
}

#[test]
fn test_categories_only_from_earlier_lines() {
    let text = fixture("fatura_generic.txt");
    let result = parse_statement(&text);
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    for txn in &result.transactions {
        if txn.category == "Refunds" || txn.category == "Uncategorized" {
            continue;
        }
        let row = lines
            .iter()
            .position(|l| l.starts_with(&txn.date) && l.contains(&txn.description))
            .unwrap();
        let header = lines.iter().position(|l| *l == txn.category).unwrap();
        assert!(header < row, "{} categorised by a later header", txn.description);
    }
}

#[test]
fn test_result_serializes() {
    let result = parse_statement(&fixture("fatura_bb.txt"));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["dialect"], "banco_do_brasil");
    assert_eq!(json["transactions"].as_array().unwrap().len(), 7);
    assert_eq!(json["expected_total"], 1710.75);
}
