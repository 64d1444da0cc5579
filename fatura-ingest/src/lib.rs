//! fatura-ingest: turn statement text into typed transactions.
//!
//! Pipeline: sniff dialect -> section/normalize -> classify -> sum, and
//! independently read the declared total from the raw text.

pub mod classifier;
pub mod normalize;
pub mod parsers;
pub mod total;
pub mod types;

pub use classifier::{ClassifierState, LineClass, classify_line, classify_lines};
pub use normalize::normalize;
pub use parsers::sniff;
pub use total::extract_total;
pub use types::{Dialect, ParseResult, SkipReason, SkippedLine, Transaction};

use tracing::{debug, info};

/// Parse a statement, picking the dialect from its fingerprints.
pub fn parse_statement(text: &str) -> ParseResult {
    parse_with_dialect(text, sniff(text))
}

/// Parse a statement with a caller-chosen dialect.
pub fn parse_with_dialect(text: &str, dialect: Dialect) -> ParseResult {
    let grammar = dialect.grammar();
    let lines = normalize::normalize_lines(grammar.scope(text));
    let expected_total = extract_total(text, grammar);

    if lines.is_empty() {
        debug!(?dialect, "no candidate lines");
        return ParseResult {
            expected_total,
            ..ParseResult::empty(dialect)
        };
    }

    debug!(?dialect, lines = lines.len(), "classifying statement");
    let (transactions, skipped) = classify_lines(grammar, lines);
    let total_captured: f64 = transactions.iter().map(|t| t.amount).sum();

    info!(
        ?dialect,
        transactions = transactions.len(),
        skipped = skipped.len(),
        total_captured,
        ?expected_total,
        "parsed statement"
    );

    ParseResult {
        dialect,
        transactions,
        total_captured,
        expected_total,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fatura_core::Reconciliation;

    const SCENARIO_A: &str = "Restaurantes\n01/02 PADARIA DO ZE    R$ 25,00\nTotal da Fatura R$ 25,00";

    #[test]
    fn test_scenario_reconciled() {
        let result = parse_statement(SCENARIO_A);
        assert_eq!(result.dialect, Dialect::Generic);
        assert_eq!(result.transactions.len(), 1);

        let txn = &result.transactions[0];
        assert_eq!(txn.date, "01/02");
        assert_eq!(txn.description, "PADARIA DO ZE");
        assert_eq!(txn.category, "Restaurantes");
        assert_eq!(txn.country, "BR");
        assert_eq!(txn.amount, 25.0);

        assert_eq!(result.total_captured, 25.0);
        assert_eq!(result.expected_total, Some(25.0));
        assert_eq!(result.reconcile(), Reconciliation::Reconciled);
    }

    #[test]
    fn test_scenario_mismatch() {
        let text = SCENARIO_A.replace("Fatura R$ 25,00", "Fatura R$ 30,00");
        let result = parse_statement(&text);
        match result.reconcile() {
            Reconciliation::Mismatch { diff } => assert!((diff + 5.0).abs() < 1e-9),
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_scenario_no_total() {
        let result = parse_statement("Restaurantes\n01/02 PADARIA DO ZE    R$ 25,00");
        assert_eq!(result.expected_total, None);
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.reconcile(), Reconciliation::Indeterminate);
    }

    #[test]
    fn test_scenario_refund_section() {
        let result = parse_statement("PAGAMENTOS/CRÉDITOS\n05/02 REEMBOLSO X  R$ -10,00");
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].category, "Refunds");
        assert_eq!(result.transactions[0].amount, -10.0);
        assert_eq!(result.total_captured, -10.0);
    }

    #[test]
    fn test_empty_input_is_empty_result() {
        let result = parse_statement("\n  \nPágina 1 de 1\n");
        assert!(result.transactions.is_empty());
        assert!(result.skipped.is_empty());
        assert_eq!(result.total_captured, 0.0);
        assert_eq!(result.reconcile(), Reconciliation::Indeterminate);
    }

    #[test]
    fn test_empty_section_keeps_declared_total() {
        let text = "SISBB - Sistema de Informações Banco do Brasil\nFatura do Cartão de Crédito\n  Total   0   0,00   0,00";
        let result = parse_statement(text);
        assert_eq!(result.dialect, Dialect::BancoDoBrasil);
        assert!(result.transactions.is_empty());
        assert_eq!(result.expected_total, Some(0.0));
        assert_eq!(result.reconcile(), Reconciliation::Reconciled);
    }

    #[test]
    fn test_page_break_does_not_change_category() {
        let text = "Restaurantes\n01/02 PADARIA    R$ 25,00\n\u{c}Página\n02/02 CAFE    R$ 5,00\n\u{c}Página 2 de 2\nTotal da Fatura R$ 30,00";
        let result = parse_statement(text);
        let cats: Vec<_> = result.transactions.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(cats, vec!["Restaurantes", "Restaurantes"]);
        assert!(result.skipped.is_empty());
        assert_eq!(result.reconcile(), Reconciliation::Reconciled);
    }

    #[test]
    fn test_forced_dialect() {
        let result = parse_with_dialect(SCENARIO_A, Dialect::BancoDoBrasil);
        // no DEMONSTRATIVO block, nothing to classify
        assert!(result.transactions.is_empty());
        assert_eq!(result.dialect, Dialect::BancoDoBrasil);
    }
}
