//! Single-pass line classifier.
//!
//! Each line is checked, in this order, against: ignore list, refund marker,
//! category header, transaction row. Anything else is dropped. The only
//! state carried between lines is the current category, and it only ever
//! reflects lines already seen.

use tracing::debug;

use crate::parsers::Grammar;
use crate::types::{REFUNDS, SkipReason, SkippedLine, Transaction, UNCATEGORIZED};

/// Running state for one statement. Never shared between parses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierState {
    pub current_category: Option<String>,
}

impl ClassifierState {
    /// Category to stamp on the next transaction.
    pub fn category(&self) -> &str {
        self.current_category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// State after `class` has been consumed.
    pub fn advance(self, class: &LineClass) -> Self {
        match class {
            LineClass::RefundMarker => Self {
                current_category: Some(REFUNDS.to_string()),
            },
            LineClass::CategoryHeader(name) => Self {
                current_category: Some(name.clone()),
            },
            _ => self,
        }
    }
}

/// Verdict for a single line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineClass {
    Ignored,
    RefundMarker,
    CategoryHeader(String),
    Transaction(Transaction),
    /// Transaction-shaped, amount did not decode.
    MalformedAmount,
    Unmatched,
}

/// Classify one normalized line given the state built from earlier lines.
pub fn classify_line(grammar: &Grammar, state: &ClassifierState, line: &str) -> LineClass {
    let upper = line.to_uppercase();

    if grammar.is_ignored(&upper) {
        return LineClass::Ignored;
    }

    if grammar.is_refund_marker(&upper) {
        return LineClass::RefundMarker;
    }

    if grammar.header.accepts(line) {
        return LineClass::CategoryHeader(line.trim().to_string());
    }

    match grammar.match_transaction(line, state.category()) {
        Some(Ok(txn)) => LineClass::Transaction(txn),
        Some(Err(_)) => LineClass::MalformedAmount,
        None => LineClass::Unmatched,
    }
}

/// Transactions and skipped-line diagnostics from one pass over `lines`.
pub fn classify_lines<'a>(
    grammar: &Grammar,
    lines: impl IntoIterator<Item = &'a str>,
) -> (Vec<Transaction>, Vec<SkippedLine>) {
    let mut transactions = Vec::new();
    let mut skipped = Vec::new();
    let mut state = ClassifierState::default();

    for line in lines {
        let class = classify_line(grammar, &state, line);
        state = state.advance(&class);

        match class {
            LineClass::Transaction(txn) => transactions.push(txn),
            LineClass::MalformedAmount => {
                debug!(line, "dropping row with malformed amount");
                skipped.push(SkippedLine {
                    line: line.to_string(),
                    reason: SkipReason::MalformedAmount,
                });
            }
            LineClass::Unmatched => {
                debug!(line, "ignored unrecognised line");
                skipped.push(SkippedLine {
                    line: line.to_string(),
                    reason: SkipReason::Unmatched,
                });
            }
            LineClass::Ignored | LineClass::RefundMarker | LineClass::CategoryHeader(_) => {}
        }
    }

    (transactions, skipped)
}
