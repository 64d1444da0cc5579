//! Declared-total extraction.
//!
//! Scans the raw text (not the normalized or sectioned lines): the total
//! line may sit outside the block the classifier reads.

use fatura_core::money;
use tracing::warn;

use crate::normalize::raw_lines;
use crate::parsers::Grammar;

/// Amount on the first line matching the dialect's total pattern.
///
/// `None` when no line matches, or when the first match carries an amount
/// that does not decode.
pub fn extract_total(text: &str, grammar: &Grammar) -> Option<f64> {
    let Some(raw) = raw_lines(text)
        .find_map(|line| grammar.total.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        warn!("declared total line not found");
        return None;
    };

    match money::decode(raw) {
        Ok(total) => Some(total),
        Err(err) => {
            warn!(%err, "declared total line present but unreadable");
            None
        }
    }
}
