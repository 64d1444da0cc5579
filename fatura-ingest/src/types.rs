use chrono::NaiveDate;
use fatura_core::{Reconciliation, reconcile};
use serde::{Deserialize, Serialize};

/// Category assigned before any header has been seen.
pub const UNCATEGORIZED: &str = "Uncategorized";
/// Category for everything under the payments/credits marker.
pub const REFUNDS: &str = "Refunds";
/// Country used when the row does not carry one.
pub const DEFAULT_COUNTRY: &str = "BR";

/// Statement layouts we know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Generic Brazilian card statement: `DD/MM ... R$ 1.234,56`
    Generic,
    /// Banco do Brasil (SISBB) credit card: `DD.MM.YYYY... US 100,00 100,00`
    BancoDoBrasil,
}

/// One parsed movement, as printed on the statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Verbatim date token (`01/02` or `01.02.2024`)
    pub date: String,
    pub description: String,
    pub category: String,
    pub country: String,
    /// Positive = charge; negative = refund/credit.
    pub amount: f64,
}

impl Transaction {
    pub fn is_refund(&self) -> bool {
        self.amount < 0.0
    }

    /// Resolve the printed date. `DD/MM` rows need `fallback_year`;
    /// `DD.MM.YYYY` rows carry their own.
    pub fn calendar_date(&self, fallback_year: Option<i32>) -> Option<NaiveDate> {
        let mut parts = self.date.split(['/', '.']);
        let day: u32 = parts.next()?.parse().ok()?;
        let month: u32 = parts.next()?.parse().ok()?;
        let year = match parts.next() {
            Some(y) => y.parse().ok()?,
            None => fallback_year?,
        };
        if parts.next().is_some() {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Not boilerplate we recognise, not a header, not a transaction.
    Unmatched,
    /// Looked like a transaction but the amount did not decode.
    MalformedAmount,
}

/// Diagnostic record of a line the classifier dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    pub line: String,
    pub reason: SkipReason,
}

/// Output of one parse call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub dialect: Dialect,
    /// Document order.
    pub transactions: Vec<Transaction>,
    pub total_captured: f64,
    /// Declared total printed on the statement, if found.
    pub expected_total: Option<f64>,
    pub skipped: Vec<SkippedLine>,
}

impl ParseResult {
    pub fn empty(dialect: Dialect) -> Self {
        Self {
            dialect,
            transactions: Vec::new(),
            total_captured: 0.0,
            expected_total: None,
            skipped: Vec::new(),
        }
    }

    pub fn reconcile(&self) -> Reconciliation {
        reconcile(self.total_captured, self.expected_total)
    }

    /// Earliest and latest resolvable transaction dates.
    pub fn period(&self, fallback_year: Option<i32>) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self
            .transactions
            .iter()
            .filter_map(|t| t.calendar_date(fallback_year));
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}
