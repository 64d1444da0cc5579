//! Reconciliation gate: does the sum of what we extracted match the total
//! the issuer printed on the statement?

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money;

/// Absorbs float noise from repeated decimal-comma conversions. Not a
/// business allowance; do not widen.
pub const TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Reconciliation {
    /// Captured and declared totals agree within [`TOLERANCE`].
    Reconciled,
    /// `diff = total_captured - expected_total`.
    Mismatch { diff: f64 },
    /// No declared total to compare against.
    Indeterminate,
}

impl Reconciliation {
    /// Only a reconciled extraction may be exported.
    pub fn is_exportable(&self) -> bool {
        matches!(self, Reconciliation::Reconciled)
    }
}

impl fmt::Display for Reconciliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reconciliation::Reconciled => write!(f, "reconciled"),
            Reconciliation::Mismatch { diff } => {
                write!(f, "mismatch (difference R$ {})", money::encode(*diff))
            }
            Reconciliation::Indeterminate => write!(f, "indeterminate (declared total not found)"),
        }
    }
}

/// Compare the captured sum against the declared total.
pub fn reconcile(total_captured: f64, expected_total: Option<f64>) -> Reconciliation {
    let Some(expected) = expected_total else {
        return Reconciliation::Indeterminate;
    };

    let diff = total_captured - expected;
    if diff.abs() < TOLERANCE {
        Reconciliation::Reconciled
    } else {
        Reconciliation::Mismatch { diff }
    }
}
