//! CSV export of parsed transactions.
//!
//! Columns: date, who, description, category, country, amount. Amounts are
//! written in Brazilian format and a final TOTAL row carries the sum.

use std::fs;
use std::io::Write;
use std::path::Path;

use fatura_core::money;
use fatura_ingest::{ParseResult, Transaction};
use tracing::info;

use crate::ExportError;

pub const HEADER: [&str; 6] = ["date", "who", "description", "category", "country", "amount"];

/// Write `transactions` plus the TOTAL row. `who` labels every row.
pub fn write_transactions<W: Write>(
    writer: W,
    transactions: &[Transaction],
    who: &str,
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for t in transactions {
        wtr.write_record([
            t.date.as_str(),
            who,
            t.description.as_str(),
            t.category.as_str(),
            t.country.as_str(),
            money::encode(t.amount).as_str(),
        ])?;
    }

    let total: f64 = transactions.iter().map(|t| t.amount).sum();
    wtr.write_record(["", "", "TOTAL", "", "", money::encode(total).as_str()])?;
    wtr.flush()?;
    Ok(())
}

/// Write `result` to `path` if, and only if, it reconciles.
///
/// Parent directories are created as needed. Nothing is written when the
/// outcome is a mismatch or indeterminate.
pub fn export_reconciled(
    result: &ParseResult,
    who: &str,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let outcome = result.reconcile();
    if !outcome.is_exportable() {
        return Err(ExportError::Blocked(outcome));
    }

    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = fs::File::create(path)?;
    write_transactions(file, &result.transactions, who)?;
    info!(
        rows = result.transactions.len(),
        path = %path.display(),
        "exported statement"
    );
    Ok(())
}
