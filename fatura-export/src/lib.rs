//! fatura-export: reconciliation-gated CSV export and the category
//! reference-table builder.

pub mod csv_export;
pub mod error;
pub mod references;

pub use csv_export::{export_reconciled, write_transactions};
pub use error::{ExportError, ReferenceError};
pub use references::{ReferenceConflict, generate_references};
