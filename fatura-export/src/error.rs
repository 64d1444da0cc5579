use fatura_core::Reconciliation;
use thiserror::Error;

use crate::references::ReferenceConflict;

#[derive(Error, Debug)]
pub enum ExportError {
    /// Only reconciled extractions are written out.
    #[error("export blocked: extraction is {0}")]
    Blocked(Reconciliation),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("missing transactions data")]
    MissingData,
    #[error("missing column: {0}")]
    MissingColumn(String),
    #[error("{} conflicting reference(s):\n{}", .0.len(), list_conflicts(.0))]
    Conflicts(Vec<ReferenceConflict>),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn list_conflicts(conflicts: &[ReferenceConflict]) -> String {
    conflicts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
