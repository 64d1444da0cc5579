//! fatura-core: money codec, reconciliation gate and shared error types

pub mod error;
pub mod money;
pub mod reconcile;

pub use error::CoreError;
pub use reconcile::{Reconciliation, TOLERANCE, reconcile};
