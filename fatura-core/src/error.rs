use thiserror::Error;

/// Errors raised by the core codec.
///
/// Classification itself never fails; a malformed amount only ever costs
/// the line it was found on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("malformed amount: {0:?}")]
    MalformedAmount(String),
}
