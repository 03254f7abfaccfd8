//! Substrate error types.

use thiserror::Error;

/// Errors surfaced by a ledger implementation.
///
/// The engine treats every variant as fatal to the current invocation:
/// no internal retry, the caller decides whether to re-submit.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The underlying store failed to read or write.
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored value could not be decoded.
    #[error("codec error: {0}")]
    Codec(String),

    /// Filesystem failure in a file-backed ledger.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
