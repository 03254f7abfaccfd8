//! Error types shared by the canonicalization and digest paths.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in persisted records: JCS number
    /// rendering for non-integers has edge cases that differ across
    /// implementations, and nothing in the process data model needs them.
    #[error("float values are not permitted in canonical records: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
