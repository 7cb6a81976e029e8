//! Error types for intent construction and response classification.
//!
//! The two families are disjoint by design: construction errors are
//! programmer errors (fix the input and call again), while response errors
//! are ordinary outcomes of a payment attempt (the user declined, the
//! payment app misbehaved) and are never raised as panics.

/// A required request field was missing or empty.
///
/// Raised before any message is produced; a failed build never yields a
/// partially populated intent. Field names match the wire-contract names
/// (`"id"`, `"schemelessOrigin"`, `"methodDataMap"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{field} should not be empty")]
pub struct InvalidFieldError {
    /// Name of the offending field.
    pub field: &'static str,
}

impl InvalidFieldError {
    /// Creates a new invalid-field error.
    #[must_use]
    pub const fn new(field: &'static str) -> Self {
        Self { field }
    }
}

/// Reasons a payment app response fails classification.
///
/// Evaluated in strict precedence order by
/// [`parse_payment_response`](crate::response::parse_payment_response):
/// absence of data outranks the result status, so a canceled result with no
/// data still reports [`MissingData`](Self::MissingData).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ResponseError {
    /// The payment app returned no response at all.
    #[error("payment app response has no data")]
    MissingData,
    /// The response carried no extras container.
    #[error("payment app response has no extras")]
    MissingExtras,
    /// The payment was canceled.
    #[error("payment was canceled")]
    Canceled,
    /// The payment app returned a result code this codec does not know.
    #[error("unrecognized payment app result code: {0}")]
    UnrecognizedResult(i32),
}
