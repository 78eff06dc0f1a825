//! Cart error types.

use thiserror::Error;

/// Errors that can occur while building, pricing or submitting a cart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Formatting or submission was attempted with no line items.
    #[error("Cart is empty")]
    EmptyCart,

    /// A line index that no longer exists (e.g. a stale remove button).
    #[error("Line index {index} out of range (cart has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },

    /// Price text did not contain a usable amount.
    #[error("Unparseable price: {0}")]
    UnparseablePrice(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Shop settings failed validation.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// The outbound transport rejected the order.
    #[error("Order handoff failed: {0}")]
    Handoff(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CartError {
    fn from(e: serde_json::Error) -> Self {
        CartError::Serialization(e.to_string())
    }
}
