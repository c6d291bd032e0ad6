// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for KisanMitra.

use thiserror::Error;

/// The error type shared by every KisanMitra crate.
///
/// Most storage failures never reach callers: repositories log them and
/// degrade to empty data. The variants that do surface are precondition
/// violations (`EmptyCart`, `Validation`) and configuration problems.
#[derive(Debug, Error)]
pub enum KisanError {
    /// Configuration errors (invalid TOML, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Key-value backend errors (SQLite failure, poisoned lock, I/O).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A stored value could not be encoded or decoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Caller supplied a value that breaks an input contract.
    #[error("validation error: {0}")]
    Validation(String),

    /// Checkout was attempted with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl KisanError {
    /// Wrap any backend error as [`KisanError::Storage`].
    pub fn storage<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        KisanError::Storage { source: err.into() }
    }
}
