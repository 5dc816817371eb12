//! Unified error types for the institute-management core.
//!
//! Workflow errors are detected before any write where possible; mid-transaction
//! failures abort the enclosing database transaction before propagating. The
//! API layer maps each variant to an HTTP status class.

use thiserror::Error;

/// Crate-wide error taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad or missing input; the caller's fault, nothing was written
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A referenced entity does not exist
    #[error("{entity} not found")]
    NotFound { entity: String },

    /// The batch has no remaining seats
    #[error("Batch '{batch}' has no remaining seats")]
    CapacityExceeded { batch: String },

    /// A status-transition precondition was violated
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    /// A payment would exceed the outstanding fee balance
    #[error("Payment of {amount} exceeds outstanding balance of {balance}")]
    ExceedsBalance { amount: f64, balance: f64 },

    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Underlying database failure, including transaction-abort fallout
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
