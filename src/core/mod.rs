//! Core business logic - framework-agnostic workflows over the entity layer.
//!
//! Each workflow runs to completion within a single request; all cross-document
//! consistency is delegated to the database's multi-document transactions.

/// Fee payment recording workflow
pub mod payment;
/// Atomic student registration workflow
pub mod registration;
/// Aggregate reporting queries
pub mod report;
/// Wallet approval workflow and transaction listing
pub mod wallet;
