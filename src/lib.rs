//! `CampusLedger` - institute-management core: registration, fees, and wallets
//!
//! This crate implements the consistency-sensitive write workflows of a
//! multi-tenant institute-management system: atomic student registration with
//! batch-seat accounting, fee payment recording against outstanding balances,
//! wallet transaction approval, and the aggregate reporting queries layered on
//! top. An axum HTTP boundary exposes the workflows; SeaORM transactions keep
//! every multi-document write all-or-nothing.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    unsafe_code,
    unsafe_op_in_unsafe_fn,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,       // Will add gradually
    clippy::missing_panics_doc,       // Will add gradually
)]

/// HTTP boundary - axum router, handlers, and error translation
pub mod api;
/// Configuration management for database, settings, and batch seeding
pub mod config;
/// Core business logic - framework-agnostic workflow and reporting operations
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
