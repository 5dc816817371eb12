//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::registration::{
        BatchSelector, FeeTerms, RegisteredStudent, RegistrationInput, register_student,
    },
    core::wallet::WalletTransactionStatus,
    entities::{self, Batch, batch, wallet, wallet_transaction},
    errors::Result,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test batch with the given name and seat capacity.
///
/// # Defaults
/// * `timing`: "09:00-11:00"
pub async fn create_test_batch(
    db: &DatabaseConnection,
    name: &str,
    seats: i32,
) -> Result<entities::BatchModel> {
    batch::ActiveModel {
        name: Set(name.to_string()),
        timing: Set("09:00-11:00".to_string()),
        remaining_seats: Set(seats),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Builds a registration input with sensible defaults for one student.
///
/// # Defaults
/// * fee terms: course fees 12000, discount 2000 flat, total 10000,
///   received 2000, balance derived (8000)
/// * no installments
#[must_use]
pub fn registration_input(roll_number: &str, batch_selector: BatchSelector) -> RegistrationInput {
    RegistrationInput {
        roll_number: roll_number.to_string(),
        first_name: "Test".to_string(),
        last_name: "Student".to_string(),
        email: format!("{roll_number}@example.test"),
        phone: "9999999999".to_string(),
        course: "Mathematics".to_string(),
        admission_date: "2026-01-15".to_string(),
        photo_url: "https://cdn.example.test/photo.jpg".to_string(),
        signature_url: "https://cdn.example.test/signature.jpg".to_string(),
        batch: batch_selector,
        fee: FeeTerms {
            course_fees: 12000.0,
            discount_type: Some("flat".to_string()),
            discount_amount: 2000.0,
            total_fees: 10000.0,
            fees_received: 2000.0,
            balance: None,
        },
        installments: Vec::new(),
    }
}

/// Registers a test student against a shared 100-seat batch (created on first
/// use), with the default fee fixture: total 10000, received 2000, balance 8000.
pub async fn register_test_student(
    db: &DatabaseConnection,
    roll_number: &str,
) -> Result<RegisteredStudent> {
    let shared_batch = match Batch::find()
        .filter(batch::Column::Name.eq("Shared Test Batch"))
        .one(db)
        .await?
    {
        Some(existing) => existing,
        None => create_test_batch(db, "Shared Test Batch", 100).await?,
    };

    register_student(db, registration_input(roll_number, BatchSelector::ById(shared_batch.id)))
        .await
}

/// Creates a test wallet with the given balance.
pub async fn create_test_wallet(
    db: &DatabaseConnection,
    balance: f64,
) -> Result<entities::WalletModel> {
    wallet::ActiveModel {
        institute_id: Set("institute-1".to_string()),
        balance: Set(balance),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a test wallet transaction in the given status.
///
/// # Defaults
/// * `txn_type`: "deposit"
/// * `purpose`: "test deposit"
pub async fn create_test_wallet_transaction(
    db: &DatabaseConnection,
    wallet_id: i64,
    amount: f64,
    status: WalletTransactionStatus,
) -> Result<entities::WalletTransactionModel> {
    wallet_transaction::ActiveModel {
        wallet_id: Set(wallet_id),
        amount: Set(amount),
        txn_type: Set("deposit".to_string()),
        status: Set(status.as_str().to_string()),
        purpose: Set(Some("test deposit".to_string())),
        payment_reference: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}
