//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary
//! tables based on the entity definitions. Table creation uses `SeaORM`'s
//! `Schema::create_table_from_entity` so the schema always matches the Rust struct
//! definitions without hand-written SQL.

use crate::entities::{Batch, Fee, FeeTransaction, Installment, Student, Wallet, WalletTransaction};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};

/// Gets the database URL from the `DATABASE_URL` environment variable or
/// returns the default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/campus_ledger.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the database using [`get_database_url`].
///
/// This function handles connection errors and provides a clean interface for
/// database access throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates one table from an entity definition, skipping it if it already exists.
async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);
    let mut statement = schema.create_table_from_entity(entity);
    db.execute(builder.build(statement.if_not_exists())).await?;
    Ok(())
}

/// Creates all necessary database tables from the entity definitions.
///
/// Idempotent: tables that already exist are left untouched, so this is safe
/// to call on every startup.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table(db, Batch).await?;
    create_table(db, Student).await?;
    create_table(db, Fee).await?;
    create_table(db, Installment).await?;
    create_table(db, FeeTransaction).await?;
    create_table(db, Wallet).await?;
    create_table(db, WalletTransaction).await?;
    Ok(())
}
