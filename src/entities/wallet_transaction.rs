//! Wallet transaction entity - A pending-or-resolved wallet ledger entry.
//!
//! `status` holds one of `"pending"`, `"pending_approval"`, `"approved"`,
//! `"rejected"`, `"failed"`; transitions are one-directional and only a
//! `pending_approval` transaction may be approved. The typed view of the
//! status lives in [`crate::core::wallet::WalletTransactionStatus`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wallet transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wallet_transactions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Wallet this transaction belongs to
    pub wallet_id: i64,
    /// Transaction amount
    pub amount: f64,
    /// Type of transaction: `"deposit"` or `"withdrawal"`
    pub txn_type: String,
    /// Lifecycle status, stored as text
    pub status: String,
    /// Free-form purpose of the transaction
    pub purpose: Option<String>,
    /// External payment-gateway reference, if any
    pub payment_reference: Option<String>,
    /// When the transaction was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between WalletTransaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one wallet
    #[sea_orm(
        belongs_to = "super::wallet::Entity",
        from = "Column::WalletId",
        to = "super::wallet::Column::Id"
    )]
    Wallet,
}

impl Related<super::wallet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
