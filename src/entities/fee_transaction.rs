//! Fee transaction entity - Append-only ledger entry for one payment event.
//!
//! Rows are created by the payment workflow and never updated or deleted.
//! `date` is the caller-supplied payment date as `YYYY-MM-DD`; `created_at`
//! is the insertion timestamp used as a secondary sort key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fee transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fee_transactions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Student who made the payment
    pub student_id: i64,
    /// Fee record the payment applies to
    pub fee_id: i64,
    /// Payment amount; positive, never exceeding the fee balance at creation
    pub amount: f64,
    /// Payment date as a `YYYY-MM-DD` string
    pub date: String,
    /// Payment mode (e.g., "cash", "upi", "card")
    pub payment_mode: String,
    /// When the ledger row was inserted
    pub created_at: DateTimeUtc,
}

/// Defines relationships between FeeTransaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one student
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
    /// Each transaction applies to one fee record
    #[sea_orm(
        belongs_to = "super::fee::Entity",
        from = "Column::FeeId",
        to = "super::fee::Column::Id"
    )]
    Fee,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::fee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
