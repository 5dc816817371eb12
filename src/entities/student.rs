//! Student entity - Identity and admission record for one enrollee.
//!
//! A student is created once at registration, linked to exactly one fee record
//! (`fee_id` is set in the same transaction that creates the fee) and to one
//! batch. Photo and signature are URLs resolved by the upload collaborator
//! before registration starts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Student database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the student
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Institute-assigned roll number, unique across students
    #[sea_orm(unique)]
    pub roll_number: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Course the student enrolled in (used as an exact-match list filter)
    pub course: String,
    /// Admission date as a `YYYY-MM-DD` string
    pub admission_date: String,
    /// URL of the uploaded photo
    pub photo_url: String,
    /// URL of the uploaded signature
    pub signature_url: String,
    /// Reference to the student's fee record; set in the registration
    /// transaction, null only transiently inside it
    pub fee_id: Option<i64>,
    /// Batch the student registered into
    pub batch_id: i64,
}

/// Defines relationships between Student and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each student belongs to one batch
    #[sea_orm(
        belongs_to = "super::batch::Entity",
        from = "Column::BatchId",
        to = "super::batch::Column::Id"
    )]
    Batch,
    /// One student has one fee record
    #[sea_orm(has_one = "super::fee::Entity")]
    Fee,
    /// One student has many installment line items
    #[sea_orm(has_many = "super::installment::Entity")]
    Installments,
    /// One student has many payment ledger entries
    #[sea_orm(has_many = "super::fee_transaction::Entity")]
    FeeTransactions,
}

impl Related<super::batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Batch.def()
    }
}

impl Related<super::fee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fee.def()
    }
}

impl Related<super::installment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Installments.def()
    }
}

impl Related<super::fee_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeeTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
