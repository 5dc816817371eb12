//! Installment entity - One planned partial-payment line item.
//!
//! Installments are created as a batch at registration time from the
//! caller-supplied list; `position` preserves the input order for display.
//! The `paid` flag exists in the schema but no workflow sets it true.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Installment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "installments")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the installment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Student this installment belongs to
    pub student_id: i64,
    /// Label for the line item (e.g., "First installment")
    pub name: String,
    /// Planned payment amount
    pub amount: f64,
    /// Due date as a `YYYY-MM-DD` string
    pub due_date: String,
    /// Whether the installment has been paid
    pub paid: bool,
    /// Zero-based input order, significant for display only
    pub position: i32,
}

/// Defines relationships between Installment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each installment belongs to one student
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
