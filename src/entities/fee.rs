//! Fee entity - Financial ledger header for one student's enrollment.
//!
//! `balance` is stored alongside `total_fees` and `fees_received`; every
//! payment moves `fees_received` and `balance` together inside one database
//! transaction so the `balance == total_fees - fees_received` invariant holds.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fee database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fees")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the fee record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Back-reference to the owning student
    pub student_id: i64,
    /// Original course price before discount
    pub course_fees: f64,
    /// Discount type (e.g., "percentage", "flat"), if any
    pub discount_type: Option<String>,
    /// Discount amount applied to the course fees
    pub discount_amount: f64,
    /// Total payable after discount
    pub total_fees: f64,
    /// Cumulative amount received so far
    pub fees_received: f64,
    /// Outstanding amount still owed
    pub balance: f64,
}

/// Defines relationships between Fee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each fee record belongs to one student
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
    /// One fee record has many payment ledger entries
    #[sea_orm(has_many = "super::fee_transaction::Entity")]
    FeeTransactions,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::fee_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeeTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
