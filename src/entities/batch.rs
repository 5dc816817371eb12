//! Batch entity - Represents a cohort/timeslot with finite enrollment capacity.
//!
//! Every successful registration into a batch decrements `remaining_seats` by
//! exactly one; a registration against a batch with zero seats is rejected.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Batch database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "batches")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the batch
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the batch (e.g., "Morning A")
    pub name: String,
    /// Timeslot label (e.g., "09:00-11:00")
    pub timing: String,
    /// Seats still available for registration; never negative
    pub remaining_seats: i32,
}

/// Defines relationships between Batch and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One batch has many enrolled students
    #[sea_orm(has_many = "super::student::Entity")]
    Students,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
