//! Atomic student registration workflow.
//!
//! Registration creates a student, its fee record, and zero or more installment
//! line items, links them together, and decrements the chosen batch's seat
//! counter. All writes happen inside one database transaction: either the full
//! record set is persisted or nothing is. Input validation runs before the
//! transaction opens so rejected requests never touch the database.

use crate::{
    entities::{
        Batch, BatchModel, Fee, FeeModel, Installment, InstallmentModel, Student, StudentModel,
        batch, fee, installment, student,
    },
    errors::{Error, Result},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use tracing::{info, warn};

/// Explicit batch lookup: callers say which field they are matching instead of
/// relying on an implicit OR-query over all three.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchSelector {
    /// Match by primary key
    ById(i64),
    /// Match by batch name
    ByName(String),
    /// Match by timing label
    ByTiming(String),
}

impl BatchSelector {
    /// Resolves the selector to exactly one batch.
    pub async fn resolve<C: ConnectionTrait>(&self, db: &C) -> Result<BatchModel> {
        let query = match self {
            Self::ById(id) => Batch::find_by_id(*id),
            Self::ByName(name) => Batch::find().filter(batch::Column::Name.eq(name.clone())),
            Self::ByTiming(timing) => {
                Batch::find().filter(batch::Column::Timing.eq(timing.clone()))
            }
        };

        query.one(db).await?.ok_or_else(|| Error::NotFound {
            entity: "Batch".to_string(),
        })
    }
}

/// One caller-supplied installment line item.
#[derive(Debug, Clone)]
pub struct InstallmentInput {
    /// Label for the line item
    pub name: String,
    /// Planned payment amount
    pub amount: f64,
    /// Due date as `YYYY-MM-DD`
    pub due_date: String,
}

/// Fee terms supplied at registration.
#[derive(Debug, Clone)]
pub struct FeeTerms {
    /// Original course price before discount
    pub course_fees: f64,
    /// Discount type, if any
    pub discount_type: Option<String>,
    /// Discount amount applied
    pub discount_amount: f64,
    /// Total payable after discount
    pub total_fees: f64,
    /// Amount already received at registration time
    pub fees_received: f64,
    /// Explicit opening balance; derived as `total_fees - fees_received`
    /// when absent
    pub balance: Option<f64>,
}

impl FeeTerms {
    /// The opening balance this fee record starts with.
    #[must_use]
    pub fn opening_balance(&self) -> f64 {
        self.balance
            .unwrap_or(self.total_fees - self.fees_received)
    }
}

/// Full registration request for one prospective student.
#[derive(Debug, Clone)]
pub struct RegistrationInput {
    /// Institute-assigned roll number, unique
    pub roll_number: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Course enrolled in
    pub course: String,
    /// Admission date as `YYYY-MM-DD`
    pub admission_date: String,
    /// Photo URL, already resolved by the upload collaborator
    pub photo_url: String,
    /// Signature URL, already resolved by the upload collaborator
    pub signature_url: String,
    /// Which batch to register into
    pub batch: BatchSelector,
    /// Fee terms for the enrollment
    pub fee: FeeTerms,
    /// Planned installment line items, in display order
    pub installments: Vec<InstallmentInput>,
}

/// A fully-linked registration result: the student with fee, installments
/// (in input order), and batch populated.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredStudent {
    /// The persisted student row
    pub student: StudentModel,
    /// The student's fee record
    pub fee: FeeModel,
    /// Installment line items in input order
    pub installments: Vec<InstallmentModel>,
    /// The batch the student registered into
    pub batch: BatchModel,
}

fn validate_input(input: &RegistrationInput) -> Result<()> {
    if input.roll_number.trim().is_empty() {
        return Err(Error::Validation {
            message: "roll number is required".to_string(),
        });
    }
    if input.first_name.trim().is_empty() {
        return Err(Error::Validation {
            message: "first name is required".to_string(),
        });
    }
    // Uploads are a precondition, not a workflow responsibility: both URLs
    // must already exist before registration starts.
    if input.photo_url.trim().is_empty() || input.signature_url.trim().is_empty() {
        return Err(Error::Validation {
            message: "photo and signature must be uploaded before registration".to_string(),
        });
    }
    if chrono::NaiveDate::parse_from_str(&input.admission_date, "%Y-%m-%d").is_err() {
        return Err(Error::Validation {
            message: format!("admission date '{}' is not YYYY-MM-DD", input.admission_date),
        });
    }
    if !input.fee.total_fees.is_finite() || input.fee.total_fees < 0.0 {
        return Err(Error::Validation {
            message: "total fees must be a non-negative number".to_string(),
        });
    }

    for (index, item) in input.installments.iter().enumerate() {
        if item.name.trim().is_empty() {
            return Err(Error::Validation {
                message: format!("installment #{} is missing a name", index + 1),
            });
        }
        if !item.amount.is_finite() || item.amount <= 0.0 {
            return Err(Error::Validation {
                message: format!("installment '{}' has an invalid amount", item.name),
            });
        }
        if item.due_date.trim().is_empty() {
            return Err(Error::Validation {
                message: format!("installment '{}' is missing a due date", item.name),
            });
        }
    }

    Ok(())
}

/// Decrements the batch's seat counter by one, conditionally on seats being
/// available. The `remaining_seats > 0` filter makes the decrement safe under
/// concurrent registrations even below serializable isolation: if another
/// registration took the last seat first, zero rows match and the whole
/// transaction aborts.
async fn take_batch_seat<C: ConnectionTrait>(db: &C, batch: &BatchModel) -> Result<()> {
    let result = Batch::update_many()
        .col_expr(
            batch::Column::RemainingSeats,
            Expr::col(batch::Column::RemainingSeats).sub(1),
        )
        .filter(batch::Column::Id.eq(batch.id))
        .filter(batch::Column::RemainingSeats.gt(0))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        warn!(batch = %batch.name, "Registration rejected: batch is full");
        return Err(Error::CapacityExceeded {
            batch: batch.name.clone(),
        });
    }

    Ok(())
}

/// Registers a student: creates the student, fee, and installment rows, links
/// them, and takes one batch seat, all-or-nothing.
///
/// Validation failures reject before the transaction opens and perform no
/// writes. Any failure after that point aborts the transaction, so no partial
/// student/fee/installment/batch state is ever visible to subsequent reads.
pub async fn register_student(
    db: &DatabaseConnection,
    input: RegistrationInput,
) -> Result<RegisteredStudent> {
    validate_input(&input)?;

    let txn = db.begin().await?;

    let batch = input.batch.resolve(&txn).await?;
    if batch.remaining_seats <= 0 {
        // Early reject; the conditional decrement below guards the race.
        return Err(Error::CapacityExceeded {
            batch: batch.name.clone(),
        });
    }

    let student = student::ActiveModel {
        roll_number: Set(input.roll_number.clone()),
        first_name: Set(input.first_name.clone()),
        last_name: Set(input.last_name.clone()),
        email: Set(input.email.clone()),
        phone: Set(input.phone.clone()),
        course: Set(input.course.clone()),
        admission_date: Set(input.admission_date.clone()),
        photo_url: Set(input.photo_url.clone()),
        signature_url: Set(input.signature_url.clone()),
        fee_id: Set(None),
        batch_id: Set(batch.id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let fee = fee::ActiveModel {
        student_id: Set(student.id),
        course_fees: Set(input.fee.course_fees),
        discount_type: Set(input.fee.discount_type.clone()),
        discount_amount: Set(input.fee.discount_amount),
        total_fees: Set(input.fee.total_fees),
        fees_received: Set(input.fee.fees_received),
        balance: Set(input.fee.opening_balance()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for (position, item) in input.installments.iter().enumerate() {
        installment::ActiveModel {
            student_id: Set(student.id),
            name: Set(item.name.clone()),
            amount: Set(item.amount),
            due_date: Set(item.due_date.clone()),
            paid: Set(false),
            position: Set(i32::try_from(position).unwrap_or(i32::MAX)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    let mut linked: student::ActiveModel = student.into();
    linked.fee_id = Set(Some(fee.id));
    let student = linked.update(&txn).await?;

    take_batch_seat(&txn, &batch).await?;

    txn.commit().await?;

    info!(
        roll_number = %student.roll_number,
        batch = %batch.name,
        "Student registered"
    );

    get_registered_student(db, student.id).await
}

/// Re-reads a student with fee, installments (in input order), and batch
/// populated.
pub async fn get_registered_student<C: ConnectionTrait>(
    db: &C,
    student_id: i64,
) -> Result<RegisteredStudent> {
    let student = Student::find_by_id(student_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Student".to_string(),
        })?;

    let fee = Fee::find()
        .filter(fee::Column::StudentId.eq(student.id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Fee".to_string(),
        })?;

    let installments = Installment::find()
        .filter(installment::Column::StudentId.eq(student.id))
        .order_by_asc(installment::Column::Position)
        .all(db)
        .await?;

    let batch = Batch::find_by_id(student.batch_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Batch".to_string(),
        })?;

    Ok(RegisteredStudent {
        student,
        fee,
        installments,
        batch,
    })
}
