//! Fee payment recording workflow.
//!
//! Validates a payment against the student's outstanding balance, appends an
//! immutable ledger entry, and moves `fees_received`/`balance` together. Both
//! writes run inside one database transaction. Balance arithmetic is done with
//! atomic column expressions rather than read-modify-write so concurrent
//! payments cannot act on a stale balance.

use crate::{
    entities::{Fee, FeeModel, FeeTransaction, FeeTransactionModel, fee, fee_transaction},
    errors::{Error, Result},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use tracing::info;

/// Raw payment request as received at the boundary; all fields optional so the
/// workflow owns the missing-field check.
#[derive(Debug, Clone, Default)]
pub struct PaymentInput {
    /// Payment amount
    pub amount: Option<f64>,
    /// Payment date as `YYYY-MM-DD`
    pub date: Option<String>,
    /// Payment mode (e.g., "cash", "upi", "card")
    pub payment_mode: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Records a payment against a student's fee and returns the student's full
/// transaction history, newest date first.
///
/// Validation, in order with first failure winning: all fields present, amount
/// positive, fee record exists, amount within the outstanding balance. Any
/// failure rejects without mutating anything.
pub async fn record_payment(
    db: &DatabaseConnection,
    student_id: i64,
    input: PaymentInput,
) -> Result<Vec<FeeTransactionModel>> {
    let (Some(amount), Some(date), Some(payment_mode)) = (
        input.amount,
        non_empty(input.date.as_ref()),
        non_empty(input.payment_mode.as_ref()),
    ) else {
        return Err(Error::Validation {
            message: "amount, date and paymentMode are required".to_string(),
        });
    };

    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::Validation {
            message: format!("invalid amount: {amount}"),
        });
    }

    if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(Error::Validation {
            message: format!("payment date '{date}' is not YYYY-MM-DD"),
        });
    }

    let txn = db.begin().await?;

    let fee_record = Fee::find()
        .filter(fee::Column::StudentId.eq(student_id))
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Fee".to_string(),
        })?;

    if amount > fee_record.balance {
        return Err(Error::ExceedsBalance {
            amount,
            balance: fee_record.balance,
        });
    }

    fee_transaction::ActiveModel {
        student_id: Set(student_id),
        fee_id: Set(fee_record.id),
        amount: Set(amount),
        date: Set(date.clone()),
        payment_mode: Set(payment_mode.clone()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    apply_payment_to_fee(&txn, fee_record.id, amount).await?;

    txn.commit().await?;

    info!(student_id, amount, mode = %payment_mode, "Payment recorded");

    transaction_history(db, student_id).await
}

/// Atomically moves `fees_received` up and `balance` down by the same amount,
/// keeping `balance == total_fees - fees_received`.
async fn apply_payment_to_fee<C: ConnectionTrait>(
    db: &C,
    fee_id: i64,
    amount: f64,
) -> Result<FeeModel> {
    Fee::update_many()
        .col_expr(
            fee::Column::FeesReceived,
            Expr::col(fee::Column::FeesReceived).add(amount),
        )
        .col_expr(
            fee::Column::Balance,
            Expr::col(fee::Column::Balance).sub(amount),
        )
        .filter(fee::Column::Id.eq(fee_id))
        .exec(db)
        .await?;

    Fee::find_by_id(fee_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Fee".to_string(),
        })
}

/// Retrieves the full payment history for a student, newest date first
/// (insertion time breaks ties between same-day payments).
pub async fn transaction_history<C: ConnectionTrait>(
    db: &C,
    student_id: i64,
) -> Result<Vec<FeeTransactionModel>> {
    FeeTransaction::find()
        .filter(fee_transaction::Column::StudentId.eq(student_id))
        .order_by_desc(fee_transaction::Column::Date)
        .order_by_desc(fee_transaction::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}
