//! Aggregate reporting queries.
//!
//! Read-only derivations over the fee ledger: the paginated student-fee
//! listing, the dashboard summary, monthly payment totals for the current
//! year, and payment-mode breakdowns. Empty tables produce zeros, never NaN.

use crate::{
    entities::{Fee, FeeModel, FeeTransaction, Student, StudentModel, fee_transaction, student},
    errors::Result,
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    sea_query::{BinOper, Expr, ExprTrait},
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Default page size for the student-fee listing.
const DEFAULT_LIMIT: u64 = 10;

/// Pagination metadata echoed back with every listing page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number
    pub page: u64,
    /// Page size
    pub limit: u64,
    /// Total matching rows
    pub total_items: u64,
    /// Total pages at this page size
    pub total_pages: u64,
}

/// Filters applied to a listing, echoed back to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilters {
    /// Case-insensitive substring matched against student names
    pub search: Option<String>,
    /// Exact-match course filter
    pub course: Option<String>,
}

/// One listing row: a student joined with their fee record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFeeRow {
    /// The student
    pub student: StudentModel,
    /// The student's fee record, if linked
    pub fee: Option<FeeModel>,
}

/// One page of the student-fee listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFeePage {
    /// Rows on this page
    pub data: Vec<StudentFeeRow>,
    /// Pagination metadata
    pub pagination: Pagination,
    /// Echoed filters
    pub filters: ListFilters,
}

/// Dashboard summary across all fee records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSummary {
    /// Sum of original course fees
    pub total_course_fees: f64,
    /// Sum of fees received
    pub total_fees_received: f64,
    /// Sum of outstanding balances
    pub total_balance: f64,
    /// `received / course_fees * 100`, rounded to 2 decimals; 0 when there
    /// are no course fees
    pub collection_percentage: f64,
}

/// Payment total for one `YYYY-MM` month.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPayment {
    /// Month as `YYYY-MM`
    pub month: String,
    /// Sum of payments dated in that month
    pub total: f64,
}

/// Payment total for one payment mode.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentModeTotal {
    /// Payment mode label
    pub mode: String,
    /// Sum of payments made in that mode
    pub total: f64,
}

/// Full statistics payload for the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeStatistics {
    /// Summary sums and collection percentage
    pub summary: FeeSummary,
    /// Current-year payment totals bucketed by month, ascending
    pub monthly_payments: Vec<MonthlyPayment>,
    /// Payment totals grouped by mode, mode-ascending
    pub payment_modes: Vec<PaymentModeTotal>,
}

/// Lists students joined with their fee records, paginated and filtered.
///
/// `search` is matched as a substring against first and last names (SQLite's
/// `LIKE` is case-insensitive for ASCII); `course` is an exact match. `page`
/// is 1-based; zero is treated as 1.
pub async fn list_students_with_fees(
    db: &DatabaseConnection,
    page: u64,
    limit: u64,
    search: Option<String>,
    course: Option<String>,
) -> Result<StudentFeePage> {
    let page = page.max(1);
    let limit = if limit == 0 { DEFAULT_LIMIT } else { limit };

    let mut query = Student::find().find_also_related(Fee);

    if let Some(search_term) = search.as_ref().filter(|s| !s.trim().is_empty()) {
        // Match against the full "first last" display name so a search for
        // either part or the whole name finds the row
        query = query.filter(
            Expr::col((student::Entity, student::Column::FirstName))
                .binary(BinOper::Custom("||"), Expr::val(" "))
                .binary(
                    BinOper::Custom("||"),
                    Expr::col((student::Entity, student::Column::LastName)),
                )
                .like(format!("%{search_term}%")),
        );
    }

    if let Some(course_name) = course.as_ref().filter(|c| !c.trim().is_empty()) {
        query = query.filter(student::Column::Course.eq(course_name.clone()));
    }

    let paginator = query
        .order_by_asc(student::Column::RollNumber)
        .paginate(db, limit);
    let counts = paginator.num_items_and_pages().await?;
    let rows = paginator.fetch_page(page - 1).await?;

    Ok(StudentFeePage {
        data: rows
            .into_iter()
            .map(|(student_row, fee_row)| StudentFeeRow {
                student: student_row,
                fee: fee_row,
            })
            .collect(),
        pagination: Pagination {
            page,
            limit,
            total_items: counts.number_of_items,
            total_pages: counts.number_of_pages,
        },
        filters: ListFilters { search, course },
    })
}

/// Collection percentage rounded to two decimals, with divide-by-zero
/// guarded to 0.
#[must_use]
pub fn collection_percentage(received: f64, course_fees: f64) -> f64 {
    if course_fees == 0.0 {
        return 0.0;
    }

    (received / course_fees * 100.0 * 100.0).round() / 100.0
}

/// Computes the full dashboard statistics payload.
pub async fn fee_statistics(db: &DatabaseConnection) -> Result<FeeStatistics> {
    let fees = Fee::find().all(db).await?;

    let total_course_fees: f64 = fees.iter().map(|f| f.course_fees).sum();
    let total_fees_received: f64 = fees.iter().map(|f| f.fees_received).sum();
    let total_balance: f64 = fees.iter().map(|f| f.balance).sum();

    let transactions = FeeTransaction::find().all(db).await?;

    let current_year_prefix = format!("{}-", chrono::Utc::now().format("%Y"));
    let mut monthly: BTreeMap<String, f64> = BTreeMap::new();
    let mut by_mode: BTreeMap<String, f64> = BTreeMap::new();

    for txn_row in &transactions {
        // Dates are YYYY-MM-DD strings; the first 7 bytes are the month
        // bucket. `get` rather than slicing keeps a malformed stored date
        // from panicking the whole statistics query.
        if txn_row.date.starts_with(&current_year_prefix) {
            if let Some(month) = txn_row.date.get(..7) {
                *monthly.entry(month.to_string()).or_default() += txn_row.amount;
            }
        }

        *by_mode.entry(txn_row.payment_mode.clone()).or_default() += txn_row.amount;
    }

    Ok(FeeStatistics {
        summary: FeeSummary {
            total_course_fees,
            total_fees_received,
            total_balance,
            collection_percentage: collection_percentage(total_fees_received, total_course_fees),
        },
        monthly_payments: monthly
            .into_iter()
            .map(|(month, total)| MonthlyPayment { month, total })
            .collect(),
        payment_modes: by_mode
            .into_iter()
            .map(|(mode, total)| PaymentModeTotal { mode, total })
            .collect(),
    })
}

/// Per-student transaction history grouped by student id, newest date first
/// within each group.
pub async fn transaction_history_by_student(
    db: &DatabaseConnection,
) -> Result<BTreeMap<i64, Vec<crate::entities::FeeTransactionModel>>> {
    let transactions = FeeTransaction::find()
        .order_by_desc(fee_transaction::Column::Date)
        .order_by_desc(fee_transaction::Column::CreatedAt)
        .all(db)
        .await?;

    let mut grouped: BTreeMap<i64, Vec<crate::entities::FeeTransactionModel>> = BTreeMap::new();
    for txn_row in transactions {
        grouped.entry(txn_row.student_id).or_default().push(txn_row);
    }

    Ok(grouped)
}
