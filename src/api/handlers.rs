//! Route handlers and request/response DTOs.
//!
//! Multipart upload handling is not done here: photo and signature arrive as
//! URLs already resolved by the upload collaborator.

use crate::{
    api::AppState,
    core::{
        payment::{self, PaymentInput},
        registration::{
            self, BatchSelector, FeeTerms, InstallmentInput, RegisteredStudent, RegistrationInput,
        },
        report,
        wallet::{self, WalletTransactionStatus},
    },
    entities::{FeeTransactionModel, WalletTransactionModel},
    errors::Error,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

/// Uniform success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always true on this path
    pub success: bool,
    /// Payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

/// One installment line item as submitted by the client.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentRequest {
    /// Label for the line item
    pub name: String,
    /// Planned payment amount
    pub amount: f64,
    /// Due date as `YYYY-MM-DD`
    #[serde(default)]
    pub due_date: String,
}

/// Registration payload. Exactly one of `batch_id`, `batch_name`,
/// `batch_timing` selects the batch.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStudentRequest {
    pub roll_number: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub course: String,
    pub admission_date: String,
    pub photo_url: String,
    pub signature_url: String,
    pub batch_id: Option<i64>,
    pub batch_name: Option<String>,
    pub batch_timing: Option<String>,
    pub course_fees: f64,
    pub discount_type: Option<String>,
    #[serde(default)]
    pub discount_amount: f64,
    pub total_fees: f64,
    #[serde(default)]
    pub fees_received: f64,
    pub balance: Option<f64>,
    #[serde(default)]
    pub installments: Vec<InstallmentRequest>,
}

impl RegisterStudentRequest {
    fn batch_selector(&self) -> Result<BatchSelector, Error> {
        if let Some(id) = self.batch_id {
            Ok(BatchSelector::ById(id))
        } else if let Some(name) = self.batch_name.clone() {
            Ok(BatchSelector::ByName(name))
        } else if let Some(timing) = self.batch_timing.clone() {
            Ok(BatchSelector::ByTiming(timing))
        } else {
            Err(Error::Validation {
                message: "one of batchId, batchName or batchTiming is required".to_string(),
            })
        }
    }

    fn into_input(self) -> Result<RegistrationInput, Error> {
        let batch = self.batch_selector()?;
        Ok(RegistrationInput {
            roll_number: self.roll_number,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            course: self.course,
            admission_date: self.admission_date,
            photo_url: self.photo_url,
            signature_url: self.signature_url,
            batch,
            fee: FeeTerms {
                course_fees: self.course_fees,
                discount_type: self.discount_type,
                discount_amount: self.discount_amount,
                total_fees: self.total_fees,
                fees_received: self.fees_received,
                balance: self.balance,
            },
            installments: self
                .installments
                .into_iter()
                .map(|item| InstallmentInput {
                    name: item.name,
                    amount: item.amount,
                    due_date: item.due_date,
                })
                .collect(),
        })
    }
}

/// # POST /api/students/register
pub async fn register_student(
    State(state): State<AppState>,
    Json(request): Json<RegisterStudentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisteredStudent>>), Error> {
    let input = request.into_input()?;
    let registered = registration::register_student(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(registered))))
}

/// # GET /api/students/:student_id
pub async fn get_student(
    Path(student_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RegisteredStudent>>, Error> {
    let registered = registration::get_registered_student(&state.db, student_id).await?;
    Ok(Json(ApiResponse::new(registered)))
}

/// Payment payload; all fields optional so the workflow owns the
/// missing-field validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: Option<f64>,
    pub date: Option<String>,
    pub payment_mode: Option<String>,
}

/// # POST /api/students/:student_id/fee
pub async fn record_payment(
    Path(student_id): Path<i64>,
    State(state): State<AppState>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<ApiResponse<Vec<FeeTransactionModel>>>, Error> {
    let history = payment::record_payment(
        &state.db,
        student_id,
        PaymentInput {
            amount: request.amount,
            date: request.date,
            payment_mode: request.payment_mode,
        },
    )
    .await?;
    Ok(Json(ApiResponse::new(history)))
}

fn default_page() -> u64 {
    1
}
fn default_limit() -> u64 {
    10
}

/// Query parameters for the student-fee listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    page: u64,
    #[serde(default = "default_limit")]
    limit: u64,
    search: Option<String>,
    course: Option<String>,
}

/// # GET /api/fees
pub async fn list_fees(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, Error> {
    let page = report::list_students_with_fees(
        &state.db,
        query.page,
        query.limit,
        query.search,
        query.course,
    )
    .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": page.data,
        "pagination": page.pagination,
        "filters": page.filters,
    })))
}

/// # GET /api/fees/statistics
pub async fn fee_statistics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<report::FeeStatistics>>, Error> {
    let statistics = report::fee_statistics(&state.db).await?;
    Ok(Json(ApiResponse::new(statistics)))
}

/// Response for a successful wallet approval.
#[derive(Debug, Serialize)]
pub struct ApprovalResponse {
    /// Always true on this path
    pub success: bool,
    /// The wallet's new balance
    pub balance: f64,
}

/// # POST /api/wallet/transactions/:transaction_id/approve
pub async fn approve_wallet_transaction(
    Path(transaction_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ApprovalResponse>, Error> {
    let balance = wallet::approve_transaction(&state.db, transaction_id).await?;
    Ok(Json(ApprovalResponse {
        success: true,
        balance,
    }))
}

/// Query parameter for the wallet transaction listing.
#[derive(Debug, Deserialize)]
pub struct WalletListQuery {
    status: Option<String>,
}

/// # GET /api/wallet/transactions
pub async fn list_wallet_transactions(
    State(state): State<AppState>,
    Query(query): Query<WalletListQuery>,
) -> Result<Json<Vec<WalletTransactionModel>>, Error> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(WalletTransactionStatus::parse)
        .transpose()?;

    let transactions = wallet::list_transactions(&state.db, status).await?;
    Ok(Json(transactions))
}
