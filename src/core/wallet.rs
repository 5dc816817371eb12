//! Wallet approval workflow and transaction listing.
//!
//! Approval moves a `pending_approval` transaction to `approved` and credits
//! the owning wallet by its amount exactly once, inside one database
//! transaction: the status flip must not survive if the wallet credit fails.
//! Re-approval is rejected by the status precondition, so the credit is
//! idempotent by status check.

use crate::{
    entities::{
        Wallet, WalletTransaction, WalletTransactionModel, wallet, wallet_transaction,
    },
    errors::{Error, Result},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};
use tracing::info;

/// Lifecycle status of a wallet transaction. Transitions are one-directional;
/// this core only performs `PendingApproval -> Approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletTransactionStatus {
    /// Created, not yet submitted for approval
    Pending,
    /// Awaiting administrative confirmation
    PendingApproval,
    /// Confirmed; the wallet has been credited
    Approved,
    /// Declined by an administrator
    Rejected,
    /// Failed at the payment gateway
    Failed,
}

impl WalletTransactionStatus {
    /// The stored text form of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }

    /// Parses a stored or caller-supplied status string.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "pending" => Ok(Self::Pending),
            "pending_approval" => Ok(Self::PendingApproval),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "failed" => Ok(Self::Failed),
            other => Err(Error::Validation {
                message: format!("unknown wallet transaction status '{other}'"),
            }),
        }
    }
}

/// Approves a pending-approval wallet transaction and credits the owning
/// wallet, all-or-nothing. Returns the wallet's new balance.
///
/// A transaction in any other status is rejected with `InvalidState`, which
/// makes a second approval of the same id fail without double-crediting.
pub async fn approve_transaction(db: &DatabaseConnection, transaction_id: i64) -> Result<f64> {
    let txn = db.begin().await?;

    let pending = WalletTransaction::find_by_id(transaction_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Wallet transaction".to_string(),
        })?;

    if pending.status != WalletTransactionStatus::PendingApproval.as_str() {
        return Err(Error::InvalidState {
            message: format!(
                "transaction {} is '{}', expected 'pending_approval'",
                pending.id, pending.status
            ),
        });
    }

    let mut approving: wallet_transaction::ActiveModel = pending.clone().into();
    approving.status = Set(WalletTransactionStatus::Approved.as_str().to_string());
    approving.update(&txn).await?;

    let owning_wallet = Wallet::find_by_id(pending.wallet_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Wallet".to_string(),
        })?;

    Wallet::update_many()
        .col_expr(
            wallet::Column::Balance,
            Expr::col(wallet::Column::Balance).add(pending.amount),
        )
        .filter(wallet::Column::Id.eq(owning_wallet.id))
        .exec(&txn)
        .await?;

    let credited = Wallet::find_by_id(owning_wallet.id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Wallet".to_string(),
        })?;

    txn.commit().await?;

    info!(
        transaction_id,
        wallet_id = credited.id,
        amount = pending.amount,
        balance = credited.balance,
        "Wallet transaction approved"
    );

    Ok(credited.balance)
}

/// Lists wallet transactions, optionally filtered by status, newest first.
pub async fn list_transactions(
    db: &DatabaseConnection,
    status: Option<WalletTransactionStatus>,
) -> Result<Vec<WalletTransactionModel>> {
    let mut query = WalletTransaction::find();

    if let Some(status) = status {
        query = query.filter(wallet_transaction::Column::Status.eq(status.as_str()));
    }

    query
        .order_by_desc(wallet_transaction::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            WalletTransactionStatus::Pending,
            WalletTransactionStatus::PendingApproval,
            WalletTransactionStatus::Approved,
            WalletTransactionStatus::Rejected,
            WalletTransactionStatus::Failed,
        ] {
            assert_eq!(WalletTransactionStatus::parse(status.as_str()).unwrap(), status);
        }

        assert!(WalletTransactionStatus::parse("settled").is_err());
    }

    #[tokio::test]
    async fn test_approve_credits_wallet() -> Result<()> {
        let db = setup_test_db().await?;
        let test_wallet = create_test_wallet(&db, 1000.0).await?;
        let pending = create_test_wallet_transaction(
            &db,
            test_wallet.id,
            500.0,
            WalletTransactionStatus::PendingApproval,
        )
        .await?;

        let balance = approve_transaction(&db, pending.id).await?;
        assert_eq!(balance, 1500.0);

        let reloaded = WalletTransaction::find_by_id(pending.id).one(&db).await?.unwrap();
        assert_eq!(reloaded.status, "approved");
        Ok(())
    }

    #[tokio::test]
    async fn test_double_approval_does_not_double_credit() -> Result<()> {
        let db = setup_test_db().await?;
        let test_wallet = create_test_wallet(&db, 1000.0).await?;
        let pending = create_test_wallet_transaction(
            &db,
            test_wallet.id,
            500.0,
            WalletTransactionStatus::PendingApproval,
        )
        .await?;

        approve_transaction(&db, pending.id).await?;

        let result = approve_transaction(&db, pending.id).await;
        assert!(matches!(result, Err(Error::InvalidState { .. })));

        let reloaded = Wallet::find_by_id(test_wallet.id).one(&db).await?.unwrap();
        assert_eq!(reloaded.balance, 1500.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_approve_requires_pending_approval_status() -> Result<()> {
        let db = setup_test_db().await?;
        let test_wallet = create_test_wallet(&db, 1000.0).await?;

        for status in [
            WalletTransactionStatus::Pending,
            WalletTransactionStatus::Rejected,
            WalletTransactionStatus::Failed,
        ] {
            let txn_row =
                create_test_wallet_transaction(&db, test_wallet.id, 500.0, status).await?;
            let result = approve_transaction(&db, txn_row.id).await;
            assert!(matches!(result, Err(Error::InvalidState { .. })));
        }

        // Balance untouched by any of the rejected approvals
        let reloaded = Wallet::find_by_id(test_wallet.id).one(&db).await?.unwrap();
        assert_eq!(reloaded.balance, 1000.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_approve_missing_transaction() -> Result<()> {
        let db = setup_test_db().await?;

        let result = approve_transaction(&db, 999).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_approve_missing_wallet_rolls_back_status() -> Result<()> {
        let db = setup_test_db().await?;
        let test_wallet = create_test_wallet(&db, 1000.0).await?;
        let pending = create_test_wallet_transaction(
            &db,
            test_wallet.id,
            500.0,
            WalletTransactionStatus::PendingApproval,
        )
        .await?;

        // Remove the wallet out from under the transaction. The schema's
        // foreign key would forbid this, so enforcement is switched off for
        // the test connection to stage the dangling reference.
        use sea_orm::ConnectionTrait;
        db.execute_unprepared("PRAGMA foreign_keys = OFF").await?;
        Wallet::delete_by_id(test_wallet.id).exec(&db).await?;

        let result = approve_transaction(&db, pending.id).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        // The status flip must not survive the abort
        let reloaded = WalletTransaction::find_by_id(pending.id).one(&db).await?.unwrap();
        assert_eq!(reloaded.status, "pending_approval");
        Ok(())
    }

    #[tokio::test]
    async fn test_list_transactions_by_status() -> Result<()> {
        let db = setup_test_db().await?;
        let test_wallet = create_test_wallet(&db, 0.0).await?;

        create_test_wallet_transaction(
            &db,
            test_wallet.id,
            100.0,
            WalletTransactionStatus::PendingApproval,
        )
        .await?;
        create_test_wallet_transaction(
            &db,
            test_wallet.id,
            200.0,
            WalletTransactionStatus::Approved,
        )
        .await?;
        create_test_wallet_transaction(
            &db,
            test_wallet.id,
            300.0,
            WalletTransactionStatus::PendingApproval,
        )
        .await?;

        let pending =
            list_transactions(&db, Some(WalletTransactionStatus::PendingApproval)).await?;
        assert_eq!(pending.len(), 2);

        let all = list_transactions(&db, None).await?;
        assert_eq!(all.len(), 3);
        Ok(())
    }
}
