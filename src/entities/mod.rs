//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod batch;
pub mod fee;
pub mod fee_transaction;
pub mod installment;
pub mod student;
pub mod wallet;
pub mod wallet_transaction;

// Re-export specific types to avoid conflicts
pub use batch::{Column as BatchColumn, Entity as Batch, Model as BatchModel};
pub use fee::{Column as FeeColumn, Entity as Fee, Model as FeeModel};
pub use fee_transaction::{
    Column as FeeTransactionColumn, Entity as FeeTransaction, Model as FeeTransactionModel,
};
pub use installment::{
    Column as InstallmentColumn, Entity as Installment, Model as InstallmentModel,
};
pub use student::{Column as StudentColumn, Entity as Student, Model as StudentModel};
pub use wallet::{Column as WalletColumn, Entity as Wallet, Model as WalletModel};
pub use wallet_transaction::{
    Column as WalletTransactionColumn, Entity as WalletTransaction,
    Model as WalletTransactionModel,
};
