//! Wire types exchanged with the finance backend.

pub mod budget;
pub mod dashboard;
pub mod session;
pub mod transaction;

pub use self::budget::{BudgetItem, Frequency, NewBudget};
pub use self::dashboard::DashboardSummary;
pub use self::session::{LoginGrant, SessionUser, VerifiedUser};
pub use self::transaction::{Transaction, TransactionPage, TransactionType};
