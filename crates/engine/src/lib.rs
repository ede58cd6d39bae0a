//! Pure expense aggregation and budget reconciliation.
//!
//! Every operation in this crate is a referentially transparent function of
//! its inputs: the surrounding layer fetches records and budgets, calls in,
//! and renders the result. No I/O, no ambient user, no state across calls.

pub use budget::BudgetRecord;
pub use category::CategoryKey;
pub use error::EngineError;
pub use expense::ExpenseRecord;
pub use money::MoneyCents;
pub use month::Month;
pub use query::{
    ALL_CATEGORIES, ExpenseFilter, ExpenseSort, SortField, SortOrder, distinct_categories, query,
    recent,
};
pub use reconcile::{BudgetStatus, ReconciliationTotals, reconcile, totals};
pub use summary::{Summary, summarize};

mod budget;
mod category;
mod error;
mod expense;
mod money;
mod month;
mod query;
mod reconcile;
mod summary;

pub type ResultEngine<T> = Result<T, EngineError>;
