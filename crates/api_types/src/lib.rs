//! Wire shapes exchanged with the request-handling layer.
//!
//! Amounts cross this boundary as plain JSON numbers and categories as raw
//! text; conversion to the engine's integer cents and normalized keys happens
//! in the fallible conversions below, never in the transport layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod expense {
    use super::*;
    use engine::{
        EngineError, ExpenseFilter, ExpenseRecord, ExpenseSort, MoneyCents, SortField, SortOrder,
    };

    /// Query parameters of `GET /expenses/{owner}`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListRequest {
        pub owner: String,
        pub category: Option<String>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        pub sort_by: Option<String>,
        pub order: Option<String>,
        pub limit: Option<usize>,
    }

    impl ExpenseListRequest {
        /// The engine filter this request asks for.
        ///
        /// The category is passed through raw; the engine normalizes it.
        pub fn filter(&self) -> ExpenseFilter {
            ExpenseFilter {
                category: self.category.clone(),
                from: self.start_date,
                to: self.end_date,
            }
        }

        /// The engine sort this request asks for.
        ///
        /// Omitted fields fall back to the newest-first default; unknown
        /// tokens are rejected.
        pub fn sort(&self) -> Result<ExpenseSort, EngineError> {
            let default = ExpenseSort::default();
            let field = match self.sort_by.as_deref() {
                Some(token) => SortField::try_from(token)?,
                None => default.field,
            };
            let order = match self.order.as_deref() {
                Some(token) => SortOrder::try_from(token)?,
                None => default.order,
            };
            Ok(ExpenseSort { field, order })
        }
    }

    /// An expense record as it crosses the boundary.
    ///
    /// `date` is serialized as `YYYY-MM-DD`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub owner: String,
        pub amount: f64,
        pub category: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        pub date: NaiveDate,
    }

    impl From<&ExpenseRecord> for ExpenseView {
        fn from(record: &ExpenseRecord) -> Self {
            Self {
                id: record.id,
                owner: record.owner.clone(),
                amount: record.amount.to_major(),
                category: record.category.clone(),
                description: record.description.clone(),
                date: record.date,
            }
        }
    }

    impl TryFrom<ExpenseView> for ExpenseRecord {
        type Error = EngineError;

        fn try_from(view: ExpenseView) -> Result<Self, Self::Error> {
            let amount = MoneyCents::try_from_major(view.amount)?;
            ExpenseRecord::from_parts(
                view.id,
                view.owner,
                amount,
                view.category,
                view.description,
                view.date,
            )
        }
    }
}

pub mod budget {
    use super::*;
    use engine::{BudgetRecord, EngineError, MoneyCents, Month};

    /// Path parameters of `GET /budgets/{owner}/{month}`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetListRequest {
        pub owner: String,
        /// Target month in `YYYY-MM`.
        pub month: String,
    }

    impl BudgetListRequest {
        pub fn month(&self) -> Result<Month, EngineError> {
            self.month.parse()
        }
    }

    /// A budget record as it crosses the boundary.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: Uuid,
        pub owner: String,
        pub category: String,
        pub amount: f64,
        /// Target month in `YYYY-MM`.
        pub month: String,
        pub updated_at: DateTime<Utc>,
    }

    impl From<&BudgetRecord> for BudgetView {
        fn from(record: &BudgetRecord) -> Self {
            Self {
                id: record.id,
                owner: record.owner.clone(),
                category: record.category.clone(),
                amount: record.amount.to_major(),
                month: record.month.to_string(),
                updated_at: record.updated_at,
            }
        }
    }

    impl TryFrom<BudgetView> for BudgetRecord {
        type Error = EngineError;

        fn try_from(view: BudgetView) -> Result<Self, Self::Error> {
            let amount = MoneyCents::try_from_major(view.amount)?;
            BudgetRecord::from_parts(
                view.id,
                view.owner,
                view.category,
                amount,
                view.month.parse()?,
                view.updated_at,
            )
        }
    }
}

pub mod summary {
    use std::collections::BTreeMap;

    use super::*;
    use engine::{EngineError, Month, Summary};

    /// Query parameters of `GET /summary/{owner}?month=`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryRequest {
        pub owner: String,
        /// Target month in `YYYY-MM`.
        pub month: String,
    }

    impl SummaryRequest {
        pub fn month(&self) -> Result<Month, EngineError> {
            self.month.parse()
        }
    }

    /// Response body of `GET /summary/{owner}`.
    ///
    /// The breakdown is keyed by display label and amounts become two-decimal
    /// numbers here, at the presentation boundary; everything upstream is
    /// exact integer cents.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryResponse {
        pub monthly_category_breakdown: BTreeMap<String, f64>,
        pub total_monthly_expenses: f64,
        pub total_yearly_expenses: f64,
    }

    impl From<&Summary> for SummaryResponse {
        fn from(summary: &Summary) -> Self {
            Self {
                monthly_category_breakdown: summary
                    .monthly_category_breakdown
                    .iter()
                    .map(|(key, amount)| (key.display_label(), amount.to_major()))
                    .collect(),
                total_monthly_expenses: summary.total_monthly_expenses.to_major(),
                total_yearly_expenses: summary.total_yearly_expenses.to_major(),
            }
        }
    }
}

pub mod reconciliation {
    use super::*;
    use engine::{BudgetStatus, ReconciliationTotals};

    /// One category's budget-vs-spent line, as rendered by the budget list
    /// and the dashboard bar chart.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetStatusView {
        pub category: String,
        pub budgeted: f64,
        pub spent: f64,
        pub remaining: f64,
        pub over_budget: bool,
    }

    impl From<&BudgetStatus> for BudgetStatusView {
        fn from(status: &BudgetStatus) -> Self {
            Self {
                category: status.category_label.clone(),
                budgeted: status.budgeted.to_major(),
                spent: status.spent.to_major(),
                remaining: status.remaining.to_major(),
                over_budget: status.is_over_budget(),
            }
        }
    }

    /// The dashboard's overall budget cards.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TotalsView {
        pub total_budgeted: f64,
        pub total_spent: f64,
        pub total_remaining: f64,
    }

    impl From<ReconciliationTotals> for TotalsView {
        fn from(totals: ReconciliationTotals) -> Self {
            Self {
                total_budgeted: totals.total_budgeted.to_major(),
                total_spent: totals.total_spent.to_major(),
                total_remaining: totals.total_remaining.to_major(),
            }
        }
    }
}
