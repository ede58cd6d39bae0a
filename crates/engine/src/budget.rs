//! The module contains the `BudgetRecord` type, one per owner, category and
//! month.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CategoryKey, EngineError, MoneyCents, Month, ResultEngine};

/// A spending cap an owner set for one category in one month.
///
/// Storage may hold duplicates for the same `(owner, category, month)` triple
/// when two "set budget" calls race; `updated_at` records the set/update
/// instant the reconciler uses to pick the authoritative one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRecord {
    pub id: Uuid,
    pub owner: String,
    pub category: String,
    pub amount: MoneyCents,
    pub month: Month,
    pub updated_at: DateTime<Utc>,
}

impl BudgetRecord {
    /// Creates a record with a fresh id.
    pub fn new(
        owner: &str,
        category: &str,
        amount: MoneyCents,
        month: Month,
        updated_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        Self::from_parts(
            Uuid::new_v4(),
            owner.to_string(),
            category.to_string(),
            amount,
            month,
            updated_at,
        )
    }

    /// Creates a record with a known id, e.g. when hydrating from storage.
    pub fn from_parts(
        id: Uuid,
        owner: String,
        category: String,
        amount: MoneyCents,
        month: Month,
        updated_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(format!(
                "budget amount must be > 0, got {amount}"
            )));
        }
        CategoryKey::new(&category)?;
        Ok(Self {
            id,
            owner,
            category: category.trim().to_string(),
            amount,
            month,
            updated_at,
        })
    }

    /// The comparable category bucket this budget applies to.
    pub fn category_key(&self) -> ResultEngine<CategoryKey> {
        CategoryKey::new(&self.category).map_err(|_| {
            EngineError::InvalidCategory(format!("budget {} has an empty category", self.id))
        })
    }
}
