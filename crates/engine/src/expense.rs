//! The module contains the `ExpenseRecord` type, the raw input of every view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CategoryKey, EngineError, MoneyCents, ResultEngine};

/// A single expense as recorded by its owner.
///
/// Records are created and replaced by the surrounding layer; the engine only
/// reads them. The category is kept in the owner's raw spelling, the
/// comparable form is derived on demand via [`category_key`].
///
/// [`category_key`]: ExpenseRecord::category_key
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub owner: String,
    pub amount: MoneyCents,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl ExpenseRecord {
    /// Creates a record with a fresh id.
    pub fn new(
        owner: &str,
        amount: MoneyCents,
        category: &str,
        description: Option<&str>,
        date: NaiveDate,
    ) -> ResultEngine<Self> {
        Self::from_parts(
            Uuid::new_v4(),
            owner.to_string(),
            amount,
            category.to_string(),
            description.map(ToString::to_string),
            date,
        )
    }

    /// Creates a record with a known id, e.g. when hydrating from storage.
    ///
    /// Validates the record invariants: amount must be positive and the
    /// category must survive normalization.
    pub fn from_parts(
        id: Uuid,
        owner: String,
        amount: MoneyCents,
        category: String,
        description: Option<String>,
        date: NaiveDate,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(format!(
                "expense amount must be > 0, got {amount}"
            )));
        }
        CategoryKey::new(&category)?;
        Ok(Self {
            id,
            owner,
            amount,
            category: category.trim().to_string(),
            description: normalize_optional_text(description.as_deref()),
            date,
        })
    }

    /// The comparable category bucket this record belongs to.
    pub fn category_key(&self) -> ResultEngine<CategoryKey> {
        CategoryKey::new(&self.category).map_err(|_| {
            EngineError::InvalidCategory(format!("expense {} has an empty category", self.id))
        })
    }
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
