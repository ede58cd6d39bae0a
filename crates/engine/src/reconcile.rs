//! Budget reconciliation: joins a monthly breakdown with the budget set.

use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};

use serde::Serialize;

use crate::{BudgetRecord, CategoryKey, EngineError, MoneyCents, Month, ResultEngine};

/// Per-category comparison of budgeted vs. spent for one month.
///
/// Produced for the union of budgeted and spent categories: spending without
/// a budget surfaces with `budgeted = 0`, a budget without spending surfaces
/// with `spent = 0`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub category: CategoryKey,
    pub category_label: String,
    pub budgeted: MoneyCents,
    pub spent: MoneyCents,
    pub remaining: MoneyCents,
}

impl BudgetStatus {
    /// Returns `true` when spending exceeded the budget (`remaining < 0`).
    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Month-level totals over a reconciliation result, the dashboard cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationTotals {
    pub total_budgeted: MoneyCents,
    pub total_spent: MoneyCents,
    pub total_remaining: MoneyCents,
}

/// Joins a summary breakdown with `owner`'s budgets for `target_month`.
///
/// Budgets for other owners or months are ignored. When storage holds
/// duplicate budgets for one category the greatest `updated_at` wins, ties
/// broken by the greatest id, so the outcome never depends on the order the
/// storage layer returned them in. The result is ordered by category key.
///
/// A month with no budgets and no spending reconciles to an empty list; that
/// is a valid result, not an error.
pub fn reconcile(
    owner: &str,
    breakdown: &BTreeMap<CategoryKey, MoneyCents>,
    budgets: &[BudgetRecord],
    target_month: Month,
) -> ResultEngine<Vec<BudgetStatus>> {
    let mut authoritative: BTreeMap<CategoryKey, &BudgetRecord> = BTreeMap::new();
    for budget in budgets
        .iter()
        .filter(|budget| budget.owner == owner && budget.month == target_month)
    {
        let key = budget.category_key()?;
        match authoritative.entry(key) {
            Entry::Vacant(vacant) => {
                vacant.insert(budget);
            }
            Entry::Occupied(mut occupied) => {
                let current = occupied.get();
                if (budget.updated_at, budget.id) > (current.updated_at, current.id) {
                    occupied.insert(budget);
                }
            }
        }
    }

    let keys: BTreeSet<&CategoryKey> = authoritative.keys().chain(breakdown.keys()).collect();

    let overflow = || EngineError::InvalidAmount("budget remainder overflows".to_string());
    let mut statuses = Vec::with_capacity(keys.len());
    for key in keys {
        let spent = breakdown.get(key).copied().unwrap_or(MoneyCents::ZERO);
        let budgeted = authoritative
            .get(key)
            .map(|budget| budget.amount)
            .unwrap_or(MoneyCents::ZERO);
        statuses.push(BudgetStatus {
            category: key.clone(),
            category_label: key.display_label(),
            budgeted,
            spent,
            remaining: budgeted.checked_sub(spent).ok_or_else(overflow)?,
        });
    }

    tracing::debug!(
        "reconciled {} categories for {owner} in {target_month}",
        statuses.len()
    );

    Ok(statuses)
}

/// Folds a reconciliation into overall budgeted/spent/remaining totals.
pub fn totals(statuses: &[BudgetStatus]) -> ResultEngine<ReconciliationTotals> {
    let overflow = || EngineError::InvalidAmount("reconciliation total overflows".to_string());

    let mut total_budgeted = MoneyCents::ZERO;
    let mut total_spent = MoneyCents::ZERO;
    for status in statuses {
        total_budgeted = total_budgeted
            .checked_add(status.budgeted)
            .ok_or_else(overflow)?;
        total_spent = total_spent.checked_add(status.spent).ok_or_else(overflow)?;
    }

    Ok(ReconciliationTotals {
        total_budgeted,
        total_spent,
        total_remaining: total_budgeted.checked_sub(total_spent).ok_or_else(overflow)?,
    })
}
