//! Monthly and yearly aggregation of expense records.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::{CategoryKey, EngineError, ExpenseRecord, MoneyCents, Month, ResultEngine};

/// Derived aggregation of one owner's expenses for a target month and year.
///
/// Recomputed on every call, never persisted. A category absent from
/// `monthly_category_breakdown` had zero spend in the target month; callers
/// must treat a missing key as 0 rather than expect explicit zero entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub monthly_category_breakdown: BTreeMap<CategoryKey, MoneyCents>,
    pub total_monthly_expenses: MoneyCents,
    pub total_yearly_expenses: MoneyCents,
}

/// Folds `records` into per-category monthly sums plus monthly/yearly totals.
///
/// Records owned by anyone but `owner` are ignored. Records whose raw
/// category spellings normalize to the same [`CategoryKey`] merge into one
/// bucket. Summation is exact integer cents; rounding to two decimals is the
/// presentation layer's job.
///
/// The month and year are independent targets: the dashboard asks for the
/// current month's breakdown alongside the running total of the current year.
pub fn summarize(
    owner: &str,
    records: &[ExpenseRecord],
    target_month: Month,
    target_year: i32,
) -> ResultEngine<Summary> {
    let mut breakdown: BTreeMap<CategoryKey, MoneyCents> = BTreeMap::new();
    let mut monthly = MoneyCents::ZERO;
    let mut yearly = MoneyCents::ZERO;

    let overflow = || EngineError::InvalidAmount("expense total overflows".to_string());

    for record in records.iter().filter(|record| record.owner == owner) {
        let key = record.category_key()?;

        if target_month.contains(record.date) {
            let bucket = breakdown.entry(key).or_insert(MoneyCents::ZERO);
            *bucket = bucket.checked_add(record.amount).ok_or_else(overflow)?;
            monthly = monthly.checked_add(record.amount).ok_or_else(overflow)?;
        }
        if record.date.year() == target_year {
            yearly = yearly.checked_add(record.amount).ok_or_else(overflow)?;
        }
    }

    tracing::debug!(
        "summarized {} records for {owner}: {} categories in {target_month}",
        records.len(),
        breakdown.len()
    );

    Ok(Summary {
        monthly_category_breakdown: breakdown,
        total_monthly_expenses: monthly,
        total_yearly_expenses: yearly,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(owner: &str, cents: i64, category: &str, date: (i32, u32, u32)) -> ExpenseRecord {
        ExpenseRecord::new(
            owner,
            MoneyCents::new(cents),
            category,
            None,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn empty_input_yields_zero_summary() {
        let month: Month = "2024-01".parse().unwrap();
        let summary = summarize("alice", &[], month, 2024).unwrap();
        assert!(summary.monthly_category_breakdown.is_empty());
        assert_eq!(summary.total_monthly_expenses, MoneyCents::ZERO);
        assert_eq!(summary.total_yearly_expenses, MoneyCents::ZERO);
    }

    #[test]
    fn spelling_variants_merge_into_one_bucket() {
        let month: Month = "2024-01".parse().unwrap();
        let records = [
            expense("alice", 1000, "Food", (2024, 1, 5)),
            expense("alice", 250, "food", (2024, 1, 9)),
            expense("alice", 750, " FOOD ", (2024, 1, 20)),
        ];
        let summary = summarize("alice", &records, month, 2024).unwrap();
        let key = CategoryKey::new("food").unwrap();
        assert_eq!(summary.monthly_category_breakdown.len(), 1);
        assert_eq!(
            summary.monthly_category_breakdown[&key],
            MoneyCents::new(2000)
        );
    }

    #[test]
    fn yearly_total_spans_all_months() {
        let month: Month = "2024-03".parse().unwrap();
        let records = [
            expense("alice", 1000, "Rent", (2024, 1, 1)),
            expense("alice", 1000, "Rent", (2024, 3, 1)),
            expense("alice", 1000, "Rent", (2023, 12, 31)),
        ];
        let summary = summarize("alice", &records, month, 2024).unwrap();
        assert_eq!(summary.total_monthly_expenses, MoneyCents::new(1000));
        assert_eq!(summary.total_yearly_expenses, MoneyCents::new(2000));
    }

    #[test]
    fn serializes_with_normalized_keys_and_cent_amounts() {
        let month: Month = "2024-01".parse().unwrap();
        let records = [expense("alice", 1050, "Coffee Shop", (2024, 1, 5))];
        let summary = summarize("alice", &records, month, 2024).unwrap();

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["monthly_category_breakdown"]["coffee shop"], 1050);
        assert_eq!(json["total_monthly_expenses"], 1050);
    }

    #[test]
    fn foreign_records_are_ignored() {
        let month: Month = "2024-01".parse().unwrap();
        let records = [
            expense("alice", 1000, "Food", (2024, 1, 5)),
            expense("bob", 9999, "Food", (2024, 1, 5)),
        ];
        let summary = summarize("alice", &records, month, 2024).unwrap();
        assert_eq!(summary.total_monthly_expenses, MoneyCents::new(1000));
        assert_eq!(summary.total_yearly_expenses, MoneyCents::new(1000));
    }
}
