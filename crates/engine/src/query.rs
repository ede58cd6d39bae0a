//! Filtered, sorted views over the raw expense collection.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CategoryKey, EngineError, ExpenseRecord, ResultEngine};

/// Synthetic filter choice meaning "no category filter".
///
/// Always the first entry of [`distinct_categories`], never sorted in with
/// the real labels.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Date,
    Amount,
    Category,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Category => "category",
        }
    }
}

impl TryFrom<&str> for SortField {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            "category" => Ok(Self::Category),
            other => Err(EngineError::InvalidSort(format!(
                "invalid sort field: {other}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl TryFrom<&str> for SortOrder {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            other => Err(EngineError::InvalidSort(format!(
                "invalid sort order: {other}"
            ))),
        }
    }
}

/// Filters for listing expenses.
///
/// The category matches by normalized key equality, never substring. The
/// date range is inclusive on both ends (`[from, to]`); an omitted bound
/// leaves that side unbounded.
#[derive(Clone, Debug, Default)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Sort specification for listing expenses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpenseSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for ExpenseSort {
    /// Newest first, the transaction-list default.
    fn default() -> Self {
        Self {
            field: SortField::Date,
            order: SortOrder::Descending,
        }
    }
}

fn validate_filter(filter: &ExpenseFilter) -> ResultEngine<Option<CategoryKey>> {
    if let (Some(from), Some(to)) = (filter.from, filter.to)
        && from > to
    {
        return Err(EngineError::InvalidDate(
            "invalid range: start must be <= end".to_string(),
        ));
    }
    filter.category.as_deref().map(CategoryKey::new).transpose()
}

/// Lists `owner`'s expenses matching `filter`, ordered by `sort`.
///
/// With `sort = None` records keep their input order. The sort is stable:
/// records with equal sort keys keep their input relative order, so a
/// `limit` layered on top is deterministic. `limit` truncates strictly after
/// sorting; truncating before would silently change which records are
/// "recent".
pub fn query(
    owner: &str,
    records: &[ExpenseRecord],
    filter: &ExpenseFilter,
    sort: Option<ExpenseSort>,
    limit: Option<usize>,
) -> ResultEngine<Vec<ExpenseRecord>> {
    let wanted_category = validate_filter(filter)?;

    let mut matches: Vec<(CategoryKey, &ExpenseRecord)> = Vec::new();
    for record in records.iter().filter(|record| record.owner == owner) {
        let key = record.category_key()?;
        if let Some(wanted) = &wanted_category
            && key != *wanted
        {
            continue;
        }
        if let Some(from) = filter.from
            && record.date < from
        {
            continue;
        }
        if let Some(to) = filter.to
            && record.date > to
        {
            continue;
        }
        matches.push((key, record));
    }

    // Descending uses a reversed comparator rather than a post-sort reverse,
    // which would flip the relative order of equal keys.
    if let Some(sort) = sort {
        match (sort.field, sort.order) {
            (SortField::Date, SortOrder::Ascending) => {
                matches.sort_by(|a, b| a.1.date.cmp(&b.1.date));
            }
            (SortField::Date, SortOrder::Descending) => {
                matches.sort_by(|a, b| b.1.date.cmp(&a.1.date));
            }
            (SortField::Amount, SortOrder::Ascending) => {
                matches.sort_by(|a, b| a.1.amount.cmp(&b.1.amount));
            }
            (SortField::Amount, SortOrder::Descending) => {
                matches.sort_by(|a, b| b.1.amount.cmp(&a.1.amount));
            }
            (SortField::Category, SortOrder::Ascending) => {
                matches.sort_by(|a, b| a.0.cmp(&b.0));
            }
            (SortField::Category, SortOrder::Descending) => {
                matches.sort_by(|a, b| b.0.cmp(&a.0));
            }
        }
    }

    if let Some(limit) = limit {
        matches.truncate(limit);
    }

    tracing::debug!(
        "query for {owner} matched {} of {} records",
        matches.len(),
        records.len()
    );

    Ok(matches.into_iter().map(|(_, record)| record.clone()).collect())
}

/// The dashboard's "recent transactions": newest first, truncated to `limit`.
pub fn recent(
    owner: &str,
    records: &[ExpenseRecord],
    limit: usize,
) -> ResultEngine<Vec<ExpenseRecord>> {
    query(
        owner,
        records,
        &ExpenseFilter::default(),
        Some(ExpenseSort::default()),
        Some(limit),
    )
}

/// Display labels of every category `owner` has recorded, sorted by key,
/// with the synthetic [`ALL_CATEGORIES`] choice prepended.
pub fn distinct_categories(owner: &str, records: &[ExpenseRecord]) -> ResultEngine<Vec<String>> {
    let mut keys: BTreeSet<CategoryKey> = BTreeSet::new();
    for record in records.iter().filter(|record| record.owner == owner) {
        keys.insert(record.category_key()?);
    }

    let mut labels = Vec::with_capacity(keys.len() + 1);
    labels.push(ALL_CATEGORIES.to_string());
    labels.extend(keys.iter().map(CategoryKey::display_label));
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MoneyCents;

    fn expense(cents: i64, category: &str, date: (i32, u32, u32)) -> ExpenseRecord {
        ExpenseRecord::new(
            "alice",
            MoneyCents::new(cents),
            category,
            None,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn sort_tokens_round_trip() {
        for field in [SortField::Date, SortField::Amount, SortField::Category] {
            assert_eq!(SortField::try_from(field.as_str()).unwrap(), field);
        }
        for order in [SortOrder::Ascending, SortOrder::Descending] {
            assert_eq!(SortOrder::try_from(order.as_str()).unwrap(), order);
        }
        assert!(matches!(
            SortField::try_from("merchant"),
            Err(EngineError::InvalidSort(_))
        ));
        assert!(matches!(
            SortOrder::try_from("up"),
            Err(EngineError::InvalidSort(_))
        ));
    }

    #[test]
    fn category_filter_matches_by_key_not_substring() {
        let records = [
            expense(1000, "food", (2024, 1, 5)),
            expense(2000, "rent", (2024, 1, 6)),
            expense(3000, "food", (2024, 1, 7)),
            expense(4000, "fast food", (2024, 1, 8)),
        ];
        let filter = ExpenseFilter {
            category: Some("Food".to_string()),
            ..ExpenseFilter::default()
        };
        let result = query("alice", &records, &filter, None, None).unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|record| record.category == "food"));
        // Unspecified sort keeps the input relative order.
        assert_eq!(result[0].id, records[0].id);
        assert_eq!(result[1].id, records[2].id);
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let filter = ExpenseFilter {
            from: NaiveDate::from_ymd_opt(2024, 2, 1),
            to: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..ExpenseFilter::default()
        };
        assert!(matches!(
            query("alice", &[], &filter, None, None),
            Err(EngineError::InvalidDate(_))
        ));
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let records = [
            expense(1000, "food", (2024, 1, 1)),
            expense(2000, "food", (2024, 1, 31)),
            expense(3000, "food", (2024, 2, 1)),
        ];
        let filter = ExpenseFilter {
            from: NaiveDate::from_ymd_opt(2024, 1, 1),
            to: NaiveDate::from_ymd_opt(2024, 1, 31),
            ..ExpenseFilter::default()
        };
        let result = query(
            "alice",
            &records,
            &filter,
            Some(ExpenseSort {
                field: SortField::Date,
                order: SortOrder::Ascending,
            }),
            None,
        )
        .unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].amount, MoneyCents::new(1000));
        assert_eq!(result[1].amount, MoneyCents::new(2000));
    }

    #[test]
    fn equal_sort_keys_keep_input_order() {
        let first = expense(1000, "food", (2024, 1, 5));
        let second = expense(1000, "rent", (2024, 1, 9));
        let records = [first.clone(), second.clone()];

        let ascending = query(
            "alice",
            &records,
            &ExpenseFilter::default(),
            Some(ExpenseSort {
                field: SortField::Amount,
                order: SortOrder::Ascending,
            }),
            None,
        )
        .unwrap();
        assert_eq!(ascending[0].id, first.id);
        assert_eq!(ascending[1].id, second.id);

        let descending = query(
            "alice",
            &records,
            &ExpenseFilter::default(),
            Some(ExpenseSort {
                field: SortField::Amount,
                order: SortOrder::Descending,
            }),
            None,
        )
        .unwrap();
        assert_eq!(descending[0].id, first.id);
        assert_eq!(descending[1].id, second.id);
    }

    #[test]
    fn category_sort_uses_normalized_keys() {
        let records = [
            expense(1000, "Zoo", (2024, 1, 1)),
            expense(2000, "apple", (2024, 1, 2)),
            expense(3000, "Banana", (2024, 1, 3)),
        ];
        let result = query(
            "alice",
            &records,
            &ExpenseFilter::default(),
            Some(ExpenseSort {
                field: SortField::Category,
                order: SortOrder::Ascending,
            }),
            None,
        )
        .unwrap();
        let categories: Vec<&str> = result.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, ["apple", "Banana", "Zoo"]);
    }

    #[test]
    fn limit_truncates_after_sorting() {
        let records = [
            expense(1000, "food", (2024, 1, 1)),
            expense(2000, "food", (2024, 1, 3)),
            expense(3000, "food", (2024, 1, 2)),
        ];
        let result = recent("alice", &records, 2).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(result[1].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn distinct_categories_prepends_all() {
        let records = [
            expense(1000, "rent", (2024, 1, 1)),
            expense(2000, "Food", (2024, 1, 2)),
            expense(3000, "food ", (2024, 1, 3)),
        ];
        let labels = distinct_categories("alice", &records).unwrap();
        assert_eq!(labels, ["All", "Food", "Rent"]);
    }
}
