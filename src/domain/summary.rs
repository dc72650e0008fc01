use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use thiserror::Error;

use super::{Amount, Spending};

/// Calendar month used as the grouping key of the monthly summary.
/// Orders chronologically (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Total spent in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub month: MonthKey,
    pub total: Amount,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("total for {0} exceeds the supported amount range")]
    TotalOverflow(MonthKey),
}

/// Group entries by calendar month and sum their amounts.
/// Only months with at least one entry get a row; rows are ordered oldest first.
/// Fails rather than wrap when a month's total does not fit in an `Amount`.
pub fn monthly_summary(spendings: &[Spending]) -> Result<Vec<MonthlySummary>, SummaryError> {
    let mut totals: BTreeMap<MonthKey, Amount> = BTreeMap::new();

    for spending in spendings {
        let month = MonthKey::of(spending.date);
        let total = totals.entry(month).or_insert(0);
        *total = total
            .checked_add(spending.amount)
            .ok_or(SummaryError::TotalOverflow(month))?;
    }

    Ok(totals
        .into_iter()
        .map(|(month, total)| MonthlySummary { month, total })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spending(id: i64, date: &str, amount: Amount) -> Spending {
        Spending {
            id,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            location: "Tokyo".into(),
            item: "Coffee".into(),
            amount,
        }
    }

    #[test]
    fn test_empty_ledger_has_no_rows() {
        assert!(monthly_summary(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_groups_by_month() {
        let spendings = vec![
            spending(1, "2024-01-05", 500),
            spending(2, "2024-01-20", 1200),
            spending(3, "2024-03-01", 300),
        ];

        let summary = monthly_summary(&spendings).unwrap();

        assert_eq!(
            summary,
            vec![
                MonthlySummary {
                    month: MonthKey {
                        year: 2024,
                        month: 1
                    },
                    total: 1700,
                },
                MonthlySummary {
                    month: MonthKey {
                        year: 2024,
                        month: 3
                    },
                    total: 300,
                },
            ]
        );
    }

    #[test]
    fn test_orders_ascending_across_years() {
        let spendings = vec![
            spending(1, "2024-02-10", 100),
            spending(2, "2023-12-31", 200),
            spending(3, "2024-01-01", 300),
        ];

        let months: Vec<String> = monthly_summary(&spendings)
            .unwrap()
            .iter()
            .map(|row| row.month.to_string())
            .collect();

        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02"]);
    }

    #[test]
    fn test_zero_amounts_still_produce_a_row() {
        let summary = monthly_summary(&[spending(1, "2024-05-05", 0)]).unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].total, 0);
    }

    #[test]
    fn test_overflowing_month_total_is_an_error() {
        let spendings = vec![
            spending(1, "2024-06-01", 100),
            spending(2, "2024-07-01", Amount::MAX),
            spending(3, "2024-07-02", 1),
        ];

        assert_eq!(
            monthly_summary(&spendings),
            Err(SummaryError::TotalOverflow(MonthKey {
                year: 2024,
                month: 7
            }))
        );
    }

    #[test]
    fn test_totals_up_to_the_limit_are_exact() {
        let spendings = vec![
            spending(1, "2024-07-01", Amount::MAX - 1),
            spending(2, "2024-07-02", 1),
        ];

        let summary = monthly_summary(&spendings).unwrap();
        assert_eq!(summary[0].total, Amount::MAX);
    }

    #[test]
    fn test_month_key_serializes_as_string() {
        let row = MonthlySummary {
            month: MonthKey {
                year: 2024,
                month: 1,
            },
            total: 1700,
        };
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            serde_json::json!({"month": "2024-01", "total": 1700})
        );
    }
}
