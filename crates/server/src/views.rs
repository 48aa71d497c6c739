//! Engine values rendered into the JSON view-models.

use api_types::{
    PeriodQuery,
    expense::{CategoryOption, ExpenseView},
};
use chrono::{Datelike, NaiveDate};
use engine::{Category, EngineError, Expense};

use crate::ServerError;

pub(crate) fn map_expense(expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        amount: expense.amount.to_string(),
        amount_minor: expense.amount.cents(),
        description: expense.description,
        date: expense.date.format("%Y-%m-%d").to_string(),
        category_id: expense.category_id,
        category: expense.category_name,
        created_at: expense.created_at.to_rfc3339(),
    }
}

pub(crate) fn map_category(category: Category) -> CategoryOption {
    CategoryOption {
        id: category.id,
        name: category.name,
    }
}

/// Ids that are not a valid `i32` cannot name a stored expense, so they are
/// reported as not found rather than as a malformed request.
pub(crate) fn parse_expense_id(raw: &str) -> Result<i32, ServerError> {
    raw.parse()
        .map_err(|_| EngineError::KeyNotFound(format!("expense {raw}")).into())
}

fn positive<T: std::str::FromStr + Default + PartialOrd>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|value| value.trim().parse::<T>().ok())
        .filter(|value| *value > T::default())
}

/// Year and month selected by the query, each falling back to `today` when
/// absent, non-numeric or zero.
///
/// Months above 12 are passed through and rejected by the engine.
pub(crate) fn resolve_period(query: &PeriodQuery, today: NaiveDate) -> (i32, u32) {
    let year = positive::<i32>(query.year.as_deref()).unwrap_or_else(|| today.year());
    let month = positive::<u32>(query.month.as_deref()).unwrap_or_else(|| today.month());
    (year, month)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use engine::Money;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn query(year: Option<&str>, month: Option<&str>) -> PeriodQuery {
        PeriodQuery {
            year: year.map(str::to_string),
            month: month.map(str::to_string),
        }
    }

    #[test]
    fn period_defaults_to_today() {
        assert_eq!(resolve_period(&query(None, None), today()), (2026, 10));
    }

    #[test]
    fn period_uses_query_values() {
        assert_eq!(
            resolve_period(&query(Some("2024"), Some("2")), today()),
            (2024, 2)
        );
    }

    #[test]
    fn garbage_and_zero_fall_back_per_field() {
        assert_eq!(
            resolve_period(&query(Some("abc"), Some("3")), today()),
            (2026, 3)
        );
        assert_eq!(
            resolve_period(&query(Some("2023"), Some("0")), today()),
            (2023, 10)
        );
        assert_eq!(
            resolve_period(&query(Some(""), Some("-4")), today()),
            (2026, 10)
        );
    }

    #[test]
    fn out_of_range_month_is_kept() {
        assert_eq!(
            resolve_period(&query(None, Some("13")), today()),
            (2026, 13)
        );
    }

    #[test]
    fn unparsable_ids_are_not_found() {
        assert_eq!(parse_expense_id("42").unwrap(), 42);
        for raw in ["abc", "99999999999", "", "4.2"] {
            assert!(
                matches!(
                    parse_expense_id(raw),
                    Err(ServerError::Engine(EngineError::KeyNotFound(_)))
                ),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn expense_view_formats_amount_and_date() {
        let expense = Expense {
            id: 7,
            amount: Money::new(1250),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            category_id: 2,
            category_name: "Food".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(),
        };

        let view = map_expense(expense);
        assert_eq!(view.amount, "12.50");
        assert_eq!(view.amount_minor, 1250);
        assert_eq!(view.date, "2024-03-09");
        assert_eq!(view.category, "Food");
        assert_eq!(view.created_at, "2024-03-09T12:00:00+00:00");
    }
}
