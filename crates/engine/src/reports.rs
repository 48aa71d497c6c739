//! Monthly aggregation over a set of expenses.
//!
//! Everything here is pure: the functions take expenses already loaded by
//! [`Engine::month_expenses`](crate::Engine::month_expenses) and only do
//! exact, integer-cent arithmetic.

use std::collections::BTreeMap;

use chrono::{Datelike, Month, NaiveDate};

use crate::{EngineError, Expense, Money, ResultEngine};

/// Label reported as top category when there are no expenses.
pub const NO_TOP_CATEGORY: &str = "N/A";

/// Half-open `[start, end)` date interval covering one calendar month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthRange {
    /// Builds the range for `year`/`month`, rolling December into January of
    /// the following year.
    pub fn new(year: i32, month: u32) -> ResultEngine<Self> {
        let invalid = || EngineError::InvalidPeriod(format!("{year}-{month:02}"));

        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let end = if month == 12 {
            year.checked_add(1)
                .and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1))
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;

        Ok(Self { start, end })
    }

    /// Range of the month containing `date`.
    pub fn containing(date: NaiveDate) -> ResultEngine<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Human label such as `"October 2026"`.
    pub fn label(&self) -> String {
        self.start.format("%B %Y").to_string()
    }
}

/// All twelve `(number, name)` pairs for a month selector.
pub fn month_options() -> Vec<(u32, &'static str)> {
    (1..=12u8)
        .filter_map(|n| Month::try_from(n).ok())
        .map(|month| (month.number_from_month(), month.name()))
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlySummary {
    pub total_spent: Money,
    pub per_category: BTreeMap<String, Money>,
    pub top_category: String,
    pub top_category_amount: Money,
    pub transactions_count: usize,
}

/// Totals a month of expenses.
///
/// The top category is the one with the largest sum; on a tie the
/// lexicographically smallest name wins.
pub fn compute_monthly_summary(expenses: &[Expense]) -> MonthlySummary {
    let mut per_category: BTreeMap<String, Money> = BTreeMap::new();
    for expense in expenses {
        *per_category
            .entry(expense.category_name.clone())
            .or_default() += expense.amount;
    }

    let total_spent = expenses.iter().map(|e| e.amount).sum();

    // BTreeMap iterates by ascending name, so keeping the first maximum
    // resolves ties to the smallest name.
    let top = per_category
        .iter()
        .fold(None::<(&String, Money)>, |best, (name, amount)| match best {
            Some((_, best_amount)) if best_amount >= *amount => best,
            _ => Some((name, *amount)),
        });

    let (top_category, top_category_amount) = match top {
        Some((name, amount)) => (name.clone(), amount),
        None => (NO_TOP_CATEGORY.to_string(), Money::ZERO),
    };

    MonthlySummary {
        total_spent,
        per_category,
        top_category,
        top_category_amount,
        transactions_count: expenses.len(),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub labels: Vec<String>,
    pub values: Vec<Money>,
}

/// Per-category sums, labels in first-seen order.
pub fn compute_category_breakdown(expenses: &[Expense]) -> CategoryBreakdown {
    let mut breakdown = CategoryBreakdown::default();
    for expense in expenses {
        match breakdown
            .labels
            .iter()
            .position(|label| *label == expense.category_name)
        {
            Some(idx) => breakdown.values[idx] += expense.amount,
            None => {
                breakdown.labels.push(expense.category_name.clone());
                breakdown.values.push(expense.amount);
            }
        }
    }
    breakdown
}
