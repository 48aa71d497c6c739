use std::ops::RangeInclusive;

use chrono::{Datelike, Local, NaiveDate};
use sea_orm::{QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{
    Expense, ResultEngine, categories, expenses,
    reports::{
        CategoryBreakdown, MonthRange, MonthlySummary, compute_category_breakdown,
        compute_monthly_summary,
    },
};

use super::Engine;

/// Today's date on the local clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl Engine {
    /// Expenses dated inside `year`/`month`, ascending by date.
    pub async fn month_expenses(&self, year: i32, month: u32) -> ResultEngine<Vec<Expense>> {
        self.expenses_in(MonthRange::new(year, month)?).await
    }

    /// Expenses of the current calendar month.
    pub async fn current_month_expenses(&self) -> ResultEngine<Vec<Expense>> {
        self.expenses_in(MonthRange::containing(today())?).await
    }

    async fn expenses_in(&self, range: MonthRange) -> ResultEngine<Vec<Expense>> {
        tracing::debug!(start = %range.start, end = %range.end, "loading month expenses");

        let rows = expenses::Entity::find()
            .filter(expenses::Column::Date.gte(range.start))
            .filter(expenses::Column::Date.lt(range.end))
            .order_by_asc(expenses::Column::Date)
            .order_by_asc(expenses::Column::Id)
            .find_also_related(categories::Entity)
            .all(&self.database)
            .await?;
        rows.into_iter().map(Expense::try_from).collect()
    }

    pub async fn monthly_summary(&self, year: i32, month: u32) -> ResultEngine<MonthlySummary> {
        let expenses = self.month_expenses(year, month).await?;
        Ok(compute_monthly_summary(&expenses))
    }

    pub async fn category_breakdown(
        &self,
        year: i32,
        month: u32,
    ) -> ResultEngine<CategoryBreakdown> {
        let expenses = self.month_expenses(year, month).await?;
        Ok(compute_category_breakdown(&expenses))
    }

    /// Years spanned by the stored expenses, oldest first.
    ///
    /// An empty table yields just the year of `today`.
    pub async fn year_range(&self, today: NaiveDate) -> ResultEngine<RangeInclusive<i32>> {
        let bounds: Option<(Option<NaiveDate>, Option<NaiveDate>)> = expenses::Entity::find()
            .select_only()
            .column_as(expenses::Column::Date.min(), "min_date")
            .column_as(expenses::Column::Date.max(), "max_date")
            .into_tuple()
            .one(&self.database)
            .await?;

        Ok(match bounds {
            Some((Some(min), Some(max))) => min.year()..=max.year(),
            _ => today.year()..=today.year(),
        })
    }
}
