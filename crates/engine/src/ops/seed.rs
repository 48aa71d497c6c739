use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, categories, expenses};

use super::{Engine, with_tx};

const SEED_CATEGORIES: [&str; 5] = [
    "Food & Coffee",
    "Rent",
    "Subscriptions",
    "Transport",
    "Health & Fitness",
];

struct SeedExpense {
    amount_cents: i64,
    description: &'static str,
    category: &'static str,
    /// Days before today, clamped to the first of the month.
    days_back: u32,
    /// Pin to the first of the month instead.
    first_of_month: bool,
}

const SEED_EXPENSES: [SeedExpense; 5] = [
    SeedExpense {
        amount_cents: 18_50,
        description: "Coffee + breakfast",
        category: "Food & Coffee",
        days_back: 0,
        first_of_month: false,
    },
    SeedExpense {
        amount_cents: 9_99,
        description: "Streaming subscription",
        category: "Subscriptions",
        days_back: 2,
        first_of_month: false,
    },
    SeedExpense {
        amount_cents: 1250_00,
        description: "Monthly rent",
        category: "Rent",
        days_back: 0,
        first_of_month: true,
    },
    SeedExpense {
        amount_cents: 42_30,
        description: "Gas + tolls",
        category: "Transport",
        days_back: 3,
        first_of_month: false,
    },
    SeedExpense {
        amount_cents: 29_00,
        description: "Gym membership",
        category: "Health & Fitness",
        days_back: 5,
        first_of_month: false,
    },
];

impl SeedExpense {
    fn date(&self, today: NaiveDate) -> ResultEngine<NaiveDate> {
        let day = if self.first_of_month {
            1
        } else {
            today.day().saturating_sub(self.days_back).max(1)
        };
        today
            .with_day(day)
            .ok_or_else(|| EngineError::InvalidPeriod(format!("{today} day {day}")))
    }
}

impl Engine {
    /// Insert the demo dataset: five categories and five expenses in the
    /// month of `today`.
    ///
    /// Expects an empty schema; callers reset it first.
    pub async fn seed_example_data(&self, today: NaiveDate) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let mut ids = Vec::with_capacity(SEED_CATEGORIES.len());
            for name in SEED_CATEGORIES {
                let model = categories::ActiveModel {
                    name: ActiveValue::Set(name.to_string()),
                    ..Default::default()
                }
                .insert(&db_tx)
                .await?;
                ids.push((name, model.id));
            }

            for seed in &SEED_EXPENSES {
                let category_id = ids
                    .iter()
                    .find_map(|(name, id)| (*name == seed.category).then_some(*id))
                    .ok_or_else(|| EngineError::KeyNotFound(seed.category.to_string()))?;
                expenses::ActiveModel {
                    amount_minor: ActiveValue::Set(seed.amount_cents),
                    description: ActiveValue::Set(Some(seed.description.to_string())),
                    date: ActiveValue::Set(seed.date(today)?),
                    category_id: ActiveValue::Set(category_id),
                    created_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                }
                .insert(&db_tx)
                .await?;
            }

            Ok::<(), EngineError>(())
        })?;

        tracing::info!(
            categories = SEED_CATEGORIES.len(),
            expenses = SEED_EXPENSES.len(),
            "example data seeded"
        );
        Ok(())
    }
}
