//! Expense tracking engine.
//!
//! The [`Engine`] owns the storage handle and exposes every operation the
//! server needs: category resolution, expense CRUD, month-bounded queries
//! and the aggregations behind the dashboard.

pub use categories::{Category, MAX_CATEGORY_NAME_LEN, UNCATEGORIZED_NAME};
pub use error::{EngineError, ValidationError};
pub use expenses::Expense;
pub use money::{MAX_AMOUNT_CENTS, Money};
pub use ops::{Engine, EngineBuilder, today};
pub use reports::{
    CategoryBreakdown, MonthRange, MonthlySummary, NO_TOP_CATEGORY, compute_category_breakdown,
    compute_monthly_summary, month_options,
};
pub use validation::{ExpenseForm, MAX_DESCRIPTION_LEN, ValidatedExpense};

mod categories;
mod error;
mod expenses;
mod money;
mod ops;
mod reports;
mod validation;

type ResultEngine<T> = Result<T, EngineError>;
