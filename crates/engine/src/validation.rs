//! Expense form validation.
//!
//! Create and edit share the same rules: a form is checked completely before
//! anything touches the database.

use chrono::NaiveDate;

use crate::{
    Money, ValidationError,
    categories::{self, UNCATEGORIZED_NAME},
};

/// Longest accepted description.
pub const MAX_DESCRIPTION_LEN: usize = 255;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw fields as submitted by the expense form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub amount: String,
    pub date: String,
    /// Name picked from the existing categories.
    pub category: String,
    /// Free-text category; wins over `category` when non-empty.
    pub new_category: String,
    pub description: String,
}

/// A form that passed validation. The category is still a name: it is
/// resolved (and possibly created) by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedExpense {
    pub amount: Money,
    pub date: NaiveDate,
    pub category_name: String,
    pub description: Option<String>,
}

impl ExpenseForm {
    pub fn validate(&self) -> Result<ValidatedExpense, ValidationError> {
        let amount_raw = self.amount.trim();
        let date_raw = self.date.trim();

        if amount_raw.is_empty() && date_raw.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let amount: Money = amount_raw.parse()?;
        let date = NaiveDate::parse_from_str(date_raw, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate)?;

        let category_name = self.category_choice().to_string();
        if category_name.chars().count() > categories::MAX_CATEGORY_NAME_LEN {
            return Err(ValidationError::InvalidCategory);
        }

        let description = self.description.trim();
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::DescriptionTooLong);
        }
        let description = (!description.is_empty()).then(|| description.to_string());

        Ok(ValidatedExpense {
            amount,
            date,
            category_name,
            description,
        })
    }

    fn category_choice(&self) -> &str {
        [self.new_category.trim(), self.category.trim()]
            .into_iter()
            .find(|name| !name.is_empty())
            .unwrap_or(UNCATEGORIZED_NAME)
    }
}
