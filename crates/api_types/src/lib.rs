use serde::{Deserialize, Serialize};

/// `?year=&month=` on the dashboard and chart endpoints.
///
/// Kept as raw strings: values that are not positive integers fall back to
/// the current period instead of rejecting the request.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PeriodQuery {
    pub year: Option<String>,
    pub month: Option<String>,
}

pub mod dashboard {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CategoryTotal {
        pub category: String,
        pub amount: String,
        pub amount_minor: i64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct MonthOption {
        pub number: u32,
        pub name: String,
    }

    /// Monthly overview shown on `/`.
    ///
    /// Amounts are sent twice: formatted with two decimals for display and as
    /// integer minor units for anything that needs to compute with them.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct DashboardView {
        pub month_label: String,
        pub selected_year: i32,
        pub selected_month: u32,
        pub total_spent: String,
        pub total_spent_minor: i64,
        pub top_category: String,
        pub top_category_amount: String,
        pub top_category_amount_minor: i64,
        pub transactions_count: usize,
        pub per_category: Vec<CategoryTotal>,
        pub month_options: Vec<MonthOption>,
        pub year_options: Vec<i32>,
    }

    /// Chart payload for `/api/monthly-category-breakdown`.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct Breakdown {
        pub labels: Vec<String>,
        pub values: Vec<f64>,
    }
}

pub mod expense {
    use super::*;

    /// Outcome codes carried back to the list page after a redirect.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Notice {
        ExpenseAdded,
        ExpenseUpdated,
        ExpenseDeleted,
    }

    impl Notice {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::ExpenseAdded => "expense_added",
                Self::ExpenseUpdated => "expense_updated",
                Self::ExpenseDeleted => "expense_deleted",
            }
        }

        /// Unknown codes are ignored rather than rejected.
        pub fn from_code(code: &str) -> Option<Self> {
            match code {
                "expense_added" => Some(Self::ExpenseAdded),
                "expense_updated" => Some(Self::ExpenseUpdated),
                "expense_deleted" => Some(Self::ExpenseDeleted),
                _ => None,
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: i32,
        pub amount: String,
        pub amount_minor: i64,
        pub description: Option<String>,
        /// `YYYY-MM-DD`
        pub date: String,
        pub category_id: i32,
        pub category: String,
        pub created_at: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseListView {
        pub expenses: Vec<ExpenseView>,
        pub notice: Option<Notice>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryOption {
        pub id: i32,
        pub name: String,
    }

    /// Data for the create/edit form. `expense` is set only when editing.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseFormView {
        pub expense: Option<ExpenseView>,
        pub categories: Vec<CategoryOption>,
        pub error: Option<String>,
    }

    /// Urlencoded body of the create/edit form. Missing fields read as empty.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ExpenseFormData {
        pub amount: String,
        pub date: String,
        pub category: String,
        pub new_category: String,
        pub description: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct NoticeQuery {
        pub notice: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ErrorQuery {
        pub error: Option<String>,
    }
}
