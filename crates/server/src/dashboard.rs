//! Dashboard and chart endpoints.

use api_types::{
    PeriodQuery,
    dashboard::{Breakdown, CategoryTotal, DashboardView, MonthOption},
};
use axum::{
    Json,
    extract::{Query, State},
};
use engine::{MonthRange, month_options};

use crate::{ServerError, server::ServerState, views::resolve_period};

/// Summary of the selected (or current) month plus selector options.
pub async fn show(
    State(state): State<ServerState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<DashboardView>, ServerError> {
    let today = engine::today();
    let (year, month) = resolve_period(&query, today);
    let range = MonthRange::new(year, month)?;

    let summary = state.engine.monthly_summary(year, month).await?;
    let years = state.engine.year_range(today).await?;

    let per_category = summary
        .per_category
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category,
            amount: amount.to_string(),
            amount_minor: amount.cents(),
        })
        .collect();

    Ok(Json(DashboardView {
        month_label: range.label(),
        selected_year: year,
        selected_month: month,
        total_spent: summary.total_spent.to_string(),
        total_spent_minor: summary.total_spent.cents(),
        top_category: summary.top_category,
        top_category_amount: summary.top_category_amount.to_string(),
        top_category_amount_minor: summary.top_category_amount.cents(),
        transactions_count: summary.transactions_count,
        per_category,
        month_options: month_options()
            .into_iter()
            .map(|(number, name)| MonthOption {
                number,
                name: name.to_string(),
            })
            .collect(),
        year_options: years.collect(),
    }))
}

/// Per-category totals for the chart, in first-seen order.
pub async fn breakdown(
    State(state): State<ServerState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Breakdown>, ServerError> {
    let (year, month) = resolve_period(&query, engine::today());
    let breakdown = state.engine.category_breakdown(year, month).await?;

    Ok(Json(Breakdown {
        labels: breakdown.labels,
        values: breakdown
            .values
            .into_iter()
            .map(|value| value.to_major_f64())
            .collect(),
    }))
}
