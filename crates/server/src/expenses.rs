//! Expense list and form endpoints.
//!
//! Form submissions answer with `303 See Other`. Validation failures send the
//! client back to the form with `?error=<code>`; successes land on the list
//! with `?notice=<code>`.

use api_types::expense::{
    ErrorQuery, ExpenseFormData, ExpenseFormView, ExpenseListView, Notice, NoticeQuery,
};
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    response::Redirect,
};
use engine::{EngineError, ExpenseForm, ValidationError};

use crate::{
    ServerError,
    server::ServerState,
    views::{map_category, map_expense, parse_expense_id},
};

fn to_engine_form(data: ExpenseFormData) -> ExpenseForm {
    ExpenseForm {
        amount: data.amount,
        date: data.date,
        category: data.category,
        new_category: data.new_category,
        description: data.description,
    }
}

fn list_redirect(notice: Notice) -> Redirect {
    Redirect::to(&format!("/expenses?notice={}", notice.as_str()))
}

fn form_redirect(path: &str, err: ValidationError) -> Redirect {
    Redirect::to(&format!("{path}?error={}", err.code()))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Json<ExpenseListView>, ServerError> {
    let expenses = state
        .engine
        .list_expenses()
        .await?
        .into_iter()
        .map(map_expense)
        .collect();

    Ok(Json(ExpenseListView {
        expenses,
        notice: query.notice.as_deref().and_then(Notice::from_code),
    }))
}

async fn form_view(
    state: &ServerState,
    expense_id: Option<i32>,
    error: Option<String>,
) -> Result<ExpenseFormView, ServerError> {
    let expense = match expense_id {
        Some(id) => Some(map_expense(state.engine.expense(id).await?)),
        None => None,
    };
    let categories = state
        .engine
        .list_categories()
        .await?
        .into_iter()
        .map(map_category)
        .collect();

    Ok(ExpenseFormView {
        expense,
        categories,
        error,
    })
}

pub async fn new_form(
    State(state): State<ServerState>,
    Query(query): Query<ErrorQuery>,
) -> Result<Json<ExpenseFormView>, ServerError> {
    Ok(Json(form_view(&state, None, query.error).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Form(data): Form<ExpenseFormData>,
) -> Result<Redirect, ServerError> {
    match state.engine.create_expense(&to_engine_form(data)).await {
        Ok(_) => Ok(list_redirect(Notice::ExpenseAdded)),
        Err(EngineError::Validation(err)) => {
            tracing::debug!(code = err.code(), "rejected new expense");
            Ok(form_redirect("/expenses/new", err))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn edit_form(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
    Query(query): Query<ErrorQuery>,
) -> Result<Json<ExpenseFormView>, ServerError> {
    let expense_id = parse_expense_id(&raw_id)?;
    Ok(Json(form_view(&state, Some(expense_id), query.error).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
    Form(data): Form<ExpenseFormData>,
) -> Result<Redirect, ServerError> {
    let expense_id = parse_expense_id(&raw_id)?;
    match state
        .engine
        .update_expense(expense_id, &to_engine_form(data))
        .await
    {
        Ok(_) => Ok(list_redirect(Notice::ExpenseUpdated)),
        Err(EngineError::Validation(err)) => {
            tracing::debug!(expense_id, code = err.code(), "rejected expense edit");
            Ok(form_redirect(&format!("/expenses/{expense_id}/edit"), err))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> Result<Redirect, ServerError> {
    let expense_id = parse_expense_id(&raw_id)?;
    state.engine.delete_expense(expense_id).await?;
    Ok(list_redirect(Notice::ExpenseDeleted))
}
