use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener, spawn_with_listener};

mod dashboard;
mod expenses;
mod init_db;
mod server;
mod views;

pub mod types {
    pub mod dashboard {
        pub use api_types::dashboard::{Breakdown, CategoryTotal, DashboardView, MonthOption};
    }

    pub mod expense {
        pub use api_types::expense::{
            CategoryOption, ExpenseFormData, ExpenseFormView, ExpenseListView, ExpenseView,
            Notice,
        };
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidPeriod(_) => StatusCode::BAD_REQUEST,
        EngineError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
