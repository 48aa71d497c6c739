//! Schema reset with demo data.

use axum::extract::State;
use engine::EngineError;
use migration::MigratorTrait;

use crate::{ServerError, server::ServerState};

/// Drop every table, recreate the schema and seed the example dataset.
///
/// The reset and the seed commit separately: a failed seed leaves an empty
/// schema behind. Acceptable for a demo-data route; calling it again retries.
pub async fn reset(State(state): State<ServerState>) -> Result<&'static str, ServerError> {
    migration::Migrator::refresh(state.engine.database())
        .await
        .map_err(EngineError::from)?;
    state.engine.seed_example_data(engine::today()).await?;

    tracing::warn!("database reset and seeded with example data");
    Ok("Database initialized with example data.")
}
