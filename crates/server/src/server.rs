use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc, time::Instant};

use crate::{dashboard, expenses, init_db};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Log method, path, status and latency of every request.
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();
    if status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), elapsed_ms, "request failed");
    } else {
        tracing::info!(%method, %path, status = status.as_u16(), elapsed_ms, "request");
    }
    response
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(dashboard::show))
        .route("/api/monthly-category-breakdown", get(dashboard::breakdown))
        .route("/expenses", get(expenses::list))
        .route(
            "/expenses/new",
            get(expenses::new_form).post(expenses::create),
        )
        .route(
            "/expenses/{id}/edit",
            get(expenses::edit_form).post(expenses::update),
        )
        .route("/expenses/{id}/delete", post(expenses::delete))
        .route("/init-db", get(init_db::reset))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
