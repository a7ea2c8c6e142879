//! Auxiliary health-check HTTP server (spec §4.7, §6: port 8080,
//! `GET /healthz` and `GET /readyz`, both `200 OK` / body `OK`).

use axum::{routing::get, Router};

pub const HEALTH_PORT: u16 = 8080;

pub fn router() -> Router {
    Router::new()
        .route("/healthz", get(ok))
        .route("/readyz", get(ok))
}

async fn ok() -> &'static str {
    "OK"
}

pub async fn serve() -> std::io::Result<()> {
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], HEALTH_PORT));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(port = HEALTH_PORT, "health check server listening");
    axum::serve(listener, router()).await
}
