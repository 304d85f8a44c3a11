use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};

use crate::handlers::{self, AppState};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // U101 Sync prices: запуск + SSE-поток прогресса
        .route("/api/sync_prices/run", get(handlers::u101_sync_prices::run))
        .layer(Extension(state))
}
