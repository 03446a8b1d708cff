//! HTTP handlers (view-model boundary) and router assembly.

pub mod pages;
pub mod players;
pub mod render;

use crate::error::AppError;
use crate::infra::DbPool;
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pool: Arc<DbPool>,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Run one blocking use case on the blocking pool. Each call gets its own
    /// session, so concurrent requests never share a transaction.
    pub async fn run<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&DbPool) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || f(&pool))
            .await
            .map_err(|e| AppError::Db(format!("worker task failed: {}", e)))?
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .merge(pages::router())
        .merge(players::router())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
