pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod routes;

use config::Settings;
use infra::init_db;
use routes::{build_router, AppState};
use tokio::net::TcpListener;

/// Open the database, optionally seed it, and serve until Ctrl+C / SIGTERM.
pub async fn run(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = settings.database_path();
    log::info!("DB path: {:?}", db_path);

    let pool = init_db(&db_path).map_err(|e| {
        log::error!("DB init failed: {}", e);
        e
    })?;
    if settings.seed {
        app::seed_demo_data(&pool)?;
    }

    let app = build_router(AppState::new(pool), &settings.static_dir);
    let addr = settings.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    log::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("Received Ctrl+C, starting shutdown"),
        _ = terminate => log::info!("Received SIGTERM, starting shutdown"),
    }
}
