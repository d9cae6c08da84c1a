use axum::Router;
use splitdns_api::{create_api_routes, AppState};
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;
use tracing::{error, info};

/// Binds before returning so a busy port fails startup.
pub async fn start_web_server(
    bind_addr: SocketAddr,
    state: AppState,
    content_root: Option<String>,
    shutdown: CancellationToken,
) -> anyhow::Result<JoinHandle<()>> {
    info!(
        bind_address = %bind_addr,
        console = content_root.as_deref().unwrap_or("disabled"),
        "Starting management server"
    );

    let app = create_app(state, content_root);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    Ok(tokio::spawn(async move {
        let served = axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await;
        match served {
            Ok(()) => info!("Management server stopped"),
            Err(e) => error!(error = %e, "Management server error"),
        }
    }))
}

fn create_app(state: AppState, content_root: Option<String>) -> Router {
    let router = create_api_routes(state);
    match content_root {
        Some(root) => router.fallback_service(ServeDir::new(root)),
        None => router,
    }
}
