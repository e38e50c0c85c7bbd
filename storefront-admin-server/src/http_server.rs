// Storefront admin HTTP server
// In-process identity store behind the axum back-office routes

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_admin_server::{router, AppState, ServerConfig, ServerError};
use storefront_identity::{IdentityActor, IdentityStore};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "storefront_admin_server=debug,storefront_identity=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let store: Arc<dyn IdentityStore> = Arc::new(IdentityActor::spawn(config.identity.clone()).await?);
    let app = router(AppState::new(store, &config));

    let addr = config.bind_addr();
    tracing::info!(%addr, admin_role = %config.admin_role, "Storefront admin server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Storefront admin server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
