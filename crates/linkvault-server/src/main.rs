mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use linkvault_api::auth::{AppState, AppStateInner};
use linkvault_api::routes;
use linkvault_api::wallet::WalletWriter;
use linkvault_crypto::Security;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linkvault=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Init database
    let db = Arc::new(linkvault_db::Database::open(&config.db_path)?);

    // The key only lives inside the writer from here on
    let security = Security::new(&config.key)?;
    let wallets = WalletWriter::new(Arc::clone(&db), security);

    let app_state: AppState = Arc::new(AppStateInner { db, wallets });

    let app = routes::router(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Linkvault server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
