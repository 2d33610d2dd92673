//! docchat server entry point.
//!
//! Loads configuration, initializes logging, connects to PostgreSQL and
//! serves the HTTP API until Ctrl-C or SIGTERM.

use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use docchat::adapters::chatpdf::ChatPdfClient;
use docchat::adapters::http::{app_router, AppState, AuthAppState, ConversationAppState, HttpSettings};
use docchat::adapters::postgres::PostgresConversationStore;
use docchat::application::PreviewRegistry;
use docchat::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    info!(
        environment = ?config.server.environment,
        vendor = %config.vendor.base_url,
        "Starting docchat"
    );

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations applied");
    }

    let source = ChatPdfClient::new(config.vendor.client_config())?;
    let state = AppState {
        conversations: ConversationAppState::new(
            Arc::new(PostgresConversationStore::new(pool)),
            Arc::new(source),
            Arc::new(PreviewRegistry::new()),
        ),
        auth: AuthAppState::new(Arc::new(config.auth.provider_client()?)),
        session_validator: Arc::new(config.auth.session_validator()),
    };

    let app = app_router(state, &HttpSettings::from(&config.server));
    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

/// JSON logs in production, human-readable elsewhere. `RUST_LOG` overrides
/// the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
