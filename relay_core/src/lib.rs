//! Core library for the safari inquiry relay: configuration, the mail relay
//! endpoint, email composition and transports, and the form collector that
//! submits to it.

pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod mail;
pub mod middleware;
pub mod models;

pub use config::{AppConfig, MailConfig, MailboxConfig};
pub use error::{AppError, Result};
pub use forms::{FormCollector, FormConfig, FormField, FormStatus, HttpRelayClient};
pub use handlers::create_routes;
pub use mail::{
    compose, transport_from_config, LogTransport, MailError, MailTransport, MemoryTransport,
    OutgoingEmail, SharedTransport, SmtpTransport,
};
pub use middleware::cors::cors_layer_from_config;
pub use models::{Inquiry, RelayResponse, ValidatedInquiry};

use axum::Router;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub relay_path: String,
    pub mailboxes: MailboxConfig,
    pub mailer: SharedTransport,
}

impl AppState {
    pub fn new(mailer: SharedTransport, config: &AppConfig) -> Self {
        Self {
            app_name: "Safari Inquiry Relay".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            relay_path: config.server.relay_path.clone(),
            mailboxes: config.mail.mailboxes(),
            mailer,
        }
    }

    pub fn with_transport<T: MailTransport + 'static>(transport: T, config: &AppConfig) -> Self {
        Self::new(Arc::new(transport), config)
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new().merge(create_routes(&state.relay_path));

    router = router.layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_seconds,
    )));

    router = router.layer(middleware::cors::cors_layer_from_config(&config.cors));

    if config.logging.request_tracing {
        router = middleware::logging::with_request_tracing(router);
    }

    router.with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
