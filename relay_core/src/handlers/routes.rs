//! Route table

use super::{
    health::{handle_health, handle_root},
    relay::handle_send_email,
};
use crate::AppState;
use axum::{
    routing::{any, get},
    Router,
};

pub fn create_routes(relay_path: &str) -> Router<AppState> {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route(relay_path, any(handle_send_email))
}
