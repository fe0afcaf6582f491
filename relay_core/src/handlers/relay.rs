//! The mail relay endpoint: inquiry JSON in, one email out

use crate::{
    error::{AppError, Result},
    mail::compose,
    models::{Inquiry, RelayResponse},
    AppState,
};
use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Method, Request, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{info, warn};
use uuid::Uuid;

pub const SENT_MESSAGE: &str = "Email sent successfully";

const MAX_BODY_BYTES: usize = 256 * 1024;

/// Accepts every method so that non-POST requests get the relay's own 405
/// instead of the router's default.
pub async fn handle_send_email(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<impl IntoResponse> {
    if request.method() != Method::POST {
        warn!("{} {} rejected", request.method(), request.uri().path());
        return Err(AppError::MethodNotAllowed);
    }

    let submission_id = Uuid::new_v4();

    let bytes = to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| AppError::InvalidBody(e.to_string()))?;

    let inquiry: Inquiry =
        serde_json::from_slice(&bytes).map_err(|e| AppError::InvalidBody(e.to_string()))?;

    let inquiry = inquiry.validate_required()?;

    info!(
        %submission_id,
        name = %inquiry.name,
        email = %inquiry.email,
        "Relaying inquiry via {} transport",
        state.mailer.name()
    );

    let email = compose(&inquiry, &state.mailboxes);
    state.mailer.send(&email).await?;

    info!(%submission_id, "Inquiry email sent");

    Ok((StatusCode::OK, Json(RelayResponse::message(SENT_MESSAGE))))
}
