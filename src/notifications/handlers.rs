use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{error, info, instrument};

use crate::{
    auth::AuthUser,
    state::AppState,
    users::{repo::User, services::normalize_username},
};

use super::dto::NotifyRequest;
use super::fcm::PushData;
use super::services::{format_notification, NotificationKind};

pub fn notification_routes() -> Router<AppState> {
    Router::new().route("/notify", post(notify))
}

/// Push a payment or request notification to the recipient's device. The
/// sender is the caller; the recipient is addressed by username.
#[instrument(skip(state, body))]
pub async fn notify(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<NotifyRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let kind: NotificationKind = body.kind.parse().map_err(failure)?;

    let sender = User::find_by_uid(&state.db, &user.uid)
        .await
        .map_err(failure)?
        .ok_or_else(|| failure(anyhow::anyhow!("sender not registered")))?;

    let username = normalize_username(&body.username);
    let recipient = User::find_by_username(&state.db, &username)
        .await
        .map_err(failure)?
        .ok_or_else(|| failure(anyhow::anyhow!("unknown recipient")))?;
    let device_token = recipient
        .fcm_token
        .ok_or_else(|| failure(anyhow::anyhow!("recipient has no device token")))?;

    let (title, text) = format_notification(kind, &sender.username, &body.amount, &body.message);
    let data = PushData {
        title,
        body: text,
        kind: kind.as_str().to_string(),
        username: sender.username.clone(),
        message: body.message.clone(),
        amount: body.amount.clone(),
        uid: recipient.uid.clone(),
    };

    state
        .push
        .send_data_message(&device_token, data)
        .await
        .map_err(failure)?;

    info!(from = %sender.username, to = %recipient.username, kind = kind.as_str(), "notification dispatched");
    Ok(StatusCode::OK)
}

/// Collapse any failure into the opaque 500 the API exposes; detail goes to
/// the log only.
fn failure(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error".into())
}
