use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{auth::AuthUser, state::AppState};

use super::dto::{
    PublicAddressRequest, PublicAddressResponse, RegisterRequest, UpdateFcmTokenRequest,
    UsernameResponse,
};
use super::repo::User;
use super::services::{is_valid_username, normalize_username, pick_random_peer};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/get_username", post(get_username))
        .route("/random_username", post(random_username))
        .route("/public_address", post(public_address))
        .route("/update_fcm_token", post(update_fcm_token))
        .route("/register", post(register))
}

#[instrument(skip(state))]
pub async fn get_username(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<UsernameResponse>, (StatusCode, String)> {
    let username = User::username_of(&state.db, &user.uid)
        .await
        .map_err(failure)?;
    Ok(Json(UsernameResponse { username }))
}

#[instrument(skip(state))]
pub async fn random_username(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<UsernameResponse>, (StatusCode, String)> {
    let usernames = User::all_usernames(&state.db).await.map_err(failure)?;
    match pick_random_peer(&usernames) {
        Some(username) => Ok(Json(UsernameResponse {
            username: Some(username),
        })),
        None => {
            warn!(uid = %user.uid, "no eligible peer to pick");
            Err(failure(anyhow::anyhow!("no eligible peer")))
        }
    }
}

#[instrument(skip(state, body))]
pub async fn public_address(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Json(body): Json<PublicAddressRequest>,
) -> Result<Json<PublicAddressResponse>, (StatusCode, String)> {
    let username = normalize_username(&body.username);
    let target = User::find_by_username(&state.db, &username)
        .await
        .map_err(failure)?
        .ok_or_else(|| failure(anyhow::anyhow!("unknown username")))?;
    Ok(Json(PublicAddressResponse {
        public_address: target.public_address,
    }))
}

#[instrument(skip(state, body))]
pub async fn update_fcm_token(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<UpdateFcmTokenRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    User::set_fcm_token(&state.db, &user.uid, &body.fcm_token)
        .await
        .map_err(failure)?;
    Ok(StatusCode::OK)
}

#[instrument(skip(state, body))]
pub async fn register(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<RegisterRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let username = normalize_username(&body.username);
    if !is_valid_username(&username) {
        warn!(uid = %user.uid, %username, "rejected username");
        return Err(failure(anyhow::anyhow!("invalid username")));
    }

    // The identity provider is the source of truth for the email.
    let email = user
        .email
        .clone()
        .ok_or_else(|| failure(anyhow::anyhow!("identity token carries no email")))?;

    let created = User::create(&state.db, &user.uid, &username, &email)
        .await
        .map_err(failure)?;
    info!(uid = %created.uid, username = %created.username, "user registered");
    Ok(StatusCode::OK)
}

/// Collapse any failure into the opaque 500 the API exposes; detail goes to
/// the log only.
fn failure(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_is_opaque() {
        let (status, body) = failure(anyhow::anyhow!("duplicate key value"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "internal error");
    }

    #[test]
    fn username_response_serializes_null_when_absent() {
        let json = serde_json::to_string(&UsernameResponse { username: None }).unwrap();
        assert_eq!(json, r#"{"username":null}"#);

        let json =
            serde_json::to_string(&UsernameResponse { username: Some("alice".into()) }).unwrap();
        assert_eq!(json, r#"{"username":"alice"}"#);
    }

    #[test]
    fn public_address_response_shape() {
        let json = serde_json::to_string(&PublicAddressResponse {
            public_address: Some("GB43PIR5AKNV".into()),
        })
        .unwrap();
        assert!(json.contains("public_address"));
        assert!(json.contains("GB43PIR5AKNV"));
    }
}
