use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{error, info, instrument};

use crate::{auth::AuthUser, state::AppState, users::repo::User};

use super::dto::{CreateAccountRequest, WhitelistRequest, WhitelistResponse};
use super::services::{starting_balance, CREATE_ACCOUNT_MEMO};

pub fn wallet_routes() -> Router<AppState> {
    Router::new()
        .route("/create_account", post(create_account))
        .route("/whitelist", post(whitelist))
}

/// Bind a wallet address to the caller. The on-chain account is created and
/// funded by the ledger service; a device seen for the first time gets the
/// configured starting grant. Ledger call and row update are not reconciled
/// on partial failure.
#[instrument(skip(state, body))]
pub async fn create_account(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<CreateAccountRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let prior = User::find_by_device(&state.db, &body.device_id)
        .await
        .map_err(failure)?;
    let device_seen = prior.is_some();

    let fee = state.ledger.minimum_fee().await.map_err(failure)?;
    let balance = starting_balance(device_seen, state.config.ledger.starting_grant);

    let tx_hash = state
        .ledger
        .create_account(&body.public_address, balance, fee, CREATE_ACCOUNT_MEMO)
        .await
        .map_err(failure)?;

    User::bind_address(&state.db, &user.uid, &body.public_address, &body.device_id)
        .await
        .map_err(failure)?;

    info!(uid = %user.uid, %tx_hash, device_seen, "wallet address bound");
    if device_seen {
        Ok(StatusCode::OK)
    } else {
        Ok(StatusCode::CREATED)
    }
}

#[instrument(skip(state, body))]
pub async fn whitelist(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Json(body): Json<WhitelistRequest>,
) -> Result<Json<WhitelistResponse>, (StatusCode, String)> {
    let tx = state
        .ledger
        .whitelist(&body.envelope, &body.network_id)
        .await
        .map_err(failure)?;
    Ok(Json(WhitelistResponse { tx }))
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
    fn whitelist_response_shape() {
        let json = serde_json::to_string(&WhitelistResponse { tx: "AAAA".into() }).unwrap();
        assert_eq!(json, r#"{"tx":"AAAA"}"#);
    }
}
