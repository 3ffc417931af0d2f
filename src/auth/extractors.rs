use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::error::AuthError;
use super::verifier::VerifiedUser;
use crate::state::AppState;

/// Requires a verified bearer token; yields the caller's identity.
pub struct AuthUser(pub VerifiedUser);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Read Authorization header
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AuthError::MissingHeader)?;

        // Expect "Bearer <token>"
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or(AuthError::InvalidHeader)?;

        let user = state.identity.verify(token).await?;
        Ok(AuthUser(user))
    }
}
