use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures while resolving a bearer token to an identity.
///
/// Every variant collapses to 401 at the boundary; the caller learns nothing
/// beyond "unauthenticated".
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingHeader,

    #[error("invalid Authorization header")]
    InvalidHeader,

    #[error("key set fetch failed: {0}")]
    KeyFetch(String),

    #[error("no key matches the token")]
    NoMatchingKey,

    #[error("invalid or expired token")]
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "authentication failed");
        (StatusCode::UNAUTHORIZED, "invalid or expired token").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_maps_to_unauthorized() {
        let variants = [
            AuthError::MissingHeader,
            AuthError::InvalidHeader,
            AuthError::KeyFetch("timeout".into()),
            AuthError::NoMatchingKey,
            AuthError::InvalidToken,
        ];
        for e in variants {
            let response = e.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
