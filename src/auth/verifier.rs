use axum::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use tracing::debug;

use super::claims::IdTokenClaims;
use super::error::AuthError;
use super::keys::KeyStore;

/// Clock skew tolerance when validating token timestamps.
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Identity resolved from a verified bearer token.
#[derive(Debug, Clone)]
pub struct VerifiedUser {
    pub uid: String,
    pub email: Option<String>,
}

/// Resolves a bearer token to a stable user identity.
///
/// Behind a trait so handlers and tests can swap in a fake.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedUser, AuthError>;
}

/// Verifies RS256 ID tokens against the provider's published keys.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: KeyStore,
    project_id: String,
}

impl TokenVerifier {
    pub fn new(keys: KeyStore, project_id: &str) -> Self {
        Self {
            keys,
            project_id: project_id.to_string(),
        }
    }
}

/// Validation pinned to the configured project: RS256 only, audience is the
/// project ID, issuer is the provider's secure-token URL for that project.
pub(crate) fn build_validation(project_id: &str) -> Validation {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[project_id]);
    validation.set_issuer(&[format!("https://securetoken.google.com/{project_id}")]);
    validation.leeway = CLOCK_SKEW_LEEWAY;
    validation
}

#[async_trait]
impl IdentityVerifier for TokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedUser, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::InvalidToken)?;
        let kid = header.kid.ok_or(AuthError::InvalidToken)?;
        let key = self.keys.decoding_key(&kid).await?;

        let validation = build_validation(&self.project_id);
        let data =
            decode::<IdTokenClaims>(token, &key, &validation).map_err(|_| AuthError::InvalidToken)?;

        debug!(uid = %data.claims.sub, "id token verified");
        Ok(VerifiedUser {
            uid: data.claims.sub,
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[test]
    fn validation_pins_issuer_and_audience() {
        let validation = build_validation("demo-project");
        let aud = validation.aud.expect("audience set");
        assert!(aud.contains("demo-project"));
        let iss = validation.iss.expect("issuer set");
        assert!(iss.contains("https://securetoken.google.com/demo-project"));
        assert_eq!(validation.leeway, CLOCK_SKEW_LEEWAY);
    }

    #[test]
    fn token_header_carries_kid() {
        #[derive(Serialize)]
        struct Dummy {
            exp: usize,
        }
        let mut header = Header::default();
        header.kid = Some("key-a".into());
        let token = encode(
            &header,
            &Dummy { exp: 2_000_000_000 },
            &EncodingKey::from_secret(b"test"),
        )
        .expect("encode");
        let decoded = decode_header(&token).expect("decode header");
        assert_eq!(decoded.kid.as_deref(), Some("key-a"));
    }

    #[tokio::test]
    async fn rejects_malformed_token_before_any_fetch() {
        let keys = KeyStore::new("https://fake.local/jwks").expect("key store");
        let verifier = TokenVerifier::new(keys, "demo-project");
        let err = verifier.verify("not-a-jwt").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn rejects_token_without_kid() {
        let keys = KeyStore::new("https://fake.local/jwks").expect("key store");
        let verifier = TokenVerifier::new(keys, "demo-project");

        #[derive(Serialize)]
        struct Dummy {
            exp: usize,
        }
        let token = encode(
            &Header::default(),
            &Dummy { exp: 2_000_000_000 },
            &EncodingKey::from_secret(b"test"),
        )
        .expect("encode");

        let err = verifier.verify(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
