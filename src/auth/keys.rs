use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use super::error::AuthError;

/// How long a fetched key set stays valid before a re-fetch.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// One RSA public key from the provider's published set.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Jwk {
    pub kid: String,
    pub n: String,
    pub e: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JwkSet {
    pub keys: Vec<Jwk>,
}

struct CacheEntry {
    jwks: JwkSet,
    fetched_at: Instant,
}

/// Fetches and caches the identity provider's token-signing keys.
#[derive(Clone)]
pub struct KeyStore {
    jwks_url: String,
    cache: Arc<RwLock<Option<CacheEntry>>>,
    http: reqwest::Client,
}

impl KeyStore {
    pub fn new(jwks_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("build key store HTTP client")?;
        Ok(Self {
            jwks_url: jwks_url.to_string(),
            cache: Arc::new(RwLock::new(None)),
            http,
        })
    }

    /// Decoding key for the given key ID, from cache or a fresh fetch.
    pub async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        let jwks = self.jwks().await?;
        let jwk = jwks
            .keys
            .iter()
            .find(|k| k.kid == kid)
            .ok_or(AuthError::NoMatchingKey)?;
        to_decoding_key(jwk)
    }

    async fn jwks(&self) -> Result<JwkSet, AuthError> {
        {
            let cache = self.cache.read().await;
            if let Some(entry) = &*cache {
                if entry.fetched_at.elapsed() < CACHE_TTL {
                    return Ok(entry.jwks.clone());
                }
            }
        }

        let jwks = self.fetch().await?;
        debug!(keys = jwks.keys.len(), "key set refreshed");

        {
            let mut cache = self.cache.write().await;
            *cache = Some(CacheEntry {
                jwks: jwks.clone(),
                fetched_at: Instant::now(),
            });
        }

        Ok(jwks)
    }

    async fn fetch(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::KeyFetch(format!(
                "HTTP {} from key endpoint",
                response.status()
            )));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::KeyFetch(e.to_string()))
    }
}

fn to_decoding_key(jwk: &Jwk) -> Result<DecodingKey, AuthError> {
    DecodingKey::from_rsa_components(&jwk.n, &jwk.e).map_err(|_| AuthError::NoMatchingKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_key_document() {
        let doc = r#"{
            "keys": [
                {"kty": "RSA", "alg": "RS256", "use": "sig", "kid": "key-a", "n": "respectable-modulus", "e": "AQAB"},
                {"kty": "RSA", "alg": "RS256", "use": "sig", "kid": "key-b", "n": "another-modulus", "e": "AQAB"}
            ]
        }"#;
        let jwks: JwkSet = serde_json::from_str(doc).unwrap();
        assert_eq!(jwks.keys.len(), 2);
        assert!(jwks.keys.iter().any(|k| k.kid == "key-b"));
    }

    #[test]
    fn builds_decoding_key_from_components() {
        let jwk = Jwk {
            kid: "key-a".into(),
            // base64url, no padding; content is irrelevant for key construction
            n: "xjNuUzZYlWTkMC6RVhGrDIQar2lJX7HHOSbZQUTzWw0".into(),
            e: "AQAB".into(),
        };
        assert!(to_decoding_key(&jwk).is_ok());
    }

    #[test]
    fn store_construction_does_not_touch_network() {
        assert!(KeyStore::new("https://fake.local/jwks").is_ok());
    }
}
