use serde::Deserialize;

/// Claims carried by the identity provider's ID token.
#[derive(Debug, Clone, Deserialize)]
pub struct IdTokenClaims {
    pub sub: String, // stable user ID at the provider
    #[allow(dead_code)]
    pub aud: String, // project ID (validated by the jsonwebtoken crate)
    #[allow(dead_code)]
    pub iss: String, // https://securetoken.google.com/<project ID>
    #[allow(dead_code)]
    pub exp: usize, // expires at (unix timestamp)
    #[allow(dead_code)]
    pub iat: usize, // issued at (unix timestamp)
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub email_verified: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_provider_token_payload() {
        let payload = serde_json::json!({
            "sub": "abc123",
            "aud": "demo-project",
            "iss": "https://securetoken.google.com/demo-project",
            "exp": 1_800_000_000usize,
            "iat": 1_799_996_400usize,
            "email": "user@example.com",
            "email_verified": true,
            "auth_time": 1_799_996_400usize
        });
        let claims: IdTokenClaims = serde_json::from_value(payload).unwrap();
        assert_eq!(claims.sub, "abc123");
        assert_eq!(claims.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn email_is_optional() {
        let payload = serde_json::json!({
            "sub": "abc123",
            "aud": "demo-project",
            "iss": "https://securetoken.google.com/demo-project",
            "exp": 1_800_000_000usize,
            "iat": 1_799_996_400usize
        });
        let claims: IdTokenClaims = serde_json::from_value(payload).unwrap();
        assert!(claims.email.is_none());
    }
}
