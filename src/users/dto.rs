use serde::{Deserialize, Serialize};

/// Response for both username lookups. `username` is null when the caller
/// has not registered yet.
#[derive(Debug, Serialize)]
pub struct UsernameResponse {
    pub username: Option<String>,
}

/// Request body for the public-address lookup.
#[derive(Debug, Deserialize)]
pub struct PublicAddressRequest {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct PublicAddressResponse {
    pub public_address: Option<String>,
}

/// Request body for the device-token refresh.
#[derive(Debug, Deserialize)]
pub struct UpdateFcmTokenRequest {
    pub fcm_token: String,
}

/// Request body for registration. Email comes from the identity token, not
/// from the client.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
}
