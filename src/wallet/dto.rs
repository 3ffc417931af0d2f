use serde::{Deserialize, Serialize};

/// Request body for binding a wallet address to the caller.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub device_id: String,
    pub public_address: String,
}

/// Request body for transaction whitelisting. Both fields are opaque here
/// and forwarded to the ledger service unchanged.
#[derive(Debug, Deserialize)]
pub struct WhitelistRequest {
    pub envelope: String,
    pub network_id: String,
}

#[derive(Debug, Serialize)]
pub struct WhitelistResponse {
    pub tx: String,
}
