use serde::Deserialize;

const DEFAULT_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";
const DEFAULT_FCM_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub project_id: String,
    pub jwks_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    pub base_url: String,
    pub app_id: String,
    pub starting_grant: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushConfig {
    pub endpoint: String,
    pub server_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub identity: IdentityConfig,
    pub ledger: LedgerConfig,
    pub push: PushConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let identity = IdentityConfig {
            project_id: std::env::var("IDENTITY_PROJECT_ID")?,
            jwks_url: std::env::var("IDENTITY_JWKS_URL")
                .unwrap_or_else(|_| DEFAULT_JWKS_URL.into()),
        };
        let ledger = LedgerConfig {
            base_url: std::env::var("LEDGER_BASE_URL")?,
            app_id: std::env::var("LEDGER_APP_ID").unwrap_or_else(|_| "tokenpay".into()),
            starting_grant: std::env::var("STARTING_GRANT")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(10),
        };
        let push = PushConfig {
            endpoint: std::env::var("FCM_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_FCM_ENDPOINT.into()),
            server_key: std::env::var("FCM_SERVER_KEY")?,
        };
        Ok(Self {
            database_url,
            identity,
            ledger,
            push,
        })
    }
}
