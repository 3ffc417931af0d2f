use std::time::Duration;

use anyhow::Context;
use axum::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::config::LedgerConfig;

/// Client for the external ledger service that owns account creation and
/// transaction whitelisting. This side only marshals parameters.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Current network minimum fee, in the smallest token unit.
    async fn minimum_fee(&self) -> anyhow::Result<u64>;

    /// Create and fund an on-chain account; returns the transaction hash.
    async fn create_account(
        &self,
        public_address: &str,
        starting_balance: i64,
        fee: u64,
        memo: &str,
    ) -> anyhow::Result<String>;

    /// Co-sign a client-submitted envelope; returns the whitelisted envelope.
    async fn whitelist(&self, envelope: &str, network_id: &str) -> anyhow::Result<String>;
}

#[derive(Clone)]
pub struct HttpLedger {
    base_url: String,
    app_id: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct MinimumFeeResponse {
    fee: u64,
}

#[derive(Debug, Deserialize)]
struct CreateAccountResponse {
    tx_hash: String,
}

#[derive(Debug, Deserialize)]
struct WhitelistResponse {
    tx: String,
}

impl HttpLedger {
    pub fn new(config: &LedgerConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("build ledger HTTP client")?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_id: config.app_id.clone(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl LedgerClient for HttpLedger {
    async fn minimum_fee(&self) -> anyhow::Result<u64> {
        let response = self
            .http
            .get(self.url("/v1/fees/minimum"))
            .send()
            .await
            .context("ledger minimum-fee request")?;
        if !response.status().is_success() {
            anyhow::bail!("ledger minimum-fee returned HTTP {}", response.status());
        }
        let body: MinimumFeeResponse =
            response.json().await.context("ledger minimum-fee response")?;
        Ok(body.fee)
    }

    async fn create_account(
        &self,
        public_address: &str,
        starting_balance: i64,
        fee: u64,
        memo: &str,
    ) -> anyhow::Result<String> {
        let payload = json!({
            "public_address": public_address,
            "starting_balance": starting_balance,
            "fee": fee,
            "memo": memo,
            "app_id": self.app_id,
        });
        let response = self
            .http
            .post(self.url("/v1/accounts"))
            .json(&payload)
            .send()
            .await
            .context("ledger create-account request")?;
        if !response.status().is_success() {
            anyhow::bail!("ledger create-account returned HTTP {}", response.status());
        }
        let body: CreateAccountResponse = response
            .json()
            .await
            .context("ledger create-account response")?;
        info!(tx_hash = %body.tx_hash, "ledger account created");
        Ok(body.tx_hash)
    }

    async fn whitelist(&self, envelope: &str, network_id: &str) -> anyhow::Result<String> {
        let payload = json!({
            "envelope": envelope,
            "network_id": network_id,
            "app_id": self.app_id,
        });
        let response = self
            .http
            .post(self.url("/v1/whitelist"))
            .json(&payload)
            .send()
            .await
            .context("ledger whitelist request")?;
        if !response.status().is_success() {
            anyhow::bail!("ledger whitelist returned HTTP {}", response.status());
        }
        let body: WhitelistResponse =
            response.json().await.context("ledger whitelist response")?;
        Ok(body.tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;

    fn config(base_url: &str) -> LedgerConfig {
        LedgerConfig {
            base_url: base_url.into(),
            app_id: "tokenpay".into(),
            starting_grant: 10,
        }
    }

    #[test]
    fn trailing_slash_in_base_url_is_normalized() {
        let ledger = HttpLedger::new(&config("https://ledger.example.com/")).unwrap();
        assert_eq!(
            ledger.url("/v1/whitelist"),
            "https://ledger.example.com/v1/whitelist"
        );
    }

    #[test]
    fn response_bodies_deserialize() {
        let fee: MinimumFeeResponse = serde_json::from_str(r#"{"fee": 100}"#).unwrap();
        assert_eq!(fee.fee, 100);

        let created: CreateAccountResponse =
            serde_json::from_str(r#"{"tx_hash": "deadbeef"}"#).unwrap();
        assert_eq!(created.tx_hash, "deadbeef");

        let whitelisted: WhitelistResponse = serde_json::from_str(r#"{"tx": "AAAA"}"#).unwrap();
        assert_eq!(whitelisted.tx, "AAAA");
    }
}
