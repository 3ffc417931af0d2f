use std::time::Duration;

use anyhow::Context;
use axum::async_trait;
use serde_json::{json, Value};

use crate::config::PushConfig;

/// Data payload delivered with a push message. Every value ends up as a
/// string, as the delivery service requires for data messages.
#[derive(Debug, Clone)]
pub struct PushData {
    pub title: String,
    pub body: String,
    pub kind: String,
    pub username: String,
    pub message: String,
    pub amount: String,
    pub uid: String,
}

/// Delivers push messages to a single device token.
#[async_trait]
pub trait PushClient: Send + Sync {
    async fn send_data_message(&self, device_token: &str, data: PushData) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct FcmClient {
    endpoint: String,
    server_key: String,
    http: reqwest::Client,
}

impl FcmClient {
    pub fn new(config: &PushConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("build push HTTP client")?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            server_key: config.server_key.clone(),
            http,
        })
    }
}

fn data_payload(device_token: &str, data: &PushData) -> Value {
    json!({
        "to": device_token,
        "data": {
            "title": data.title,
            "body": data.body,
            "type": data.kind,
            "username": data.username,
            "message": data.message,
            "amount": data.amount,
            "uid": data.uid,
        },
    })
}

#[async_trait]
impl PushClient for FcmClient {
    async fn send_data_message(&self, device_token: &str, data: PushData) -> anyhow::Result<()> {
        let payload = data_payload(device_token, &data);
        let response = self
            .http
            .post(&self.endpoint)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("key={}", self.server_key),
            )
            .json(&payload)
            .send()
            .await
            .context("push delivery request")?;
        if !response.status().is_success() {
            anyhow::bail!("push delivery returned HTTP {}", response.status());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PushData {
        PushData {
            title: "New Payment".into(),
            body: "@alice paid you 50 tokens - thanks".into(),
            kind: "pay".into(),
            username: "alice".into(),
            message: "thanks".into(),
            amount: "50".into(),
            uid: "uid-bob".into(),
        }
    }

    #[test]
    fn payload_targets_the_device_token() {
        let payload = data_payload("device-token-1", &sample());
        assert_eq!(payload["to"], "device-token-1");
    }

    #[test]
    fn payload_carries_all_data_fields_as_strings() {
        let payload = data_payload("t", &sample());
        let data = payload["data"].as_object().unwrap();
        for key in ["title", "body", "type", "username", "message", "amount", "uid"] {
            assert!(data[key].is_string(), "{key} must be a string");
        }
        assert_eq!(data["type"], "pay");
        assert_eq!(data["uid"], "uid-bob");
    }
}
