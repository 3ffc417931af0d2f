use serde::Deserialize;

/// Request body for a payment/request notification. `amount` stays a string
/// end to end; it is display text here, not a number this service computes
/// with.
#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    pub username: String,
    pub amount: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_wire_field_name_for_kind() {
        let body: NotifyRequest = serde_json::from_str(
            r#"{"username": "Bob", "amount": "50", "message": "lunch", "type": "pay"}"#,
        )
        .unwrap();
        assert_eq!(body.kind, "pay");
        assert_eq!(body.username, "Bob");
    }
}
