use std::str::FromStr;

/// The two notification kinds the app sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Pay,
    Request,
}

impl FromStr for NotificationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pay" => Ok(NotificationKind::Pay),
            "request" => Ok(NotificationKind::Request),
            other => anyhow::bail!("unknown notification type: {other}"),
        }
    }
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Pay => "pay",
            NotificationKind::Request => "request",
        }
    }
}

/// Title and body shown on the recipient's device.
pub fn format_notification(
    kind: NotificationKind,
    sender: &str,
    amount: &str,
    message: &str,
) -> (String, String) {
    match kind {
        NotificationKind::Pay => (
            "New Payment".to_string(),
            format!("@{sender} paid you {amount} tokens - {message}"),
        ),
        NotificationKind::Request => (
            "New Request".to_string(),
            format!("@{sender} has requested {amount} tokens - {message}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_both_kinds() {
        assert_eq!("pay".parse::<NotificationKind>().unwrap(), NotificationKind::Pay);
        assert_eq!(
            "request".parse::<NotificationKind>().unwrap(),
            NotificationKind::Request
        );
    }

    #[test]
    fn rejects_anything_else() {
        assert!("payment".parse::<NotificationKind>().is_err());
        assert!("PAY".parse::<NotificationKind>().is_err());
        assert!("".parse::<NotificationKind>().is_err());
        assert!("refund".parse::<NotificationKind>().is_err());
    }

    #[test]
    fn payment_text() {
        let (title, body) = format_notification(NotificationKind::Pay, "alice", "50", "lunch");
        assert_eq!(title, "New Payment");
        assert_eq!(body, "@alice paid you 50 tokens - lunch");
    }

    #[test]
    fn request_text() {
        let (title, body) = format_notification(NotificationKind::Request, "bob", "12", "split");
        assert_eq!(title, "New Request");
        assert_eq!(body, "@bob has requested 12 tokens - split");
    }
}
