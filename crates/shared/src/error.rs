use std::fmt;

use serde::{Deserialize, Serialize};

/// Message field of a catalog API response: validation failures carry a list,
/// everything else a single string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerMessage {
    One(String),
    Many(Vec<String>),
}

impl ServerMessage {
    /// Flattens the message into one displayable line, list entries joined by `,`.
    pub fn joined(&self) -> String {
        match self {
            Self::One(message) => message.clone(),
            Self::Many(messages) => messages.join(","),
        }
    }
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

/// Common `{success, message}` envelope returned by every catalog endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<ServerMessage>,
}

impl ApiStatus {
    pub fn failed(message: ServerMessage) -> Self {
        Self {
            success: Some(false),
            message: Some(message),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.success == Some(false)
    }

    pub fn message_text(&self) -> Option<String> {
        self.message
            .as_ref()
            .map(ServerMessage::joined)
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_validation_messages_with_commas() {
        let status: ApiStatus = serde_json::from_str(
            r#"{"success":false,"message":["title is required","price must be positive"]}"#,
        )
        .expect("decode");
        assert!(status.is_failure());
        assert_eq!(
            status.message_text().as_deref(),
            Some("title is required,price must be positive")
        );
    }

    #[test]
    fn single_message_is_kept_verbatim() {
        let status: ApiStatus =
            serde_json::from_str(r#"{"success":true,"message":"deleted"}"#).expect("decode");
        assert!(!status.is_failure());
        assert_eq!(status.message_text().as_deref(), Some("deleted"));
    }

    #[test]
    fn empty_body_is_not_a_failure() {
        let status: ApiStatus = serde_json::from_str("{}").expect("decode");
        assert!(!status.is_failure());
        assert_eq!(status.message_text(), None);
    }
}
