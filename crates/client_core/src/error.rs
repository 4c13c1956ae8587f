use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing, invalid or expired credential. Always ends the session.
    #[error("not authenticated: {0}")]
    Auth(String),
    /// The server (or the form coercion) rejected the submitted fields.
    #[error("{0}")]
    Validation(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("token storage failure: {0}")]
    Storage(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Text shown inside the console. Transport and storage details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(_) => "Session expired; please sign in again.".to_string(),
            Self::Validation(message) => message.clone(),
            Self::Transport(_) => "Request failed; check the connection and retry.".to_string(),
            Self::Storage(_) => "Could not access the saved session.".to_string(),
            Self::Config(message) => format!("Invalid configuration: {message}"),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(value: std::io::Error) -> Self {
        Self::Storage(value.to_string())
    }
}
