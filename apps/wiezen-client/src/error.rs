use thiserror::Error;

/// Every failure the synchronization core can observe.
///
/// None of these are fatal: transport and decode failures abort the current
/// cycle and the next poll retries naturally, `Rejected` carries an
/// application-level refusal from the rules engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Transport error: {detail}")]
    Transport { detail: String },
    #[error("Decode error: {detail}")]
    Decode { detail: String },
    #[error("Rejected by rules engine: {message}")]
    Rejected { message: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Session closed")]
    Closed,
    #[error("Task aborted before reporting: {detail}")]
    Aborted { detail: String },
}

impl ClientError {
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    pub fn decode(detail: impl Into<String>) -> Self {
        Self::Decode {
            detail: detail.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn aborted(detail: impl Into<String>) -> Self {
        Self::Aborted {
            detail: detail.into(),
        }
    }

    /// True for failures where the request never produced a usable answer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Transport { .. } | ClientError::Decode { .. } | ClientError::Aborted { .. }
        )
    }

    /// The refusal message when the rules engine rejected the request.
    pub fn rejection(&self) -> Option<&str> {
        match self {
            ClientError::Rejected { message } => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::decode(err.to_string())
        } else {
            ClientError::transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::decode(err.to_string())
    }
}
