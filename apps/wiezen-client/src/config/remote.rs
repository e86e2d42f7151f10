use std::time::Duration;

use reqwest::Url;

use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5005";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the rules engine lives and which game session to follow.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteConfig {
    pub base_url: Url,
    pub game_id: i64,
    pub request_timeout: Duration,
}

impl RemoteConfig {
    pub fn new(base_url: &str, game_id: i64) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::config(format!("Invalid base URL '{base_url}': {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::config(format!(
                "Base URL must be http or https, got '{}'",
                base_url.scheme()
            )));
        }

        Ok(Self {
            base_url,
            game_id,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Upper bound for each engine request, connect to last body byte.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Absolute URL of a game-scoped API path such as `state` or `ai/bid/3`.
    pub fn game_endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(&format!("/api/game/{}/{}", self.game_id, path))
            .map_err(|e| ClientError::config(format!("Cannot build endpoint '{path}': {e}")))
    }
}
