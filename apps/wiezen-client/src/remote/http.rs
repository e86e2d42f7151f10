use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::reply::{ActionReply, AutomatedBidReply, AutomatedPlayReply, Envelope, LegalMovesReply};
use super::RemoteGame;
use crate::config::RemoteConfig;
use crate::domain::{Bid, CardId, GameSnapshot, PlayerId, Suit};
use crate::error::ClientError;

/// `RemoteGame` over the engine's JSON HTTP API.
#[derive(Clone, Debug)]
pub struct HttpRemote {
    client: Client,
    config: RemoteConfig,
}

impl HttpRemote {
    pub fn new(config: RemoteConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::config(format!("Cannot build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.config.game_endpoint(path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");
        let response = self.client.post(url).json(&body).send().await?;
        decode(response).await
    }
}

/// Decode the engine's envelope. Refusals come back with a success status,
/// so the body is inspected before the status code.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;

    let envelope = serde_json::from_slice::<Envelope<T>>(&body);
    if !status.is_success() && !matches!(envelope, Ok(Envelope::Rejected { .. })) {
        return Err(ClientError::transport(format!("HTTP {status}")));
    }
    envelope?.into_result()
}

#[async_trait]
impl RemoteGame for HttpRemote {
    async fn state(&self) -> Result<GameSnapshot, ClientError> {
        self.get("state").await
    }

    async fn legal_moves(&self, player: PlayerId) -> Result<Vec<CardId>, ClientError> {
        let reply: LegalMovesReply = self.get(&format!("valid-cards/{player}")).await?;
        Ok(reply.valid_cards)
    }

    async fn bid(&self, player: PlayerId, bid: &Bid) -> Result<ActionReply, ClientError> {
        self.post("bid", json!({ "player_id": player, "bid": bid }))
            .await
    }

    async fn choose_trump(&self, player: PlayerId, suit: Suit) -> Result<ActionReply, ClientError> {
        self.post("trump", json!({ "player_id": player, "suit": suit.name() }))
            .await
    }

    async fn play(&self, player: PlayerId, card: &CardId) -> Result<ActionReply, ClientError> {
        self.post("play", json!({ "player_id": player, "card_name": card }))
            .await
    }

    async fn automated_bid(&self, player: PlayerId) -> Result<AutomatedBidReply, ClientError> {
        let reply: AutomatedBidReply = self.get(&format!("ai/bid/{player}")).await?;
        reply.checked()
    }

    async fn automated_play(&self, player: PlayerId) -> Result<AutomatedPlayReply, ClientError> {
        let reply: AutomatedPlayReply = self.get(&format!("ai/play/{player}")).await?;
        reply.checked()
    }

    async fn new_round(&self) -> Result<(), ClientError> {
        let _round: serde_json::Value = self.post("new-round", json!({})).await?;
        Ok(())
    }
}
