//! Seam to the remote rules engine.
//!
//! The engine is the single source of truth. Everything here is request /
//! response plumbing; no reply is interpreted beyond what the session needs
//! (the trick-completion flag and the resolved winning bid).

mod http;
mod reply;

use async_trait::async_trait;

pub use http::HttpRemote;
pub use reply::{ActionReply, AutomatedBidReply, AutomatedPlayReply, Envelope};

use crate::domain::{Bid, CardId, GameSnapshot, PlayerId, Suit};
use crate::error::ClientError;

/// Operations the rules engine exposes to this client.
///
/// Implementations turn an `{"error": ...}` answer into
/// `ClientError::Rejected` so callers can tell refusals from transport
/// failures.
#[async_trait]
pub trait RemoteGame: Send + Sync + 'static {
    /// `GET state`
    async fn state(&self) -> Result<GameSnapshot, ClientError>;

    /// `GET legal-moves(player)`
    async fn legal_moves(&self, player: PlayerId) -> Result<Vec<CardId>, ClientError>;

    /// `POST bid(player, bid)`
    async fn bid(&self, player: PlayerId, bid: &Bid) -> Result<ActionReply, ClientError>;

    /// `POST trump(player, suit)`
    async fn choose_trump(&self, player: PlayerId, suit: Suit) -> Result<ActionReply, ClientError>;

    /// `POST play(player, card)`
    async fn play(&self, player: PlayerId, card: &CardId) -> Result<ActionReply, ClientError>;

    /// `GET ai/bid(player)`
    async fn automated_bid(&self, player: PlayerId) -> Result<AutomatedBidReply, ClientError>;

    /// `GET ai/play(player)`
    async fn automated_play(&self, player: PlayerId) -> Result<AutomatedPlayReply, ClientError>;

    /// `POST new-round`
    async fn new_round(&self) -> Result<(), ClientError>;
}
