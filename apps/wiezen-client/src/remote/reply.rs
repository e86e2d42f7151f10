use serde::{Deserialize, Serialize};

use crate::domain::{Bid, CardId, PlayerId};
use crate::error::ClientError;

/// Engine answers are either a payload or an `{"error": "..."}` object,
/// both with a success status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Rejected { error: String },
    Accepted(T),
}

impl<T> Envelope<T> {
    pub fn into_result(self) -> Result<T, ClientError> {
        match self {
            Envelope::Rejected { error } => Err(ClientError::rejected(error)),
            Envelope::Accepted(value) => Ok(value),
        }
    }
}

/// Result of a bid, trump choice or card play.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub trick_complete: bool,
    #[serde(default)]
    pub round_complete: bool,
    /// Winning bid, present when this action closed the auction.
    #[serde(default)]
    pub bid: Option<Bid>,
    #[serde(default)]
    pub bidder_id: Option<PlayerId>,
    #[serde(default)]
    pub trump_suit: Option<String>,
}

impl ActionReply {
    /// The auction ended on a contract whose bidder must now pick trump.
    pub fn requires_trump_choice(&self) -> bool {
        self.bid.as_ref().is_some_and(Bid::requires_trump_choice)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AutomatedBidReply {
    #[serde(default)]
    pub bid: Option<Bid>,
    #[serde(default)]
    pub result: Option<Envelope<ActionReply>>,
}

impl AutomatedBidReply {
    /// Surface a refusal nested inside `result` as an error.
    pub fn checked(self) -> Result<Self, ClientError> {
        if let Some(Envelope::Rejected { error }) = &self.result {
            return Err(ClientError::rejected(error.clone()));
        }
        Ok(self)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AutomatedPlayReply {
    #[serde(default)]
    pub card_name: Option<CardId>,
    #[serde(default)]
    pub result: Option<Envelope<ActionReply>>,
}

impl AutomatedPlayReply {
    pub fn checked(self) -> Result<Self, ClientError> {
        if let Some(Envelope::Rejected { error }) = &self.result {
            return Err(ClientError::rejected(error.clone()));
        }
        Ok(self)
    }

    pub fn trick_complete(&self) -> bool {
        matches!(&self.result, Some(Envelope::Accepted(r)) if r.trick_complete)
    }
}

/// Body of `GET valid-cards/{player}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct LegalMovesReply {
    #[serde(default)]
    pub valid_cards: Vec<CardId>,
}
