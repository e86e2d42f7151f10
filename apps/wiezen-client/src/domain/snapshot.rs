//! Polled game state as the rules engine reports it.
//!
//! A `GameSnapshot` is an immutable value: each poll produces a new one and
//! the previous one is superseded wholesale. Equality is structural over the
//! full shape, which is what the differ relies on.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::bids::{Bid, BidEntry};
use crate::domain::cards::{CardId, Suit};
use crate::domain::roster::{Player, PlayerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Dealing,
    Bidding,
    ChoosingAlleen,
    Playing,
    Completed,
}

impl Phase {
    pub fn is_auction(self) -> bool {
        matches!(self, Phase::Bidding | Phase::ChoosingAlleen)
    }
}

/// One card placed into a trick. Sequence order is play order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardPlay {
    pub player_id: PlayerId,
    #[serde(rename = "card_name")]
    pub card: CardId,
    #[serde(default)]
    pub order: Option<u32>,
}

impl CardPlay {
    pub fn new(player_id: PlayerId, card: impl Into<CardId>) -> Self {
        Self {
            player_id,
            card: card.into(),
            order: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickView {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub trick_number: Option<u32>,
    pub leader_id: Option<PlayerId>,
    #[serde(default)]
    pub winner_id: Option<PlayerId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cards_played: Vec<CardPlay>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHeader {
    pub id: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub current_round: Option<u32>,
    #[serde(default)]
    pub debug_mode: bool,
    #[serde(default)]
    pub deck_order: Option<Vec<CardId>>,
}

/// Round-scoped metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInfo {
    #[serde(default)]
    pub id: Option<i64>,
    pub round_number: u32,
    /// Index of the trick in progress. Never decreases within a round.
    pub current_trick: u32,
    pub phase: Phase,
    pub dealer_position: u8,
    pub trump_suit: Option<String>,
    pub trump_card: Option<CardId>,
    pub winning_bid: Option<Bid>,
    pub bidder_id: Option<PlayerId>,
    pub partner_id: Option<PlayerId>,
    #[serde(default)]
    pub first_player_id: Option<PlayerId>,
    /// Hands keyed by player. Only populated for seats the engine reveals.
    #[serde(default)]
    pub hands: Option<BTreeMap<PlayerId, Vec<CardId>>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bids: Vec<BidEntry>,
}

impl RoundInfo {
    pub fn trump(&self) -> Option<Suit> {
        self.trump_suit.as_deref().and_then(Suit::from_name)
    }

    pub fn hand(&self, player: PlayerId) -> &[CardId] {
        self.hands
            .as_ref()
            .and_then(|h| h.get(&player))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    #[serde(default)]
    pub game: Option<GameHeader>,
    pub round: Option<RoundInfo>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub players: Vec<Player>,
    pub current_trick: Option<TrickView>,
    /// Previous completed trick, kept one cycle for the dwell display.
    pub last_trick: Option<TrickView>,
    #[serde(default)]
    pub scores: BTreeMap<PlayerId, i64>,
    #[serde(default)]
    pub tricks_won: BTreeMap<PlayerId, u32>,
    pub current_bidder_id: Option<PlayerId>,
}

impl GameSnapshot {
    pub fn phase(&self) -> Option<Phase> {
        self.round.as_ref().map(|r| r.phase)
    }

    pub fn trick_index(&self) -> Option<u32> {
        self.round.as_ref().map(|r| r.current_trick)
    }

    pub fn round_number(&self) -> Option<u32> {
        self.round.as_ref().map(|r| r.round_number)
    }

    /// Plays of the trick in progress, empty when there is none.
    pub fn current_plays(&self) -> &[CardPlay] {
        self.current_trick
            .as_ref()
            .map(|t| t.cards_played.as_slice())
            .unwrap_or(&[])
    }

    pub fn last_plays(&self) -> &[CardPlay] {
        self.last_trick
            .as_ref()
            .map(|t| t.cards_played.as_slice())
            .unwrap_or(&[])
    }

    /// True once any card has hit the table this round.
    pub fn first_card_played(&self) -> bool {
        self.trick_index().is_some_and(|t| t > 0) || !self.current_plays().is_empty()
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
