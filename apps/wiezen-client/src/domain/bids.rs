//! Auction vocabulary and the client-side bid affordances.
//!
//! The rules engine is the only authority on bid legality. The helpers here
//! only decide which auction buttons are worth offering to the human.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::roster::PlayerId;

/// A bid or contract name as used on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Bid {
    Pas,
    Vraag,
    Mee,
    Abondance,
    Miserie,
    OpenMiserie,
    SoloSlim,
    Troel,
    Alleen,
    /// Anything the engine sends that this client has no name for.
    Unknown(String),
}

impl Bid {
    /// Bids offered in the auction panel, in display order.
    pub const AUCTION: [Bid; 7] = [
        Bid::Pas,
        Bid::Vraag,
        Bid::Mee,
        Bid::Abondance,
        Bid::Miserie,
        Bid::OpenMiserie,
        Bid::SoloSlim,
    ];

    pub fn name(&self) -> &str {
        match self {
            Bid::Pas => "Pas",
            Bid::Vraag => "Vraag",
            Bid::Mee => "Mee",
            Bid::Abondance => "Abondance",
            Bid::Miserie => "Miserie",
            Bid::OpenMiserie => "Open Miserie",
            Bid::SoloSlim => "Solo Slim",
            Bid::Troel => "Troel",
            Bid::Alleen => "Alleen",
            Bid::Unknown(name) => name,
        }
    }

    /// Position in the auction hierarchy. Unranked bids count as a pass.
    pub fn value(&self) -> u8 {
        match self {
            Bid::Vraag | Bid::Mee => 1,
            Bid::Abondance => 2,
            Bid::Miserie => 3,
            Bid::OpenMiserie => 4,
            Bid::SoloSlim => 5,
            _ => 0,
        }
    }

    /// Winning one of these leaves the trump suit to the bidder.
    pub fn requires_trump_choice(&self) -> bool {
        matches!(self, Bid::SoloSlim | Bid::Abondance)
    }

    /// Contracts played by a bidder together with a partner.
    pub fn is_partnership(&self) -> bool {
        matches!(self, Bid::Vraag | Bid::Troel)
    }
}

impl From<String> for Bid {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Pas" => Bid::Pas,
            "Vraag" => Bid::Vraag,
            "Mee" => Bid::Mee,
            "Abondance" => Bid::Abondance,
            "Miserie" => Bid::Miserie,
            "Open Miserie" => Bid::OpenMiserie,
            "Solo Slim" => Bid::SoloSlim,
            "Troel" => Bid::Troel,
            "Alleen" => Bid::Alleen,
            _ => Bid::Unknown(value),
        }
    }
}

impl From<&str> for Bid {
    fn from(value: &str) -> Self {
        Bid::from(value.to_string())
    }
}

impl From<Bid> for String {
    fn from(bid: Bid) -> Self {
        match bid {
            Bid::Unknown(name) => name,
            other => other.name().to_string(),
        }
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the round's bid history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidEntry {
    pub player_id: PlayerId,
    pub bid: Bid,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidOption {
    pub bid: Bid,
    pub enabled: bool,
}

/// Auction buttons with their enabled state, given the bids placed so far.
pub fn auction_options(history: &[BidEntry]) -> Vec<BidOption> {
    let max_value = history.iter().map(|b| b.bid.value()).max().unwrap_or(0);
    let has_vraag = history.iter().any(|b| b.bid == Bid::Vraag);

    Bid::AUCTION
        .iter()
        .map(|bid| {
            let enabled = match bid {
                Bid::Pas => true,
                Bid::Vraag => max_value == 0 && !has_vraag,
                Bid::Mee => has_vraag && max_value == 1,
                other => max_value < other.value(),
            };
            BidOption {
                bid: bid.clone(),
                enabled,
            }
        })
        .collect()
}

/// The two choices open to a lone Vraag bidder nobody joined.
pub fn alleen_options() -> Vec<BidOption> {
    vec![
        BidOption {
            bid: Bid::Alleen,
            enabled: true,
        },
        BidOption {
            bid: Bid::Pas,
            enabled: true,
        },
    ]
}
