//! Card identifiers as the rules engine sends them.
//!
//! The client never evaluates cards; it only needs to name them, split them
//! for display, and compare them for equality.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Wire card identifier, e.g. `"Heart-Ace"` or `"Spade-10"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into `(suit, rank)`. Returns `None` for identifiers without a `-`.
    pub fn parts(&self) -> Option<(&str, &str)> {
        self.0.split_once('-')
    }

    pub fn suit(&self) -> Option<Suit> {
        self.parts().and_then(|(suit, _)| Suit::from_name(suit))
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Heart,
    Diamond,
    Club,
    Spade,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Heart, Suit::Diamond, Suit::Club, Suit::Spade];

    /// Accepts the engine's English names and the Dutch table names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Heart" | "Harten" => Some(Suit::Heart),
            "Diamond" | "Ruiten" => Some(Suit::Diamond),
            "Club" | "Klaveren" => Some(Suit::Club),
            "Spade" | "Schuppen" => Some(Suit::Spade),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Heart => "Heart",
            Suit::Diamond => "Diamond",
            Suit::Club => "Club",
            Suit::Spade => "Spade",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Heart => '♥',
            Suit::Diamond => '♦',
            Suit::Club => '♣',
            Suit::Spade => '♠',
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Heart | Suit::Diamond)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Suit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Suit::from_name(s).ok_or_else(|| format!("unknown suit '{s}'"))
    }
}
