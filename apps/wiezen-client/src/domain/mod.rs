//! Domain layer: wire-level game types and pure helpers over them.

pub mod bids;
pub mod cards;
pub mod roster;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_state_helpers;

pub use bids::{Bid, BidEntry};
pub use cards::{CardId, Suit};
pub use roster::{Player, PlayerId, Roster, SEATS};
pub use snapshot::{CardPlay, GameSnapshot, Phase, RoundInfo, TrickView};
