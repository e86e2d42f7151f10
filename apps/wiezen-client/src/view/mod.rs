//! Table view model handed to the renderer with every frame.
//!
//! Pure projection of a snapshot plus session context; it never talks to the
//! engine and carries no state between frames.

mod seats;

use crate::domain::bids::{alleen_options, auction_options, BidOption};
use crate::domain::{Bid, CardId, GameSnapshot, Phase, PlayerId, Roster, Suit};
use crate::sync::turn::{acting_party, ActingParty};

pub use seats::{HandCard, HandView, SeatView};

/// Session-level inputs to view building.
#[derive(Clone, Copy, Debug)]
pub struct ViewContext<'a> {
    pub roster: &'a Roster,
    pub human: PlayerId,
    /// Show every hand face up.
    pub reveal_hands: bool,
    /// Cards the human may play right now, once known.
    pub legal_moves: Option<&'a [CardId]>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrumpView {
    pub suit: Option<Suit>,
    pub label: String,
    pub card: Option<CardId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BiddingMode {
    Auction,
    /// A lone Vraag bidder decides between Alleen and Pas.
    AlleenChoice,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BiddingPanel {
    pub mode: BiddingMode,
    pub options: Vec<BidOption>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundOver {
    /// Nobody won a contract this round.
    pub everyone_passed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableView {
    pub round_number: u32,
    pub trick_number: u32,
    pub phase: Phase,
    pub trump: Option<TrumpView>,
    pub acting: Option<ActingParty>,
    pub seats: Vec<SeatView>,
    /// Shown while a Troel contract is on and no card has been played.
    pub announcement: Option<String>,
    /// Present when the human is the one to bid.
    pub bidding: Option<BiddingPanel>,
    pub round_over: Option<RoundOver>,
}

impl TableView {
    /// Project a snapshot. `None` when the snapshot carries no round.
    pub fn build(snapshot: &GameSnapshot, ctx: ViewContext<'_>) -> Option<TableView> {
        let round = snapshot.round.as_ref()?;
        let acting = acting_party(snapshot, ctx.roster);

        let trump = round.trump_suit.as_ref().map(|name| {
            let suit = Suit::from_name(name);
            let label = match suit {
                Some(s) => format!("{name} {}", s.symbol()),
                None => name.clone(),
            };
            TrumpView {
                suit,
                label,
                card: round.trump_card.clone(),
            }
        });

        let seats = ctx
            .roster
            .players()
            .iter()
            .map(|player| seats::seat_view(snapshot, round, player, acting, &ctx))
            .collect();

        let announcement = match (&round.winning_bid, snapshot.first_card_played()) {
            (Some(Bid::Troel), false) => troel_announcement(round.bidder_id, round.partner_id, ctx.roster),
            _ => None,
        };

        let bidding = (round.phase.is_auction() && snapshot.current_bidder_id == Some(ctx.human))
            .then(|| match round.phase {
                Phase::ChoosingAlleen => BiddingPanel {
                    mode: BiddingMode::AlleenChoice,
                    options: alleen_options(),
                },
                _ => BiddingPanel {
                    mode: BiddingMode::Auction,
                    options: auction_options(&round.bids),
                },
            });

        let round_over = (round.phase == Phase::Completed).then(|| RoundOver {
            everyone_passed: matches!(round.winning_bid, None | Some(Bid::Pas)),
        });

        Some(TableView {
            round_number: round.round_number,
            trick_number: round.current_trick,
            phase: round.phase,
            trump,
            acting,
            seats,
            announcement,
            bidding,
            round_over,
        })
    }

    pub fn seat(&self, player_id: PlayerId) -> Option<&SeatView> {
        self.seats.iter().find(|s| s.player_id == player_id)
    }
}

fn troel_announcement(
    bidder: Option<PlayerId>,
    partner: Option<PlayerId>,
    roster: &Roster,
) -> Option<String> {
    let caller = roster.by_id(bidder?)?;
    let partner = roster.by_id(partner?)?;
    Some(format!(
        "TROEL! {} heeft 3+ azen en speelt met {}.",
        caller.name, partner.name
    ))
}

#[cfg(test)]
mod tests_view;
