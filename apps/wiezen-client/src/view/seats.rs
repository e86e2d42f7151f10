use crate::domain::{Bid, CardId, GameSnapshot, Phase, Player, PlayerId, RoundInfo};
use crate::sync::turn::ActingParty;

use super::ViewContext;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandCard {
    pub card: CardId,
    /// Only ever true for the human's own legal moves.
    pub playable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandView {
    Open(Vec<HandCard>),
    Hidden { count: usize },
}

impl HandView {
    pub fn len(&self) -> usize {
        match self {
            HandView::Open(cards) => cards.len(),
            HandView::Hidden { count } => *count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_open(&self) -> bool {
        matches!(self, HandView::Open(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatView {
    pub player_id: PlayerId,
    pub name: String,
    pub position: u8,
    pub score: i64,
    pub is_dealer: bool,
    pub is_acting: bool,
    /// Bids made this round outside play; the contract badge during play.
    pub bubbles: Vec<Bid>,
    /// `None` hides the tricks counter for this seat.
    pub tricks: Option<u32>,
    pub hand: HandView,
}

pub(super) fn seat_view(
    snapshot: &GameSnapshot,
    round: &RoundInfo,
    player: &Player,
    acting: Option<ActingParty>,
    ctx: &ViewContext<'_>,
) -> SeatView {
    SeatView {
        player_id: player.id,
        name: player.name.clone(),
        position: player.position,
        score: snapshot.scores.get(&player.id).copied().unwrap_or(0),
        is_dealer: player.position == round.dealer_position,
        is_acting: acting.is_some_and(|a| a.player_id == player.id),
        bubbles: bubbles(round, player.id),
        tricks: tricks_display(snapshot, round, player.id),
        hand: hand_view(round, player.id, ctx),
    }
}

fn bubbles(round: &RoundInfo, player_id: PlayerId) -> Vec<Bid> {
    if round.phase != Phase::Playing {
        return round
            .bids
            .iter()
            .filter(|entry| entry.player_id == player_id)
            .map(|entry| entry.bid.clone())
            .collect();
    }

    let in_contract = round.bidder_id == Some(player_id) || round.partner_id == Some(player_id);
    match &round.winning_bid {
        Some(bid) if in_contract => vec![bid.clone()],
        _ => Vec::new(),
    }
}

// Partnership contracts fold the partner's tricks into the bidder's row and
// hide the partner's row.
fn tricks_display(snapshot: &GameSnapshot, round: &RoundInfo, player_id: PlayerId) -> Option<u32> {
    if round.phase != Phase::Playing {
        return None;
    }
    let won = |id: PlayerId| snapshot.tricks_won.get(&id).copied().unwrap_or(0);
    let partnership = round.winning_bid.as_ref().is_some_and(Bid::is_partnership);

    if partnership && round.bidder_id == Some(player_id) {
        let partner = round.partner_id.map(won).unwrap_or(0);
        return Some(won(player_id) + partner);
    }
    if partnership && round.partner_id == Some(player_id) {
        return None;
    }
    Some(won(player_id))
}

fn hand_view(round: &RoundInfo, player_id: PlayerId, ctx: &ViewContext<'_>) -> HandView {
    let cards = round.hand(player_id);
    let is_human = player_id == ctx.human;
    let open_miserie_reveal = round.winning_bid == Some(Bid::OpenMiserie)
        && round.bidder_id == Some(player_id)
        && round.current_trick >= 1;

    if !(is_human || ctx.reveal_hands || open_miserie_reveal) {
        return HandView::Hidden { count: cards.len() };
    }

    let legal = ctx.legal_moves.unwrap_or(&[]);
    HandView::Open(
        cards
            .iter()
            .map(|card| HandCard {
                card: card.clone(),
                playable: is_human && legal.contains(card),
            })
            .collect(),
    )
}
