//! Test-only snapshot builders for unit tests across the crate.

use crate::domain::{
    Bid, BidEntry, CardId, CardPlay, GameSnapshot, Phase, Player, PlayerId, Roster, RoundInfo,
    TrickView,
};

/// Human at position 0 with id 1; automated seats 2, 3, 4 clockwise.
pub fn table_roster() -> Roster {
    Roster::new(
        (0..4u8)
            .map(|position| Player {
                id: position as PlayerId + 1,
                name: format!("Speler {}", position + 1),
                position,
                is_human: position == 0,
                ai_difficulty: (position != 0).then(|| "medium".to_string()),
            })
            .collect(),
    )
}

/// A round in `phase` with dealer at position 3 and nothing played yet.
pub fn round_in(phase: Phase) -> RoundInfo {
    RoundInfo {
        id: None,
        round_number: 1,
        current_trick: 0,
        phase,
        dealer_position: 3,
        trump_suit: Some("Heart".into()),
        trump_card: Some(CardId::new("Heart-7")),
        winning_bid: None,
        bidder_id: None,
        partner_id: None,
        first_player_id: Some(1),
        hands: None,
        bids: Vec::new(),
    }
}

pub fn snapshot_in(phase: Phase) -> GameSnapshot {
    let roster = table_roster();
    GameSnapshot {
        round: Some(round_in(phase)),
        players: roster.players().to_vec(),
        scores: roster.players().iter().map(|p| (p.id, 0)).collect(),
        tricks_won: roster.players().iter().map(|p| (p.id, 0)).collect(),
        ..GameSnapshot::default()
    }
}

/// Bidding snapshot waiting on `bidder`.
pub fn bidding(bidder: PlayerId, bids: &[(PlayerId, Bid)]) -> GameSnapshot {
    let mut snap = snapshot_in(Phase::Bidding);
    snap.current_bidder_id = Some(bidder);
    if let Some(round) = snap.round.as_mut() {
        round.bids = bids
            .iter()
            .map(|(player_id, bid)| BidEntry {
                player_id: *player_id,
                bid: bid.clone(),
            })
            .collect();
    }
    snap
}

/// Playing snapshot at `trick` with the given plays in the current trick.
pub fn playing(trick: u32, leader: PlayerId, plays: &[(PlayerId, &str)]) -> GameSnapshot {
    let mut snap = snapshot_in(Phase::Playing);
    if let Some(round) = snap.round.as_mut() {
        round.current_trick = trick;
    }
    snap.current_trick = Some(TrickView {
        id: None,
        trick_number: Some(trick),
        leader_id: Some(leader),
        winner_id: None,
        cards_played: plays.iter().map(|(p, c)| CardPlay::new(*p, *c)).collect(),
    });
    snap
}

pub fn with_hand(mut snap: GameSnapshot, player: PlayerId, cards: &[&str]) -> GameSnapshot {
    if let Some(round) = snap.round.as_mut() {
        round
            .hands
            .get_or_insert_with(Default::default)
            .insert(player, cards.iter().map(|c| CardId::new(*c)).collect());
    }
    snap
}
