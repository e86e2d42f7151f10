//! Whose turn it is, derived from a snapshot alone.

use crate::domain::{GameSnapshot, Phase, PlayerId, Roster, SEATS};

/// What the acting party is expected to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnAction {
    Bid,
    Play,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActingParty {
    pub player_id: PlayerId,
    pub action: TurnAction,
}

/// Pure function of the snapshot and the static roster. No call history
/// is consulted, so identical inputs always yield identical answers.
pub fn acting_party(snapshot: &GameSnapshot, roster: &Roster) -> Option<ActingParty> {
    let round = snapshot.round.as_ref()?;

    match round.phase {
        Phase::Bidding | Phase::ChoosingAlleen => {
            snapshot.current_bidder_id.map(|player_id| ActingParty {
                player_id,
                action: TurnAction::Bid,
            })
        }
        Phase::Playing => {
            let plays = snapshot.current_plays();
            let player_id = match plays.last() {
                // Trick is settled; waiting for the engine to advance it.
                _ if plays.len() >= SEATS as usize => return None,
                None => match snapshot.current_trick.as_ref().and_then(|t| t.leader_id) {
                    Some(leader) => leader,
                    None => roster.next_after(round.dealer_position)?.id,
                },
                Some(last) => {
                    let position = roster.position_of(last.player_id)?;
                    roster.next_after(position)?.id
                }
            };
            Some(ActingParty {
                player_id,
                action: TurnAction::Play,
            })
        }
        Phase::Dealing | Phase::Completed => None,
    }
}
