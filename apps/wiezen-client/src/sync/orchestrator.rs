//! Turn orchestration: who acts next and how automated turns are driven.
//!
//! At most one automated turn is ever outstanding. The session claims the
//! `TurnSlot` synchronously before any suspension point, and the spawned
//! turn task owns a `SlotRelease` that always reports back, even when the
//! task is aborted.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::config::SyncTimings;
use crate::domain::{GameSnapshot, Phase, PlayerId, Roster};
use crate::error::ClientError;
use crate::remote::RemoteGame;

use super::turn::{acting_party, ActingParty, TurnAction};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TurnId(u64);

/// A claimed automated turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutomatedTurn {
    pub id: TurnId,
    pub party: ActingParty,
}

/// Single-slot queue for automated turns.
#[derive(Debug, Default)]
pub struct TurnSlot {
    held: Option<AutomatedTurn>,
    issued: u64,
}

impl TurnSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `party`. `None` while another turn holds it.
    pub fn try_claim(&mut self, party: ActingParty) -> Option<AutomatedTurn> {
        if self.held.is_some() {
            return None;
        }
        self.issued += 1;
        let turn = AutomatedTurn {
            id: TurnId(self.issued),
            party,
        };
        self.held = Some(turn);
        Some(turn)
    }

    /// Free the slot if `id` holds it.
    pub fn release(&mut self, id: TurnId) -> bool {
        match self.held {
            Some(turn) if turn.id == id => {
                self.held = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.held.is_some()
    }

    pub fn holder(&self) -> Option<AutomatedTurn> {
        self.held
    }
}

/// What the session should do about the current snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPlan {
    Idle,
    Automated(ActingParty),
    Human {
        party: ActingParty,
        /// The human is to play a card and the legal set must be fetched.
        needs_legal_moves: bool,
    },
}

/// Decide the next step. `busy` covers an outstanding automated turn and an
/// open dwell window; both hold every kind of turn back.
pub fn plan_turn(snapshot: &GameSnapshot, roster: &Roster, human: PlayerId, busy: bool) -> TurnPlan {
    if busy {
        return TurnPlan::Idle;
    }
    let Some(party) = acting_party(snapshot, roster) else {
        return TurnPlan::Idle;
    };

    if party.player_id == human {
        return TurnPlan::Human {
            party,
            needs_legal_moves: party.action == TurnAction::Play
                && snapshot.phase() == Some(Phase::Playing),
        };
    }

    match roster.by_id(party.player_id) {
        Some(player) if player.is_automated() => TurnPlan::Automated(party),
        Some(_) => {
            debug!(player_id = party.player_id, "Another human's turn, waiting");
            TurnPlan::Idle
        }
        None => {
            warn!(player_id = party.player_id, "Acting party not in roster");
            TurnPlan::Idle
        }
    }
}

/// Everything an automated turn task reports back.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    pub turn: AutomatedTurn,
    pub trick_complete: bool,
    /// State fetched after the action. Absent when the action failed in
    /// transport or the resync itself failed.
    pub snapshot: Option<GameSnapshot>,
    pub error: Option<ClientError>,
}

impl TurnReport {
    fn aborted(turn: AutomatedTurn) -> Self {
        Self {
            turn,
            trick_complete: false,
            snapshot: None,
            error: Some(ClientError::aborted("automated turn task dropped")),
        }
    }
}

/// Guarantees a `TurnReport` for a claimed turn. Dropping an armed guard
/// posts an aborted report through `notify`.
pub struct SlotRelease<E: Send + 'static> {
    turn: AutomatedTurn,
    tx: UnboundedSender<E>,
    notify: fn(TurnReport) -> E,
    armed: bool,
}

impl<E: Send + 'static> SlotRelease<E> {
    pub fn new(turn: AutomatedTurn, tx: UnboundedSender<E>, notify: fn(TurnReport) -> E) -> Self {
        Self {
            turn,
            tx,
            notify,
            armed: true,
        }
    }

    /// The task is about to report normally.
    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl<E: Send + 'static> Drop for SlotRelease<E> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!(turn = ?self.turn.id, "Automated turn ended without a report, releasing slot");
        let _ = self.tx.send((self.notify)(TurnReport::aborted(self.turn)));
    }
}

pub fn thinking_delay(action: TurnAction, timings: &SyncTimings) -> Duration {
    match action {
        TurnAction::Bid => timings.bid_thinking,
        TurnAction::Play => timings.play_thinking,
    }
}

/// Drive one automated turn: think, ask the engine to act, resync.
///
/// A refused action still resyncs so the table reflects the engine's view.
/// A transport failure skips the resync; the next poll recovers.
pub async fn run_automated_turn<R: RemoteGame>(
    remote: Arc<R>,
    turn: AutomatedTurn,
    thinking: Duration,
) -> TurnReport {
    let player_id = turn.party.player_id;
    tokio::time::sleep(thinking).await;

    info!(player_id, action = ?turn.party.action, "Processing automated turn");
    let acted = match turn.party.action {
        TurnAction::Bid => remote.automated_bid(player_id).await.map(|reply| {
            debug!(player_id, bid = ?reply.bid, "Automated bid placed");
            false
        }),
        TurnAction::Play => remote.automated_play(player_id).await.map(|reply| {
            debug!(player_id, card = ?reply.card_name, "Automated card played");
            reply.trick_complete()
        }),
    };

    let (trick_complete, error) = match acted {
        Ok(complete) => (complete, None),
        Err(err) if err.is_transport() => {
            warn!(player_id, error = %err, "Automated turn failed");
            return TurnReport {
                turn,
                trick_complete: false,
                snapshot: None,
                error: Some(err),
            };
        }
        Err(err) => {
            warn!(player_id, error = %err, "Automated turn refused by engine");
            (false, Some(err))
        }
    };

    let snapshot = match remote.state().await {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            warn!(player_id, error = %err, "Resync after automated turn failed");
            None
        }
    };

    TurnReport {
        turn,
        trick_complete,
        snapshot,
        error,
    }
}
