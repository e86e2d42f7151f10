//! Session-owned synchronization state.
//!
//! Mutated only from the session task, so none of it needs locking. The
//! exclusion flags serialize logical turns, not memory access.

use crate::domain::CardId;
use crate::transition::TransitionEngine;

use super::differ::SnapshotDiffer;
use super::dwell::DwellScheduler;
use super::orchestrator::TurnSlot;

/// Identifies one accepted snapshot. Bumped on every change so late
/// legal-move answers for an older snapshot can be recognised.
pub type Generation = u64;

/// The human's legal moves, valid for a single snapshot generation.
#[derive(Debug, Default)]
pub struct LegalMoves {
    generation: Generation,
    cards: Option<Vec<CardId>>,
    requested: bool,
}

impl LegalMoves {
    pub fn cards(&self) -> Option<&[CardId]> {
        self.cards.as_deref()
    }

    /// Drop whatever is known and move to `generation`.
    pub fn invalidate(&mut self, generation: Generation) {
        self.generation = generation;
        self.cards = None;
        self.requested = false;
    }

    /// Mark a fetch for the current generation. False when one was already
    /// requested or the answer is known.
    pub fn begin_request(&mut self) -> bool {
        if self.requested || self.cards.is_some() {
            return false;
        }
        self.requested = true;
        true
    }

    /// Store an answer. Answers for another generation are discarded.
    pub fn accept(&mut self, generation: Generation, cards: Vec<CardId>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.cards = Some(cards);
        true
    }

    /// A fetch for `generation` failed; allow a later retry.
    pub fn failed(&mut self, generation: Generation) {
        if generation == self.generation {
            self.requested = false;
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct SyncState {
    pub differ: SnapshotDiffer,
    pub dwell: DwellScheduler,
    pub turn_slot: TurnSlot,
    pub transitions: TransitionEngine,
    pub legal_moves: LegalMoves,
    generation: Generation,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    /// An automated turn is outstanding or a dwell window is open.
    pub fn is_busy(&self) -> bool {
        self.turn_slot.is_occupied() || self.dwell.is_dwelling()
    }

    /// Record that a new snapshot was accepted.
    pub fn advance_generation(&mut self) -> Generation {
        self.generation += 1;
        self.legal_moves.invalidate(self.generation);
        self.generation
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Forget round-scoped state. The turn slot is kept so a call still in
    /// flight is never issued twice.
    pub fn reset(&mut self) {
        self.differ.reset();
        self.dwell.cancel();
        self.transitions.reset();
        self.advance_generation();
    }
}
