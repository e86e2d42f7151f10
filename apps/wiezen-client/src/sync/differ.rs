//! Decides whether a freshly fetched snapshot is worth a render.

use crate::domain::GameSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffOutcome {
    /// Structurally identical to the retained snapshot; skip the render.
    Unchanged,
    Updated,
    /// The trick index advanced; render now, then start the dwell window.
    TrickJustCompleted,
}

impl DiffOutcome {
    pub fn is_change(self) -> bool {
        !matches!(self, DiffOutcome::Unchanged)
    }
}

/// Retains the last accepted snapshot and trick index.
#[derive(Debug, Default)]
pub struct SnapshotDiffer {
    previous: Option<GameSnapshot>,
    previous_trick: Option<u32>,
}

impl SnapshotDiffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `next` against the retained snapshot. Retained state moves
    /// forward only on a change.
    pub fn observe(&mut self, next: &GameSnapshot) -> DiffOutcome {
        let next_trick = next.trick_index();

        // Completion wins over plain equality.
        let completed = matches!(
            (self.previous_trick, next_trick),
            (Some(prev), Some(now)) if now > prev
        );

        let outcome = if completed {
            DiffOutcome::TrickJustCompleted
        } else if self.previous.as_ref() != Some(next) {
            DiffOutcome::Updated
        } else {
            DiffOutcome::Unchanged
        };

        if outcome.is_change() {
            self.previous = Some(next.clone());
            if next_trick.is_some() {
                self.previous_trick = next_trick;
            }
        }
        outcome
    }

    pub fn current(&self) -> Option<&GameSnapshot> {
        self.previous.as_ref()
    }

    pub fn previous_trick(&self) -> Option<u32> {
        self.previous_trick
    }

    pub fn reset(&mut self) {
        self.previous = None;
        self.previous_trick = None;
    }
}
