//! Transition engine for cards moving from a hand into the trick area.
//!
//! Each rebuild places every play at its settled slot. Plays that were not
//! on the table at the previous rebuild also get a FLIP motion: they start
//! offset towards their owner's hand, shrunk and transparent, and settle
//! after two rendering frames. Whenever the play set is unchanged the engine
//! answers `Unchanged` so animations already running are left alone.

pub mod geometry;
pub mod layout;

use tracing::warn;

pub use geometry::{Point, Rect, Transform};
pub use layout::{Anchor, TableLayout};

use crate::domain::{CardPlay, Roster};

/// Frames to wait before releasing the inverted start state.
pub const SETTLE_AFTER_FRAMES: u32 = 2;
/// Scale of a card as it leaves the hand.
pub const START_SCALE: f64 = 0.5;

/// Start state of one animated card relative to its settled slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlipMotion {
    /// Vector from the slot centre to the owner's hand centre.
    pub offset: Point,
}

impl FlipMotion {
    pub fn between(hand: Rect, settled: Rect) -> Self {
        Self {
            offset: hand.center() - settled.center(),
        }
    }

    pub fn initial(&self) -> Transform {
        Transform {
            translate: self.offset,
            scale: START_SCALE,
            opacity: 0.0,
        }
    }

    /// Transform to apply on rendering frame `frame` (0 = insertion frame).
    pub fn at_frame(&self, frame: u32) -> Transform {
        if frame < SETTLE_AFTER_FRAMES {
            self.initial()
        } else {
            Transform::IDENTITY
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedCard {
    pub play: CardPlay,
    pub anchor: Anchor,
    pub settled: Rect,
    /// Stacking order; later plays on top.
    pub z_index: u32,
    /// Present only for plays that just arrived.
    pub motion: Option<FlipMotion>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TrickAreaUpdate {
    /// Leave the trick area exactly as it is.
    Unchanged,
    /// Remove everything from the trick area.
    Cleared,
    /// Replace the trick area contents with these cards.
    Rebuilt(Vec<PlacedCard>),
}

/// Remembers what the trick area currently shows.
#[derive(Debug, Default)]
pub struct TransitionEngine {
    rendered: Vec<CardPlay>,
    populated: bool,
}

impl TransitionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered(&self) -> &[CardPlay] {
        &self.rendered
    }

    /// Forget the displayed state, e.g. when a new round starts.
    pub fn reset(&mut self) {
        self.rendered.clear();
        self.populated = false;
    }

    /// Plays present in `plays` that were absent from the last rebuild.
    pub fn new_plays<'a>(&self, plays: &'a [CardPlay]) -> Vec<&'a CardPlay> {
        plays.iter().filter(|p| !self.rendered.contains(p)).collect()
    }

    pub fn update(
        &mut self,
        plays: &[CardPlay],
        roster: &Roster,
        layout: &TableLayout,
    ) -> TrickAreaUpdate {
        if plays.is_empty() {
            self.rendered.clear();
            return if std::mem::take(&mut self.populated) {
                TrickAreaUpdate::Cleared
            } else {
                TrickAreaUpdate::Unchanged
            };
        }

        if self.populated && self.rendered == plays {
            return TrickAreaUpdate::Unchanged;
        }

        let fresh = self.new_plays(plays);
        let mut placed = Vec::with_capacity(plays.len());
        for (index, play) in plays.iter().enumerate() {
            let Some(position) = roster.position_of(play.player_id) else {
                warn!(
                    player_id = play.player_id,
                    card = %play.card,
                    "play by unknown player, not placed"
                );
                continue;
            };
            let anchor = Anchor::for_position(position);
            let settled = layout.trick_slot(anchor);
            let motion = fresh
                .contains(&play)
                .then(|| FlipMotion::between(layout.hand_area(anchor), settled));

            placed.push(PlacedCard {
                play: play.clone(),
                anchor,
                settled,
                z_index: 10 + index as u32,
                motion,
            });
        }

        self.rendered = plays.to_vec();
        self.populated = true;
        TrickAreaUpdate::Rebuilt(placed)
    }
}
