use super::geometry::{Point, Rect};
use crate::domain::SEATS;

pub const CARD_WIDTH: f64 = 100.0;
pub const CARD_HEIGHT: f64 = 140.0;

/// The four fixed screen anchors a seat maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    Bottom,
    Left,
    Top,
    Right,
}

impl Anchor {
    pub fn for_position(position: u8) -> Anchor {
        match position % SEATS {
            0 => Anchor::Bottom,
            1 => Anchor::Left,
            2 => Anchor::Top,
            _ => Anchor::Right,
        }
    }

    fn index(self) -> usize {
        match self {
            Anchor::Bottom => 0,
            Anchor::Left => 1,
            Anchor::Top => 2,
            Anchor::Right => 3,
        }
    }
}

/// Where hands sit and where played cards settle, per anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct TableLayout {
    trick_slots: [Rect; 4],
    hand_areas: [Rect; 4],
}

impl TableLayout {
    pub fn new(trick_slots: [Rect; 4], hand_areas: [Rect; 4]) -> Self {
        Self {
            trick_slots,
            hand_areas,
        }
    }

    /// Layout for a `width` x `height` table: hands along the edges, trick
    /// slots offset from the centre towards their owner.
    pub fn standard(width: f64, height: f64) -> Self {
        let mid = Point::new(width / 2.0, height / 2.0);
        let slot = |dx: f64, dy: f64| {
            Rect::centered(Point::new(mid.x + dx, mid.y + dy), CARD_WIDTH, CARD_HEIGHT)
        };
        let edge = CARD_HEIGHT / 2.0 + 20.0;

        let trick_slots = [
            slot(0.0, CARD_HEIGHT / 2.0),
            slot(-CARD_WIDTH * 0.8, 0.0),
            slot(0.0, -CARD_HEIGHT / 2.0),
            slot(CARD_WIDTH * 0.8, 0.0),
        ];
        let hand_areas = [
            Rect::centered(Point::new(mid.x, height - edge), width * 0.6, CARD_HEIGHT),
            Rect::centered(Point::new(edge, mid.y), CARD_HEIGHT, height * 0.5),
            Rect::centered(Point::new(mid.x, edge), width * 0.6, CARD_HEIGHT),
            Rect::centered(Point::new(width - edge, mid.y), CARD_HEIGHT, height * 0.5),
        ];

        Self::new(trick_slots, hand_areas)
    }

    pub fn trick_slot(&self, anchor: Anchor) -> Rect {
        self.trick_slots[anchor.index()]
    }

    pub fn hand_area(&self, anchor: Anchor) -> Rect {
        self.hand_areas[anchor.index()]
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::standard(1200.0, 800.0)
    }
}
