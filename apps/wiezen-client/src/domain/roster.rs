use serde::{Deserialize, Serialize};

pub type PlayerId = i64;

/// Number of seats at the table.
pub const SEATS: u8 = 4;

/// Static roster entry. Fixed for the whole session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// 0 = bottom, 1 = left, 2 = top, 3 = right.
    pub position: u8,
    pub is_human: bool,
    #[serde(default)]
    pub ai_difficulty: Option<String>,
}

impl Player {
    pub fn is_automated(&self) -> bool {
        !self.is_human
    }
}

/// The four players of a session, looked up by id or table position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new(mut players: Vec<Player>) -> Self {
        players.sort_by_key(|p| p.position);
        Self { players }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn by_id(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn at_position(&self, position: u8) -> Option<&Player> {
        self.players.iter().find(|p| p.position == position)
    }

    pub fn position_of(&self, id: PlayerId) -> Option<u8> {
        self.by_id(id).map(|p| p.position)
    }

    /// The seat after `position`, clockwise. Out-of-range positions from
    /// the wire are reduced modulo the table size first.
    pub fn next_after(&self, position: u8) -> Option<&Player> {
        self.at_position((position % SEATS + 1) % SEATS)
    }

    /// First human in seating order.
    pub fn human(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_human)
    }
}
