//! Seam to whatever draws the table.

use crate::domain::{CardId, GameSnapshot, PlayerId};
use crate::transition::TrickAreaUpdate;
use crate::view::TableView;

/// One full render of the table.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub snapshot: GameSnapshot,
    pub table: TableView,
    pub trick: TrickAreaUpdate,
    /// The trick area shows the completed trick held for the dwell window.
    pub showing_completed_trick: bool,
}

/// Receives everything the session wants drawn or said.
///
/// Called only from the session task, in order.
pub trait Renderer: Send + 'static {
    fn render(&mut self, frame: &RenderFrame);

    /// Redraw only the trick area.
    fn render_trick(&mut self, update: &TrickAreaUpdate);

    /// The human's legal moves for the current snapshot arrived.
    fn legal_moves(&mut self, player: PlayerId, cards: &[CardId]);

    /// Blocking notice for the human, e.g. an illegal bid.
    fn notice(&mut self, message: &str);

    /// The human won a contract and must name trump.
    fn prompt_trump(&mut self, player: PlayerId);
}
