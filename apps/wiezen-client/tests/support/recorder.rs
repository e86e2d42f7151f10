use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::Instant;
use wiezen_client::{CardId, PlayerId, RenderFrame, Renderer, TrickAreaUpdate};

#[derive(Clone, Debug)]
pub enum Recorded {
    Frame(Box<RenderFrame>),
    Trick(TrickAreaUpdate),
    LegalMoves(PlayerId, Vec<CardId>),
    Notice(String),
    PromptTrump(PlayerId),
}

/// Renderer that keeps everything it was asked to draw, with timestamps.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    log: Arc<Mutex<Vec<(Instant, Recorded)>>>,
}

impl RecordingRenderer {
    fn push(&self, item: Recorded) {
        self.log.lock().push((Instant::now(), item));
    }

    pub fn entries(&self) -> Vec<(Instant, Recorded)> {
        self.log.lock().clone()
    }

    pub fn frames(&self) -> Vec<(Instant, RenderFrame)> {
        self.entries()
            .into_iter()
            .filter_map(|(at, item)| match item {
                Recorded::Frame(frame) => Some((at, *frame)),
                _ => None,
            })
            .collect()
    }

    pub fn last_frame(&self) -> Option<RenderFrame> {
        self.frames().pop().map(|(_, frame)| frame)
    }

    pub fn trick_updates(&self) -> Vec<(Instant, TrickAreaUpdate)> {
        self.entries()
            .into_iter()
            .filter_map(|(at, item)| match item {
                Recorded::Trick(update) => Some((at, update)),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|(_, item)| match item {
                Recorded::Notice(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn trump_prompts(&self) -> usize {
        self.entries()
            .iter()
            .filter(|(_, item)| matches!(item, Recorded::PromptTrump(_)))
            .count()
    }

    pub fn legal_move_updates(&self) -> Vec<Vec<CardId>> {
        self.entries()
            .into_iter()
            .filter_map(|(_, item)| match item {
                Recorded::LegalMoves(_, cards) => Some(cards),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &RenderFrame) {
        self.push(Recorded::Frame(Box::new(frame.clone())));
    }

    fn render_trick(&mut self, update: &TrickAreaUpdate) {
        self.push(Recorded::Trick(update.clone()));
    }

    fn legal_moves(&mut self, player: PlayerId, cards: &[CardId]) {
        self.push(Recorded::LegalMoves(player, cards.to_vec()));
    }

    fn notice(&mut self, message: &str) {
        self.push(Recorded::Notice(message.to_string()));
    }

    fn prompt_trump(&mut self, player: PlayerId) {
        self.push(Recorded::PromptTrump(player));
    }
}
