//! Scriptable in-memory rules engine.
//!
//! Every accepted action moves the table to the next scripted snapshot.
//! Failures can be queued per endpoint, calls are logged with their virtual
//! timestamps, and concurrent automated calls are counted.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;
use wiezen_client::remote::{ActionReply, AutomatedBidReply, AutomatedPlayReply, Envelope};
use wiezen_client::{Bid, CardId, ClientError, GameSnapshot, PlayerId, RemoteGame, Suit};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    State,
    LegalMoves,
    Bid,
    Trump,
    Play,
    AutomatedBid,
    AutomatedPlay,
    NewRound,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    State,
    LegalMoves(PlayerId),
    Bid(PlayerId, Bid),
    Trump(PlayerId, Suit),
    Play(PlayerId, CardId),
    AutomatedBid(PlayerId),
    AutomatedPlay(PlayerId),
    NewRound,
}

impl Call {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Call::State => Endpoint::State,
            Call::LegalMoves(_) => Endpoint::LegalMoves,
            Call::Bid(..) => Endpoint::Bid,
            Call::Trump(..) => Endpoint::Trump,
            Call::Play(..) => Endpoint::Play,
            Call::AutomatedBid(_) => Endpoint::AutomatedBid,
            Call::AutomatedPlay(_) => Endpoint::AutomatedPlay,
            Call::NewRound => Endpoint::NewRound,
        }
    }
}

#[derive(Default)]
struct Table {
    state: GameSnapshot,
    script: VecDeque<GameSnapshot>,
    replies: VecDeque<ActionReply>,
    legal_moves: Vec<CardId>,
    failures: HashMap<Endpoint, VecDeque<ClientError>>,
    calls: Vec<(Instant, Call)>,
}

pub struct FakeRemote {
    table: Mutex<Table>,
    latency: Duration,
    automated_in_flight: AtomicUsize,
    max_automated_in_flight: AtomicUsize,
}

impl FakeRemote {
    pub fn new(initial: GameSnapshot) -> Self {
        Self {
            table: Mutex::new(Table {
                state: initial,
                ..Table::default()
            }),
            latency: Duration::ZERO,
            automated_in_flight: AtomicUsize::new(0),
            max_automated_in_flight: AtomicUsize::new(0),
        }
    }

    /// Every call takes `latency` of virtual time to answer.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// States the table moves through, one per accepted action.
    pub fn then(self, next: GameSnapshot) -> Self {
        self.table.lock().script.push_back(next);
        self
    }

    /// Reply for the next accepted human action.
    pub fn reply_with(self, reply: ActionReply) -> Self {
        self.table.lock().replies.push_back(reply);
        self
    }

    pub fn with_legal_moves(self, cards: &[&str]) -> Self {
        self.table.lock().legal_moves = cards.iter().map(|c| CardId::new(*c)).collect();
        self
    }

    /// Fail the next call to `endpoint` with `error`.
    pub fn fail_next(&self, endpoint: Endpoint, error: ClientError) {
        self.table
            .lock()
            .failures
            .entry(endpoint)
            .or_default()
            .push_back(error);
    }

    /// Replace the engine state out of band.
    pub fn set_state(&self, state: GameSnapshot) {
        self.table.lock().state = state;
    }

    pub fn calls(&self) -> Vec<(Instant, Call)> {
        self.table.lock().calls.clone()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<(Instant, Call)> {
        self.calls()
            .into_iter()
            .filter(|(_, call)| call.endpoint() == endpoint)
            .collect()
    }

    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.calls_to(endpoint).len()
    }

    pub fn max_automated_in_flight(&self) -> usize {
        self.max_automated_in_flight.load(Ordering::SeqCst)
    }

    /// Log the call, wait out the latency and take any queued failure.
    async fn enter(&self, call: Call) -> Result<(), ClientError> {
        let endpoint = call.endpoint();
        self.table.lock().calls.push((Instant::now(), call));
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match self
            .table
            .lock()
            .failures
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front)
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Move to the next scripted state. True when the trick index advanced.
    fn advance(&self) -> bool {
        let mut table = self.table.lock();
        let before = table.state.trick_index();
        if let Some(next) = table.script.pop_front() {
            table.state = next;
        }
        matches!((before, table.state.trick_index()), (Some(b), Some(a)) if a > b)
    }

    fn human_reply(&self) -> ActionReply {
        let trick_complete = self.advance();
        let mut reply = self.table.lock().replies.pop_front().unwrap_or_default();
        reply.trick_complete |= trick_complete;
        reply
    }

    async fn automated<T>(&self, call: Call, act: impl FnOnce(&Self) -> T) -> Result<T, ClientError> {
        let now = self.automated_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_automated_in_flight.fetch_max(now, Ordering::SeqCst);
        let outcome = self.enter(call).await.map(|()| act(self));
        self.automated_in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

#[async_trait]
impl RemoteGame for FakeRemote {
    async fn state(&self) -> Result<GameSnapshot, ClientError> {
        self.enter(Call::State).await?;
        Ok(self.table.lock().state.clone())
    }

    async fn legal_moves(&self, player: PlayerId) -> Result<Vec<CardId>, ClientError> {
        self.enter(Call::LegalMoves(player)).await?;
        Ok(self.table.lock().legal_moves.clone())
    }

    async fn bid(&self, player: PlayerId, bid: &Bid) -> Result<ActionReply, ClientError> {
        self.enter(Call::Bid(player, bid.clone())).await?;
        Ok(self.human_reply())
    }

    async fn choose_trump(&self, player: PlayerId, suit: Suit) -> Result<ActionReply, ClientError> {
        self.enter(Call::Trump(player, suit)).await?;
        Ok(self.human_reply())
    }

    async fn play(&self, player: PlayerId, card: &CardId) -> Result<ActionReply, ClientError> {
        self.enter(Call::Play(player, card.clone())).await?;
        Ok(self.human_reply())
    }

    async fn automated_bid(&self, player: PlayerId) -> Result<AutomatedBidReply, ClientError> {
        self.automated(Call::AutomatedBid(player), |remote| {
            remote.advance();
            AutomatedBidReply {
                bid: Some(Bid::Pas),
                result: Some(Envelope::Accepted(ActionReply::default())),
            }
        })
        .await
    }

    async fn automated_play(&self, player: PlayerId) -> Result<AutomatedPlayReply, ClientError> {
        self.automated(Call::AutomatedPlay(player), |remote| {
            let trick_complete = remote.advance();
            AutomatedPlayReply {
                card_name: Some(CardId::new("Club-9")),
                result: Some(Envelope::Accepted(ActionReply {
                    trick_complete,
                    ..ActionReply::default()
                })),
            }
        })
        .await
    }

    async fn new_round(&self) -> Result<(), ClientError> {
        self.enter(Call::NewRound).await?;
        self.advance();
        Ok(())
    }
}
