//! The table session actor.
//!
//! One task owns `SyncState` and handles every event in arrival order.
//! Remote calls and timers run as spawned tasks that post their outcome
//! back into the inbox, so no handler ever suspends and every exclusion
//! check-and-set happens inside a single synchronous step.

use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::SyncTimings;
use crate::domain::{Bid, CardId, GameSnapshot, PlayerId, Roster, Suit};
use crate::error::ClientError;
use crate::remote::{ActionReply, RemoteGame};
use crate::render::{RenderFrame, Renderer};
use crate::transition::TableLayout;
use crate::view::{TableView, ViewContext};

use super::differ::DiffOutcome;
use super::dwell::DwellToken;
use super::orchestrator::{
    plan_turn, run_automated_turn, thinking_delay, SlotRelease, TurnPlan, TurnReport,
};
use super::polling::{PollDecision, PollingLoop};
use super::schedule::{Deferred, Scheduler};
use super::state::{Generation, SyncState};
use super::turn::ActingParty;

/// Static inputs of a session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// The local human player.
    pub human: PlayerId,
    pub roster: Roster,
    pub timings: SyncTimings,
    /// Show every hand face up.
    pub reveal_hands: bool,
    pub layout: TableLayout,
}

impl SessionConfig {
    pub fn new(human: PlayerId, roster: Roster) -> Self {
        Self {
            human,
            roster,
            timings: SyncTimings::default(),
            reveal_hands: false,
            layout: TableLayout::default(),
        }
    }

    pub fn with_timings(mut self, timings: SyncTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn with_reveal_hands(mut self, reveal: bool) -> Self {
        self.reveal_hands = reveal;
        self
    }
}

/// Actions the human can take.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Bid(Bid),
    ChooseTrump(Suit),
    Play(CardId),
    NewRound,
}

impl FromStr for Command {
    type Err = String;

    /// Parses `bid <name>`, `trump <suit>`, `play <card>` and `new-round`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();

        match (verb, arg) {
            ("new-round", "") => Ok(Command::NewRound),
            ("bid", name) if !name.is_empty() => {
                let known = Bid::AUCTION
                    .iter()
                    .chain([Bid::Alleen, Bid::Troel].iter())
                    .find(|bid| bid.name().eq_ignore_ascii_case(name))
                    .cloned();
                known
                    .map(Command::Bid)
                    .ok_or_else(|| format!("unknown bid '{name}'"))
            }
            ("trump", suit) if !suit.is_empty() => suit.parse().map(Command::ChooseTrump),
            ("play", card) if !card.is_empty() => Ok(Command::Play(CardId::new(card))),
            _ => Err(format!("unrecognised command '{line}'")),
        }
    }
}

/// Why a state fetch was issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOrigin {
    Poll,
    /// Startup or after a human action; a turn check follows the apply.
    Resync,
    /// Second sync after a play that completed a trick.
    Settle,
}

/// Everything that can wake the session.
#[derive(Debug)]
pub enum SessionEvent {
    Command(Command),
    SnapshotFetched {
        origin: FetchOrigin,
        result: Result<GameSnapshot, ClientError>,
    },
    DwellElapsed(DwellToken),
    TurnRecheck,
    AutomatedTurnDone(TurnReport),
    LegalMovesFetched {
        generation: Generation,
        player: PlayerId,
        result: Result<Vec<CardId>, ClientError>,
    },
    HumanActionDone {
        command: Command,
        result: Result<ActionReply, ClientError>,
    },
    NewRoundDone(Result<(), ClientError>),
    DelayedResync,
}

/// Cheap handle for issuing human actions to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    tx: UnboundedSender<SessionEvent>,
}

impl SessionHandle {
    pub fn bid(&self, bid: Bid) -> Result<(), ClientError> {
        self.send(Command::Bid(bid))
    }

    pub fn choose_trump(&self, suit: Suit) -> Result<(), ClientError> {
        self.send(Command::ChooseTrump(suit))
    }

    pub fn play(&self, card: CardId) -> Result<(), ClientError> {
        self.send(Command::Play(card))
    }

    pub fn new_round(&self) -> Result<(), ClientError> {
        self.send(Command::NewRound)
    }

    pub fn send(&self, command: Command) -> Result<(), ClientError> {
        self.tx
            .send(SessionEvent::Command(command))
            .map_err(|_| ClientError::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

pub struct TableSession<R: RemoteGame, V: Renderer> {
    config: SessionConfig,
    remote: Arc<R>,
    renderer: V,
    state: SyncState,
    inbox: UnboundedReceiver<SessionEvent>,
    scheduler: Scheduler<SessionEvent>,
    automated_task: Option<Deferred>,
}

impl<R: RemoteGame, V: Renderer> TableSession<R, V> {
    pub fn new(config: SessionConfig, remote: Arc<R>, renderer: V) -> (Self, SessionHandle) {
        let (tx, inbox) = mpsc::unbounded_channel();
        let handle = SessionHandle { tx: tx.clone() };
        let session = Self {
            config,
            remote,
            renderer,
            state: SyncState::new(),
            inbox,
            scheduler: Scheduler::new(tx),
            automated_task: None,
        };
        (session, handle)
    }

    /// Run until `shutdown` is cancelled. Returns the renderer so callers
    /// can inspect what was drawn.
    pub async fn run(mut self, shutdown: CancellationToken) -> V {
        info!(
            human = self.config.human,
            players = self.config.roster.players().len(),
            "Table session starting"
        );
        self.fetch_state(FetchOrigin::Resync);
        let mut polling = PollingLoop::new(self.config.timings.poll_interval);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                event = self.inbox.recv() => match event {
                    Some(event) => self.handle(event, &mut polling),
                    None => break,
                },
                _ = polling.tick() => self.on_poll_tick(&mut polling),
            }
        }

        self.state.dwell.cancel();
        if let Some(task) = self.automated_task.take() {
            task.cancel();
        }
        info!("Table session stopped");
        self.renderer
    }

    fn handle(&mut self, event: SessionEvent, polling: &mut PollingLoop) {
        match event {
            SessionEvent::Command(command) => self.on_command(command),
            SessionEvent::SnapshotFetched { origin, result } => {
                if origin == FetchOrigin::Poll {
                    polling.completed();
                }
                self.on_snapshot(origin, result);
            }
            SessionEvent::DwellElapsed(token) => self.on_dwell_elapsed(token),
            SessionEvent::TurnRecheck => self.check_turn(),
            SessionEvent::AutomatedTurnDone(report) => self.on_automated_turn_done(report),
            SessionEvent::LegalMovesFetched {
                generation,
                player,
                result,
            } => self.on_legal_moves(generation, player, result),
            SessionEvent::HumanActionDone { command, result } => {
                self.on_human_action_done(command, result)
            }
            SessionEvent::NewRoundDone(result) => self.on_new_round_done(result),
            SessionEvent::DelayedResync => self.fetch_state(FetchOrigin::Settle),
        }
    }

    fn on_poll_tick(&mut self, polling: &mut PollingLoop) {
        let decision = polling.decide(
            self.state.turn_slot.is_occupied(),
            self.state.dwell.is_dwelling(),
        );
        if decision == PollDecision::Fetch {
            self.fetch_state(FetchOrigin::Poll);
        }
    }

    fn fetch_state(&self, origin: FetchOrigin) {
        let remote = Arc::clone(&self.remote);
        self.scheduler.spawn(async move {
            SessionEvent::SnapshotFetched {
                origin,
                result: remote.state().await,
            }
        });
    }

    fn on_snapshot(&mut self, origin: FetchOrigin, result: Result<GameSnapshot, ClientError>) {
        match result {
            Ok(snapshot) => {
                self.apply_snapshot(snapshot);
                if origin == FetchOrigin::Resync {
                    self.check_turn();
                }
            }
            Err(err) => warn!(?origin, error = %err, "State fetch failed"),
        }
    }

    fn apply_snapshot(&mut self, snapshot: GameSnapshot) {
        if !self.state.dwell.admits(&snapshot) {
            debug!(
                trick = ?snapshot.trick_index(),
                "Snapshot from another trick arrived during dwell, dropped"
            );
            return;
        }

        match self.state.differ.observe(&snapshot) {
            DiffOutcome::Unchanged => self.retry_legal_moves(),
            DiffOutcome::Updated => {
                self.state.advance_generation();
                self.render();
                self.check_turn();
            }
            DiffOutcome::TrickJustCompleted => {
                self.state.advance_generation();
                self.begin_dwell(&snapshot);
                self.render();
            }
        }
    }

    fn begin_dwell(&mut self, snapshot: &GameSnapshot) {
        let (Some(round_number), Some(trick_index)) =
            (snapshot.round_number(), snapshot.trick_index())
        else {
            return;
        };
        info!(round_number, trick_index, "Trick completed, holding it on the table");
        let token = self.state.dwell.begin(round_number, trick_index);
        let timer = self
            .scheduler
            .after(self.config.timings.trick_dwell, SessionEvent::DwellElapsed(token));
        self.state.dwell.arm(token, timer);
    }

    fn on_dwell_elapsed(&mut self, token: DwellToken) {
        if !self.state.dwell.finish(token) {
            debug!(?token, "Stale dwell timer ignored");
            return;
        }
        debug!("Dwell window closed, clearing trick area");

        if let Some(snapshot) = self.state.differ.current() {
            let update = self.state.transitions.update(
                snapshot.current_plays(),
                &self.config.roster,
                &self.config.layout,
            );
            self.renderer.render_trick(&update);
        }
        self.check_turn();
    }

    /// Render the retained snapshot. Snapshots without a round are not
    /// drawn.
    fn render(&mut self) {
        let Some(snapshot) = self.state.differ.current() else {
            return;
        };
        if snapshot.round.is_none() {
            debug!("Snapshot has no round, skipping render");
            return;
        }

        let showing_completed_trick =
            self.state.dwell.is_dwelling() && snapshot.last_trick.is_some();
        let plays = if showing_completed_trick {
            snapshot.last_plays()
        } else {
            snapshot.current_plays()
        };
        let trick = self
            .state
            .transitions
            .update(plays, &self.config.roster, &self.config.layout);

        let ctx = ViewContext {
            roster: &self.config.roster,
            human: self.config.human,
            reveal_hands: self.config.reveal_hands,
            legal_moves: self.state.legal_moves.cards(),
        };
        let Some(table) = TableView::build(snapshot, ctx) else {
            return;
        };

        self.renderer.render(&RenderFrame {
            snapshot: snapshot.clone(),
            table,
            trick,
            showing_completed_trick,
        });
    }

    fn check_turn(&mut self) {
        let Some(snapshot) = self.state.differ.current() else {
            return;
        };
        if snapshot.round.is_none() {
            return;
        }

        let plan = plan_turn(
            snapshot,
            &self.config.roster,
            self.config.human,
            self.state.is_busy(),
        );
        match plan {
            TurnPlan::Idle => {}
            TurnPlan::Automated(party) => self.start_automated_turn(party),
            TurnPlan::Human {
                party,
                needs_legal_moves,
            } => {
                debug!(player_id = party.player_id, action = ?party.action, "Waiting on human");
                if needs_legal_moves {
                    self.request_legal_moves(party.player_id);
                }
            }
        }
    }

    fn start_automated_turn(&mut self, party: ActingParty) {
        let Some(turn) = self.state.turn_slot.try_claim(party) else {
            return;
        };
        debug!(player_id = party.player_id, action = ?party.action, "Automated turn claimed");

        let guard = SlotRelease::new(turn, self.scheduler.sender(), SessionEvent::AutomatedTurnDone);
        let remote = Arc::clone(&self.remote);
        let thinking = thinking_delay(party.action, &self.config.timings);
        self.automated_task = Some(self.scheduler.spawn(async move {
            let report = run_automated_turn(remote, turn, thinking).await;
            guard.disarm();
            SessionEvent::AutomatedTurnDone(report)
        }));
    }

    fn on_automated_turn_done(&mut self, report: TurnReport) {
        // Resync first while the slot is still held, then release and
        // look at the new acting party on a fresh continuation.
        if let Some(snapshot) = report.snapshot {
            self.apply_snapshot(snapshot);
        }
        if !self.state.turn_slot.release(report.turn.id) {
            warn!(turn = ?report.turn.id, "Report for a turn that no longer holds the slot");
        }
        self.automated_task = None;

        if report.trick_complete {
            self.scheduler
                .after(self.config.timings.trick_settle_resync, SessionEvent::DelayedResync);
        }
        self.scheduler
            .after(self.config.timings.turn_recheck, SessionEvent::TurnRecheck);
    }

    /// A failed legal-move fetch leaves the human without playable cards
    /// and the table unchanged, so an identical snapshot asks again.
    fn retry_legal_moves(&mut self) {
        if self.state.legal_moves.cards().is_some() {
            return;
        }
        let Some(snapshot) = self.state.differ.current() else {
            return;
        };
        let plan = plan_turn(
            snapshot,
            &self.config.roster,
            self.config.human,
            self.state.is_busy(),
        );
        if let TurnPlan::Human {
            party,
            needs_legal_moves: true,
        } = plan
        {
            self.request_legal_moves(party.player_id);
        }
    }

    fn request_legal_moves(&mut self, player: PlayerId) {
        if !self.state.legal_moves.begin_request() {
            return;
        }
        let generation = self.state.generation();
        let remote = Arc::clone(&self.remote);
        self.scheduler.spawn(async move {
            SessionEvent::LegalMovesFetched {
                generation,
                player,
                result: remote.legal_moves(player).await,
            }
        });
    }

    fn on_legal_moves(
        &mut self,
        generation: Generation,
        player: PlayerId,
        result: Result<Vec<CardId>, ClientError>,
    ) {
        match result {
            Ok(cards) => {
                if !self.state.legal_moves.accept(generation, cards) {
                    debug!(generation, "Legal moves for an older snapshot dropped");
                    return;
                }
                let cards = self.state.legal_moves.cards().unwrap_or(&[]);
                self.renderer.legal_moves(player, cards);
                self.render();
            }
            Err(err) => {
                warn!(player, error = %err, "Fetching legal moves failed");
                self.state.legal_moves.failed(generation);
            }
        }
    }

    fn on_command(&mut self, command: Command) {
        let human = self.config.human;
        let remote = Arc::clone(&self.remote);
        info!(human, ?command, "Human action");

        if command == Command::NewRound {
            self.scheduler
                .spawn(async move { SessionEvent::NewRoundDone(remote.new_round().await) });
            return;
        }

        self.scheduler.spawn(async move {
            let result = match &command {
                Command::Bid(bid) => remote.bid(human, bid).await,
                Command::ChooseTrump(suit) => remote.choose_trump(human, *suit).await,
                Command::Play(card) => remote.play(human, card).await,
                Command::NewRound => Ok(ActionReply::default()),
            };
            SessionEvent::HumanActionDone { command, result }
        });
    }

    fn on_human_action_done(&mut self, command: Command, result: Result<ActionReply, ClientError>) {
        let reply = match result {
            Ok(reply) => reply,
            Err(err) => {
                match err.rejection() {
                    Some(message) => {
                        info!(?command, message, "Human action refused");
                        self.renderer.notice(message);
                    }
                    None => warn!(?command, error = %err, "Human action failed"),
                }
                return;
            }
        };

        let human = self.config.human;
        if matches!(command, Command::Bid(_))
            && reply.requires_trump_choice()
            && reply.bidder_id.map_or(true, |bidder| bidder == human)
        {
            info!(bid = ?reply.bid, "Contract won, trump choice needed");
            self.renderer.prompt_trump(human);
            return;
        }

        self.fetch_state(FetchOrigin::Resync);
        if reply.trick_complete {
            self.scheduler
                .after(self.config.timings.trick_settle_resync, SessionEvent::DelayedResync);
        }
    }

    fn on_new_round_done(&mut self, result: Result<(), ClientError>) {
        match result {
            Ok(()) => {
                info!("New round started");
                self.state.reset();
                self.fetch_state(FetchOrigin::Resync);
            }
            Err(err) => match err.rejection() {
                Some(message) => self.renderer.notice(message),
                None => warn!(error = %err, "Starting a new round failed"),
            },
        }
    }
}
