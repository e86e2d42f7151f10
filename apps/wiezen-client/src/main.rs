use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use wiezen_client::domain::{CardId, PlayerId};
use wiezen_client::telemetry;
use wiezen_client::view::HandView;
use wiezen_client::{
    ClientError, Command, HttpRemote, RemoteConfig, RemoteGame, RenderFrame, Renderer, Roster,
    SessionConfig, SyncTimings, TableSession, TrickAreaUpdate,
};

#[derive(Parser)]
#[command(name = "wiezen-client")]
#[command(about = "Follow a Wiezen table and play the human seat")]
struct Args {
    /// Base URL of the rules server
    #[arg(long, env = "WIEZEN_BASE_URL", default_value = wiezen_client::config::remote::DEFAULT_BASE_URL)]
    base_url: String,

    /// Game session to follow
    #[arg(long, env = "WIEZEN_GAME_ID")]
    game_id: i64,

    /// Human player id; defaults to the first human in the roster
    #[arg(long)]
    player: Option<PlayerId>,

    /// Show every hand face up
    #[arg(long)]
    reveal_hands: bool,

    /// Per-request timeout towards the rules server, in milliseconds
    #[arg(long, env = "WIEZEN_REQUEST_TIMEOUT_MS", default_value_t = 10_000)]
    request_timeout_ms: u64,
}

/// Draws the table as structured log lines.
struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &RenderFrame) {
        let table = &frame.table;
        info!(
            round = table.round_number,
            trick = table.trick_number,
            phase = ?table.phase,
            trump = table.trump.as_ref().map(|t| t.label.as_str()),
            acting = ?table.acting.map(|a| a.player_id),
            completed_trick = frame.showing_completed_trick,
            "Table"
        );
        for seat in &table.seats {
            let hand = match &seat.hand {
                HandView::Open(cards) => cards
                    .iter()
                    .map(|c| {
                        if c.playable {
                            format!("*{}", c.card)
                        } else {
                            c.card.to_string()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" "),
                HandView::Hidden { count } => format!("{count} hidden"),
            };
            info!(
                player_id = seat.player_id,
                name = %seat.name,
                score = seat.score,
                dealer = seat.is_dealer,
                acting = seat.is_acting,
                tricks = ?seat.tricks,
                bids = ?seat.bubbles.iter().map(|b| b.name()).collect::<Vec<_>>(),
                %hand,
                "Seat"
            );
        }
        if let Some(text) = &table.announcement {
            info!(%text, "Announcement");
        }
        if let Some(panel) = &table.bidding {
            let options: Vec<_> = panel
                .options
                .iter()
                .filter(|o| o.enabled)
                .map(|o| o.bid.name())
                .collect();
            info!(mode = ?panel.mode, ?options, "Your bid");
        }
        if let Some(over) = &table.round_over {
            info!(everyone_passed = over.everyone_passed, "Round over, type new-round");
        }
        self.render_trick(&frame.trick);
    }

    fn render_trick(&mut self, update: &TrickAreaUpdate) {
        match update {
            TrickAreaUpdate::Unchanged => {}
            TrickAreaUpdate::Cleared => info!("Trick area cleared"),
            TrickAreaUpdate::Rebuilt(cards) => {
                let plays: Vec<_> = cards
                    .iter()
                    .map(|c| format!("{}:{}", c.play.player_id, c.play.card))
                    .collect();
                info!(?plays, "Trick");
            }
        }
    }

    fn legal_moves(&mut self, player: PlayerId, cards: &[CardId]) {
        let cards: Vec<_> = cards.iter().map(CardId::as_str).collect();
        info!(player, ?cards, "Your legal moves");
    }

    fn notice(&mut self, message: &str) {
        warn!(message, "Notice");
    }

    fn prompt_trump(&mut self, player: PlayerId) {
        info!(player, "Choose trump: trump <Heart|Diamond|Club|Spade>");
    }
}

#[tokio::main]
async fn main() {
    telemetry::init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!(error = %e, "Client stopped");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ClientError> {
    let timings = SyncTimings::from_env()?;
    let remote_config = RemoteConfig::new(&args.base_url, args.game_id)?
        .with_request_timeout(Duration::from_millis(args.request_timeout_ms));
    let remote = Arc::new(HttpRemote::new(remote_config)?);

    let initial = remote.state().await?;
    let roster = Roster::new(initial.players.clone());
    let human = match args.player.or_else(|| roster.human().map(|p| p.id)) {
        Some(id) if roster.by_id(id).is_some() => id,
        Some(id) => return Err(ClientError::config(format!("Player {id} is not at this table"))),
        None => return Err(ClientError::config("No human player at this table")),
    };
    info!(game_id = args.game_id, human, "Joining table");

    let config = SessionConfig::new(human, roster)
        .with_timings(timings)
        .with_reveal_hands(args.reveal_hands || initial.game.as_ref().is_some_and(|g| g.debug_mode));
    let (session, handle) = TableSession::new(config, remote, LogRenderer);

    let shutdown = CancellationToken::new();
    let session_task = tokio::spawn(session.run(shutdown.clone()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        warn!(error = %e, "Reading stdin failed");
                        break;
                    }
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "quit" {
                    break;
                }
                match line.parse::<Command>() {
                    Ok(command) => handle.send(command)?,
                    Err(reason) => warn!(%reason, "Ignoring input"),
                }
            }
        }
    }

    shutdown.cancel();
    session_task
        .await
        .map_err(|e| ClientError::aborted(format!("session task: {e}")))?;
    Ok(())
}
