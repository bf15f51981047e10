use std::fmt::{Display, Formatter};

use tokio::sync::broadcast::error::SendError;
use tokio::sync::oneshot::Sender as OneshotSender;
use tokio::sync::{
    broadcast, mpsc,
    mpsc::{Receiver, Sender},
};

use crate::config::GameSettings;
use crate::error::Error;
use crate::game::actor_client::SessionClient;
use crate::game::interval_ticker::IntervalTicker;
use crate::game::team::{TeamSetup, TEAM_COUNT};
use crate::game::view::GameView;
use crate::game::GameSession;
use crate::metrics::{ACTIVE_SESSIONS, TURNS_PLAYED};

/// Owns one [`GameSession`] and applies every command and timer tick to it one at a time.
pub struct SessionActor {
    session: GameSession<IntervalTicker>,
    session_rx: Receiver<SessionCommand>,
    broadcast_tx: broadcast::Sender<SessionWideEvent>,
}

impl SessionActor {
    pub fn spawn(settings: GameSettings) -> SessionClient {
        let (session_tx, session_rx): (Sender<SessionCommand>, Receiver<SessionCommand>) =
            mpsc::channel(128);
        let (broadcast_tx, _): (
            broadcast::Sender<SessionWideEvent>,
            broadcast::Receiver<SessionWideEvent>,
        ) = broadcast::channel(32);

        let ticker = IntervalTicker::new(session_tx.downgrade(), settings.tick_interval());
        let session = GameSession::new(ticker, &settings);

        tokio::spawn(
            SessionActor {
                session,
                session_rx,
                broadcast_tx,
            }
            .start(),
        );

        SessionClient { session_tx }
    }

    async fn start(mut self) {
        ACTIVE_SESSIONS.inc();

        while let Some(command) = self.session_rx.recv().await {
            let response = match command {
                SessionCommand::Connect { response_tx } => {
                    let event = SessionEvent::Connected {
                        broadcast_rx: self.broadcast_tx.subscribe(),
                    };
                    if response_tx.send(event).is_err() {
                        log::error!("Sent SessionEvent::Connected but the response channel is closed.");
                    } else {
                        let _ = self.send_session_state();
                    }
                    continue;
                }
                SessionCommand::Tick { run } => {
                    match self.session.tick(run) {
                        Ok(true) => {
                            let _ = self.send_session_state();
                        }
                        Ok(false) => {}
                        Err(error) => {
                            log::error!("Could not apply a timer tick. Run: '{run}', Error: '{error}'.")
                        }
                    }
                    continue;
                }
                SessionCommand::SetupTeams { teams, response_tx } => {
                    (self.session.setup_teams(teams), response_tx)
                }
                SessionCommand::SubmitWords { words, response_tx } => {
                    (self.session.submit_words(words), response_tx)
                }
                SessionCommand::StartTurn { response_tx } => {
                    let result = self.session.start_turn();
                    if result.is_ok() && self.session.turn_in_progress() {
                        TURNS_PLAYED.inc();
                    }
                    (result, response_tx)
                }
                SessionCommand::CorrectGuess { response_tx } => {
                    (self.session.correct_guess(), response_tx)
                }
                SessionCommand::Skip { response_tx } => (self.session.skip(), response_tx),
                SessionCommand::NextTurn { response_tx } => {
                    (self.session.acknowledge_next_turn(), response_tx)
                }
                SessionCommand::ContinueToNextRound { response_tx } => {
                    (self.session.continue_to_next_round(), response_tx)
                }
                SessionCommand::PlayAgain { response_tx } => {
                    (self.session.play_again(), response_tx)
                }
            };

            let (result, response_tx) = response;
            let changed = result.is_ok();
            let event = match result {
                Ok(()) => SessionEvent::Ok,
                Err(error) => SessionEvent::Error { error },
            };
            if let Err(event) = response_tx.send(event) {
                log::error!("Sent {event} to the client but the response channel is closed.");
            }
            if changed {
                let _ = self.send_session_state();
            }
        }

        log::info!("Session channel has been dropped. Stopping session actor.");
        self.session.shutdown();
        ACTIVE_SESSIONS.dec();
    }

    fn send_session_state(&self) -> Result<usize, SendError<SessionWideEvent>> {
        self.broadcast_tx
            .send(SessionWideEvent::State(self.session.view()))
    }
}

pub(crate) enum SessionCommand {
    Connect {
        response_tx: OneshotSender<SessionEvent>,
    },
    Tick {
        run: u64,
    },
    SetupTeams {
        teams: [TeamSetup; TEAM_COUNT],
        response_tx: OneshotSender<SessionEvent>,
    },
    SubmitWords {
        words: Vec<String>,
        response_tx: OneshotSender<SessionEvent>,
    },
    StartTurn {
        response_tx: OneshotSender<SessionEvent>,
    },
    CorrectGuess {
        response_tx: OneshotSender<SessionEvent>,
    },
    Skip {
        response_tx: OneshotSender<SessionEvent>,
    },
    NextTurn {
        response_tx: OneshotSender<SessionEvent>,
    },
    ContinueToNextRound {
        response_tx: OneshotSender<SessionEvent>,
    },
    PlayAgain {
        response_tx: OneshotSender<SessionEvent>,
    },
}

#[derive(Debug)]
pub(crate) enum SessionEvent {
    Connected {
        broadcast_rx: broadcast::Receiver<SessionWideEvent>,
    },
    Ok,
    Error {
        error: Error,
    },
}

impl Display for SessionEvent {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                SessionEvent::Connected { .. } => "SessionEvent::Connected".to_string(),
                SessionEvent::Ok => "SessionEvent::Ok".to_string(),
                SessionEvent::Error { error } => format!("Error '{error}'"),
            }
        )
    }
}

#[derive(Clone, Debug)]
pub enum SessionWideEvent {
    State(GameView),
}
