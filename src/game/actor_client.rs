use tokio::sync::broadcast;
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::error::Error;
use crate::game::actor::{SessionCommand, SessionEvent, SessionWideEvent};
use crate::game::team::{TeamSetup, TEAM_COUNT};

#[derive(Clone, Debug)]
pub struct SessionClient {
    pub(super) session_tx: Sender<SessionCommand>,
}

impl SessionClient {
    pub async fn connect(&self) -> Result<SessionWideEventReceiver, Error> {
        let (tx, rx): (OneshotSender<SessionEvent>, OneshotReceiver<SessionEvent>) =
            oneshot::channel();

        self.session_tx
            .send(SessionCommand::Connect { response_tx: tx })
            .await
            .map_err(|error| {
                Error::log_and_create_internal(&format!(
                    "The Session is not alive. Can't connect to it. Error: '{error}'."
                ))
            })?;

        match rx.await {
            Ok(SessionEvent::Connected { broadcast_rx }) => {
                Ok(SessionWideEventReceiver { broadcast_rx })
            }
            Ok(SessionEvent::Error { error }) => Err(error),
            _ => Err(Error::log_and_create_internal(
                "Sent a SessionCommand::Connect to the Session, but the Session channel died.",
            )),
        }
    }

    pub async fn setup_teams(&self, teams: [TeamSetup; TEAM_COUNT]) -> Result<(), Error> {
        self.request("SetupTeams", |response_tx| SessionCommand::SetupTeams {
            teams,
            response_tx,
        })
        .await
    }

    pub async fn submit_words(&self, words: Vec<String>) -> Result<(), Error> {
        self.request("SubmitWords", |response_tx| SessionCommand::SubmitWords {
            words,
            response_tx,
        })
        .await
    }

    pub async fn start_turn(&self) -> Result<(), Error> {
        self.request("StartTurn", |response_tx| SessionCommand::StartTurn {
            response_tx,
        })
        .await
    }

    pub async fn correct_guess(&self) -> Result<(), Error> {
        self.request("CorrectGuess", |response_tx| {
            SessionCommand::CorrectGuess { response_tx }
        })
        .await
    }

    pub async fn skip(&self) -> Result<(), Error> {
        self.request("Skip", |response_tx| SessionCommand::Skip { response_tx })
            .await
    }

    pub async fn next_turn(&self) -> Result<(), Error> {
        self.request("NextTurn", |response_tx| SessionCommand::NextTurn {
            response_tx,
        })
        .await
    }

    pub async fn continue_to_next_round(&self) -> Result<(), Error> {
        self.request("ContinueToNextRound", |response_tx| {
            SessionCommand::ContinueToNextRound { response_tx }
        })
        .await
    }

    pub async fn play_again(&self) -> Result<(), Error> {
        self.request("PlayAgain", |response_tx| SessionCommand::PlayAgain {
            response_tx,
        })
        .await
    }

    async fn request<F>(&self, name: &str, command: F) -> Result<(), Error>
    where
        F: FnOnce(OneshotSender<SessionEvent>) -> SessionCommand,
    {
        let (tx, rx): (OneshotSender<SessionEvent>, OneshotReceiver<SessionEvent>) =
            oneshot::channel();

        self.session_tx.send(command(tx)).await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "Tried to send SessionCommand::{name} but SessionActor is not listening. Error: '{error}'."
            ))
        })?;

        match rx.await {
            Ok(SessionEvent::Ok) => Ok(()),
            Ok(SessionEvent::Error { error }) => Err(error),
            Ok(unexpected_event) => Err(Error::log_and_create_internal(&format!(
                "Received an unexpected response to SessionCommand::{name}. Event: '{unexpected_event}'."
            ))),
            Err(error) => Err(Error::log_and_create_internal(&format!(
                "The Session dropped the response to SessionCommand::{name}. Error: '{error}'."
            ))),
        }
    }
}

pub struct SessionWideEventReceiver {
    broadcast_rx: broadcast::Receiver<SessionWideEvent>,
}

impl SessionWideEventReceiver {
    pub async fn next(&mut self) -> Result<SessionWideEvent, Error> {
        self.broadcast_rx.recv().await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "The broadcast channel with the Session has been closed. Error: {error}."
            ))
        })
    }
}
