use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use tokio::select;
use tokio::time::{self, Instant};

use crate::error::Error;
use crate::game::actor::SessionWideEvent;
use crate::game::actor_client::{SessionClient, SessionWideEventReceiver};
use crate::metrics::CONNECTED_CLIENTS;
use crate::websocket::message::{GameStateDto, WsMessageIn, WsMessageOut};
use crate::websocket::{close, parse_message, send_error, send_message, send_message_string};

/// Bridges one WebSocket with the session it drives.
/// Client commands go to the session and every new state is pushed back.
pub struct ConnectionActor {
    session: SessionClient,
    session_wide_event_receiver: SessionWideEventReceiver,
    websocket: WebSocket,
    ping_timeout: Duration,
}

impl ConnectionActor {
    pub async fn create(session: SessionClient, mut websocket: WebSocket, ping_timeout: Duration) {
        match session.connect().await {
            Ok(session_wide_event_receiver) => {
                ConnectionActor {
                    session,
                    session_wide_event_receiver,
                    websocket,
                    ping_timeout,
                }
                .start()
                .await
            }
            Err(error) => {
                send_error(&mut websocket, &error).await;
                close(websocket).await;
            }
        }
    }

    async fn start(mut self) {
        CONNECTED_CLIENTS.inc();

        // Only client messages push the deadline, session broadcasts don't
        let silence_deadline = time::sleep(self.ping_timeout);
        tokio::pin!(silence_deadline);

        loop {
            select! {
                session_wide_event = self.session_wide_event_receiver.next() => {
                    if let Err(error) = self.receive_session_wide_event(session_wide_event).await {
                        send_error(&mut self.websocket, &error).await;
                        if ConnectionActor::should_close_websocket(&error) {
                            break;
                        }
                    }
                },
                websocket_message = self.websocket.recv() => {
                    silence_deadline.as_mut().reset(Instant::now() + self.ping_timeout);
                    if let Err(error) = self.receive_websocket_message(websocket_message).await {
                        send_error(&mut self.websocket, &error).await;
                        if ConnectionActor::should_close_websocket(&error) {
                            break;
                        }
                    }
                },
                _ = &mut silence_deadline => {
                    let error = self.connection_lost("connection timed out; missing 'ping' messages");
                    send_error(&mut self.websocket, &error).await;
                    break;
                },
            }
        }

        close(self.websocket).await;
        CONNECTED_CLIENTS.dec();
    }

    fn should_close_websocket(error: &Error) -> bool {
        match error {
            Error::Internal(_) => true,
            Error::WebsocketClosed(_) => true,
            Error::UnprocessableMessage(_, _) => false,
            Error::Domain(_) => false,
        }
    }

    async fn receive_session_wide_event(
        &mut self,
        session_wide_event: Result<SessionWideEvent, Error>,
    ) -> Result<(), Error> {
        match session_wide_event {
            Ok(SessionWideEvent::State(view)) => {
                send_message(
                    &mut self.websocket,
                    &WsMessageOut::GameState(GameStateDto::from(view)),
                )
                .await
            }
            Err(error) => Err(error),
        }
    }

    async fn receive_websocket_message(
        &mut self,
        websocket_message: Option<Result<Message, axum::Error>>,
    ) -> Result<(), Error> {
        match websocket_message {
            Some(Ok(Message::Text(txt))) => match txt.as_str() {
                "ping" => send_message_string(&mut self.websocket, "pong").await,
                message => match parse_message(message)? {
                    WsMessageIn::SetupTeams { teams } => self.session.setup_teams(teams).await,
                    WsMessageIn::SubmitWords { words } => self.session.submit_words(words).await,
                    WsMessageIn::StartTurn => self.session.start_turn().await,
                    WsMessageIn::GotIt => self.session.correct_guess().await,
                    WsMessageIn::Skip => self.session.skip().await,
                    WsMessageIn::NextTurn => self.session.next_turn().await,
                    WsMessageIn::ContinueToNextRound => {
                        self.session.continue_to_next_round().await
                    }
                    WsMessageIn::PlayAgain => self.session.play_again().await,
                },
            },
            // browser said "close"
            Some(Ok(Message::Close(_))) => {
                Err(self.connection_lost("browser sent 'Close' websocket frame"))
            }
            // websocket was closed
            None => Err(self.connection_lost("other end of websocket was closed abruptly")),
            Some(Err(error)) => Err(Error::UnprocessableMessage(
                "Message cannot be loaded".to_string(),
                error.to_string(),
            )),
            Some(Ok(_)) => Err(Error::UnprocessableMessage(
                "Unsupported message type".to_string(),
                "Unsupported message type".to_string(),
            )),
        }
    }

    fn connection_lost(&self, reason: &str) -> Error {
        log::info!("Connection with the client lost. Reason: '{reason}'. Stopping connection actor.");
        Error::WebsocketClosed(reason.to_string())
    }
}
