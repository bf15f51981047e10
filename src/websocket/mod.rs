pub mod message;

use axum::extract::ws::{Message, WebSocket};
use serde::Serialize;

use crate::error::domain_error::DomainError;
use crate::error::Error;
use message::{WsMessageIn, WsMessageOut};

pub fn parse_message(message: &str) -> Result<WsMessageIn, Error> {
    serde_json::from_str(message).map_err(|error| {
        log::info!("Unprocessable message. Message: '{message}', Error: '{error}'.");
        Error::UnprocessableMessage(message.to_string(), error.to_string())
    })
}

pub async fn send_message<T>(websocket: &mut WebSocket, value: &T) -> Result<(), Error>
where
    T: ?Sized + Serialize,
{
    let message = serde_json::to_string(value).map_err(|error| {
        Error::log_and_create_internal(&format!(
            "Could not serialize the message. Error: '{error}'."
        ))
    })?;

    send_message_string(websocket, &message).await
}

pub async fn send_message_string(websocket: &mut WebSocket, message: &str) -> Result<(), Error> {
    websocket
        .send(Message::Text(message.to_string()))
        .await
        .map_err(|error| Error::WebsocketClosed(error.to_string()))
}

pub async fn send_error(websocket: &mut WebSocket, error: &Error) {
    if let Err(send_error) = send_message(websocket, &error_to_ws_error(error)).await {
        log::info!(
            "Could not send an error to the client. Error: '{error}', Reason: '{send_error}'."
        );
    }
}

pub async fn close(websocket: WebSocket) {
    if let Err(error) = websocket.close().await {
        log::info!("Could not close the WebSocket. Error: '{error}'.")
    }
}

pub fn error_to_ws_error(error: &Error) -> WsMessageOut {
    let (code, title) = match error {
        Error::Domain(domain_error) => match domain_error {
            DomainError::MissingTeamName(_) => {
                ("MISSING_TEAM_NAME", "Please enter names for both teams")
            }
            DomainError::NotEnoughPlayers { .. } => {
                ("NOT_ENOUGH_PLAYERS", "A team needs more players")
            }
            DomainError::TooManyPlayers { .. } => {
                ("TOO_MANY_PLAYERS", "A team has too many players")
            }
            DomainError::UnequalTeamSizes(_, _) => {
                ("UNEQUAL_TEAM_SIZES", "Both teams must have the same number of players")
            }
            DomainError::NotEnoughWords { .. } => ("NOT_ENOUGH_WORDS", "Not enough words"),
            DomainError::TooManyWords { .. } => ("TOO_MANY_WORDS", "Too many words"),
            DomainError::RepeatedWords { .. } => ("REPEATED_WORDS", "Please enter unique words"),
            DomainError::InvalidPhase(_, _) => {
                ("INVALID_PHASE", "Not allowed in this phase of the game")
            }
            DomainError::InvalidTurnState { .. } => {
                ("INVALID_TURN_STATE", "Not allowed in the current turn")
            }
        },
        Error::Internal(_) => ("INTERNAL_SERVER", "Internal Server error"),
        Error::UnprocessableMessage(_, _) => {
            ("UNPROCESSABLE_MESSAGE", "The message could not be processed")
        }
        Error::WebsocketClosed(_) => ("WEBSOCKET_CLOSED", "The websocket is closed"),
    };

    WsMessageOut::Error {
        code: code.to_string(),
        title: title.to_string(),
        detail: error.to_string(),
    }
}
