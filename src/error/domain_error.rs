use thiserror::Error;

use crate::game::game_fsm::GameFsmState;
use crate::game::round_fsm::RoundFsmState;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("Please enter names for both teams. MissingTeam: '{0}'.")]
    MissingTeamName(usize),
    #[error("Team {team} needs at least {minimum} players. ActualPlayers: '{actual}'.")]
    NotEnoughPlayers {
        team: usize,
        actual: usize,
        minimum: usize,
    },
    #[error("Team {team} can have no more than {maximum} players. ActualPlayers: '{actual}'.")]
    TooManyPlayers {
        team: usize,
        actual: usize,
        maximum: usize,
    },
    #[error("Both teams must have the same number of players. Team1Players: '{0}', Team2Players: '{1}'.")]
    UnequalTeamSizes(usize, usize),
    #[error("Please enter at least {minimum} words. Nickname: '{nickname}', ActualWords: '{actual}'.")]
    NotEnoughWords {
        nickname: String,
        actual: usize,
        minimum: usize,
    },
    #[error("Please enter no more than {maximum} words. Nickname: '{nickname}', ActualWords: '{actual}'.")]
    TooManyWords {
        nickname: String,
        actual: usize,
        maximum: usize,
    },
    #[error(
        "Please enter unique words (no duplicates). Nickname: '{nickname}', RepeatedWords: '{}'.", .repeated_words.join(",")
    )]
    RepeatedWords {
        nickname: String,
        repeated_words: Vec<String>,
    },
    #[error("Invalid phase for this action. ActualPhase: '{0}', ExpectedPhase: '{1}'.")]
    InvalidPhase(GameFsmState, GameFsmState),
    #[error("The action '{action}' is not allowed in the current turn state. ActualState: '{actual}'.")]
    InvalidTurnState {
        action: String,
        actual: RoundFsmState,
    },
}
