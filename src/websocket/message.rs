use serde::{Deserialize, Serialize};

use crate::game::game_fsm::GameFsmState;
use crate::game::round_fsm::RoundFsmState;
use crate::game::team::{TeamSetup, TEAM_COUNT};
use crate::game::view::{GameView, Outcome, RoundView, TeamView, WordEntryView};

#[derive(Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum WsMessageIn {
    SetupTeams { teams: [TeamSetup; TEAM_COUNT] },
    SubmitWords { words: Vec<String> },
    StartTurn,
    GotIt,
    Skip,
    NextTurn,
    ContinueToNextRound,
    PlayAgain,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum WsMessageOut {
    Error {
        code: String,
        title: String,
        detail: String,
    },
    GameState(GameStateDto),
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GameStateDto {
    pub phase: String,
    pub teams: Vec<TeamDto>,
    pub word_entry: Option<WordEntryDto>,
    pub round: Option<RoundDto>,
    pub outcome: Option<OutcomeDto>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TeamDto {
    pub name: String,
    pub players: Vec<String>,
    pub score: u32,
    pub round_scores: Vec<u32>,
    pub total_score: u32,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WordEntryDto {
    pub player_name: String,
    pub team_name: String,
    pub ordinal: usize,
    pub total_players: usize,
    pub min_words: usize,
    pub max_words: usize,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RoundDto {
    pub number: u8,
    pub name: String,
    pub instructions: String,
    pub icon: String,
    pub turn_state: String,
    pub current_team_index: usize,
    pub current_team_name: String,
    pub current_player_name: String,
    pub time_remaining: u32,
    pub time_running_low: bool,
    pub current_word: Option<String>,
    pub words_remaining: usize,
    pub turns_completed: usize,
    pub total_turns: usize,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum OutcomeDto {
    #[serde(rename_all = "camelCase")]
    Winner { team_index: usize, name: String },
    Tie,
}

impl From<GameView> for GameStateDto {
    fn from(view: GameView) -> Self {
        GameStateDto {
            phase: phase_to_string(view.phase),
            teams: view.teams.into_iter().map(TeamDto::from).collect(),
            word_entry: view.word_entry.map(WordEntryDto::from),
            round: view.round.map(RoundDto::from),
            outcome: view.outcome.map(OutcomeDto::from),
        }
    }
}

impl From<TeamView> for TeamDto {
    fn from(team: TeamView) -> Self {
        TeamDto {
            name: team.name,
            players: team.players,
            score: team.score,
            round_scores: team.round_scores,
            total_score: team.total_score,
        }
    }
}

impl From<WordEntryView> for WordEntryDto {
    fn from(word_entry: WordEntryView) -> Self {
        WordEntryDto {
            player_name: word_entry.player_name,
            team_name: word_entry.team_name,
            ordinal: word_entry.ordinal,
            total_players: word_entry.total_players,
            min_words: word_entry.min_words,
            max_words: word_entry.max_words,
        }
    }
}

impl From<RoundView> for RoundDto {
    fn from(round: RoundView) -> Self {
        RoundDto {
            number: round.rule.number,
            name: round.rule.name.to_string(),
            instructions: round.rule.instructions.to_string(),
            icon: round.rule.icon.to_string(),
            turn_state: turn_state_to_string(round.turn_state),
            current_team_index: round.current_team_index,
            current_team_name: round.current_team_name,
            current_player_name: round.current_player_name,
            time_remaining: round.time_remaining,
            time_running_low: round.time_running_low,
            current_word: round.current_word,
            words_remaining: round.words_remaining,
            turns_completed: round.turns_completed,
            total_turns: round.total_turns,
        }
    }
}

impl From<Outcome> for OutcomeDto {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Winner { team_index, name } => OutcomeDto::Winner { team_index, name },
            Outcome::Tie => OutcomeDto::Tie,
        }
    }
}

pub fn phase_to_string(phase: GameFsmState) -> String {
    match phase {
        GameFsmState::Setup => "setup",
        GameFsmState::WordEntry => "wordEntry",
        GameFsmState::Gameplay => "gameplay",
        GameFsmState::RoundResults => "roundResults",
        GameFsmState::FinalResults => "finalResults",
    }
    .to_string()
}

pub fn turn_state_to_string(state: RoundFsmState) -> String {
    match state {
        RoundFsmState::AwaitingTurnStart => "awaitingTurnStart",
        RoundFsmState::TurnActive => "turnActive",
        RoundFsmState::TurnExpired => "turnExpired",
        RoundFsmState::RoundComplete => "roundComplete",
    }
    .to_string()
}
