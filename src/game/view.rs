use crate::game::game_fsm::GameFsmState;
use crate::game::round::RoundRule;
use crate::game::round_fsm::RoundFsmState;

/// Seconds left at which the countdown is shown as running low.
pub const TIME_RUNNING_LOW_SECONDS: u32 = 10;

/// Everything the presentation layer needs to draw the current screen.
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub phase: GameFsmState,
    pub teams: Vec<TeamView>,
    pub word_entry: Option<WordEntryView>,
    pub round: Option<RoundView>,
    pub outcome: Option<Outcome>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamView {
    pub name: String,
    pub players: Vec<String>,
    pub score: u32,
    pub round_scores: Vec<u32>,
    pub total_score: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordEntryView {
    pub player_name: String,
    pub team_name: String,
    /// 1-based position of the player in the entry order.
    pub ordinal: usize,
    pub total_players: usize,
    pub min_words: usize,
    pub max_words: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundView {
    pub rule: RoundRule,
    pub turn_state: RoundFsmState,
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

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Winner { team_index: usize, name: String },
    Tie,
}
