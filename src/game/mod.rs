pub mod actor;
pub mod actor_client;
pub mod game_fsm;
pub mod interval_ticker;
pub mod round;
pub mod round_fsm;
pub mod team;
pub mod timer;
pub mod turn_scheduler;
pub mod view;
pub mod word_pool;

use rust_fsm::StateMachine;

use crate::config::GameSettings;
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::game::game_fsm::{GameFsm, GameFsmInput, GameFsmState};
use crate::game::round::{RoundController, RoundProgress};
use crate::game::round_fsm::RoundFsmState;
use crate::game::team::{PlayerRef, Team, TeamSetup, TEAM_COUNT};
use crate::game::timer::{TickSource, Timer};
use crate::game::view::{
    GameView, Outcome, RoundView, TeamView, WordEntryView, TIME_RUNNING_LOW_SECONDS,
};
use crate::game::word_pool::{WordPool, MAX_WORDS_PER_PLAYER, MIN_WORDS_PER_PLAYER};

/// The whole state of one game, from team setup to final results.
pub struct GameSession<S: TickSource> {
    fsm: StateMachine<GameFsm>,
    teams: Vec<Team>,
    word_entry_order: Vec<PlayerRef>,
    word_entry_position: usize,
    word_pool: WordPool,
    round: RoundController<S>,
}

impl<S: TickSource> GameSession<S> {
    pub fn new(tick_source: S, settings: &GameSettings) -> Self {
        Self::with_word_pool(tick_source, settings, WordPool::new())
    }

    pub fn with_word_pool(tick_source: S, settings: &GameSettings, word_pool: WordPool) -> Self {
        Self {
            fsm: StateMachine::default(),
            teams: Vec::default(),
            word_entry_order: Vec::default(),
            word_entry_position: 0,
            word_pool,
            round: RoundController::new(Timer::new(tick_source), settings.turn_duration_seconds),
        }
    }

    pub fn state(&self) -> &GameFsmState {
        self.fsm.state()
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn word_pool(&self) -> &WordPool {
        &self.word_pool
    }

    pub fn round(&self) -> &RoundController<S> {
        &self.round
    }

    /// `true` while a player is on the clock, an empty pool closes the round without one.
    pub fn turn_in_progress(&self) -> bool {
        self.state() == &GameFsmState::Gameplay
            && self.round.state() == &RoundFsmState::TurnActive
    }

    pub fn current_word_entry_player(&self) -> Option<PlayerRef> {
        if self.state() == &GameFsmState::WordEntry {
            self.word_entry_order.get(self.word_entry_position).copied()
        } else {
            None
        }
    }

    pub fn setup_teams(&mut self, setups: [TeamSetup; TEAM_COUNT]) -> Result<(), Error> {
        self.ensure_phase(GameFsmState::Setup)?;

        let teams = team::create_teams(setups)?;
        self.word_entry_order = team::word_entry_order(&teams);
        self.word_entry_position = 0;
        self.teams = teams;
        log::info!(
            "Teams created. Teams: '{}'.",
            self.teams
                .iter()
                .map(|team| format!("{} ({})", team.name, team.players.join(",")))
                .collect::<Vec<String>>()
                .join(" vs ")
        );

        self.process_event(&GameFsmInput::TeamsConfigured)
    }

    /// Adds the words of the player whose turn it is to type, the last submission starts round one.
    pub fn submit_words(&mut self, words: Vec<String>) -> Result<(), Error> {
        self.ensure_phase(GameFsmState::WordEntry)?;

        let player = self.current_word_entry_player().ok_or_else(|| {
            Error::log_and_create_internal(&format!(
                "Word entry has no player left to submit. Position: '{}', Players: '{}'.",
                self.word_entry_position,
                self.word_entry_order.len()
            ))
        })?;
        let nickname = player.name(&self.teams).unwrap_or_default().to_string();

        self.word_pool.add_words(&nickname, words)?;
        self.word_entry_position += 1;

        if self.word_entry_position >= self.word_entry_order.len() {
            log::info!(
                "All players submitted their words. Words: '{}'.",
                self.word_pool.all_words().len()
            );
            self.process_event(&GameFsmInput::AllWordsSubmitted)?;
            self.round.begin_game(&self.teams, &mut self.word_pool);
        }
        Ok(())
    }

    pub fn start_turn(&mut self) -> Result<(), Error> {
        self.ensure_phase(GameFsmState::Gameplay)?;
        let progress = self
            .round
            .start_turn(&mut self.word_pool, &mut self.teams)?;
        self.check_round_completion(progress)
    }

    pub fn correct_guess(&mut self) -> Result<(), Error> {
        self.ensure_phase(GameFsmState::Gameplay)?;
        self.round
            .correct_guess(&mut self.word_pool, &mut self.teams)
    }

    pub fn skip(&mut self) -> Result<(), Error> {
        self.ensure_phase(GameFsmState::Gameplay)?;
        self.round.skip(&mut self.word_pool)
    }

    pub fn acknowledge_next_turn(&mut self) -> Result<(), Error> {
        self.ensure_phase(GameFsmState::Gameplay)?;
        let progress = self.round.acknowledge_next_turn(&mut self.teams)?;
        self.check_round_completion(progress)
    }

    /// Returns `true` when the tick changed the visible state.
    pub fn tick(&mut self, run: u64) -> Result<bool, Error> {
        if self.state() != &GameFsmState::Gameplay {
            return Ok(false);
        }
        self.round.tick(run)
    }

    pub fn continue_to_next_round(&mut self) -> Result<(), Error> {
        self.ensure_phase(GameFsmState::RoundResults)?;
        self.process_event(&GameFsmInput::ContinueToNextRound)?;
        self.round.begin_next_round(&mut self.word_pool);
        Ok(())
    }

    pub fn play_again(&mut self) -> Result<(), Error> {
        self.ensure_phase(GameFsmState::FinalResults)?;
        self.process_event(&GameFsmInput::PlayAgain)?;
        self.teams = Vec::default();
        self.word_entry_order = Vec::default();
        self.word_entry_position = 0;
        self.word_pool.clear();
        self.round.reset();
        Ok(())
    }

    /// Stops any countdown still running, the session is about to be dropped.
    pub fn shutdown(&mut self) {
        self.round.reset();
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if self.state() != &GameFsmState::FinalResults {
            return None;
        }
        let [first, second] = [self.teams.first()?, self.teams.get(1)?];
        Some(match first.total_score().cmp(&second.total_score()) {
            std::cmp::Ordering::Greater => Outcome::Winner {
                team_index: 0,
                name: first.name.clone(),
            },
            std::cmp::Ordering::Less => Outcome::Winner {
                team_index: 1,
                name: second.name.clone(),
            },
            std::cmp::Ordering::Equal => Outcome::Tie,
        })
    }

    pub fn view(&self) -> GameView {
        GameView {
            phase: *self.state(),
            teams: self
                .teams
                .iter()
                .map(|team| TeamView {
                    name: team.name.clone(),
                    players: team.players.clone(),
                    score: team.score,
                    round_scores: team.round_scores.clone(),
                    total_score: team.total_score(),
                })
                .collect(),
            word_entry: self.word_entry_view(),
            round: self.round_view(),
            outcome: self.outcome(),
        }
    }

    fn word_entry_view(&self) -> Option<WordEntryView> {
        let player = self.current_word_entry_player()?;
        Some(WordEntryView {
            player_name: player.name(&self.teams)?.to_string(),
            team_name: self.teams.get(player.team_index)?.name.clone(),
            ordinal: self.word_entry_position + 1,
            total_players: self.word_entry_order.len(),
            min_words: MIN_WORDS_PER_PLAYER,
            max_words: MAX_WORDS_PER_PLAYER,
        })
    }

    fn round_view(&self) -> Option<RoundView> {
        if !matches!(
            self.state(),
            GameFsmState::Gameplay | GameFsmState::RoundResults
        ) {
            return None;
        }
        let turn = self.round.current_turn();
        let turn_state = *self.round.state();
        let time_remaining = self.round.timer().time_remaining();
        Some(RoundView {
            rule: *self.round.rule(),
            turn_state,
            current_team_index: turn.team_index,
            current_team_name: self.teams.get(turn.team_index)?.name.clone(),
            current_player_name: turn.name(&self.teams)?.to_string(),
            time_remaining,
            time_running_low: turn_state == RoundFsmState::TurnActive
                && time_remaining <= TIME_RUNNING_LOW_SECONDS,
            current_word: self.round.current_word().map(str::to_string),
            words_remaining: self.word_pool.remaining(),
            turns_completed: self.round.scheduler().turns_completed_in_round(),
            total_turns: self.round.scheduler().total_turns_in_round(),
        })
    }

    fn check_round_completion(&mut self, progress: RoundProgress) -> Result<(), Error> {
        match progress {
            RoundProgress::InProgress => Ok(()),
            RoundProgress::RoundComplete if self.round.is_last_round() => {
                self.process_event(&GameFsmInput::LastRoundCompleted)
            }
            RoundProgress::RoundComplete => self.process_event(&GameFsmInput::RoundCompleted),
        }
    }

    fn ensure_phase(&self, expected: GameFsmState) -> Result<(), Error> {
        if self.state() == &expected {
            Ok(())
        } else {
            Err(Error::Domain(DomainError::InvalidPhase(
                *self.state(),
                expected,
            )))
        }
    }

    fn process_event(&mut self, event: &GameFsmInput) -> Result<(), Error> {
        match self.fsm.consume(event) {
            Ok(_) => {
                log::info!("Game phase changed. Phase: '{}'.", self.fsm.state());
                Ok(())
            }
            Err(error) => Err(Error::log_and_create_internal(&format!(
                "The fsm in state {:?} can't transition with an event {:?}. Error: '{error}'.",
                self.fsm.state(),
                event
            ))),
        }
    }
}
