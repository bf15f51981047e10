use rust_fsm::StateMachine;

use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::game::round_fsm::{RoundFsm, RoundFsmInput, RoundFsmState};
use crate::game::team::{PlayerRef, Team, TEAM_COUNT};
use crate::game::timer::{TickOutcome, TickSource, Timer};
use crate::game::turn_scheduler::TurnScheduler;
use crate::game::word_pool::{DrawnWord, WordPool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRule {
    pub number: u8,
    pub name: &'static str,
    pub instructions: &'static str,
    pub icon: &'static str,
}

pub const ROUNDS: [RoundRule; 2] = [
    RoundRule {
        number: 1,
        name: "Describe It",
        instructions: "Describe the word without saying it",
        icon: "💬",
    },
    RoundRule {
        number: 2,
        name: "One Word",
        instructions: "Say only ONE keyword (not the word itself)",
        icon: "🔤",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundProgress {
    InProgress,
    RoundComplete,
}

/// Drives the turns of the round being played: timer, word draws and scoring.
pub struct RoundController<S: TickSource> {
    fsm: StateMachine<RoundFsm>,
    scheduler: TurnScheduler,
    timer: Timer<S>,
    current_word: Option<DrawnWord>,
    turn_duration_seconds: u32,
}

impl<S: TickSource> RoundController<S> {
    pub fn new(timer: Timer<S>, turn_duration_seconds: u32) -> Self {
        Self {
            fsm: StateMachine::default(),
            scheduler: TurnScheduler::new([0; TEAM_COUNT]),
            timer,
            current_word: None,
            turn_duration_seconds,
        }
    }

    pub fn state(&self) -> &RoundFsmState {
        self.fsm.state()
    }

    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    pub fn timer(&self) -> &Timer<S> {
        &self.timer
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_ref().map(|drawn| drawn.word.as_str())
    }

    pub fn current_turn(&self) -> PlayerRef {
        self.scheduler.current_turn()
    }

    pub fn rule(&self) -> &'static RoundRule {
        let index = usize::from(self.scheduler.current_round().max(1)) - 1;
        &ROUNDS[index.min(ROUNDS.len() - 1)]
    }

    pub fn is_last_round(&self) -> bool {
        usize::from(self.scheduler.current_round()) >= ROUNDS.len()
    }

    pub fn begin_game(&mut self, teams: &[Team], pool: &mut WordPool) {
        let mut team_sizes = [0; TEAM_COUNT];
        for (size, team) in team_sizes.iter_mut().zip(teams) {
            *size = team.players.len();
        }
        self.scheduler = TurnScheduler::new(team_sizes);
        self.begin_round(pool);
    }

    pub fn begin_next_round(&mut self, pool: &mut WordPool) {
        self.scheduler.start_next_round();
        self.begin_round(pool);
    }

    fn begin_round(&mut self, pool: &mut WordPool) {
        self.timer.reset();
        self.fsm = StateMachine::default();
        self.current_word = None;
        pool.start_round();
        log::info!(
            "Round started. Round: '{}', Words: '{}', TotalTurns: '{}'.",
            self.scheduler.current_round(),
            pool.remaining(),
            self.scheduler.total_turns_in_round()
        );
    }

    /// Starts the countdown and shows the first word. An already empty pool ends the round instead.
    pub fn start_turn(
        &mut self,
        pool: &mut WordPool,
        teams: &mut [Team],
    ) -> Result<RoundProgress, Error> {
        self.ensure_state(RoundFsmState::AwaitingTurnStart, "startTurn")?;

        if pool.is_empty() {
            log::info!(
                "No words left when starting a turn, ending the round. Round: '{}'.",
                self.scheduler.current_round()
            );
            self.process_event(&RoundFsmInput::PoolAlreadyEmpty)?;
            self.close_round(teams);
            return Ok(RoundProgress::RoundComplete);
        }

        self.process_event(&RoundFsmInput::StartTurn)?;
        self.timer.start(self.turn_duration_seconds);
        self.current_word = pool.draw_random_word();
        let turn = self.scheduler.current_turn();
        log::info!(
            "Turn started. Round: '{}', Team: '{}', Player: '{}'.",
            self.scheduler.current_round(),
            turn.team_index,
            turn.player_index
        );
        Ok(RoundProgress::InProgress)
    }

    pub fn correct_guess(&mut self, pool: &mut WordPool, teams: &mut [Team]) -> Result<(), Error> {
        self.ensure_state(RoundFsmState::TurnActive, "gotIt")?;

        let index = self
            .current_word
            .as_ref()
            .map(|drawn| drawn.index)
            .ok_or_else(|| {
                Error::log_and_create_internal(
                    "Got a correct guess during an active turn without a word on display.",
                )
            })?;
        let team_index = self.scheduler.current_turn().team_index;
        let team = teams.get_mut(team_index).ok_or_else(|| {
            Error::log_and_create_internal(&format!(
                "The team of the current turn does not exist. TeamIndex: '{team_index}'."
            ))
        })?;

        pool.consume_word(index)?;
        self.current_word = None;
        team.score += 1;
        log::debug!(
            "Word guessed. Team: '{}', Score: '{}', WordsLeft: '{}'.",
            team.name,
            team.score,
            pool.remaining()
        );

        self.show_next_word(pool)
    }

    /// The shown word stays in the pool and another one is drawn.
    pub fn skip(&mut self, pool: &mut WordPool) -> Result<(), Error> {
        self.ensure_state(RoundFsmState::TurnActive, "skip")?;
        log::debug!("Word skipped. WordsLeft: '{}'.", pool.remaining());
        self.show_next_word(pool)
    }

    fn show_next_word(&mut self, pool: &mut WordPool) -> Result<(), Error> {
        match pool.draw_random_word() {
            Some(drawn) => {
                self.current_word = Some(drawn);
                Ok(())
            }
            None => {
                log::info!("No more words, ending the turn before the time is up.");
                self.current_word = None;
                self.timer.stop();
                self.process_event(&RoundFsmInput::PoolExhausted)
            }
        }
    }

    /// Returns `true` when the tick changed something worth showing.
    pub fn tick(&mut self, run: u64) -> Result<bool, Error> {
        match self.timer.tick_for(run) {
            TickOutcome::Ignored => Ok(false),
            TickOutcome::Running(_) => Ok(true),
            TickOutcome::Expired => {
                log::info!("Time is up. Round: '{}'.", self.scheduler.current_round());
                self.timer.stop();
                self.process_event(&RoundFsmInput::TimeUp)?;
                Ok(true)
            }
        }
    }

    pub fn acknowledge_next_turn(&mut self, teams: &mut [Team]) -> Result<RoundProgress, Error> {
        self.ensure_state(RoundFsmState::TurnExpired, "nextTurn")?;

        self.current_word = None;
        if self.scheduler.record_turn_completed() {
            self.process_event(&RoundFsmInput::AllPlayersPlayed)?;
            self.close_round(teams);
            Ok(RoundProgress::RoundComplete)
        } else {
            self.scheduler.advance();
            self.process_event(&RoundFsmInput::NextPlayer)?;
            Ok(RoundProgress::InProgress)
        }
    }

    pub fn reset(&mut self) {
        self.timer.reset();
        self.fsm = StateMachine::default();
        self.scheduler = TurnScheduler::new([0; TEAM_COUNT]);
        self.current_word = None;
    }

    fn close_round(&mut self, teams: &mut [Team]) {
        self.timer.stop();
        for team in teams.iter_mut() {
            team.close_round();
        }
        log::info!(
            "Round complete. Round: '{}', Scores: '{}'.",
            self.scheduler.current_round(),
            teams
                .iter()
                .map(|team| format!("{}={}", team.name, team.total_score()))
                .collect::<Vec<String>>()
                .join(",")
        );
    }

    fn ensure_state(&self, expected: RoundFsmState, action: &str) -> Result<(), Error> {
        if self.fsm.state() == &expected {
            Ok(())
        } else {
            Err(Error::Domain(DomainError::InvalidTurnState {
                action: action.to_string(),
                actual: *self.fsm.state(),
            }))
        }
    }

    fn process_event(&mut self, event: &RoundFsmInput) -> Result<(), Error> {
        self.fsm.consume(event).map(|_| ()).map_err(|error| {
            Error::log_and_create_internal(&format!(
                "The round fsm in state {:?} can't transition with an event {:?}. Error: '{error}'.",
                self.fsm.state(),
                event
            ))
        })
    }
}
