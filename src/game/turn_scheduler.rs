use crate::game::team::{PlayerRef, TEAM_COUNT};

/// Decides whose turn it is. Teams strictly alternate and every team walks
/// through its own players in order, so each player plays exactly once per round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnScheduler {
    team_sizes: [usize; TEAM_COUNT],
    current_round: u8,
    current_team_index: usize,
    current_player_index: usize,
    // Next player to play for every team.
    next_player_indexes: [usize; TEAM_COUNT],
    turns_completed_in_round: usize,
}

impl TurnScheduler {
    pub fn new(team_sizes: [usize; TEAM_COUNT]) -> Self {
        let mut scheduler = Self {
            team_sizes,
            current_round: 1,
            current_team_index: 0,
            current_player_index: 0,
            next_player_indexes: [0; TEAM_COUNT],
            turns_completed_in_round: 0,
        };
        scheduler.reset_for_round();
        scheduler
    }

    pub fn current_turn(&self) -> PlayerRef {
        PlayerRef::new(self.current_team_index, self.current_player_index)
    }

    pub fn current_round(&self) -> u8 {
        self.current_round
    }

    pub fn turns_completed_in_round(&self) -> usize {
        self.turns_completed_in_round
    }

    pub fn total_turns_in_round(&self) -> usize {
        self.team_sizes.iter().sum()
    }

    pub fn advance(&mut self) {
        let team_size = self.team_sizes[self.current_team_index].max(1);
        self.next_player_indexes[self.current_team_index] =
            (self.current_player_index + 1) % team_size;

        self.current_team_index = (self.current_team_index + 1) % TEAM_COUNT;

        let next_player_index = self.next_player_indexes[self.current_team_index];
        self.current_player_index = if next_player_index >= self.team_sizes[self.current_team_index] {
            0
        } else {
            next_player_index
        };
    }

    pub fn reset_for_round(&mut self) {
        self.current_team_index = 0;
        self.current_player_index = 0;
        self.next_player_indexes = [0; TEAM_COUNT];
        self.turns_completed_in_round = 0;
    }

    pub fn start_next_round(&mut self) {
        self.current_round += 1;
        self.reset_for_round();
    }

    /// Returns `true` when the turn just recorded was the last one of the round.
    pub fn record_turn_completed(&mut self) -> bool {
        if self.turns_completed_in_round < self.total_turns_in_round() {
            self.turns_completed_in_round += 1;
        }
        self.turns_completed_in_round == self.total_turns_in_round()
    }
}
