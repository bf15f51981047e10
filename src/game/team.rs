use serde::Deserialize;

use crate::error::domain_error::DomainError;
use crate::error::Error;

pub const TEAM_COUNT: usize = 2;
pub const MIN_PLAYERS_PER_TEAM: usize = 2;
pub const MAX_PLAYERS_PER_TEAM: usize = 4;

/// Raw team data as typed in the setup form.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TeamSetup {
    pub name: String,
    pub players: Vec<String>,
}

impl TeamSetup {
    pub fn new(name: &str, players: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            players: players.iter().map(|player| player.to_string()).collect(),
        }
    }

    fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            players: self
                .players
                .into_iter()
                .map(|player| player.trim().to_string())
                .filter(|player| !player.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub name: String,
    pub players: Vec<String>,
    /// Points scored in the round being played.
    pub score: u32,
    /// One entry per finished round.
    pub round_scores: Vec<u32>,
}

impl Team {
    fn new(setup: TeamSetup) -> Self {
        Self {
            name: setup.name,
            players: setup.players,
            score: 0,
            round_scores: Vec::default(),
        }
    }

    pub fn total_score(&self) -> u32 {
        self.round_scores.iter().sum::<u32>() + self.score
    }

    pub(crate) fn close_round(&mut self) {
        self.round_scores.push(self.score);
        self.score = 0;
    }
}

/// A player identified by their position, there is no standalone player entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerRef {
    pub team_index: usize,
    pub player_index: usize,
}

impl PlayerRef {
    pub fn new(team_index: usize, player_index: usize) -> Self {
        Self {
            team_index,
            player_index,
        }
    }

    pub fn name<'a>(&self, teams: &'a [Team]) -> Option<&'a str> {
        teams
            .get(self.team_index)
            .and_then(|team| team.players.get(self.player_index))
            .map(String::as_str)
    }
}

/// Trims the form input, drops blank player slots and checks the team constraints.
/// Nothing is created unless both teams are valid.
pub fn create_teams(setups: [TeamSetup; TEAM_COUNT]) -> Result<Vec<Team>, Error> {
    let setups = setups.map(TeamSetup::normalized);

    if let Some(position) = setups.iter().position(|setup| setup.name.is_empty()) {
        return Err(DomainError::MissingTeamName(position + 1).into());
    }

    for (position, setup) in setups.iter().enumerate() {
        if setup.players.len() < MIN_PLAYERS_PER_TEAM {
            return Err(DomainError::NotEnoughPlayers {
                team: position + 1,
                actual: setup.players.len(),
                minimum: MIN_PLAYERS_PER_TEAM,
            }
            .into());
        }
        if setup.players.len() > MAX_PLAYERS_PER_TEAM {
            return Err(DomainError::TooManyPlayers {
                team: position + 1,
                actual: setup.players.len(),
                maximum: MAX_PLAYERS_PER_TEAM,
            }
            .into());
        }
    }

    let [first, second] = setups;
    if first.players.len() != second.players.len() {
        return Err(DomainError::UnequalTeamSizes(first.players.len(), second.players.len()).into());
    }

    Ok(vec![Team::new(first), Team::new(second)])
}

/// Order in which players type their words: first player of each team, then the second ones, and so on.
pub fn word_entry_order(teams: &[Team]) -> Vec<PlayerRef> {
    let longest_team = teams
        .iter()
        .map(|team| team.players.len())
        .max()
        .unwrap_or_default();

    (0..longest_team)
        .flat_map(|player_index| {
            teams
                .iter()
                .enumerate()
                .filter(move |(_, team)| player_index < team.players.len())
                .map(move |(team_index, _)| PlayerRef::new(team_index, player_index))
        })
        .collect()
}
