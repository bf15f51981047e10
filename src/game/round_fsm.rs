use std::fmt;

use rust_fsm::state_machine;

// A fresh machine is created for every round.
state_machine! {
    derive(Debug, Clone, Copy, PartialEq, Eq)
    pub RoundFsm(AwaitingTurnStart)

    AwaitingTurnStart => {
        StartTurn => TurnActive,
        PoolAlreadyEmpty => RoundComplete,
    },
    TurnActive => {
        TimeUp => TurnExpired,
        PoolExhausted => TurnExpired,
    },
    TurnExpired => {
        NextPlayer => AwaitingTurnStart,
        AllPlayersPlayed => RoundComplete,
    }
}

impl fmt::Display for RoundFsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
