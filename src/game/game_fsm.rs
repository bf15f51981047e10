use std::fmt;

use rust_fsm::state_machine;

/*
 * Setup
 * WordEntry (every player submits their words)
 * Gameplay
 *    Last round finished => FinalResults, otherwise RoundResults
 * RoundResults => Gameplay (next round)
 * FinalResults => Setup (play again)
 */
state_machine! {
    derive(Debug, Clone, Copy, PartialEq, Eq)
    pub GameFsm(Setup)

    Setup => {
        TeamsConfigured => WordEntry
    },
    WordEntry => {
        AllWordsSubmitted => Gameplay
    },
    Gameplay => {
        RoundCompleted => RoundResults,
        LastRoundCompleted => FinalResults,
    },
    RoundResults => {
        ContinueToNextRound => Gameplay
    },
    FinalResults => {
        PlayAgain => Setup
    }
}

impl fmt::Display for GameFsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
