#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameError {
    #[error("a player named {0:?} is already at the table")]
    DuplicatePlayer(String),
    #[error("no player named {0:?} is at the table")]
    UnknownPlayer(String),
    #[error("at least 3 players are needed to start a game")]
    NotEnoughPlayers,
    #[error("starting dealer index {0} is outside the roster")]
    InvalidDealer(usize),
    #[error("the roster cannot change after the game has started")]
    RosterLocked,
    #[error("the game has not started yet")]
    NotStarted,
    #[error("the game has already started")]
    AlreadyStarted,
    #[error("the game is already finished")]
    GameOver,
    #[error("the game is not finished yet")]
    NotFinished,
    #[error("the final round has not been reached yet")]
    NotFinalRound,
    #[error("cannot advance past the final round; finish the game instead")]
    FinalRound,
    #[error("round {0} is not part of this game")]
    RoundOutOfRange(u32),
    #[error("tricks recorded for round {round} sum to {recorded}, expected {expected}")]
    TrickCountMismatch {
        round: u32,
        recorded: u32,
        expected: u32,
    },
    #[error("round {0} still has missing bids or tricks")]
    IncompleteRound(u32),
}
