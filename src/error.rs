use thiserror::Error;

/// The four failure categories every [`GameError`] maps onto.
///
/// Callers that do not care about the precise condition can branch on
/// [`GameError::kind`] instead of matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A name or value failed validation before touching any state.
    Validation,
    /// The operation would create a duplicate machine, player or score.
    Conflict,
    /// A referenced machine, player or score does not exist.
    NotFound,
    /// The operation is not valid in the current lifecycle state.
    State,
}

/// Failure of a single game operation.
///
/// Every operation either succeeds or fails with exactly one of these,
/// without having mutated any state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A machine was given an empty name.
    #[error("the machine must have a name")]
    EmptyMachineName,
    /// A machine was given a zero expected time.
    #[error("the expected time of the machine must be greater than zero")]
    ZeroExpectedTime,
    /// A player was given an empty name.
    #[error("the player must have a name")]
    EmptyPlayerName,
    /// A player name contains whitespace.
    #[error("player names must not contain whitespace: {0:?}")]
    WhitespaceInPlayerName(String),
    /// A machine with this name already exists.
    #[error("the machine {0} already exists")]
    DuplicateMachine(String),
    /// A player with this name already exists.
    #[error("the player {0} already exists")]
    DuplicatePlayer(String),
    /// This player already has a score on this machine.
    #[error("score for {player} on {machine} already exists")]
    DuplicateScore {
        /// Machine name.
        machine: String,
        /// Player name.
        player: String,
    },
    /// No machine with this name has been added.
    #[error("machine {0} not recognized")]
    UnknownMachine(String),
    /// No player with this name has been added.
    #[error("player {0} not recognized")]
    UnknownPlayer(String),
    /// No score is recorded for this (machine, player) pair.
    #[error("no score recorded for {player} on {machine}")]
    ScoreNotFound {
        /// Machine name.
        machine: String,
        /// Player name.
        player: String,
    },
    /// The game is running and the operation requires the setup phase.
    #[error("the game has already been started")]
    AlreadyStarted,
    /// The game is in setup and the operation requires it to be running.
    #[error("the game has not been started")]
    NotStarted,
    /// `start` was called with an empty machine pool.
    #[error("there must be at least one machine")]
    NoMachines,
    /// `start` was called with an empty player pool.
    #[error("there must be at least one player")]
    NoPlayers,
    /// The machine ready flag already has the requested value.
    #[error("machine {name} is already {}", ready_label(.ready))]
    MachineReadyUnchanged {
        /// Machine name.
        name: String,
        /// The value the flag already has.
        ready: bool,
    },
    /// The player ready flag already has the requested value.
    #[error("player {name} is already {}", ready_label(.ready))]
    PlayerReadyUnchanged {
        /// Player name.
        name: String,
        /// The value the flag already has.
        ready: bool,
    },
}

fn ready_label(ready: &bool) -> &'static str {
    if *ready {
        "ready"
    } else {
        "busy"
    }
}

impl GameError {
    /// The category this failure belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::EmptyMachineName
            | GameError::ZeroExpectedTime
            | GameError::EmptyPlayerName
            | GameError::WhitespaceInPlayerName(_) => ErrorKind::Validation,
            GameError::DuplicateMachine(_)
            | GameError::DuplicatePlayer(_)
            | GameError::DuplicateScore { .. } => ErrorKind::Conflict,
            GameError::UnknownMachine(_)
            | GameError::UnknownPlayer(_)
            | GameError::ScoreNotFound { .. } => ErrorKind::NotFound,
            GameError::AlreadyStarted
            | GameError::NotStarted
            | GameError::NoMachines
            | GameError::NoPlayers
            | GameError::MachineReadyUnchanged { .. }
            | GameError::PlayerReadyUnchanged { .. } => ErrorKind::State,
        }
    }
}
