use crate::error::GameError;

/// A pinball machine with a fixed expected occupancy time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    /// Unique machine name. May contain spaces.
    pub name: String,
    /// Expected time to finish one game on this machine. Immutable.
    pub expected_time: u32,
    /// Whether the machine is free for a new assignment.
    pub ready: bool,
}

impl Machine {
    pub(crate) fn new(name: String, expected_time: u32) -> Machine {
        Machine {
            name,
            expected_time,
            ready: true,
        }
    }
}

/// A tournament participant accumulating expected time across machines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Unique player name. Never contains whitespace.
    pub name: String,
    /// Sum of the expected times of every machine this player finished.
    pub expected_time_spent: u32,
    /// Whether the player is idle and can be assigned a machine.
    pub ready: bool,
}

impl Player {
    pub(crate) fn new(name: String) -> Player {
        Player {
            name,
            expected_time_spent: 0,
            ready: true,
        }
    }
}

/// Both entity pools, in registration order.
///
/// Registration order matters: the scheduler walks machines in the order
/// they were added. Uniqueness and naming rules are enforced here, before
/// any state change.
#[derive(Debug, Default)]
pub(crate) struct Roster {
    pub(crate) machines: Vec<Machine>,
    pub(crate) players: Vec<Player>,
}

impl Roster {
    pub(crate) fn new() -> Roster {
        Roster::default()
    }

    pub(crate) fn add_machine(&mut self, name: &str, expected_time: u32) -> Result<(), GameError> {
        if name.is_empty() {
            return Err(GameError::EmptyMachineName);
        }
        if expected_time == 0 {
            return Err(GameError::ZeroExpectedTime);
        }
        if self.machine(name).is_some() {
            return Err(GameError::DuplicateMachine(name.to_owned()));
        }
        self.machines.push(Machine::new(name.to_owned(), expected_time));
        Ok(())
    }

    pub(crate) fn remove_machine(&mut self, name: &str) -> Result<(), GameError> {
        let idx = self
            .machines
            .iter()
            .position(|m| m.name == name)
            .ok_or_else(|| GameError::UnknownMachine(name.to_owned()))?;
        self.machines.remove(idx);
        Ok(())
    }

    pub(crate) fn add_player(&mut self, name: &str) -> Result<(), GameError> {
        if name.is_empty() {
            return Err(GameError::EmptyPlayerName);
        }
        if name.contains(char::is_whitespace) {
            return Err(GameError::WhitespaceInPlayerName(name.to_owned()));
        }
        if self.player(name).is_some() {
            return Err(GameError::DuplicatePlayer(name.to_owned()));
        }
        self.players.push(Player::new(name.to_owned()));
        Ok(())
    }

    pub(crate) fn remove_player(&mut self, name: &str) -> Result<(), GameError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_owned()))?;
        self.players.remove(idx);
        Ok(())
    }

    pub(crate) fn machine(&self, name: &str) -> Option<&Machine> {
        self.machines.iter().find(|m| m.name == name)
    }

    pub(crate) fn machine_mut(&mut self, name: &str) -> Option<&mut Machine> {
        self.machines.iter_mut().find(|m| m.name == name)
    }

    pub(crate) fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub(crate) fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    pub(crate) fn clear(&mut self) {
        self.machines.clear();
        self.players.clear();
    }
}
