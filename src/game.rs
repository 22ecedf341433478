//! The game controller: lifecycle state machine and operation surface.
//!
//! A [`Game`] aggregates the machine/player roster, the score ledger and
//! the injected random source. It has two states:
//!
//! - **Setup**: machines and players may be added or removed freely; no
//!   scores, no assignments.
//! - **Running** (after [`Game::start`]): the machine pool is frozen,
//!   scores and readiness are live. Players may still join or drop: the
//!   machine inventory is fixed for the tournament, but attendance is not.
//!
//! [`Game::reset_scores`] returns a running game to Setup with the same
//! roster; [`Game::full_reset`] wipes everything. Every operation either
//! succeeds or fails with a single [`GameError`] before any state change.
//!
//! A `Game` is not internally synchronized. Callers embedding it in a
//! multi-threaded host must serialize access themselves.

use tracing::info;

use crate::error::GameError;
use crate::random_source::{RandomSource, SmallRngSource};
use crate::roster::{Machine, Player, Roster};
use crate::scheduler::{self, Pairing};
use crate::scoreboard::{Score, Scoreboard};

/// One tournament: entity pools, score ledger and lifecycle state.
pub struct Game {
    roster: Roster,
    board: Scoreboard,
    source: Box<dyn RandomSource>,
    running: bool,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("roster", &self.roster)
            .field("board", &self.board)
            .field("source", &"<dyn RandomSource>")
            .field("running", &self.running)
            .finish()
    }
}

impl Game {
    /// Creates a game in the setup state with an entropy-seeded source.
    pub fn new() -> Game {
        Game::with_source(SmallRngSource::new())
    }

    /// Creates a game with an injected tie-break source.
    ///
    /// Pass a seeded [`SmallRngSource`] to make every assignment
    /// reproducible.
    pub fn with_source(source: impl RandomSource + 'static) -> Game {
        Game {
            roster: Roster::new(),
            board: Scoreboard::new(),
            source: Box::new(source),
            running: false,
        }
    }

    /// Adds a machine. Setup only.
    ///
    /// The name must be unique and non-empty (spaces are fine);
    /// `expected_time` must be greater than zero.
    pub fn add_machine(&mut self, name: &str, expected_time: u32) -> Result<(), GameError> {
        self.fail_if_started()?;
        self.roster.add_machine(name, expected_time)
    }

    /// Removes a machine. Setup only.
    pub fn remove_machine(&mut self, name: &str) -> Result<(), GameError> {
        self.fail_if_started()?;
        self.roster.remove_machine(name)
    }

    /// Adds a player, in either state.
    ///
    /// A player joining a running tournament starts ready with an empty
    /// accumulator and will be considered on the next assignment pass.
    pub fn add_player(&mut self, name: &str) -> Result<(), GameError> {
        self.roster.add_player(name)
    }

    /// Removes a player, in either state.
    ///
    /// Removing a player who currently occupies a machine leaves that
    /// machine not-ready with nobody on it; use
    /// [`set_machine_ready`](Self::set_machine_ready) to free it.
    pub fn remove_player(&mut self, name: &str) -> Result<(), GameError> {
        self.roster.remove_player(name)
    }

    /// Starts the tournament and runs the initial assignment pass.
    ///
    /// Requires at least one machine and one player. Moves Setup →
    /// Running; from then on machines are frozen.
    pub fn start(&mut self) -> Result<Vec<Pairing>, GameError> {
        self.fail_if_started()?;
        if self.roster.machines.is_empty() {
            return Err(GameError::NoMachines);
        }
        if self.roster.players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        self.running = true;
        info!(
            machines = self.roster.machines.len(),
            players = self.roster.players.len(),
            "game started"
        );
        Ok(self.assign_all())
    }

    /// Records that `player` finished `machine` and reassigns.
    ///
    /// Running only. Frees both entities, adds the machine's expected time
    /// to the player's accumulator, appends the score, then re-runs the
    /// full assignment pass and returns the new pairings. Check
    /// [`is_finished`](Self::is_finished) afterwards to detect the end of
    /// the tournament.
    pub fn register_score(&mut self, machine: &str, player: &str) -> Result<Vec<Pairing>, GameError> {
        self.fail_if_not_started()?;
        let machine_idx = self.machine_index(machine)?;
        let player_idx = self.player_index(player)?;
        let pairings = scheduler::player_finished(
            machine_idx,
            player_idx,
            &mut self.roster.machines,
            &mut self.roster.players,
            &mut self.board,
            self.source.as_mut(),
        )?;
        info!(machine, player, "score recorded");
        Ok(pairings)
    }

    /// Removes a recorded score. Running only.
    ///
    /// Readiness is deliberately left untouched: the operator corrects it
    /// with the manual toggles if needed.
    pub fn remove_score(&mut self, machine: &str, player: &str) -> Result<(), GameError> {
        self.fail_if_not_started()?;
        self.machine_index(machine)?;
        self.player_index(player)?;
        self.board.remove(machine, player)
    }

    /// Clears all scores and returns to Setup. Running only.
    ///
    /// Machines become addable again and every entity is restored to
    /// ready with a zeroed accumulator, so the next [`start`](Self::start)
    /// begins an unbiased tournament over the same roster.
    pub fn reset_scores(&mut self) -> Result<(), GameError> {
        self.fail_if_not_started()?;
        self.board.clear();
        for machine in &mut self.roster.machines {
            machine.ready = true;
        }
        for player in &mut self.roster.players {
            player.ready = true;
            player.expected_time_spent = 0;
        }
        self.running = false;
        info!("scores reset");
        Ok(())
    }

    /// Unconditionally clears machines, players and scores. Back to Setup.
    pub fn full_reset(&mut self) {
        self.roster.clear();
        self.board.clear();
        self.running = false;
        info!("game reset");
    }

    /// Manually overrides a machine's ready flag. Running only.
    ///
    /// Fails when the flag already has the requested value. This exists to
    /// correct out-of-band outcomes, e.g. someone played a machine the
    /// engine did not recommend.
    pub fn set_machine_ready(&mut self, name: &str, ready: bool) -> Result<(), GameError> {
        self.fail_if_not_started()?;
        let machine = self
            .roster
            .machine_mut(name)
            .ok_or_else(|| GameError::UnknownMachine(name.to_owned()))?;
        if machine.ready == ready {
            return Err(GameError::MachineReadyUnchanged {
                name: name.to_owned(),
                ready,
            });
        }
        machine.ready = ready;
        Ok(())
    }

    /// Manually overrides a player's ready flag. Running only.
    pub fn set_player_ready(&mut self, name: &str, ready: bool) -> Result<(), GameError> {
        self.fail_if_not_started()?;
        let player = self
            .roster
            .player_mut(name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_owned()))?;
        if player.ready == ready {
            return Err(GameError::PlayerReadyUnchanged {
                name: name.to_owned(),
                ready,
            });
        }
        player.ready = ready;
        Ok(())
    }

    /// Re-runs the assignment pass with no other state change. Running only.
    ///
    /// Useful after manual readiness edits; in all other cases the new
    /// pairings were already returned by the operation that freed them.
    pub fn assign(&mut self) -> Result<Vec<Pairing>, GameError> {
        self.fail_if_not_started()?;
        Ok(self.assign_all())
    }

    /// True iff every (machine, player) pair has a score. Running only.
    pub fn is_finished(&self) -> Result<bool, GameError> {
        self.fail_if_not_started()?;
        Ok(scheduler::is_every_slot_filled(
            &self.roster.machines,
            &self.roster.players,
            &self.board,
        ))
    }

    /// True after a successful [`start`](Self::start), until a reset.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// All machines, ordered by name.
    pub fn machines(&self) -> Vec<&Machine> {
        let mut machines: Vec<&Machine> = self.roster.machines.iter().collect();
        machines.sort_by(|a, b| a.name.cmp(&b.name));
        machines
    }

    /// All players, ordered by name.
    pub fn players(&self) -> Vec<&Player> {
        let mut players: Vec<&Player> = self.roster.players.iter().collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        players
    }

    /// All recorded scores, ordered by (machine, player).
    pub fn scores(&self) -> Vec<&Score> {
        let mut scores: Vec<&Score> = self.board.scores().iter().collect();
        scores.sort_by(|a, b| (&a.machine, &a.player).cmp(&(&b.machine, &b.player)));
        scores
    }

    fn assign_all(&mut self) -> Vec<Pairing> {
        scheduler::assign_players(
            &mut self.roster.machines,
            &mut self.roster.players,
            &self.board,
            self.source.as_mut(),
        )
    }

    fn machine_index(&self, name: &str) -> Result<usize, GameError> {
        self.roster
            .machines
            .iter()
            .position(|m| m.name == name)
            .ok_or_else(|| GameError::UnknownMachine(name.to_owned()))
    }

    fn player_index(&self, name: &str) -> Result<usize, GameError> {
        self.roster
            .players
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_owned()))
    }

    fn fail_if_started(&self) -> Result<(), GameError> {
        if self.running {
            return Err(GameError::AlreadyStarted);
        }
        Ok(())
    }

    fn fail_if_not_started(&self) -> Result<(), GameError> {
        if !self.running {
            return Err(GameError::NotStarted);
        }
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
