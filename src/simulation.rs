//! Logical-clock walkthrough of a whole tournament.
//!
//! The simulation owns a [`Game`], starts it, and then steps a logical
//! counter: each tick, every active pairing whose machine's expected time
//! has elapsed is completed through
//! [`register_score`](Game::register_score), and the pairings returned by
//! that call become active at the current tick. The clock is a plain
//! counter driven by the caller's loop, not wall time; the run is for
//! illustration and testing, never for live timing.

use std::collections::HashMap;

use tracing::info;

use crate::error::GameError;
use crate::game::Game;
use crate::random_source::RandomSource;
use crate::scheduler::Pairing;

/// A timestamped event from a simulated tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    /// The engine paired a player with a machine.
    Assigned {
        /// Machine name.
        machine: String,
        /// Player name.
        player: String,
        /// Logical clock value when the pairing was made.
        at: u32,
    },
    /// The player finished the machine.
    Finished {
        /// Machine name.
        machine: String,
        /// Player name.
        player: String,
        /// Logical clock value when the completion happened.
        at: u32,
    },
}

/// Drives a tournament from start to completion on a logical clock.
#[derive(Debug)]
pub struct Simulation {
    game: Game,
    expected_times: HashMap<String, u32>,
    clock: u32,
    active: Vec<(Pairing, u32)>,
    events: Vec<SimEvent>,
}

impl Simulation {
    /// Builds a simulation over the given machines and players.
    ///
    /// Fails if any machine or player is invalid (same rules as
    /// [`Game::add_machine`] / [`Game::add_player`]).
    pub fn new(
        machines: &[(&str, u32)],
        players: &[&str],
        source: impl RandomSource + 'static,
    ) -> Result<Simulation, GameError> {
        let mut game = Game::with_source(source);
        for (name, expected_time) in machines {
            game.add_machine(name, *expected_time)?;
        }
        for name in players {
            game.add_player(name)?;
        }
        let expected_times = machines
            .iter()
            .map(|(name, expected_time)| ((*name).to_owned(), *expected_time))
            .collect();
        Ok(Simulation {
            game,
            expected_times,
            clock: 0,
            active: vec![],
            events: vec![],
        })
    }

    /// The classic walkthrough: machines A (5) and B (10), players 1..5.
    pub fn default_scenario(source: impl RandomSource + 'static) -> Result<Simulation, GameError> {
        Simulation::new(&[("A", 5), ("B", 10)], &["1", "2", "3", "4", "5"], source)
    }

    /// Runs until every player has finished every machine.
    ///
    /// Returns the ordered event log: pairings and completions with the
    /// clock value they happened at.
    pub fn run(mut self) -> Result<Vec<SimEvent>, GameError> {
        let initial = self.game.start()?;
        self.track(initial);
        while !self.game.is_finished()? {
            self.tick()?;
        }
        info!(total_time = self.clock, "simulation finished");
        Ok(self.events)
    }

    fn tick(&mut self) -> Result<(), GameError> {
        self.clock += 1;
        let clock = self.clock;
        let expected_times = &self.expected_times;
        let (finished, still_running): (Vec<_>, Vec<_>) = self
            .active
            .drain(..)
            .partition(|(pairing, started_at)| expected_times[&pairing.machine] <= clock - started_at);
        self.active = still_running;

        for (pairing, started_at) in finished {
            info!(
                machine = %pairing.machine,
                player = %pairing.player,
                at = clock,
                started_at,
                "finished"
            );
            self.events.push(SimEvent::Finished {
                machine: pairing.machine.clone(),
                player: pairing.player.clone(),
                at: clock,
            });
            let new_pairings = self.game.register_score(&pairing.machine, &pairing.player)?;
            self.track(new_pairings);
        }
        Ok(())
    }

    fn track(&mut self, pairings: Vec<Pairing>) {
        for pairing in pairings {
            info!(machine = %pairing.machine, player = %pairing.player, at = self.clock, "assigned");
            self.events.push(SimEvent::Assigned {
                machine: pairing.machine.clone(),
                player: pairing.player.clone(),
                at: self.clock,
            });
            self.active.push((pairing, self.clock));
        }
    }
}

#[cfg(test)]
mod simulation_tests {
    use super::*;
    use crate::random_source::SmallRngSource;
    use std::collections::HashSet;

    #[test]
    fn default_scenario_runs_to_completion() {
        let sim = Simulation::default_scenario(SmallRngSource::seeded(3)).unwrap();
        let events = sim.run().unwrap();

        // every (machine, player) pair finishes exactly once
        let finished: Vec<(&str, &str)> = events
            .iter()
            .filter_map(|e| match e {
                SimEvent::Finished { machine, player, .. } => {
                    Some((machine.as_str(), player.as_str()))
                }
                SimEvent::Assigned { .. } => None,
            })
            .collect();
        assert_eq!(finished.len(), 10);
        assert_eq!(finished.iter().collect::<HashSet<_>>().len(), 10);
    }

    #[test]
    fn clock_never_runs_backwards() {
        let sim = Simulation::default_scenario(SmallRngSource::seeded(9)).unwrap();
        let events = sim.run().unwrap();
        let stamps: Vec<u32> = events
            .iter()
            .map(|e| match e {
                SimEvent::Assigned { at, .. } | SimEvent::Finished { at, .. } => *at,
            })
            .collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn every_completion_was_assigned_first() {
        let sim = Simulation::default_scenario(SmallRngSource::seeded(11)).unwrap();
        let events = sim.run().unwrap();
        let mut open: HashSet<(String, String)> = HashSet::new();
        for event in events {
            match event {
                SimEvent::Assigned { machine, player, .. } => {
                    assert!(open.insert((machine, player)), "double assignment");
                }
                SimEvent::Finished { machine, player, .. } => {
                    assert!(open.remove(&(machine, player)), "finish without assignment");
                }
            }
        }
        assert!(open.is_empty(), "simulation ended with open pairings");
    }

    #[test]
    fn rejects_invalid_scenarios() {
        let err = Simulation::new(&[("A", 0)], &["1"], SmallRngSource::seeded(0)).unwrap_err();
        assert_eq!(err, GameError::ZeroExpectedTime);
    }
}
