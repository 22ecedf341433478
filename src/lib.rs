//! # PinAssign
//!
//! A Rust crate for fair player-to-machine assignment in round-based pinball tournaments.
//!
//! It provides:
//! - Entity management for machines and players with naming and uniqueness rules
//! - A score ledger recording which player has finished which machine
//! - An online greedy assignment engine balancing cumulative expected time per player,
//!   with a uniform random tie-break among equally loaded candidates
//! - A lifecycle state machine (`Game`) guarding every operation
//! - A logical-clock [`Simulation`](crate::simulation::Simulation) and a line-oriented
//!   console ([`shell`])
//!
//! Each tournament is one [`Game`](crate::game::Game) value: machines and players go in
//! during setup, [`start`](crate::game::Game::start) freezes the machine pool and
//! produces the initial pairings, and every reported completion immediately yields the
//! next pairings for the freed machine and player.
//!
//! # Documentation Overview
//!
//! - For the operation surface and lifecycle rules, see the [`game`] module.
//! - For the scheduling policy, see the [`game`] module docs and
//!   [`Pairing`].
//! - For reproducible assignment in tests or live runs, see
//!   [`random_source`](crate::random_source).
//! - For the console binary's knobs, see [`Configuration`](crate::configuration::Configuration).
//!
//! # Usage Example
//!
//! ```
//! use pinassign::prelude::*;
//!
//! fn main() -> Result<(), GameError> {
//!     let mut game = Game::with_source(SmallRngSource::seeded(42));
//!     game.add_machine("Medieval Madness", 5)?;
//!     game.add_machine("Firepower", 10)?;
//!     game.add_player("MGB")?;
//!     game.add_player("Lisa")?;
//!
//!     // the initial pass pairs every machine with a least-loaded player
//!     let pairings = game.start()?;
//!     assert_eq!(pairings.len(), 2);
//!
//!     // report a completion: the score is recorded, the machine and the
//!     // player become ready, and the engine reassigns right away
//!     let done = pairings[0].clone();
//!     game.register_score(&done.machine, &done.player)?;
//!     assert!(!game.is_finished()?);
//!     Ok(())
//! }
//! ```
//!
//! The crate performs no I/O of its own outside the [`shell`] and [`logger`]
//! modules; state lives in memory for the lifetime of the `Game` value.
#![warn(missing_docs)]

pub mod configuration;
mod error;
pub mod game;
pub mod logger;
pub mod random_source;
mod roster;
mod scheduler;
mod scoreboard;
pub mod shell;
pub mod simulation;

pub use error::{ErrorKind, GameError};
pub use roster::{Machine, Player};
pub use scheduler::Pairing;
pub use scoreboard::Score;

/// Commonly used types for quick access.
///
/// Import this prelude to get started easily:
/// ```rust
/// use pinassign::prelude::*;
/// ```
pub mod prelude {
    pub use crate::configuration::Configuration;
    pub use crate::game::Game;
    pub use crate::random_source::{RandomSource, SmallRngSource};
    pub use crate::simulation::{SimEvent, Simulation};
    pub use crate::{ErrorKind, GameError, Machine, Pairing, Player, Score};
}
