//! The line-oriented console collaborator.
//!
//! This module is a thin I/O wrapper around [`Game`]: [`parse`] turns one
//! input line into a [`Command`], [`execute`] applies it and returns the
//! text to print. Both are pure with respect to the terminal, so the whole
//! command surface is testable without stdin; [`run`] is the actual
//! read-eval-print loop used by the `pinassign` binary.
//!
//! Machine names may contain spaces, so `addmachine` treats the last token
//! as the expected time and `addscore`/`removescore` take the player (no
//! spaces allowed in player names) first and the machine as the rest of
//! the line.

use std::io::{self, BufRead, Write};

use crate::configuration::Configuration;
use crate::game::Game;
use crate::logger::init_logger;
use crate::random_source::SmallRngSource;
use crate::scheduler::Pairing;

/// Banner printed when the console starts in verbose mode.
pub const INTRO: &str = "Welcome to the PinAssign console.

Before you can start assigning, you need to add machines and players.

To add a machine, type \"addmachine NAME EXPECTEDTIME\".
To add a player, type \"addplayer NAME\".

Player names must not contain spaces (use tags).

Once you've added all machines and at least one player, type \"start\".
After the game has been started you can no longer add or remove machines.

Then use \"addscore PLAYERNAME MACHINENAME\" whenever a player has finished
a machine.";

const GAME_FINISHED: &str = "All players have finished all machines!

Use the reset command to start over from scratch, or resetscores to restart
with the same machines and players.";

/// One parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the machine table.
    Machines,
    /// Print the player table.
    Players,
    /// Print the score table.
    Scores,
    /// Add a machine (setup only).
    AddMachine {
        /// Machine name; may contain spaces.
        name: String,
        /// Expected time, greater than zero.
        expected_time: u32,
    },
    /// Add a player.
    AddPlayer {
        /// Player name.
        name: String,
    },
    /// Remove a machine (setup only).
    RemoveMachine {
        /// Machine name.
        name: String,
    },
    /// Remove a player.
    RemovePlayer {
        /// Player name.
        name: String,
    },
    /// Register a completion and print the new assignments.
    AddScore {
        /// Player name.
        player: String,
        /// Machine name.
        machine: String,
    },
    /// Withdraw a recorded score.
    RemoveScore {
        /// Player name.
        player: String,
        /// Machine name.
        machine: String,
    },
    /// Start the tournament.
    Start,
    /// Full reset: machines, players and scores are wiped.
    Reset,
    /// Clear scores and go back to setup, keeping the roster.
    ResetScores,
    /// Re-run the assignment pass and print the result.
    Assignments,
    /// Manually flip a player's ready flag.
    PlayerReady {
        /// Player name.
        name: String,
        /// Requested flag value.
        ready: bool,
    },
    /// Manually flip a machine's ready flag.
    MachineReady {
        /// Machine name.
        name: String,
        /// Requested flag value.
        ready: bool,
    },
    /// Print the command list.
    Help,
    /// Leave the console.
    Exit,
}

/// What [`execute`] hands back to the loop.
#[derive(Debug, PartialEq, Eq)]
pub struct Response {
    /// Text to print, already formatted.
    pub text: String,
    /// True when the console should terminate.
    pub quit: bool,
}

impl Response {
    fn text(text: impl Into<String>) -> Response {
        Response {
            text: text.into(),
            quit: false,
        }
    }
}

/// Parses one non-empty input line.
///
/// Returns a ready-to-print message on any syntax problem.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "machines" => Ok(Command::Machines),
        "players" => Ok(Command::Players),
        "scores" => Ok(Command::Scores),
        "addmachine" => {
            let Some((name, time)) = rest.rsplit_once(char::is_whitespace) else {
                return Err("Invalid addmachine syntax. Example: addmachine Medieval Madness 5".to_owned());
            };
            let expected_time = time
                .parse()
                .map_err(|_| format!("Invalid expected time: {time} (must be an integer)"))?;
            Ok(Command::AddMachine {
                name: name.trim().to_owned(),
                expected_time,
            })
        }
        "addplayer" => Ok(Command::AddPlayer {
            name: rest.to_owned(),
        }),
        "removemachine" => Ok(Command::RemoveMachine {
            name: rest.to_owned(),
        }),
        "removeplayer" => Ok(Command::RemovePlayer {
            name: rest.to_owned(),
        }),
        "addscore" | "removescore" => {
            let Some((player, machine)) = rest.split_once(char::is_whitespace) else {
                return Err(format!(
                    "Invalid {verb} syntax. Example: {verb} MGB Firepower"
                ));
            };
            let player = player.to_owned();
            let machine = machine.trim().to_owned();
            if verb == "addscore" {
                Ok(Command::AddScore { player, machine })
            } else {
                Ok(Command::RemoveScore { player, machine })
            }
        }
        "start" => Ok(Command::Start),
        "reset" => Ok(Command::Reset),
        "resetscores" => Ok(Command::ResetScores),
        "assignments" => Ok(Command::Assignments),
        "playerready" => Ok(Command::PlayerReady {
            name: rest.to_owned(),
            ready: true,
        }),
        "playerbusy" => Ok(Command::PlayerReady {
            name: rest.to_owned(),
            ready: false,
        }),
        "machineready" => Ok(Command::MachineReady {
            name: rest.to_owned(),
            ready: true,
        }),
        "machinebusy" => Ok(Command::MachineReady {
            name: rest.to_owned(),
            ready: false,
        }),
        "help" | "?" => Ok(Command::Help),
        "exit" | "quit" => Ok(Command::Exit),
        _ => Err(format!(
            "Unknown command {verb:?}. Type help for the command list."
        )),
    }
}

/// Applies one command to the game and renders the outcome.
pub fn execute(game: &mut Game, command: Command) -> Response {
    match command {
        Command::Machines => {
            let machines = game.machines();
            if machines.is_empty() {
                return Response::text(
                    "No machines have been added. Use the addmachine command to add machines.",
                );
            }
            let rows: Vec<[String; 3]> = machines
                .iter()
                .map(|m| {
                    [
                        m.name.clone(),
                        m.ready.to_string(),
                        m.expected_time.to_string(),
                    ]
                })
                .collect();
            Response::text(render_table(["Name", "Ready", "Expected Time"], &rows))
        }
        Command::Players => {
            let players = game.players();
            if players.is_empty() {
                return Response::text(
                    "No players have been added. Use the addplayer command to add players.",
                );
            }
            let rows: Vec<[String; 3]> = players
                .iter()
                .map(|p| {
                    [
                        p.name.clone(),
                        p.ready.to_string(),
                        p.expected_time_spent.to_string(),
                    ]
                })
                .collect();
            Response::text(render_table(
                ["Name", "Ready", "Expected Time Spent"],
                &rows,
            ))
        }
        Command::Scores => {
            let scores = game.scores();
            if scores.is_empty() {
                return Response::text(
                    "No scores have been registered. Use the addscore command to add a score (after starting the game).",
                );
            }
            let rows: Vec<[String; 2]> = scores
                .iter()
                .map(|s| [s.machine.clone(), s.player.clone()])
                .collect();
            Response::text(render_table(["Machine", "Player"], &rows))
        }
        Command::AddMachine {
            name,
            expected_time,
        } => match game.add_machine(&name, expected_time) {
            Ok(()) => Response::text(format!(
                "Machine {name} added with expected time {expected_time}"
            )),
            Err(e) => Response::text(format!("Cannot add machine: {e}")),
        },
        Command::AddPlayer { name } => match game.add_player(&name) {
            Ok(()) => Response::text(format!("Player {name} added")),
            Err(e) => Response::text(format!("Cannot add player: {e}")),
        },
        Command::RemoveMachine { name } => match game.remove_machine(&name) {
            Ok(()) => Response::text(format!("Machine {name} removed")),
            Err(e) => Response::text(format!("Cannot remove machine: {e}")),
        },
        Command::RemovePlayer { name } => match game.remove_player(&name) {
            Ok(()) => Response::text(format!("Player {name} removed")),
            Err(e) => Response::text(format!("Cannot remove player: {e}")),
        },
        Command::AddScore { player, machine } => match game.register_score(&machine, &player) {
            Ok(pairings) => {
                let mut text = format!("Score for player {player} added for machine {machine}");
                if !pairings.is_empty() {
                    text.push('\n');
                    text.push_str(&render_assignments(&pairings));
                }
                if let Ok(true) = game.is_finished() {
                    text.push('\n');
                    text.push_str(GAME_FINISHED);
                }
                Response { text, quit: false }
            }
            Err(e) => Response::text(format!("Cannot add score: {e}")),
        },
        Command::RemoveScore { player, machine } => match game.remove_score(&machine, &player) {
            Ok(()) => Response::text(format!(
                "Score for player {player} on machine {machine} removed"
            )),
            Err(e) => Response::text(format!("Cannot remove score: {e}")),
        },
        Command::Start => match game.start() {
            Ok(pairings) => Response::text(format!(
                "The game has started! Here are the initial assignments:\n{}",
                render_assignments(&pairings)
            )),
            Err(e) => Response::text(format!("Cannot start game: {e}")),
        },
        Command::Reset => {
            game.full_reset();
            Response::text("The game has been reset. New machines and players must be added.")
        }
        Command::ResetScores => match game.reset_scores() {
            Ok(()) => Response::text(
                "The game scores have been reset. You may now add or remove machines.\n\
                 Use the start command again to start assigning players to machines.",
            ),
            Err(e) => Response::text(format!("Cannot reset scores: {e}")),
        },
        Command::Assignments => match game.assign() {
            Ok(pairings) if pairings.is_empty() => {
                Response::text("No new assignments available")
            }
            Ok(pairings) => Response::text(render_assignments(&pairings)),
            Err(e) => Response::text(format!("Cannot get assignments: {e}")),
        },
        Command::PlayerReady { name, ready } => match game.set_player_ready(&name, ready) {
            Ok(()) => Response::text(format!(
                "Player {name} has been marked as {}",
                if ready { "ready" } else { "busy" }
            )),
            Err(e) => Response::text(format!("Cannot mark player: {e}")),
        },
        Command::MachineReady { name, ready } => match game.set_machine_ready(&name, ready) {
            Ok(()) => Response::text(format!(
                "Machine {name} has been marked as {}",
                if ready { "ready" } else { "busy" }
            )),
            Err(e) => Response::text(format!("Cannot mark machine: {e}")),
        },
        Command::Help => Response::text(
            "Commands: machines, players, scores, addmachine NAME TIME, addplayer NAME,\n\
             removemachine NAME, removeplayer NAME, start, addscore PLAYER MACHINE,\n\
             removescore PLAYER MACHINE, assignments, resetscores, reset,\n\
             playerready/playerbusy NAME, machineready/machinebusy NAME, exit",
        ),
        Command::Exit => Response {
            text: "Bye!".to_owned(),
            quit: true,
        },
    }
}

/// The console read-eval-print loop. Blocks until exit or EOF.
pub fn run(config: Configuration) -> anyhow::Result<()> {
    if config.log {
        init_logger();
    }
    let mut game = match config.seed {
        Some(seed) => Game::with_source(SmallRngSource::seeded(seed)),
        None => Game::new(),
    };
    if config.verbose {
        println!("{INTRO}");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("Command (? for help): ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        if line.trim().is_empty() {
            continue;
        }
        match parse(&line) {
            Ok(command) => {
                let response = execute(&mut game, command);
                println!("{}", response.text);
                if response.quit {
                    break;
                }
            }
            Err(message) => println!("{message}"),
        }
    }
    Ok(())
}

fn render_assignments(pairings: &[Pairing]) -> String {
    pairings
        .iter()
        .enumerate()
        .map(|(idx, pairing)| {
            format!(
                "{}. {} should now play {}",
                idx + 1,
                pairing.player,
                pairing.machine
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_table<const N: usize>(header: [&str; N], rows: &[[String; N]]) -> String {
    let mut widths: [usize; N] = header.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }
    let render_row = |cells: [&str; N]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_owned()
    };
    let mut lines = vec![render_row(header)];
    for row in rows {
        let cells: [&str; N] = std::array::from_fn(|i| row[i].as_str());
        lines.push(render_row(cells));
    }
    lines.join("\n")
}

#[cfg(test)]
mod shell_tests {
    use super::*;
    use crate::random_source::SmallRngSource;

    #[test]
    fn parses_machine_names_with_spaces() {
        assert_eq!(
            parse("addmachine Medieval Madness 5"),
            Ok(Command::AddMachine {
                name: "Medieval Madness".to_owned(),
                expected_time: 5,
            })
        );
        assert_eq!(
            parse("addscore MGB Medieval Madness"),
            Ok(Command::AddScore {
                player: "MGB".to_owned(),
                machine: "Medieval Madness".to_owned(),
            })
        );
        assert_eq!(
            parse("machinebusy Medieval Madness"),
            Ok(Command::MachineReady {
                name: "Medieval Madness".to_owned(),
                ready: false,
            })
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse("addmachine OnlyAName").is_err());
        assert!(parse("addmachine Firepower five").is_err());
        assert!(parse("addscore MGB").is_err());
        assert!(parse("frobnicate").is_err());
    }

    #[test]
    fn add_then_list_machines() {
        let mut game = Game::with_source(SmallRngSource::seeded(0));
        let response = execute(
            &mut game,
            Command::AddMachine {
                name: "Firepower".to_owned(),
                expected_time: 5,
            },
        );
        assert_eq!(response.text, "Machine Firepower added with expected time 5");
        let listing = execute(&mut game, Command::Machines).text;
        assert!(listing.contains("Firepower"));
        assert!(listing.contains("Expected Time"));
    }

    #[test]
    fn errors_are_rendered_not_raised() {
        let mut game = Game::with_source(SmallRngSource::seeded(0));
        let response = execute(&mut game, Command::Start);
        assert_eq!(
            response.text,
            "Cannot start game: there must be at least one machine"
        );
        assert!(!response.quit);
    }

    #[test]
    fn full_round_trip_over_the_console() {
        let mut game = Game::with_source(SmallRngSource::seeded(5));
        for line in [
            "addmachine A 5",
            "addplayer 1",
            "start",
        ] {
            let command = parse(line).unwrap();
            let response = execute(&mut game, command);
            assert!(!response.quit, "unexpected quit on {line:?}");
        }
        let response = execute(&mut game, parse("addscore 1 A").unwrap());
        assert!(response.text.contains("Score for player 1 added for machine A"));
        // one machine, one player: that single score finishes everything
        assert!(response.text.contains("All players have finished all machines!"));
        assert!(execute(&mut game, parse("exit").unwrap()).quit);
    }
}
