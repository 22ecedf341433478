use crate::error::GameError;
use crate::roster::{Machine, Player};

/// A completion record: one player has finished one machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Name of the finished machine.
    pub machine: String,
    /// Name of the player who finished it.
    pub player: String,
}

/// The score ledger.
///
/// Holds at most one [`Score`] per (machine, player) pair; the duplicate
/// check runs before the record is appended, so a rejected insert leaves
/// the ledger untouched.
#[derive(Debug, Default)]
pub(crate) struct Scoreboard {
    scores: Vec<Score>,
}

impl Scoreboard {
    pub(crate) fn new() -> Scoreboard {
        Scoreboard::default()
    }

    pub(crate) fn has_score(&self, machine: &str, player: &str) -> bool {
        self.scores
            .iter()
            .any(|s| s.machine == machine && s.player == player)
    }

    pub(crate) fn record(&mut self, machine: &str, player: &str) -> Result<(), GameError> {
        if self.has_score(machine, player) {
            return Err(GameError::DuplicateScore {
                machine: machine.to_owned(),
                player: player.to_owned(),
            });
        }
        self.scores.push(Score {
            machine: machine.to_owned(),
            player: player.to_owned(),
        });
        Ok(())
    }

    pub(crate) fn remove(&mut self, machine: &str, player: &str) -> Result<(), GameError> {
        let idx = self
            .scores
            .iter()
            .position(|s| s.machine == machine && s.player == player)
            .ok_or_else(|| GameError::ScoreNotFound {
                machine: machine.to_owned(),
                player: player.to_owned(),
            })?;
        self.scores.remove(idx);
        Ok(())
    }

    pub(crate) fn scores(&self) -> &[Score] {
        &self.scores
    }

    pub(crate) fn clear(&mut self) {
        self.scores.clear();
    }

    /// True iff every (machine, player) pair has a score.
    pub(crate) fn is_complete(&self, machines: &[Machine], players: &[Player]) -> bool {
        machines
            .iter()
            .all(|m| players.iter().all(|p| self.has_score(&m.name, &p.name)))
    }
}

#[cfg(test)]
mod scoreboard_tests {
    use super::*;
    use crate::roster::Roster;

    #[test]
    fn duplicate_records_are_rejected() {
        let mut board = Scoreboard::new();
        board.record("A", "1").unwrap();
        assert_eq!(
            board.record("A", "1"),
            Err(GameError::DuplicateScore {
                machine: "A".to_owned(),
                player: "1".to_owned(),
            })
        );
        assert_eq!(board.scores().len(), 1);
    }

    #[test]
    fn same_player_may_score_on_other_machines() {
        let mut board = Scoreboard::new();
        board.record("A", "1").unwrap();
        board.record("B", "1").unwrap();
        board.record("A", "2").unwrap();
        assert_eq!(board.scores().len(), 3);
    }

    #[test]
    fn removing_an_unrecorded_score_fails() {
        let mut board = Scoreboard::new();
        board.record("A", "1").unwrap();
        assert_eq!(
            board.remove("A", "2"),
            Err(GameError::ScoreNotFound {
                machine: "A".to_owned(),
                player: "2".to_owned(),
            })
        );
        board.remove("A", "1").unwrap();
        assert!(board.scores().is_empty());
    }

    #[test]
    fn complete_only_when_every_pair_is_scored() {
        let mut roster = Roster::new();
        roster.add_machine("A", 5).unwrap();
        roster.add_machine("B", 10).unwrap();
        roster.add_player("1").unwrap();
        roster.add_player("2").unwrap();

        let mut board = Scoreboard::new();
        for (machine, player) in [("A", "1"), ("A", "2"), ("B", "1")] {
            board.record(machine, player).unwrap();
            assert!(!board.is_complete(&roster.machines, &roster.players));
        }
        board.record("B", "2").unwrap();
        assert!(board.is_complete(&roster.machines, &roster.players));
    }
}
