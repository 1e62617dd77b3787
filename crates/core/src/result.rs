use crate::card::Deck;
use serde::{Deserialize, Serialize};

/// Elo change for a battle win.
pub const ELO_WIN: i32 = 3;
/// Elo change for a battle loss.
pub const ELO_LOSS: i32 = -5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Won,
    Lost,
    Draw,
}

/// Stat changes one player takes away from a battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsDelta {
    pub wins: u32,
    pub losses: u32,
    pub elo: i32,
}

impl StatsDelta {
    pub fn for_outcome(outcome: BattleOutcome) -> Self {
        match outcome {
            BattleOutcome::Won => Self {
                wins: 1,
                losses: 0,
                elo: ELO_WIN,
            },
            BattleOutcome::Lost => Self {
                wins: 0,
                losses: 1,
                elo: ELO_LOSS,
            },
            BattleOutcome::Draw => Self::default(),
        }
    }
}

/// The full record of one resolved battle. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub player_one: String,
    pub player_two: String,
    /// `None` for a draw.
    pub winner: Option<String>,
    pub loser: Option<String>,
    pub rounds: u32,
    pub log: Vec<String>,
    pub final_deck_one: Deck,
    pub final_deck_two: Deck,
}

impl BattleResult {
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    /// Outcome from the point of view of `username`, or `None` if they did not fight.
    pub fn outcome_for(&self, username: &str) -> Option<BattleOutcome> {
        if username != self.player_one && username != self.player_two {
            return None;
        }
        Some(match (&self.winner, &self.loser) {
            (Some(winner), _) if winner == username => BattleOutcome::Won,
            (_, Some(loser)) if loser == username => BattleOutcome::Lost,
            _ => BattleOutcome::Draw,
        })
    }

    pub fn stats_delta_for(&self, username: &str) -> StatsDelta {
        self.outcome_for(username)
            .map(StatsDelta::for_outcome)
            .unwrap_or_default()
    }

    pub fn final_deck_for(&self, username: &str) -> Option<&Deck> {
        if username == self.player_one {
            Some(&self.final_deck_one)
        } else if username == self.player_two {
            Some(&self.final_deck_two)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decided() -> BattleResult {
        BattleResult {
            player_one: "alice".into(),
            player_two: "bob".into(),
            winner: Some("bob".into()),
            loser: Some("alice".into()),
            rounds: 4,
            log: Vec::new(),
            final_deck_one: Deck::default(),
            final_deck_two: Deck::default(),
        }
    }

    #[test]
    fn outcome_and_delta_per_player() {
        let result = decided();
        assert_eq!(result.outcome_for("bob"), Some(BattleOutcome::Won));
        assert_eq!(result.outcome_for("alice"), Some(BattleOutcome::Lost));
        assert_eq!(result.outcome_for("carol"), None);

        assert_eq!(result.stats_delta_for("bob").elo, ELO_WIN);
        assert_eq!(result.stats_delta_for("alice").losses, 1);
        assert_eq!(result.stats_delta_for("carol"), StatsDelta::default());
    }

    #[test]
    fn draw_credits_nothing() {
        let mut result = decided();
        result.winner = None;
        result.loser = None;
        assert!(result.is_draw());
        assert_eq!(result.outcome_for("alice"), Some(BattleOutcome::Draw));
        assert_eq!(result.stats_delta_for("bob"), StatsDelta::default());
    }
}
