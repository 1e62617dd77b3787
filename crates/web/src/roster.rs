//! Player roster loaded at startup. Stands in for the account database:
//! every entry is a known token with the deck that player brings to battle.

use arena_core::Deck;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Elo every new player starts with.
pub const STARTING_ELO: i32 = 100;

fn default_elo() -> i32 {
    STARTING_ELO
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pub players: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub username: String,
    pub token: String,
    #[serde(default)]
    pub deck: Deck,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default = "default_elo")]
    pub elo: i32,
}

impl RosterEntry {
    pub fn new(username: impl Into<String>, token: impl Into<String>, deck: impl Into<Deck>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
            deck: deck.into(),
            wins: 0,
            losses: 0,
            elo: STARTING_ELO,
        }
    }
}

#[derive(Debug)]
pub enum RosterError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::Io(err) => write!(f, "failed to read roster: {err}"),
            RosterError::Parse(err) => write!(f, "invalid roster: {err}"),
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterError::Io(err) => Some(err),
            RosterError::Parse(err) => Some(err),
        }
    }
}

impl Roster {
    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        serde_json::from_str(json).map_err(RosterError::Parse)
    }

    pub fn load(path: &Path) -> Result<Self, RosterError> {
        let json = std::fs::read_to_string(path).map_err(RosterError::Io)?;
        Self::from_json(&json)
    }
}
