use crate::roster::{Roster, RosterEntry};
use arena_core::{BattlePlayer, BattleResult, Deck, StatsDelta};
use arena_lobby::BattleRecorder;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;

/// Public stats for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    pub username: String,
    pub wins: u32,
    pub losses: u32,
    pub elo: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// No account with this username.
    UnknownPlayer(String),
    /// Username already registered.
    DuplicateUsername(String),
    /// Token already assigned to another player.
    DuplicateToken,
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::UnknownPlayer(name) => write!(f, "unknown player {name}"),
            AccountError::DuplicateUsername(name) => write!(f, "player {name} already exists"),
            AccountError::DuplicateToken => write!(f, "token already in use"),
        }
    }
}

impl std::error::Error for AccountError {}

struct Account {
    deck: Deck,
    stats: PlayerStats,
}

#[derive(Default)]
struct AccountsInner {
    accounts: HashMap<String, Account>,
    /// token -> username
    sessions: HashMap<String, String>,
}

/// In-memory player directory and stats store.
#[derive(Default)]
pub struct Accounts {
    inner: RwLock<AccountsInner>,
}

impl Accounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_roster(roster: Roster) -> Result<Self, AccountError> {
        let mut inner = AccountsInner::default();
        for entry in roster.players {
            inner.insert(entry)?;
        }
        Ok(Self {
            inner: RwLock::new(inner),
        })
    }

    pub async fn insert(&self, entry: RosterEntry) -> Result<(), AccountError> {
        self.inner.write().await.insert(entry)
    }

    /// Resolve a bearer token to the player and the deck they fight with.
    pub async fn authenticate(&self, token: &str) -> Option<BattlePlayer> {
        let inner = self.inner.read().await;
        let username = inner.sessions.get(token)?;
        let account = inner.accounts.get(username)?;
        Some(BattlePlayer::new(username.clone(), account.deck.clone()))
    }

    /// Apply a battle outcome and store the deck the player left the battle with.
    pub async fn record_battle(
        &self,
        username: &str,
        delta: StatsDelta,
        final_deck: Deck,
    ) -> Result<(), AccountError> {
        let mut inner = self.inner.write().await;
        let account = inner
            .accounts
            .get_mut(username)
            .ok_or_else(|| AccountError::UnknownPlayer(username.to_string()))?;

        account.stats.wins += delta.wins;
        account.stats.losses += delta.losses;
        account.stats.elo += delta.elo;
        account.deck = final_deck;
        Ok(())
    }

    /// Drop an account and its token. Returns whether it existed.
    pub async fn remove(&self, username: &str) -> bool {
        let mut inner = self.inner.write().await;
        if inner.accounts.remove(username).is_none() {
            return false;
        }
        inner.sessions.retain(|_, owner| owner != username);
        true
    }

    pub async fn stats(&self, username: &str) -> Option<PlayerStats> {
        let inner = self.inner.read().await;
        inner
            .accounts
            .get(username)
            .map(|account| account.stats.clone())
    }

    pub async fn stats_for_token(&self, token: &str) -> Option<PlayerStats> {
        let inner = self.inner.read().await;
        let username = inner.sessions.get(token)?;
        inner
            .accounts
            .get(username)
            .map(|account| account.stats.clone())
    }

    pub async fn deck(&self, username: &str) -> Option<Deck> {
        let inner = self.inner.read().await;
        inner.accounts.get(username).map(|account| account.deck.clone())
    }

    /// All players, best elo first; ties broken by username.
    pub async fn scoreboard(&self) -> Vec<PlayerStats> {
        let inner = self.inner.read().await;
        let mut board: Vec<PlayerStats> = inner
            .accounts
            .values()
            .map(|account| account.stats.clone())
            .collect();
        board.sort_by(|a, b| b.elo.cmp(&a.elo).then_with(|| a.username.cmp(&b.username)));
        board
    }
}

/// Writes stats and final decks for both fighters. Failures are logged only.
impl BattleRecorder for Accounts {
    async fn record(&self, result: &BattleResult) {
        for username in [&result.player_one, &result.player_two] {
            let delta = result.stats_delta_for(username);
            let deck = result.final_deck_for(username).cloned().unwrap_or_default();
            if let Err(err) = self.record_battle(username, delta, deck).await {
                tracing::error!(%username, %err, "failed to persist battle outcome");
            }
        }
    }
}

impl AccountsInner {
    fn insert(&mut self, entry: RosterEntry) -> Result<(), AccountError> {
        if self.accounts.contains_key(&entry.username) {
            return Err(AccountError::DuplicateUsername(entry.username));
        }
        if self.sessions.contains_key(&entry.token) {
            return Err(AccountError::DuplicateToken);
        }

        self.sessions.insert(entry.token, entry.username.clone());
        self.accounts.insert(
            entry.username.clone(),
            Account {
                deck: entry.deck,
                stats: PlayerStats {
                    username: entry.username,
                    wins: entry.wins,
                    losses: entry.losses,
                    elo: entry.elo,
                },
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{Card, CardType, Element};

    fn deck() -> Vec<Card> {
        vec![Card::new(1, "Knight", 20, Element::Normal, CardType::Monster)]
    }

    #[tokio::test]
    async fn authenticate_resolves_token_to_player() {
        let accounts = Accounts::new();
        accounts
            .insert(RosterEntry::new("alice", "alice-token", deck()))
            .await
            .unwrap();

        let player = accounts.authenticate("alice-token").await.unwrap();
        assert_eq!(player.username, "alice");
        assert_eq!(player.deck.len(), 1);
        assert!(accounts.authenticate("nope").await.is_none());
    }

    #[tokio::test]
    async fn record_battle_applies_delta_and_deck() {
        let accounts = Accounts::new();
        accounts
            .insert(RosterEntry::new("alice", "alice-token", deck()))
            .await
            .unwrap();

        let delta = StatsDelta {
            wins: 1,
            losses: 0,
            elo: 3,
        };
        accounts
            .record_battle("alice", delta, Deck::default())
            .await
            .unwrap();

        let stats = accounts.stats("alice").await.unwrap();
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.elo, 103);
        assert!(accounts.deck("alice").await.unwrap().is_empty());

        let err = accounts
            .record_battle("ghost", delta, Deck::default())
            .await
            .unwrap_err();
        assert_eq!(err, AccountError::UnknownPlayer("ghost".into()));
    }

    #[tokio::test]
    async fn duplicates_are_rejected() {
        let accounts = Accounts::new();
        accounts
            .insert(RosterEntry::new("alice", "t1", deck()))
            .await
            .unwrap();

        assert_eq!(
            accounts.insert(RosterEntry::new("alice", "t2", deck())).await,
            Err(AccountError::DuplicateUsername("alice".into()))
        );
        assert_eq!(
            accounts.insert(RosterEntry::new("bob", "t1", deck())).await,
            Err(AccountError::DuplicateToken)
        );
    }

    #[tokio::test]
    async fn removed_account_no_longer_authenticates() {
        let accounts = Accounts::new();
        accounts
            .insert(RosterEntry::new("alice", "alice-token", deck()))
            .await
            .unwrap();

        assert!(accounts.remove("alice").await);
        assert!(!accounts.remove("alice").await);
        assert!(accounts.authenticate("alice-token").await.is_none());

        // Username and token are free again.
        accounts
            .insert(RosterEntry::new("alice", "alice-token", deck()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn recording_skips_missing_players() {
        let accounts = Accounts::new();
        accounts
            .insert(RosterEntry::new("alice", "alice-token", deck()))
            .await
            .unwrap();

        let result = BattleResult {
            player_one: "alice".into(),
            player_two: "ghost".into(),
            winner: Some("alice".into()),
            loser: Some("ghost".into()),
            rounds: 1,
            log: Vec::new(),
            final_deck_one: Deck::new(deck()),
            final_deck_two: Deck::default(),
        };
        accounts.record(&result).await;

        let stats = accounts.stats("alice").await.unwrap();
        assert_eq!((stats.wins, stats.elo), (1, 103));
        assert!(accounts.stats("ghost").await.is_none());
    }

    #[tokio::test]
    async fn scoreboard_orders_by_elo_then_name() {
        let mut roster = Roster::default();
        for (name, elo) in [("carol", 100), ("alice", 120), ("bob", 100)] {
            let mut entry = RosterEntry::new(name, format!("{name}-token"), deck());
            entry.elo = elo;
            roster.players.push(entry);
        }
        let accounts = Accounts::from_roster(roster).unwrap();

        let names: Vec<String> = accounts
            .scoreboard()
            .await
            .into_iter()
            .map(|s| s.username)
            .collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
    }
}
