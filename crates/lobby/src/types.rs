use arena_core::{BattleConfig, BattleResult};
use std::sync::Arc;
use std::time::Duration;

/// Identifies one stay in the waiting slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket(pub u64);

/// How a caller took part in a pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Seat {
    /// Found the lobby empty and waited. Fights as player one.
    Waiter,
    /// Found someone waiting and completed the pairing. Fights as player two.
    Challenger,
}

/// What `Lobby::enter` hands back to each of the two paired callers.
#[derive(Clone, Debug)]
pub struct Pairing {
    pub seat: Seat,
    pub result: Arc<BattleResult>,
}

impl Pairing {
    /// The challenger is the side whose call ran the battle and its recording.
    pub fn completed_pairing(&self) -> bool {
        self.seat == Seat::Challenger
    }
}

/// Snapshot of the lobby.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LobbyStatus {
    pub waiting: Option<String>,
    pub battles_fought: u64,
}

/// Configuration for the lobby.
#[derive(Clone, Debug, Default)]
pub struct LobbyConfig {
    /// Rules every battle runs with.
    pub battle: BattleConfig,
    /// Base seed for battle randomness. `None` seeds each battle from entropy.
    pub seed: Option<u64>,
    /// How long a lone player waits before giving up. `None` waits forever.
    pub wait_timeout: Option<Duration>,
}
