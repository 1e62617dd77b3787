use std::fmt;
use std::time::Duration;

/// Error when entering the lobby.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LobbyError {
    /// The same player is already waiting for an opponent.
    AlreadyWaiting { username: String },
    /// Nobody arrived within the configured wait timeout.
    WaitTimedOut { waited: Duration },
    /// The pairing side went away without delivering a result.
    Abandoned,
}

impl fmt::Display for LobbyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LobbyError::AlreadyWaiting { username } => {
                write!(f, "{username} is already waiting for a battle")
            }
            LobbyError::WaitTimedOut { waited } => {
                write!(f, "no opponent arrived within {}s", waited.as_secs_f64())
            }
            LobbyError::Abandoned => write!(f, "battle result was never delivered"),
        }
    }
}

impl std::error::Error for LobbyError {}
