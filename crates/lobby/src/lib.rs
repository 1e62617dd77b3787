pub mod errors;
pub mod lobby;
pub mod recorder;
pub mod types;

pub use errors::LobbyError;
pub use lobby::Lobby;
pub use recorder::{BattleRecorder, NoRecorder};
pub use types::{LobbyConfig, LobbyStatus, Pairing, Seat, Ticket};
