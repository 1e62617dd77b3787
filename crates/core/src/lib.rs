pub mod battle;
pub mod card;
pub mod result;
pub mod rules;

pub use battle::{Battle, BattleSimulator, RoundOutcome, Side};
pub use card::{BattlePlayer, Card, CardId, CardType, Deck, Element};
pub use result::{BattleOutcome, BattleResult, StatsDelta, ELO_LOSS, ELO_WIN};
pub use rules::BattleConfig;
