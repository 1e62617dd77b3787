use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a card within a single deck.
pub type CardId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Normal,
    Fire,
    Water,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Normal => write!(f, "Normal"),
            Element::Fire => write!(f, "Fire"),
            Element::Water => write!(f, "Water"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Monster,
    Spell,
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardType::Monster => write!(f, "Monster"),
            CardType::Spell => write!(f, "Spell"),
        }
    }
}

/// A single playing card.
///
/// `damage` is the live value: rage mode raises it in place and the boost
/// stays with the card for the rest of the battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub damage: u32,
    pub element: Element,
    pub card_type: CardType,
}

impl Card {
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        damage: u32,
        element: Element,
        card_type: CardType,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            damage,
            element,
            card_type,
        }
    }

    pub fn is_monster(&self) -> bool {
        self.card_type == CardType::Monster
    }
}

/// The cards a player brings into a battle. Order carries no meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck(Vec<Card>);

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self(cards)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.0.get_mut(index)
    }

    pub fn push(&mut self, card: Card) {
        self.0.push(card);
    }

    /// Remove and return the card at `index`.
    pub fn take(&mut self, index: usize) -> Option<Card> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.0
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

/// A player as handed to the lobby for one pairing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattlePlayer {
    pub username: String,
    pub deck: Deck,
}

impl BattlePlayer {
    pub fn new(username: impl Into<String>, deck: impl Into<Deck>) -> Self {
        Self {
            username: username.into(),
            deck: deck.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_json_uses_camel_case() {
        let card = Card::new(7, "WaterGoblin", 10, Element::Water, CardType::Monster);
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["cardType"], "Monster");
        assert_eq!(json["element"], "Water");

        let back: Card = serde_json::from_value(json).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn deck_take_moves_card_out() {
        let mut deck = Deck::new(vec![
            Card::new(1, "Dragon", 50, Element::Fire, CardType::Monster),
            Card::new(2, "Knight", 20, Element::Normal, CardType::Monster),
        ]);

        let taken = deck.take(0).unwrap();
        assert_eq!(taken.name, "Dragon");
        assert_eq!(deck.len(), 1);
        assert!(deck.take(5).is_none());
    }

    #[test]
    fn deck_serializes_as_plain_list() {
        let deck = Deck::new(vec![Card::new(1, "Ork", 45, Element::Normal, CardType::Monster)]);
        let json = serde_json::to_value(&deck).unwrap();
        assert!(json.is_array());
    }
}
