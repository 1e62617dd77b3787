use crate::card::{Card, Element};

/// Tunables for a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleConfig {
    /// Rounds played before the battle is declared a draw.
    pub max_rounds: u32,
    /// Consecutive round losses after which a player's drawn card is enraged.
    pub rage_streak: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_rounds: 100,
            rage_streak: 3,
        }
    }
}

/// (winner name, loser name). Matched in either seat order.
pub const SPECIAL_CASES: [(&str, &str); 5] = [
    ("Dragon", "Goblin"),
    ("Wizzard", "Ork"),
    ("WaterSpell", "Knight"),
    ("Kraken", "Spell"),
    ("FireElf", "Dragon"),
];

/// Which seat a special-case rule hands the round to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialWinner {
    First,
    Second,
}

pub fn special_case(first: &Card, second: &Card) -> Option<SpecialWinner> {
    SPECIAL_CASES.iter().find_map(|&(winner, loser)| {
        if first.name == winner && second.name == loser {
            Some(SpecialWinner::First)
        } else if second.name == winner && first.name == loser {
            Some(SpecialWinner::Second)
        } else {
            None
        }
    })
}

/// Damage multipliers `(attacker, defender)` for an element pairing, or
/// `None` when the elements are neutral to each other.
pub fn element_modifier(attacker: Element, defender: Element) -> Option<(f64, f64)> {
    use Element::*;
    match (attacker, defender) {
        (Water, Fire) | (Fire, Normal) | (Normal, Water) => Some((2.0, 0.5)),
        (Fire, Water) | (Normal, Fire) | (Water, Normal) => Some((0.5, 2.0)),
        _ => None,
    }
}

/// Truncating scale, as used for both rage and elemental damage.
pub fn scale_damage(damage: u32, factor: f64) -> u32 {
    (damage as f64 * factor) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardType;

    fn monster(name: &str) -> Card {
        Card::new(1, name, 10, Element::Normal, CardType::Monster)
    }

    #[test]
    fn special_cases_cover_both_seat_orders() {
        assert_eq!(
            special_case(&monster("Dragon"), &monster("Goblin")),
            Some(SpecialWinner::First)
        );
        assert_eq!(
            special_case(&monster("Goblin"), &monster("Dragon")),
            Some(SpecialWinner::Second)
        );
        assert_eq!(
            special_case(&monster("Dragon"), &monster("FireElf")),
            Some(SpecialWinner::Second)
        );
        assert_eq!(special_case(&monster("Dragon"), &monster("Knight")), None);
    }

    #[test]
    fn special_table_has_ten_directed_pairs() {
        let mut names: Vec<&str> = SPECIAL_CASES
            .iter()
            .flat_map(|&(w, l)| [w, l])
            .collect();
        names.sort_unstable();
        names.dedup();

        let mut directed = 0;
        for a in &names {
            for b in &names {
                if special_case(&monster(a), &monster(b)).is_some() {
                    directed += 1;
                }
            }
        }
        assert_eq!(directed, 10);
    }

    #[test]
    fn element_table_is_antisymmetric() {
        use Element::*;
        for (a, b) in [(Water, Fire), (Fire, Normal), (Normal, Water)] {
            assert_eq!(element_modifier(a, b), Some((2.0, 0.5)));
            assert_eq!(element_modifier(b, a), Some((0.5, 2.0)));
        }
        assert_eq!(element_modifier(Fire, Fire), None);
    }

    #[test]
    fn scaling_truncates() {
        assert_eq!(scale_damage(15, 1.5), 22);
        assert_eq!(scale_damage(5, 0.5), 2);
        assert_eq!(scale_damage(1, 1.5), 1);
    }
}
