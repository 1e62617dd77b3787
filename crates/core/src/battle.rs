use crate::card::{BattlePlayer, Card, Deck};
use crate::result::BattleResult;
use crate::rules::{element_modifier, scale_damage, special_case, BattleConfig, SpecialWinner};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cmp::Ordering;

const RAGE_MULTIPLIER: f64 = 1.5;

/// A seat in the battle. Player one is whoever waited in the lobby.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Won(Side),
    Draw,
}

#[derive(Debug)]
struct Contender {
    username: String,
    deck: Deck,
    losing_streak: u32,
}

impl Contender {
    fn new(player: BattlePlayer) -> Self {
        Self {
            username: player.username,
            deck: player.deck,
            losing_streak: 0,
        }
    }
}

/// A battle in progress. Rounds can be driven one at a time with explicit
/// card picks or with a random source; [`Battle::finish`] seals the result.
#[derive(Debug)]
pub struct Battle<'a> {
    config: &'a BattleConfig,
    one: Contender,
    two: Contender,
    round: u32,
    log: Vec<String>,
}

impl<'a> Battle<'a> {
    pub fn new(config: &'a BattleConfig, one: BattlePlayer, two: BattlePlayer) -> Self {
        Self {
            config,
            one: Contender::new(one),
            two: Contender::new(two),
            round: 0,
            log: Vec::new(),
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn deck(&self, side: Side) -> &Deck {
        &self.contender(side).deck
    }

    pub fn losing_streak(&self, side: Side) -> u32 {
        self.contender(side).losing_streak
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn total_cards(&self) -> usize {
        self.one.deck.len() + self.two.deck.len()
    }

    /// The side left holding cards once the other deck ran out.
    fn victor(&self) -> Option<Side> {
        match (self.one.deck.is_empty(), self.two.deck.is_empty()) {
            (false, true) => Some(Side::One),
            (true, false) => Some(Side::Two),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.one.deck.is_empty()
            || self.two.deck.is_empty()
            || self.round >= self.config.max_rounds
    }

    /// Play a round with each side's card picked uniformly from its deck.
    pub fn play_random_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<RoundOutcome> {
        if self.is_over() {
            return None;
        }
        let pick_one = rng.gen_range(0..self.one.deck.len());
        let pick_two = rng.gen_range(0..self.two.deck.len());
        self.play_round(pick_one, pick_two)
    }

    /// Play a round with the cards at the given deck positions.
    /// Returns `None` without touching state if the battle is over or a pick is out of range.
    pub fn play_round(&mut self, pick_one: usize, pick_two: usize) -> Option<RoundOutcome> {
        if self.is_over() || pick_one >= self.one.deck.len() || pick_two >= self.two.deck.len() {
            return None;
        }

        self.round += 1;
        let header = format!(
            "Round {}: {} plays {} vs. {} plays {}",
            self.round,
            self.one.username,
            describe(&self.one.deck.cards()[pick_one]),
            self.two.username,
            describe(&self.two.deck.cards()[pick_two]),
        );
        self.log.push(header);

        self.enrage(Side::One, pick_one);
        self.enrage(Side::Two, pick_two);

        let first = self.one.deck.cards()[pick_one].clone();
        let second = self.two.deck.cards()[pick_two].clone();
        let outcome = self.compare(&first, &second);

        if let RoundOutcome::Won(winner) = outcome {
            let loser_pick = match winner {
                Side::One => pick_two,
                Side::Two => pick_one,
            };
            if let Some(card) = self.contender_mut(winner.other()).deck.take(loser_pick) {
                self.contender_mut(winner).deck.push(card);
            }
            self.contender_mut(winner).losing_streak = 0;
            self.contender_mut(winner.other()).losing_streak += 1;
        }

        if let Some(victor) = self.victor() {
            let line = format!(
                "{} wins the battle! {} has no cards left.",
                self.contender(victor).username,
                self.contender(victor.other()).username
            );
            self.log.push(line);
        }

        Some(outcome)
    }

    fn enrage(&mut self, side: Side, pick: usize) {
        let rage_streak = self.config.rage_streak;
        let contender = self.contender_mut(side);
        if contender.losing_streak < rage_streak {
            return;
        }
        let Some(card) = contender.deck.get_mut(pick) else {
            return;
        };
        card.damage = scale_damage(card.damage, RAGE_MULTIPLIER);
        let line = format!(
            "{} enters RAGE MODE! {} gets +50% damage!",
            contender.username, card.name
        );
        self.log.push(line);
    }

    fn compare(&mut self, first: &Card, second: &Card) -> RoundOutcome {
        if let Some(special) = special_case(first, second) {
            let (winner, winning_card, losing_card) = match special {
                SpecialWinner::First => (Side::One, first, second),
                SpecialWinner::Second => (Side::Two, second, first),
            };
            self.log.push(format!(
                "  → Special rule triggered! {} has a natural advantage over {}.",
                winning_card.name, losing_card.name
            ));
            self.log.push(format!(
                "  → {} wins this round!",
                self.contender(winner).username
            ));
            return RoundOutcome::Won(winner);
        }

        let mut damage_one = first.damage;
        let mut damage_two = second.damage;

        // Pure monster fights ignore elements.
        if !first.is_monster() || !second.is_monster() {
            if let Some((mod_one, mod_two)) = element_modifier(first.element, second.element) {
                damage_one = scale_damage(damage_one, mod_one);
                damage_two = scale_damage(damage_two, mod_two);
                self.log.push(format!(
                    "  → Elemental effect applied: {} vs {}.",
                    first.element, second.element
                ));
            }
        }

        match damage_one.cmp(&damage_two) {
            Ordering::Greater => {
                self.log.push(format!(
                    "  → {} wins this round! ({} vs {})",
                    self.one.username, damage_one, damage_two
                ));
                RoundOutcome::Won(Side::One)
            }
            Ordering::Less => {
                self.log.push(format!(
                    "  → {} wins this round! ({} vs {})",
                    self.two.username, damage_two, damage_one
                ));
                RoundOutcome::Won(Side::Two)
            }
            Ordering::Equal => {
                self.log.push(format!(
                    "  → It's a draw! Both players dealt {} damage.",
                    damage_one
                ));
                RoundOutcome::Draw
            }
        }
    }

    /// Close the battle and produce its result.
    pub fn finish(mut self) -> BattleResult {
        let (winner, loser) = match self.victor() {
            Some(victor) => {
                // Decided before any round was played: no end line was logged yet.
                if self.round == 0 {
                    self.log.push(format!(
                        "{} wins the battle! {} has no cards left.",
                        self.contender(victor).username,
                        self.contender(victor.other()).username
                    ));
                }
                (
                    Some(self.contender(victor).username.clone()),
                    Some(self.contender(victor.other()).username.clone()),
                )
            }
            None => {
                if self.one.deck.is_empty() && self.two.deck.is_empty() {
                    self.log
                        .push("Neither player has cards left. The battle is a draw.".to_string());
                } else {
                    self.log.push(format!(
                        "The battle ends in a draw after {} rounds.",
                        self.round
                    ));
                }
                (None, None)
            }
        };

        BattleResult {
            player_one: self.one.username,
            player_two: self.two.username,
            winner,
            loser,
            rounds: self.round,
            log: self.log,
            final_deck_one: self.one.deck,
            final_deck_two: self.two.deck,
        }
    }

    fn contender(&self, side: Side) -> &Contender {
        match side {
            Side::One => &self.one,
            Side::Two => &self.two,
        }
    }

    fn contender_mut(&mut self, side: Side) -> &mut Contender {
        match side {
            Side::One => &mut self.one,
            Side::Two => &mut self.two,
        }
    }
}

fn describe(card: &Card) -> String {
    format!(
        "{} (DMG: {}, Type: {}, Element: {})",
        card.name, card.damage, card.card_type, card.element
    )
}

/// Resolves a full battle between two players. Pure: no I/O, no shared state.
#[derive(Clone, Debug, Default)]
pub struct BattleSimulator {
    config: BattleConfig,
}

impl BattleSimulator {
    pub fn new(config: BattleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn resolve<R: Rng + ?Sized>(
        &self,
        one: BattlePlayer,
        two: BattlePlayer,
        rng: &mut R,
    ) -> BattleResult {
        let mut battle = Battle::new(&self.config, one, two);
        while battle.play_random_round(rng).is_some() {}
        battle.finish()
    }

    /// Same as [`resolve`](Self::resolve) with a `ChaCha8Rng` seeded from `seed`.
    pub fn resolve_seeded(&self, one: BattlePlayer, two: BattlePlayer, seed: u64) -> BattleResult {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.resolve(one, two, &mut rng)
    }
}
