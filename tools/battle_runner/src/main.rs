use arena_core::{Battle, BattleConfig, BattlePlayer, Card, CardType, Element, RoundOutcome, Side};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let seed = args
        .iter()
        .position(|a| a == "--seed" || a == "-s")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);

    let config = BattleConfig::default();

    let kienboec = BattlePlayer::new(
        "kienboec",
        vec![
            Card::new(1, "Dragon", 50, Element::Fire, CardType::Monster),
            Card::new(2, "WaterSpell", 20, Element::Water, CardType::Spell),
            Card::new(3, "Knight", 30, Element::Normal, CardType::Monster),
            Card::new(4, "FireElf", 25, Element::Fire, CardType::Monster),
        ],
    );
    let altenhof = BattlePlayer::new(
        "altenhof",
        vec![
            Card::new(5, "Goblin", 15, Element::Normal, CardType::Monster),
            Card::new(6, "Kraken", 40, Element::Water, CardType::Monster),
            Card::new(7, "FireSpell", 25, Element::Fire, CardType::Spell),
            Card::new(8, "Wizzard", 35, Element::Normal, CardType::Monster),
        ],
    );

    println!("Seed {}, max {} rounds", seed, config.max_rounds);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut battle = Battle::new(&config, kienboec, altenhof);
    let total_cards = battle.total_cards();

    let mut printed = 0;
    let mut outcomes = Vec::new();
    while let Some(outcome) = battle.play_random_round(&mut rng) {
        if verbose {
            for line in &battle.log()[printed..] {
                println!("{}", line);
            }
            printed = battle.log().len();
            println!(
                "  [{:>3}] cards {} / {}, streaks {} / {}",
                battle.round(),
                battle.deck(Side::One).len(),
                battle.deck(Side::Two).len(),
                battle.losing_streak(Side::One),
                battle.losing_streak(Side::Two)
            );
        }
        assert_eq!(battle.total_cards(), total_cards, "cards were created or lost");
        outcomes.push(outcome);
    }

    let result = battle.finish();
    if verbose {
        for line in &result.log[printed..] {
            println!("{}", line);
        }
    }

    println!("\n=== Battle Complete ===");
    match &result.winner {
        Some(winner) => println!("Winner: {}", winner),
        None => println!("Draw"),
    }
    println!("Rounds: {}", result.rounds);
    println!(
        "Final decks: {} has {}, {} has {}",
        result.player_one,
        result.final_deck_one.len(),
        result.player_two,
        result.final_deck_two.len()
    );

    print_round_summary(&result.player_one, &result.player_two, &outcomes, &result.log);
}

fn print_round_summary(one: &str, two: &str, outcomes: &[RoundOutcome], log: &[String]) {
    let mut won_one = 0;
    let mut won_two = 0;
    let mut draws = 0;
    for outcome in outcomes {
        match outcome {
            RoundOutcome::Won(Side::One) => won_one += 1,
            RoundOutcome::Won(Side::Two) => won_two += 1,
            RoundOutcome::Draw => draws += 1,
        }
    }
    let rages = log.iter().filter(|l| l.contains("RAGE MODE")).count();
    let specials = log.iter().filter(|l| l.contains("Special rule")).count();
    let elementals = log.iter().filter(|l| l.contains("Elemental effect")).count();

    println!("\n=== Round Summary ===");
    println!("Rounds won by {}: {}", one, won_one);
    println!("Rounds won by {}: {}", two, won_two);
    println!("Drawn rounds: {}", draws);
    println!("Rage activations: {}", rages);
    println!("Special rules triggered: {}", specials);
    println!("Elemental effects applied: {}", elementals);
}
