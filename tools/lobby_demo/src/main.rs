use arena_core::{BattlePlayer, Card, CardType, Element};
use arena_lobby::{Lobby, LobbyConfig, Seat};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

const PLAYERS: [&str; 6] = ["alice", "bob", "carol", "dave", "erin", "frank"];

#[tokio::main]
async fn main() {
    println!("=== Lobby Demo ===\n");

    let config = LobbyConfig {
        seed: Some(42),
        wait_timeout: Some(Duration::from_secs(5)),
        ..LobbyConfig::default()
    };
    let lobby = Arc::new(Lobby::new(config));

    let mut tasks = Vec::new();
    for (i, name) in PLAYERS.iter().enumerate() {
        let lobby = Arc::clone(&lobby);
        let player = BattlePlayer::new(*name, deck(i as u32 * 10));
        tasks.push(tokio::spawn(async move {
            // Staggered arrivals pair up in order.
            sleep(Duration::from_millis(100 * i as u64)).await;
            println!("[{}] entering the lobby", player.username);
            let name = player.username.clone();
            (name, lobby.enter(player).await)
        }));
    }

    for task in tasks {
        let Ok((name, outcome)) = task.await else {
            println!("player task panicked");
            continue;
        };
        match outcome {
            Ok(pairing) => {
                let result = &pairing.result;
                let seat = match pairing.seat {
                    Seat::Waiter => "waited",
                    Seat::Challenger => "challenged",
                };
                let winner = result.winner.as_deref().unwrap_or("nobody");
                println!(
                    "[{}] {}: {} vs {}, {} rounds, winner {}",
                    name, seat, result.player_one, result.player_two, result.rounds, winner
                );
            }
            Err(err) => println!("[{}] {}", name, err),
        }
    }

    let status = lobby.status().await;
    println!("\n=== Lobby Status ===");
    println!("Battles fought: {}", status.battles_fought);
    println!("Waiting: {}", status.waiting.as_deref().unwrap_or("nobody"));
}

fn deck(first_id: u32) -> Vec<Card> {
    vec![
        Card::new(first_id + 1, "Dragon", 50, Element::Fire, CardType::Monster),
        Card::new(first_id + 2, "Goblin", 20, Element::Normal, CardType::Monster),
        Card::new(first_id + 3, "WaterSpell", 30, Element::Water, CardType::Spell),
        Card::new(first_id + 4, "FireSpell", 25, Element::Fire, CardType::Spell),
        Card::new(first_id + 5, "Knight", 35, Element::Normal, CardType::Monster),
    ]
}
