//! Battle arena server.
//!
//! Players authenticate with a bearer token from the roster file and
//! `POST /battles` to be paired with the next player who does the same.

use arena_core::BattleConfig;
use arena_lobby::LobbyConfig;
use arena_web::{AppState, Accounts, Roster, app};
use clap::Parser;
use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "arena-server")]
#[command(about = "HTTP server pairing players into card battles")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "10001")]
    port: u16,

    /// JSON roster of players, tokens and decks
    #[arg(short, long)]
    roster: Option<PathBuf>,

    /// Base seed for battle randomness (battle n uses seed + n)
    #[arg(long)]
    seed: Option<u64>,

    /// Give up waiting for an opponent after this many seconds
    #[arg(long)]
    wait_timeout_secs: Option<u64>,

    /// Round cap per battle
    #[arg(long, default_value = "100")]
    max_rounds: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let roster = match &args.roster {
        Some(path) => Roster::load(path)?,
        None => {
            tracing::warn!("No roster given, nobody will be able to authenticate");
            Roster::default()
        }
    };
    let players = roster.players.len();
    let accounts = Arc::new(Accounts::from_roster(roster)?);

    let config = LobbyConfig {
        battle: BattleConfig {
            max_rounds: args.max_rounds,
            ..BattleConfig::default()
        },
        seed: args.seed,
        wait_timeout: args.wait_timeout_secs.map(Duration::from_secs),
    };

    let app = app(Arc::new(AppState::new(config, accounts)));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Arena server listening on http://{}", addr);
    tracing::info!("{} players loaded", players);
    if let Some(secs) = args.wait_timeout_secs {
        tracing::info!("Lobby wait timeout: {}s", secs);
    }

    axum::serve(listener, app).await?;

    Ok(())
}
