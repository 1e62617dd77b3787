use crate::errors::LobbyError;
use crate::recorder::{BattleRecorder, NoRecorder};
use crate::types::{LobbyConfig, LobbyStatus, Pairing, Seat, Ticket};
use arena_core::{BattlePlayer, BattleResult, BattleSimulator};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex};

/// A player parked in the lobby, together with the channel its result arrives on.
struct Waiting {
    ticket: Ticket,
    player: BattlePlayer,
    completion: oneshot::Sender<Arc<BattleResult>>,
}

/// The single place a player can wait in. Holds at most one occupant.
#[derive(Default)]
struct WaitingSlot {
    occupant: Option<Waiting>,
}

/// Pairs players into battles, two at a time.
///
/// Share it between request handlers as `Arc<Lobby>`; every instance has its
/// own independent waiting slot. A [`BattleRecorder`] sees every result
/// before either player does.
pub struct Lobby<R = NoRecorder> {
    config: LobbyConfig,
    simulator: BattleSimulator,
    recorder: Arc<R>,
    slot: Mutex<WaitingSlot>,
    next_ticket: AtomicU64,
    /// Battles started, used to derive per-battle seeds.
    next_battle: AtomicU64,
    battles_fought: AtomicU64,
}

impl Lobby {
    /// Create an empty lobby with the given configuration.
    pub fn new(config: LobbyConfig) -> Self {
        Self::with_recorder(config, Arc::new(NoRecorder))
    }
}

impl<R: BattleRecorder> Lobby<R> {
    /// Create an empty lobby that hands every result to `recorder` first.
    pub fn with_recorder(config: LobbyConfig, recorder: Arc<R>) -> Self {
        Self {
            simulator: BattleSimulator::new(config.battle.clone()),
            config,
            recorder,
            slot: Mutex::new(WaitingSlot::default()),
            next_ticket: AtomicU64::new(1),
            next_battle: AtomicU64::new(0),
            battles_fought: AtomicU64::new(0),
        }
    }

    pub fn recorder(&self) -> &Arc<R> {
        &self.recorder
    }

    pub fn config(&self) -> &LobbyConfig {
        &self.config
    }

    /// Enter the lobby and return once this player's battle has been fought.
    ///
    /// # Behavior
    /// - Empty lobby: the player takes the slot and the call waits until a
    ///   second player arrives (or the optional wait timeout expires).
    /// - Someone waiting: that player is taken out of the slot, the battle is
    ///   fought with them as player one, the waiting call is woken with the
    ///   result and the same result is returned here.
    /// - The slot lock is only held for bookkeeping. The battle runs and the
    ///   waiter is woken after it is released.
    /// - The result is recorded before the waiter is woken and before this
    ///   call returns. Recording and waking run on a spawned task, so
    ///   dropping this call's future does not skip them.
    ///
    /// # Errors
    /// - [`LobbyError::AlreadyWaiting`] if this username is already in the slot.
    /// - [`LobbyError::WaitTimedOut`] if a wait timeout is configured and expired.
    /// - [`LobbyError::Abandoned`] if the pairing side dropped without a result.
    pub async fn enter(&self, player: BattlePlayer) -> Result<Pairing, LobbyError> {
        let mut slot = self.slot.lock().await;

        let Some(waiting) = slot.occupant.take() else {
            let ticket = Ticket(self.next_ticket.fetch_add(1, Ordering::Relaxed));
            let (completion, receiver) = oneshot::channel();
            tracing::info!(username = %player.username, "waiting for a battle");
            slot.occupant = Some(Waiting {
                ticket,
                player,
                completion,
            });
            drop(slot);

            return self.await_opponent(ticket, receiver).await;
        };

        if waiting.player.username == player.username {
            slot.occupant = Some(waiting);
            return Err(LobbyError::AlreadyWaiting {
                username: player.username,
            });
        }
        drop(slot);

        let Waiting {
            player: player_one,
            completion,
            ..
        } = waiting;

        let result = Arc::new(self.fight(player_one, player));

        let recorder = Arc::clone(&self.recorder);
        let delivered = Arc::clone(&result);
        let settle = tokio::spawn(async move {
            recorder.record(&delivered).await;
            if let Err(undelivered) = completion.send(delivered) {
                tracing::warn!(
                    username = %undelivered.player_one,
                    "waiting player left before the battle result arrived"
                );
            }
        });
        if let Err(err) = settle.await {
            tracing::error!(%err, "recording the battle result failed");
        }

        Ok(Pairing {
            seat: Seat::Challenger,
            result,
        })
    }

    /// Username of the player currently waiting, if any.
    pub async fn waiting_player(&self) -> Option<String> {
        let slot = self.slot.lock().await;
        slot.occupant
            .as_ref()
            .map(|waiting| waiting.player.username.clone())
    }

    pub async fn status(&self) -> LobbyStatus {
        let waiting = self.waiting_player().await;
        LobbyStatus {
            waiting,
            battles_fought: self.battles_fought.load(Ordering::Relaxed),
        }
    }

    fn fight(&self, one: BattlePlayer, two: BattlePlayer) -> BattleResult {
        let battle_no = self.next_battle.fetch_add(1, Ordering::Relaxed);
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(battle_no)),
            None => ChaCha8Rng::from_entropy(),
        };

        tracing::info!(
            battle = battle_no,
            player_one = %one.username,
            player_two = %two.username,
            "battle started"
        );

        let result = self.simulator.resolve(one, two, &mut rng);

        tracing::info!(
            battle = battle_no,
            winner = result.winner.as_deref().unwrap_or("none"),
            rounds = result.rounds,
            "battle finished"
        );
        self.battles_fought.fetch_add(1, Ordering::Relaxed);

        result
    }

    async fn await_opponent(
        &self,
        ticket: Ticket,
        mut receiver: oneshot::Receiver<Arc<BattleResult>>,
    ) -> Result<Pairing, LobbyError> {
        let result = match self.config.wait_timeout {
            None => receiver.await.map_err(|_| LobbyError::Abandoned)?,
            Some(limit) => match tokio::time::timeout(limit, &mut receiver).await {
                Ok(delivered) => delivered.map_err(|_| LobbyError::Abandoned)?,
                Err(_) => {
                    let mut slot = self.slot.lock().await;
                    let still_ours = slot
                        .occupant
                        .as_ref()
                        .is_some_and(|waiting| waiting.ticket == ticket);

                    if still_ours {
                        let left = slot.occupant.take();
                        drop(slot);
                        if let Some(waiting) = left {
                            tracing::info!(
                                username = %waiting.player.username,
                                "no opponent arrived, leaving the lobby"
                            );
                        }
                        return Err(LobbyError::WaitTimedOut { waited: limit });
                    }
                    drop(slot);

                    // Claimed by an opponent just before the deadline.
                    receiver.await.map_err(|_| LobbyError::Abandoned)?
                }
            },
        };

        Ok(Pairing {
            seat: Seat::Waiter,
            result,
        })
    }
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new(LobbyConfig::default())
    }
}
