use arena_core::BattleResult;
use std::future::Future;

/// Persists a finished battle before either player is handed the result.
///
/// Runs on its own task: a caller that goes away mid-battle cannot cancel it.
pub trait BattleRecorder: Send + Sync + 'static {
    fn record(&self, result: &BattleResult) -> impl Future<Output = ()> + Send;
}

/// Keeps nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRecorder;

impl BattleRecorder for NoRecorder {
    async fn record(&self, _result: &BattleResult) {}
}
