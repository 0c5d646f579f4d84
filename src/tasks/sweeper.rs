//! TTL Sweeper Task
//!
//! Background task that periodically removes expired entries from a
//! [`TtlCache`](crate::cache::TtlCache).

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::cache::ttl::{sweep_expired, EntryMap};

/// Handle to a running sweeper task.
///
/// The owner either calls [`Sweeper::shutdown`] to stop and join the task,
/// or [`Sweeper::abort`] when it cannot wait.
#[derive(Debug)]
pub(crate) struct Sweeper {
    /// Signals the loop to exit
    shutdown: oneshot::Sender<()>,
    /// The spawned loop
    handle: JoinHandle<()>,
}

impl Sweeper {
    /// Spawns a sweeper over `entries` that runs every `period`.
    ///
    /// The first sweep happens one full period after spawning.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime or if `period` is zero.
    pub(crate) fn spawn<V>(entries: EntryMap<V>, period: Duration) -> Self
    where
        V: Send + Sync + 'static,
    {
        let (shutdown, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(sweep_loop(entries, period, shutdown_rx));

        Self { shutdown, handle }
    }

    /// Signals the sweeper and waits for it to exit.
    ///
    /// A sweep that is already running completes before the task exits.
    pub(crate) async fn shutdown(self) {
        // The receiver is only gone if the loop already ended.
        let _ = self.shutdown.send(());

        match self.handle.await {
            Ok(()) => info!("TTL sweeper stopped"),
            Err(err) => error!("TTL sweeper terminated abnormally: {}", err),
        }
    }

    /// Cancels the task without waiting for it.
    pub(crate) fn abort(self) {
        self.handle.abort();
    }
}

async fn sweep_loop<V>(entries: EntryMap<V>, period: Duration, mut shutdown: oneshot::Receiver<()>)
where
    V: Send + Sync + 'static,
{
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Starting TTL sweeper with interval of {:?}", period);

    loop {
        tokio::select! {
            biased;

            // Also fires if the handle was dropped without a signal.
            _ = &mut shutdown => {
                debug!("TTL sweeper received shutdown signal");
                break;
            }
            _ = ticker.tick() => {
                let removed = sweep_expired(&entries).await;

                if removed > 0 {
                    info!("TTL sweep: removed {} expired entries", removed);
                } else {
                    debug!("TTL sweep: no expired entries found");
                }
            }
        }
    }
}
