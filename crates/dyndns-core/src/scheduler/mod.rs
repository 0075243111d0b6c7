//! Fixed-interval scheduling
//!
//! A cancellable periodic task runner: the callback fires once immediately
//! at startup, then once per interval until shutdown. Ticks are
//! independent; a failed cycle neither stops the loop nor shifts the
//! timer. The loop suspends only while waiting for the next tick, never
//! mid-cycle, so cycles cannot overlap.

use std::future::Future;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;
use tracing::info;

/// Fixed-interval task runner
///
/// ## Lifecycle
///
/// 1. Create with [`Scheduler::new()`] (the interval must already have
///    passed configuration validation)
/// 2. Start with [`Scheduler::run()`]
/// 3. The loop stops on SIGINT, or on the test shutdown channel
pub struct Scheduler {
    interval: Duration,
}

impl Scheduler {
    /// Create a scheduler with the given tick period
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Run the tick loop until SIGINT
    pub async fn run<F, Fut>(&self, tick: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        self.run_with_shutdown(None, tick).await
    }

    /// Run the tick loop with a controlled shutdown signal
    ///
    /// With `Some(rx)` the loop stops when the channel fires (or when its
    /// sender is dropped); with `None` it stops on SIGINT. Tests use the
    /// channel form; production code should call [`Scheduler::run()`].
    ///
    /// The first tick completes immediately, so the callback runs once at
    /// startup before any waiting. A cycle that overruns the period delays
    /// the next tick instead of bursting to catch up.
    pub async fn run_with_shutdown<F, Fut>(
        &self,
        shutdown_rx: Option<oneshot::Receiver<()>>,
        mut tick: F,
    ) where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut timer = tokio::time::interval(self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        if let Some(mut rx) = shutdown_rx {
            loop {
                tokio::select! {
                    _ = timer.tick() => tick().await,

                    _ = &mut rx => {
                        info!("shutdown signal received, stopping scheduler");
                        break;
                    }
                }
            }
        } else {
            loop {
                tokio::select! {
                    _ = timer.tick() => tick().await,

                    _ = tokio::signal::ctrl_c() => {
                        info!("shutdown signal received, stopping scheduler");
                        break;
                    }
                }
            }
        }
    }
}
