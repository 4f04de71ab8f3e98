//! Periodic poll-then-reconcile task.

use std::time::Duration;

use linkhub_backend::StatusSource;
use linkhub_menu::{LayoutNotifier, Reconciler};
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Polls `source` every `interval` and folds each result into the menu.
///
/// Nothing happens until `ready` fires; if its sender is dropped instead,
/// startup failed and the loop exits without polling. The first poll runs
/// as soon as the gate opens.
pub async fn poll_loop<S, N>(
    source: S,
    reconciler: Reconciler<N>,
    interval: Duration,
    ready: oneshot::Receiver<()>,
    cancel: CancellationToken,
) where
    S: StatusSource,
    N: LayoutNotifier,
{
    tokio::select! {
        _ = cancel.cancelled() => return,
        gate = ready => {
            if gate.is_err() {
                tracing::debug!("startup aborted, poller not started");
                return;
            }
        }
    }

    tracing::debug!(interval_secs = interval.as_secs(), "poller started");
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                // The store is only touched once the response is in hand.
                let result = tokio::select! {
                    _ = cancel.cancelled() => break,
                    result = source.poll() => result,
                };
                if matches!(&result, Err(e) if e.is_timeout()) {
                    tracing::debug!("backend poll timed out");
                }
                reconciler.apply_poll(result);
            }
        }
    }

    tracing::debug!("poller stopped");
}
