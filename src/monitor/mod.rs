//! The composition root for one monitor session.
//!
//! ## Key responsibilities
//! - Wires the stream supervisor's output into the handler registry
//! - Unblocks the caller once the subscription attempt has completed
//! - Races the decode loop against caller cancellation
//! - Reports exactly one terminal value per session
//!
//! ## Example usage
//! ```rust,ignore
//! let cancel = CancellationToken::new();
//! let mut terminal = monitor(cancel.clone(), client, EventsOptions::default(), |event| {
//!     println!("{}-{}", event.resource_type, event.action);
//! })
//! .await;
//! if let Some(Err(e)) = terminal.recv().await {
//!     // session failed
//! }
//! ```

use nanoid::nanoid;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::warn;

use crate::decode_events;
use crate::metrics::MONITOR_SESSIONS_TOTAL;
use crate::Error;
use crate::Event;
use crate::EventHandler;
use crate::EventSource;
use crate::EventsOptions;
use crate::MonitorConfig;
use crate::Result;

/// Start a session that routes every event to one catch-all `callback`.
///
/// Returns the terminal channel once the subscription attempt has
/// completed; it yields exactly one value when the session ends: `Ok(())`
/// for a clean or cancelled stop, `Err` for a subscription or decode
/// failure.
pub async fn monitor<S, F>(
    cancel: CancellationToken,
    source: S,
    options: EventsOptions,
    callback: F,
) -> mpsc::Receiver<Result<()>>
where
    S: EventSource,
    F: Fn(Event) + Send + Sync + 'static,
{
    monitor_with_handler(cancel, source, options, EventHandler::catch_all(callback)).await
}

/// Start a session with a caller-populated [`EventHandler`] (arbitrary
/// classifier, multiple key-bound callbacks).
pub async fn monitor_with_handler<S>(
    cancel: CancellationToken,
    source: S,
    options: EventsOptions,
    handler: EventHandler,
) -> mpsc::Receiver<Result<()>>
where
    S: EventSource,
{
    monitor_with_config(cancel, source, options, MonitorConfig::default(), handler).await
}

/// [`monitor_with_handler`] with explicit session tuning.
pub async fn monitor_with_config<S>(
    cancel: CancellationToken,
    source: S,
    options: EventsOptions,
    config: MonitorConfig,
    handler: EventHandler,
) -> mpsc::Receiver<Result<()>>
where
    S: EventSource,
{
    let session_id = nanoid!(8);
    MONITOR_SESSIONS_TOTAL.inc();

    let (event_tx, event_rx) = mpsc::channel(config.event_channel_capacity.max(1));
    // Capacity 1 + try_send gives first-writer-wins on the terminal value.
    let (terminal_tx, terminal_rx) = mpsc::channel(1);
    let (started_tx, started_rx) = oneshot::channel();

    tokio::spawn(async move { handler.watch(event_rx).await });
    tokio::spawn(run_supervisor(
        session_id, source, options, cancel, started_tx, event_tx, terminal_tx,
    ));

    // Blocks until the subscription attempt has completed, success or not.
    // The outcome itself is observed through the terminal channel.
    let _ = started_rx.await;
    terminal_rx
}

/// Owns the stream handle for one session: subscribe, decode, publish.
/// Every exit path drops (closes) the stream and emits one terminal value.
async fn run_supervisor<S>(
    session_id: String,
    source: S,
    options: EventsOptions,
    cancel: CancellationToken,
    started_tx: oneshot::Sender<()>,
    event_tx: mpsc::Sender<Event>,
    terminal_tx: mpsc::Sender<Result<()>>,
) where
    S: EventSource,
{
    let subscription = tokio::select! {
        // Use biased to ensure branch order
        biased;
        _ = cancel.cancelled() => {
            debug!(session = %session_id, "cancelled before subscription completed");
            let _ = started_tx.send(());
            let _ = terminal_tx.try_send(Ok(()));
            return;
        }
        result = source.events(&options) => result,
    };

    // Whether we successfully subscribed to events or not, we can now
    // unblock the caller.
    let _ = started_tx.send(());

    let stream = match subscription {
        Ok(stream) => stream,
        Err(e) => {
            warn!(session = %session_id, error = %e, "event subscription failed");
            let _ = terminal_tx.try_send(Err(e));
            return;
        }
    };
    debug!(session = %session_id, "event subscription established");

    // The decode future owns the stream handle; every way out of this
    // select drops it, so the stream is closed promptly even when the
    // session is cancelled mid-read.
    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!(session = %session_id, "cancellation requested, closing stream");
            Ok(())
        }
        result = decode_events(stream, |record| {
            let tx = event_tx.clone();
            async move {
                match record {
                    Ok(event) => tx.send(event).await.map_err(|_| Error::DispatchStopped),
                    Err(e) => Err(e.into()),
                }
            }
        }) => match result {
            // The dispatch side went away first; nothing left to deliver to.
            Err(Error::DispatchStopped) => Ok(()),
            other => other,
        },
    };

    match &outcome {
        Ok(()) => debug!(session = %session_id, "event stream terminated cleanly"),
        Err(e) => warn!(session = %session_id, error = %e, "event stream terminated with error"),
    }
    let _ = terminal_tx.try_send(outcome);
}
