use std::sync::Arc;

use futures_util::StreamExt;
use jobwatch_core::search::SearchRequest;
use jobwatch_core::{classify, reducer, LineFramer, SearchSession};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::transport::SearchTransport;

/// Drives one streaming search at a time.
///
/// State machine: `Idle → Running → {Completed, Cancelled, Failed}`.
/// All session mutation happens on the read-loop task; observers get
/// complete snapshots via [`SearchController::subscribe`].
pub struct SearchController {
    transport: Arc<dyn SearchTransport>,
    state_tx: watch::Sender<SearchSession>,
    current: Option<RunHandle>,
}

/// Cancellation capability plus the loop task for one run.
struct RunHandle {
    cancel_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SearchController {
    pub fn new(transport: Arc<dyn SearchTransport>) -> Self {
        let (state_tx, _) = watch::channel(SearchSession::idle());
        Self {
            transport,
            state_tx,
            current: None,
        }
    }

    /// Subscribe to session snapshots. Each published value is a complete,
    /// consistent session; the channel always holds the latest.
    pub fn subscribe(&self) -> watch::Receiver<SearchSession> {
        self.state_tx.subscribe()
    }

    /// Current session snapshot.
    pub fn snapshot(&self) -> SearchSession {
        self.state_tx.borrow().clone()
    }

    /// Start a new run.
    ///
    /// Any in-flight run is cancelled and awaited to termination first, so
    /// the old loop's last publication always precedes the new loop's first
    /// and two read loops are never alive at once.
    pub async fn start(&mut self, request: SearchRequest) {
        self.cancel_current().await;

        let (cancel_tx, cancel_rx) = watch::channel(false);
        self.state_tx.send_replace(SearchSession::running());

        let transport = Arc::clone(&self.transport);
        let state_tx = self.state_tx.clone();
        let task = tokio::spawn(run_stream(transport, request, cancel_rx, state_tx));
        self.current = Some(RunHandle { cancel_tx, task });
    }

    /// Cancel the in-flight run, if any.
    ///
    /// Idempotent and safe after natural completion. Once this returns, no
    /// further publications occur for the cancelled run.
    pub async fn stop(&mut self) {
        self.cancel_current().await;
    }

    /// Wait for the current run to reach a terminal state without
    /// cancelling it.
    pub async fn wait(&mut self) {
        if let Some(run) = self.current.take() {
            let _ = run.task.await;
        }
    }

    async fn cancel_current(&mut self) {
        if let Some(run) = self.current.take() {
            // Ignores send errors: the loop may already have exited and
            // dropped its receiver.
            let _ = run.cancel_tx.send(true);
            let _ = run.task.await;
        }
    }
}

/// The read loop for one run: open, pull chunks, frame, classify, reduce,
/// publish after every event. Terminal transitions happen only here.
async fn run_stream(
    transport: Arc<dyn SearchTransport>,
    request: SearchRequest,
    mut cancel_rx: watch::Receiver<bool>,
    state_tx: watch::Sender<SearchSession>,
) {
    let mut session = SearchSession::running();

    let mut chunks = tokio::select! {
        biased;
        _ = cancel_rx.changed() => {
            session.cancel();
            state_tx.send_replace(session);
            return;
        }
        opened = transport.open(&request) => match opened {
            Ok(stream) => stream,
            Err(err) => {
                warn!("search transport failed to open: {err:#}");
                session.fail(format!("{err:#}"));
                state_tx.send_replace(session);
                return;
            }
        }
    };

    let mut framer = LineFramer::new();
    loop {
        tokio::select! {
            biased;
            _ = cancel_rx.changed() => {
                debug!("search cancelled, detaching from stream");
                session.cancel();
                state_tx.send_replace(session);
                return;
            }
            chunk = chunks.next() => match chunk {
                Some(Ok(bytes)) => {
                    for record in framer.feed(&bytes) {
                        if let Some(event) = classify(&record) {
                            session = reducer::apply(&session, &event);
                            state_tx.send_replace(session.clone());
                        }
                    }
                }
                Some(Err(err)) => {
                    warn!("search stream errored: {err:#}");
                    session.fail(format!("{err:#}"));
                    state_tx.send_replace(session);
                    return;
                }
                None => {
                    // Normal end: a trailing partial record is still worth a
                    // classification attempt.
                    if let Some(tail) = framer.flush() {
                        if let Some(event) = classify(&tail) {
                            session = reducer::apply(&session, &event);
                            state_tx.send_replace(session.clone());
                        }
                    }
                    session.complete();
                    state_tx.send_replace(session);
                    return;
                }
            }
        }
    }
}
