use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use jobwatch_core::search::SearchRequest;
use jobwatch_core::session::{LogLevel, SearchPhase};
use jobwatch_session::{ChunkStream, SearchController, SearchTransport};
use tokio::sync::mpsc;

fn request() -> SearchRequest {
    SearchRequest::new("Python Developer", "India")
}

/// Replays a fixed chunk script on every open.
struct ScriptedTransport {
    chunks: Vec<Result<Vec<u8>, String>>,
}

impl ScriptedTransport {
    fn ok(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| Ok(c.as_bytes().to_vec())).collect(),
        }
    }
}

#[async_trait]
impl SearchTransport for ScriptedTransport {
    async fn open(&self, _request: &SearchRequest) -> Result<ChunkStream> {
        let items: Vec<Result<Bytes>> = self
            .chunks
            .iter()
            .map(|chunk| match chunk {
                Ok(bytes) => Ok(Bytes::copy_from_slice(bytes)),
                Err(msg) => Err(anyhow!("{msg}")),
            })
            .collect();
        Ok(futures_util::stream::iter(items).boxed())
    }
}

/// Opens successfully but never yields a chunk.
struct SilentTransport;

#[async_trait]
impl SearchTransport for SilentTransport {
    async fn open(&self, _request: &SearchRequest) -> Result<ChunkStream> {
        Ok(futures_util::stream::pending().boxed())
    }
}

/// Refuses to open.
struct RejectingTransport;

#[async_trait]
impl SearchTransport for RejectingTransport {
    async fn open(&self, _request: &SearchRequest) -> Result<ChunkStream> {
        Err(anyhow!("HTTP 401 Unauthorized: could not validate credentials"))
    }
}

/// Hands out one pre-registered channel-fed stream per open, so tests
/// control chunk timing across restarts.
struct ChannelTransport {
    receivers: Mutex<VecDeque<mpsc::UnboundedReceiver<Result<Bytes>>>>,
}

impl ChannelTransport {
    fn new(opens: usize) -> (Arc<Self>, Vec<mpsc::UnboundedSender<Result<Bytes>>>) {
        let mut receivers = VecDeque::new();
        let mut senders = Vec::new();
        for _ in 0..opens {
            let (tx, rx) = mpsc::unbounded_channel();
            senders.push(tx);
            receivers.push_back(rx);
        }
        (
            Arc::new(Self {
                receivers: Mutex::new(receivers),
            }),
            senders,
        )
    }
}

#[async_trait]
impl SearchTransport for ChannelTransport {
    async fn open(&self, _request: &SearchRequest) -> Result<ChunkStream> {
        let rx = self
            .receivers
            .lock()
            .unwrap()
            .pop_front()
            .expect("more opens than registered streams");
        let stream = futures_util::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|item| (item, rx))
        });
        Ok(stream.boxed())
    }
}

#[tokio::test]
async fn empty_stream_completes_with_empty_log() {
    let mut controller = SearchController::new(Arc::new(ScriptedTransport::ok(&[])));
    controller.start(request()).await;
    controller.wait().await;

    let session = controller.snapshot();
    assert_eq!(session.phase, SearchPhase::Completed);
    assert!(session.log.is_empty());
    assert_eq!(session.result_count, 0);
}

#[tokio::test]
async fn events_drive_session_state_across_chunk_boundaries() {
    // one update and one single-item batch, split mid-record
    let transport = ScriptedTransport::ok(&[
        "{\"type\":\"update\",\"mess",
        "age\":\"searching linkedin\"}\n{\"type\":\"result_batch\",\"data\":[",
        "{\"title\":\"Dev\",\"company\":\"Acme\",\"job_url\":\"https://x/1\",\"site\":\"linkedin\"}]}\n",
    ]);
    let mut controller = SearchController::new(Arc::new(transport));
    controller.start(request()).await;
    controller.wait().await;

    let session = controller.snapshot();
    assert_eq!(session.phase, SearchPhase::Completed);
    assert_eq!(session.result_count, 1);
    assert_eq!(session.log.len(), 2);
    assert_eq!(session.log[0].level, LogLevel::Info);
    assert_eq!(session.log[0].message, "searching linkedin");
    assert_eq!(session.log[1].level, LogLevel::Success);
    assert_eq!(session.results[0].job_url, "https://x/1");
}

#[tokio::test]
async fn unparsable_lines_are_dropped_silently() {
    let transport = ScriptedTransport::ok(&[
        "{\"type\":\"update\",\"message\":\"a\"}\nnot json\n",
        "{\"type\":\"info\",\"message\":\"narration we ignore\"}\n",
        "{\"type\":\"update\",\"message\":\"b\"}\n",
    ]);
    let mut controller = SearchController::new(Arc::new(transport));
    controller.start(request()).await;
    controller.wait().await;

    let session = controller.snapshot();
    assert_eq!(session.phase, SearchPhase::Completed);
    assert_eq!(session.log.len(), 2);
    assert!(session.last_error.is_none());
}

#[tokio::test]
async fn trailing_partial_record_is_flushed_at_stream_end() {
    // no terminator after the final record
    let transport =
        ScriptedTransport::ok(&["{\"type\":\"update\",\"message\":\"almost done\"}"]);
    let mut controller = SearchController::new(Arc::new(transport));
    controller.start(request()).await;
    controller.wait().await;

    let session = controller.snapshot();
    assert_eq!(session.phase, SearchPhase::Completed);
    assert_eq!(session.log.len(), 1);
    assert_eq!(session.log[0].message, "almost done");
}

#[tokio::test]
async fn open_failure_fails_the_session() {
    let mut controller = SearchController::new(Arc::new(RejectingTransport));
    controller.start(request()).await;
    controller.wait().await;

    let session = controller.snapshot();
    assert_eq!(session.phase, SearchPhase::Failed);
    let cause = session.last_error.expect("cause retained");
    assert!(cause.contains("401"));
}

#[tokio::test]
async fn mid_stream_error_fails_but_keeps_prior_events() {
    let transport = ScriptedTransport {
        chunks: vec![
            Ok(b"{\"type\":\"update\",\"message\":\"first\"}\n".to_vec()),
            Err("connection reset by peer".to_string()),
        ],
    };
    let mut controller = SearchController::new(Arc::new(transport));
    controller.start(request()).await;
    controller.wait().await;

    let session = controller.snapshot();
    assert_eq!(session.phase, SearchPhase::Failed);
    assert_eq!(session.log[0].message, "first");
    assert!(session
        .last_error
        .as_deref()
        .unwrap()
        .contains("connection reset"));
}

#[tokio::test]
async fn producer_error_event_does_not_end_the_run() {
    let transport = ScriptedTransport::ok(&[
        "{\"type\":\"error\",\"message\":\"linkedin blocked\"}\n{\"type\":\"update\",\"message\":\"continuing\"}\n",
    ]);
    let mut controller = SearchController::new(Arc::new(transport));
    controller.start(request()).await;
    controller.wait().await;

    let session = controller.snapshot();
    assert_eq!(session.phase, SearchPhase::Completed);
    assert_eq!(session.log.len(), 2);
    assert_eq!(session.log[0].level, LogLevel::Error);
    assert!(session.last_error.is_none());
}

#[tokio::test]
async fn stop_before_any_chunk_cancels_and_goes_quiet() {
    let mut controller = SearchController::new(Arc::new(SilentTransport));
    controller.start(request()).await;

    let mut rx = controller.subscribe();
    controller.stop().await;

    let session = controller.snapshot();
    assert_eq!(session.phase, SearchPhase::Cancelled);
    assert!(session.log.is_empty());

    // no publications after stop() has returned
    rx.borrow_and_update();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn stop_after_completion_is_a_noop() {
    let transport = ScriptedTransport::ok(&["{\"type\":\"update\",\"message\":\"x\"}\n"]);
    let mut controller = SearchController::new(Arc::new(transport));
    controller.start(request()).await;

    let mut rx = controller.subscribe();
    rx.wait_for(|s| s.phase.is_terminal()).await.unwrap();

    controller.stop().await;
    assert_eq!(controller.snapshot().phase, SearchPhase::Completed);
}

#[tokio::test]
async fn restart_supersedes_without_state_bleed() {
    let (transport, senders) = ChannelTransport::new(2);
    let mut controller = SearchController::new(transport);

    controller.start(request()).await;
    senders[0]
        .send(Ok(Bytes::from_static(
            b"{\"type\":\"update\",\"message\":\"from first session\"}\n",
        )))
        .unwrap();

    let mut rx = controller.subscribe();
    rx.wait_for(|s| s.log.len() == 1).await.unwrap();

    // supersede while the first stream is still open
    controller.start(request()).await;

    // the first session's sender is now detached; feeding it must not
    // reach the new session
    let _ = senders[0].send(Ok(Bytes::from_static(
        b"{\"type\":\"update\",\"message\":\"stale\"}\n",
    )));

    senders[1]
        .send(Ok(Bytes::from_static(
            b"{\"type\":\"update\",\"message\":\"from second session\"}\n",
        )))
        .unwrap();
    drop(senders);
    controller.wait().await;

    let session = controller.snapshot();
    assert_eq!(session.phase, SearchPhase::Completed);
    assert_eq!(session.log.len(), 1);
    assert_eq!(session.log[0].message, "from second session");
}

#[tokio::test]
async fn cancel_mid_stream_keeps_events_seen_so_far() {
    let (transport, senders) = ChannelTransport::new(1);
    let mut controller = SearchController::new(transport);

    controller.start(request()).await;
    senders[0]
        .send(Ok(Bytes::from_static(
            b"{\"type\":\"update\",\"message\":\"partial progress\"}\n",
        )))
        .unwrap();

    let mut rx = controller.subscribe();
    rx.wait_for(|s| s.log.len() == 1).await.unwrap();

    controller.stop().await;

    let session = controller.snapshot();
    assert_eq!(session.phase, SearchPhase::Cancelled);
    assert_eq!(session.log.len(), 1);
    assert_eq!(session.log[0].message, "partial progress");
}
