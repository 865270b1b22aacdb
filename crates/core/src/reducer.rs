//! Pure state transition: one classified event applied to a session.

use crate::session::{LogEntry, SearchSession};
use crate::wire::StreamEvent;

/// Apply `event` to `session`, returning the next session state.
///
/// Pure: the input session is untouched and no phase transition happens here.
/// A producer-reported `Error` is accumulated for visibility only; whether
/// the stream ends is decided by the chunk source, not by event content.
pub fn apply(session: &SearchSession, event: &StreamEvent) -> SearchSession {
    let mut next = session.clone();
    match event {
        StreamEvent::Progress(message) => {
            next.log.push(LogEntry::info(message.clone()));
        }
        StreamEvent::ResultBatch(items) => {
            next.result_count += items.len();
            next.results.extend(items.iter().cloned());
            next.log.push(LogEntry::success(format!(
                "Received {} job(s), {} total",
                items.len(),
                next.result_count
            )));
        }
        StreamEvent::Error(message) => {
            next.log.push(LogEntry::error(format!("Error: {message}")));
        }
    }
    next
}
