//! Wire-record classification.
//!
//! Each framed record is one JSON object with a `type` discriminator. Lines
//! that fail to parse, and parseable lines with a discriminator we do not
//! consume (the producer also emits `info`, `success` and `complete`
//! narration), are dropped silently: partial or garbled lines are expected at
//! stream boundaries and must never be conflated with producer-reported
//! errors.

use crate::job::JobRecord;
use serde::Deserialize;

/// A classified application-level event.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Producer narration, e.g. "Starting scrape on linkedin..."
    Progress(String),
    /// One batch of job records, in producer order.
    ResultBatch(Vec<JobRecord>),
    /// Producer-reported error; non-fatal for the stream.
    Error(String),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireRecord {
    Update { message: String },
    #[serde(alias = "result")]
    ResultBatch { data: Vec<JobRecord> },
    Error { message: String },
}

/// Classify one textual record, or `None` for anything unusable.
pub fn classify(record: &str) -> Option<StreamEvent> {
    let record = record.trim();
    if record.is_empty() {
        return None;
    }
    match serde_json::from_str::<WireRecord>(record).ok()? {
        WireRecord::Update { message } => Some(StreamEvent::Progress(message)),
        WireRecord::ResultBatch { data } => Some(StreamEvent::ResultBatch(data)),
        WireRecord::Error { message } => Some(StreamEvent::Error(message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_record() {
        let event = classify(r#"{"type":"update","message":"searching linkedin"}"#).unwrap();
        assert_eq!(event, StreamEvent::Progress("searching linkedin".into()));
    }

    #[test]
    fn test_result_batch_record() {
        let line = r#"{"type":"result_batch","data":[
            {"title":"Dev","company":"Acme","job_url":"https://x/1","site":"indeed"}
        ]}"#;
        match classify(line).unwrap() {
            StreamEvent::ResultBatch(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].title, "Dev");
            }
            other => panic!("expected ResultBatch, got {other:?}"),
        }
    }

    #[test]
    fn test_result_alias() {
        let line = r#"{"type":"result","data":[]}"#;
        assert_eq!(classify(line).unwrap(), StreamEvent::ResultBatch(vec![]));
    }

    #[test]
    fn test_error_record() {
        let event = classify(r#"{"type":"error","message":"rate limited"}"#).unwrap();
        assert_eq!(event, StreamEvent::Error("rate limited".into()));
    }

    #[test]
    fn test_unknown_discriminators_dropped() {
        assert_eq!(classify(r#"{"type":"info","message":"Pass 1"}"#), None);
        assert_eq!(classify(r#"{"type":"success","message":"done"}"#), None);
        assert_eq!(classify(r#"{"type":"complete","message":"bye"}"#), None);
    }

    #[test]
    fn test_garbage_dropped() {
        assert_eq!(classify("not json"), None);
        assert_eq!(classify(r#"{"type":"update""#), None);
        assert_eq!(classify(r#"{"message":"no discriminator"}"#), None);
    }

    #[test]
    fn test_blank_records_skipped() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("   \t  "), None);
    }

    #[test]
    fn test_malformed_payload_dropped() {
        // right discriminator, wrong payload shape
        assert_eq!(classify(r#"{"type":"update"}"#), None);
        assert_eq!(classify(r#"{"type":"result_batch","data":"nope"}"#), None);
    }
}
