//! Per-run session state, owned by the session controller.

use crate::job::JobRecord;
use serde::{Deserialize, Serialize};

/// Lifecycle of one search run.
///
/// `Completed`, `Cancelled` and `Failed` are terminal: no further events are
/// applied without a fresh start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    Idle,
    Running,
    Completed,
    Cancelled,
    Failed,
}

impl SearchPhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SearchPhase::Completed | SearchPhase::Cancelled | SearchPhase::Failed
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

/// One console line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Error,
            message: message.into(),
        }
    }
}

/// Accumulated state of one search run.
///
/// Event application goes through [`crate::reducer::apply`]; the phase and
/// `last_error` are set only by the controller, never by the reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSession {
    pub phase: SearchPhase,
    /// Ordered, append-only console log.
    pub log: Vec<LogEntry>,
    /// Accumulated result records, in arrival order, batches concatenated.
    /// Not deduplicated here; dedup over `job_url` is a presentation concern.
    pub results: Vec<JobRecord>,
    /// Running result count (sum of batch lengths).
    pub result_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::idle()
    }
}

impl SearchSession {
    pub fn idle() -> Self {
        Self {
            phase: SearchPhase::Idle,
            log: Vec::new(),
            results: Vec::new(),
            result_count: 0,
            last_error: None,
        }
    }

    /// Fresh state for a newly started run.
    pub fn running() -> Self {
        Self {
            phase: SearchPhase::Running,
            ..Self::idle()
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Chunk source exhausted normally.
    pub fn complete(&mut self) {
        self.phase = SearchPhase::Completed;
    }

    /// Cancellation observed. Not an error and not success.
    pub fn cancel(&mut self) {
        self.phase = SearchPhase::Cancelled;
    }

    /// Transport-level failure; the cause is retained for display.
    pub fn fail(&mut self, cause: impl Into<String>) {
        let cause = cause.into();
        self.log.push(LogEntry::error(format!("Search failed: {cause}")));
        self.last_error = Some(cause);
        self.phase = SearchPhase::Failed;
    }
}
