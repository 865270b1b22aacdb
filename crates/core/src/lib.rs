pub mod framer;
pub mod job;
pub mod reducer;
pub mod search;
pub mod session;
pub mod wire;

pub use framer::LineFramer;
pub use job::JobRecord;
pub use search::{SearchFilters, SearchRequest, Site};
pub use session::{LogEntry, LogLevel, SearchPhase, SearchSession};
pub use wire::{classify, StreamEvent};
