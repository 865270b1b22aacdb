//! Splits an arbitrary byte-chunk sequence into newline-delimited records.
//!
//! The framer keeps a single pending-partial buffer between feeds, so chunk
//! boundaries (including boundaries inside a multi-byte UTF-8 sequence) never
//! alter the record sequence. Text is decoded per complete record, not per
//! chunk.

/// Stateful line framer over raw byte chunks.
#[derive(Debug, Default)]
pub struct LineFramer {
    pending: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, yielding every record completed by it.
    ///
    /// The trailing segment after the last terminator (possibly empty) is
    /// retained for the next feed. Scanning covers only the newly appended
    /// bytes; earlier bytes were already scanned by previous feeds.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let scan_from = self.pending.len();
        self.pending.extend_from_slice(chunk);

        let mut records = Vec::new();
        let mut start = 0;
        let mut cursor = scan_from;
        while let Some(offset) = self.pending[cursor..].iter().position(|&b| b == b'\n') {
            let end = cursor + offset;
            records.push(decode_record(&self.pending[start..end]));
            start = end + 1;
            cursor = start;
        }
        if start > 0 {
            self.pending.drain(..start);
        }
        records
    }

    /// Emit any non-empty trailing partial as a best-effort final record.
    /// Called once at stream end; the result may be truncated or corrupt and
    /// downstream classification must tolerate that.
    pub fn flush(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let tail = decode_record(&self.pending);
        self.pending.clear();
        Some(tail)
    }
}

fn decode_record(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
