#![warn(clippy::all, rust_2018_idioms)]

//! Append-only console log.
//!
//! Records are owned by the sink and never change after [`OperationLogSink::append`].
//! The sink keeps its history whether or not a console view is attached; views
//! pick up the scroll request on their next frame.

/// One console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub sequence: u64,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct OperationLogSink {
    records: Vec<LogRecord>,
    scroll_to_latest: bool,
}

impl OperationLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text` as the next record and signal views to follow it
    pub fn append(&mut self, text: impl Into<String>) -> LogRecord {
        let record = LogRecord {
            sequence: self.records.len() as u64,
            text: text.into(),
        };
        tracing::info!(target: "opshell::console", "#{} {}", record.sequence, record.text);

        self.records.push(record.clone());
        self.scroll_to_latest = true;
        record
    }

    pub fn all(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&LogRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the pending scroll-to-latest signal
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_latest)
    }
}
