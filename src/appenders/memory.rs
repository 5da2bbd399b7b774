//! In-memory sink for capturing events

use crate::core::{LogEvent, LoggerError, Result};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Clonable sink that appends into a shared buffer
///
/// Clones share the buffer, so one handle can be given to a logger while
/// another is kept to inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Written lines without their terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    /// Parse every written line as a [`LogEvent`]
    pub fn events(&self) -> Result<Vec<LogEvent>> {
        self.lines()
            .iter()
            .map(|line| LogEvent::from_json(line).map_err(LoggerError::from))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let sink = MemorySink::new();
        let mut writer = sink.clone();

        writer.write_all(b"first\nsecond\n").unwrap();

        assert_eq!(sink.lines(), vec!["first", "second"]);
        sink.clear();
        assert!(writer.is_empty());
    }

    #[test]
    fn test_events_rejects_non_json() {
        let sink = MemorySink::new();
        sink.clone().write_all(b"not json\n").unwrap();
        assert!(sink.events().is_err());
    }
}
