/*
[INPUT]:  Session state, API records, tracing output, and key events
[OUTPUT]: Ratatui console for tasks, users, sectors, and logs
[POS]:    TUI module for the myattire-console binary
[UPDATE]: When changing TUI layout, keybindings, or log plumbing
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use tracing_subscriber::fmt::MakeWriter;

mod app;
mod events;
mod runtime;
mod state;
mod terminal;
mod ui;

pub use runtime::run_tui;

pub const LOG_BUFFER_CAPACITY: usize = 2000;

pub type LogBufferHandle = Arc<StdMutex<LogBuffer>>;

/// Bounded in-memory sink for tracing output so the Logs tab can show the
/// most recent lines without touching stdout while the alternate screen is
/// active.
#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
        }
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

pub struct LogWriter {
    buffer: LogBufferHandle,
    partial: String,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let chunk = String::from_utf8_lossy(buf);
        self.partial.push_str(&chunk);
        while let Some(pos) = self.partial.find('\n') {
            let line = self.partial[..pos].trim_end_matches('\r').to_string();
            self.partial = self.partial[pos + 1..].to_string();
            let buffer = self.buffer.clone();
            let mut guard = buffer.lock().expect("log buffer lock");
            guard.push_line(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            let buffer = self.buffer.clone();
            let mut guard = buffer.lock().expect("log buffer lock");
            guard.push_line(line);
        }
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            partial: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_buffer_keeps_only_the_newest_lines() {
        let mut buffer = LogBuffer::new(3);
        for n in 0..5 {
            buffer.push_line(format!("line {n}"));
        }
        assert_eq!(buffer.snapshot(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn log_writer_splits_on_newlines_and_flushes_partials() {
        let handle: LogBufferHandle = Arc::new(StdMutex::new(LogBuffer::new(16)));
        let factory = LogWriterFactory::new(handle.clone());
        let mut writer = factory.make_writer();
        writer.write_all(b"first\r\nsec").expect("write");
        writer.write_all(b"ond\ntail").expect("write");
        writer.flush().expect("flush");

        let lines = handle.lock().expect("log buffer lock").snapshot();
        assert_eq!(lines, vec!["first", "second", "tail"]);
    }
}
