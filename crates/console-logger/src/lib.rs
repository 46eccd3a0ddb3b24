//! Console Logger
//!
//! A `tracing` subscriber that writes formatted events to the browser console.
//! Each event is buffered by a [`ConsoleWriter`] and emitted as one console call
//! at the matching severity (`console.error`, `console.warn`, ...). Off-wasm the
//! lines go to stderr so native test runs still show them.

use std::io::{self, Write};

use tracing::{Level, Metadata};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Logger setup errors
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("unknown log level: {0:?}")]
    UnknownLevel(String),

    #[error("logger already initialised: {0}")]
    AlreadyInitialised(String),
}

/// Parse a level name (`trace`, `debug`, `info`, `warn`, `error`, `off`).
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        "off" => Ok(LevelFilter::OFF),
        _ => Err(LoggerError::UnknownLevel(level.to_string())),
    }
}

/// Install the global console subscriber.
///
/// Timestamps are disabled: `SystemTime::now` is unavailable on
/// `wasm32-unknown-unknown` and the console stamps lines itself.
pub fn init(level: &str) -> Result<(), LoggerError> {
    let filter = parse_level(level)?;
    tracing_subscriber::fmt()
        .with_writer(MakeConsoleWriter)
        .with_max_level(filter)
        .with_ansi(false)
        .without_time()
        .with_target(true)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialised(e.to_string()))
}

/// Buffers one formatted event and flushes it to the console on drop
pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    pub fn new(level: Level) -> Self {
        Self { level, buf: Vec::new() }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Take the buffered line, without the trailing newline.
    /// Returns `None` when nothing but whitespace was written.
    pub fn take_line(&mut self) -> Option<String> {
        let line = String::from_utf8_lossy(&self.buf).trim_end().to_string();
        self.buf.clear();
        if line.is_empty() {
            None
        } else {
            Some(line)
        }
    }
}

impl Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if let Some(line) = self.take_line() {
            emit(self.level, &line);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    use web_sys::console;

    match level {
        Level::ERROR => console::error_1(&line.into()),
        Level::WARN => console::warn_1(&line.into()),
        Level::INFO => console::info_1(&line.into()),
        _ => console::debug_1(&line.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// `MakeWriter` handing out one [`ConsoleWriter`] per event
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}
