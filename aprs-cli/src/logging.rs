//! Structured logging for the CLI's diagnostic stream.
//!
//! The core library only ever collects entries in-memory (see
//! `aprs_core::logging::SignalLogger`); this module owns turning them,
//! plus the CLI's own info/warn/error messages, into lines on stderr.

use aprs_core::logging::{LogLevel, SignalLogger};
use chrono::Utc;
use color_eyre::eyre::Result;
use serde::Serialize;
use std::io::{self, Write};
use std::str::FromStr;

/// Output format for structured log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Logfmt,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "json" => Ok(LogFormat::Json),
            "logfmt" => Ok(LogFormat::Logfmt),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Structured log event types this domain actually produces.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    /// General info message.
    Info { message: String },
    /// Warning message.
    Warn { message: String },
    /// Error message, optionally with extra detail.
    Error { message: String, details: Option<String> },
    /// Raw framed bit sequence, emitted when `--debug` is set.
    FrameTrace { bit_count: usize, bits: String },
}

/// Logger that renders `LogEvent`s to stderr in one of three formats.
pub struct StructuredLogger {
    format: LogFormat,
    writer: Box<dyn Write + Send>,
}

impl StructuredLogger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            writer: Box::new(io::stderr()),
        }
    }

    /// Construct a logger writing to an arbitrary sink instead of stderr.
    /// Used by tests to inspect rendered log lines.
    #[cfg(test)]
    pub fn with_writer(format: LogFormat, writer: Box<dyn Write + Send>) -> Self {
        Self { format, writer }
    }

    pub fn log(&mut self, event: LogEvent) -> Result<()> {
        let line = match self.format {
            LogFormat::Json => serde_json::to_string(&event)?,
            LogFormat::Logfmt => Self::format_logfmt(&event),
            LogFormat::Pretty => Self::format_pretty(&event),
        };
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn info(&mut self, message: impl Into<String>) -> Result<()> {
        self.log(LogEvent::Info { message: message.into() })
    }

    pub fn error(&mut self, message: impl Into<String>) -> Result<()> {
        self.log(LogEvent::Error {
            message: message.into(),
            details: None,
        })
    }

    fn format_logfmt(event: &LogEvent) -> String {
        let ts = Utc::now().to_rfc3339();
        match event {
            LogEvent::Info { message } => format!("ts=\"{ts}\" level=info msg=\"{message}\""),
            LogEvent::Warn { message } => format!("ts=\"{ts}\" level=warn msg=\"{message}\""),
            LogEvent::Error { message, details } => match details {
                Some(d) => format!("ts=\"{ts}\" level=error msg=\"{message}\" details=\"{d}\""),
                None => format!("ts=\"{ts}\" level=error msg=\"{message}\""),
            },
            LogEvent::FrameTrace { bit_count, bits } => {
                format!("ts=\"{ts}\" type=frame_trace bit_count={bit_count} bits=\"{bits}\"")
            }
        }
    }

    fn format_pretty(event: &LogEvent) -> String {
        let ts = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
        match event {
            LogEvent::Info { message } => format!("[{ts}] INFO: {message}"),
            LogEvent::Warn { message } => format!("[{ts}] WARN: {message}"),
            LogEvent::Error { message, details } => match details {
                Some(d) => format!("[{ts}] ERROR: {message} | {d}"),
                None => format!("[{ts}] ERROR: {message}"),
            },
            LogEvent::FrameTrace { bit_count, bits } => {
                format!("[{ts}] FRAME TRACE ({bit_count} bits): {bits}")
            }
        }
    }
}

/// Drain a core-side `SignalLogger`'s entries through the CLI logger,
/// preserving level. A `Debug`-level entry tagged `FRAME` (the raw framed
/// bit sequence, only present when `--debug` is set) is rendered as a
/// dedicated `FrameTrace` event instead of a generic info line.
pub fn forward_signal_log(signal_log: &SignalLogger, out: &mut StructuredLogger) -> Result<()> {
    for entry in signal_log.entries() {
        if entry.level == LogLevel::Debug && entry.subsystem == "FRAME" {
            out.log(LogEvent::FrameTrace {
                bit_count: entry.message.len(),
                bits: entry.message.clone(),
            })?;
            continue;
        }
        let message = format!("[{}] {}", entry.subsystem, entry.message);
        match entry.level {
            LogLevel::Error => out.log(LogEvent::Error { message, details: None })?,
            LogLevel::Warn => out.log(LogEvent::Warn { message })?,
            _ => out.log(LogEvent::Info { message })?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn parses_known_formats() {
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("xml").is_err());
    }

    #[test]
    fn forward_signal_log_renders_debug_frame_entry_as_frame_trace() {
        let mut signal_log = SignalLogger::new();
        signal_log.info("FRAME", "built 64-bit frame");
        signal_log.debug("FRAME", "1010");

        let buf = SharedBuf::default();
        let mut out = StructuredLogger::with_writer(LogFormat::Json, Box::new(buf.clone()));
        forward_signal_log(&signal_log, &mut out).unwrap();

        let rendered = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(rendered.contains("\"type\":\"frame_trace\""));
        assert!(rendered.contains("\"bits\":\"1010\""));
        assert!(rendered.contains("\"type\":\"info\""));
    }
}
