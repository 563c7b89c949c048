//! Optional tracing of parser and differ decisions.
//!
//! Both the parser and the differ hold a `&dyn TraceSink`; the default is
//! [`NoopTrace`], so tracing costs nothing unless asked for. [`TracingSink`]
//! forwards events to the `tracing` crate at TRACE level.

use std::sync::Mutex;

use crate::lexer::Token;

/// Something the parser or differ did.
#[derive(Debug, Clone, Copy)]
pub enum TraceEvent<'a> {
    /// The parser entered a grammar rule at `token`.
    Rule {
        rule: &'static str,
        token: &'a Token,
    },
    /// The differ decided something about `subject`.
    Diff {
        subject: &'a str,
        change: &'a str,
    },
}

/// Receiver of trace events.
pub trait TraceSink: core::fmt::Debug + Send + Sync {
    fn event(&self, event: &TraceEvent<'_>);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTrace;

impl TraceSink for NoopTrace {
    fn event(&self, _event: &TraceEvent<'_>) {}
}

/// Emits events through `tracing::trace!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn event(&self, event: &TraceEvent<'_>) {
        match event {
            TraceEvent::Rule { rule, token } => {
                tracing::trace!(
                    rule,
                    token = %token,
                    offset = token.span.start,
                    "parse"
                );
            }
            TraceEvent::Diff { subject, change } => {
                tracing::trace!(subject, change, "diff");
            }
        }
    }
}

/// Keeps a one-line description of every event, in order.
#[derive(Debug, Default)]
pub struct TraceLog {
    events: Mutex<Vec<String>>,
}

impl TraceLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<String> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl TraceSink for TraceLog {
    fn event(&self, event: &TraceEvent<'_>) {
        let line = match event {
            TraceEvent::Rule { rule, token } => format!("{rule} @ {}", token.literal),
            TraceEvent::Diff { subject, change } => format!("{subject}: {change}"),
        };
        if let Ok(mut events) = self.events.lock() {
            events.push(line);
        }
    }
}

pub(crate) static NOOP: NoopTrace = NoopTrace;
