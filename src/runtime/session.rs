//! Source text plus its cached AST
//!
//! A session holds the last submitted source and, once parsed, its program.
//! Submitting identical text keeps the program; any change drops it so the
//! next run parses again.

use crate::parser::ast::StatementList;
use crate::parser::parse::{parse_source, ParseError};
use crate::runtime::{Runtime, RuntimeEvents};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Why [`Session::run`] stopped
#[derive(Debug, Error)]
pub enum SessionError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("runtime error: {0}")]
    Runtime(#[source] E),
}

#[derive(Debug, Default)]
pub struct Session {
    source: String,
    program: Option<Arc<StatementList>>,
    parse_time: Option<Duration>,
}

impl Session {
    pub fn new(source: impl Into<String>) -> Self {
        Session {
            source: source.into(),
            program: None,
            parse_time: None,
        }
    }

    /// Replace the source. Returns `true` if it differed and the cached
    /// program was dropped.
    pub fn submit(&mut self, source: &str) -> bool {
        if source == self.source {
            return false;
        }
        self.source = source.to_string();
        self.program = None;
        self.parse_time = None;
        true
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_parsed(&self) -> bool {
        self.program.is_some()
    }

    pub fn program(&self) -> Option<&StatementList> {
        self.program.as_deref()
    }

    /// Duration of the most recent parse of the current source
    pub fn parse_time(&self) -> Option<Duration> {
        self.parse_time
    }

    /// Parse the current source unless a program is already cached.
    pub fn parse(&mut self) -> Result<Arc<StatementList>, ParseError> {
        if let Some(program) = &self.program {
            return Ok(Arc::clone(program));
        }

        let start = Instant::now();
        let result = parse_source(&self.source);
        self.parse_time = Some(start.elapsed());

        let program = Arc::new(result?);
        self.program = Some(Arc::clone(&program));
        Ok(program)
    }

    /// Parse if needed, then hand the program to `runtime`.
    ///
    /// A parse failure is returned without touching the runtime. A runtime
    /// failure is reported to `events` before being returned.
    pub fn run<R: Runtime>(
        &mut self,
        runtime: &mut R,
        events: &mut dyn RuntimeEvents,
    ) -> Result<(), SessionError<R::Error>> {
        let program = self.parse()?;

        runtime.run(&program, events).map_err(|e| {
            events.on_runtime_error(&e);
            SessionError::Runtime(e)
        })
    }

    /// Parse `source` on a worker thread.
    pub fn parse_in_background(source: String) -> JoinHandle<Result<StatementList, ParseError>> {
        thread::spawn(move || parse_source(&source))
    }
}
