//! Interface between parsed programs and whatever executes them
//!
//! The parser never draws anything. A [`Runtime`] consumes a
//! [`StatementList`] and reports back through [`RuntimeEvents`]; both
//! callbacks are optional. [`OutputLog`] is a recording observer and
//! [`Session`] ties source text, the cached AST and a runtime together.

pub mod session;

pub use session::{Session, SessionError};

use crate::parser::ast::StatementList;
use std::error::Error;

/// Observer notified while a program runs
pub trait RuntimeEvents {
    /// Text produced by the statement on `line`
    fn on_output(&mut self, _text: &str, _line: usize) {}

    fn on_runtime_error(&mut self, _error: &dyn Error) {}
}

/// Observer that ignores everything
impl RuntimeEvents for () {}

/// Something that can execute a parsed program
pub trait Runtime {
    type Error: Error + 'static;

    fn run(
        &mut self,
        program: &StatementList,
        events: &mut dyn RuntimeEvents,
    ) -> Result<(), Self::Error>;
}

/// Records output and runtime errors
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    pub lines: Vec<OutputLine>,
    pub errors: Vec<String>,
}

/// Output gathered from one source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub line: usize,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text`; consecutive chunks from the same source line are joined
    pub fn print(&mut self, text: &str, line: usize) {
        if let Some(last) = self.lines.last_mut() {
            if last.line == line {
                last.text.push_str(text);
                return;
            }
        }
        self.lines.push(OutputLine {
            text: text.to_string(),
            line,
        });
    }

    /// All output split into display lines
    pub fn get_output(&self) -> Vec<String> {
        self.lines
            .iter()
            .flat_map(|out| {
                let mut result: Vec<String> = out.text.split('\n').map(|s| s.to_string()).collect();
                if result.last().is_some_and(|s| s.is_empty()) {
                    result.pop();
                }
                result
            })
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl RuntimeEvents for OutputLog {
    fn on_output(&mut self, text: &str, line: usize) {
        self.print(text, line);
    }

    fn on_runtime_error(&mut self, error: &dyn Error) {
        self.errors.push(error.to_string());
    }
}
