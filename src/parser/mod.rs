//! Drawing-script source parser
//!
//! This module transforms script source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST) and the error types
//! - [`ast`]: AST node definitions
//! - [`outline`]: Flattened AST view for tools
//!
//! # Language
//!
//! - Statements: `x is expr;`, `name(args);`,
//!   `for v from a to b [step c] { ... }` (the braces are optional around a
//!   single statement)
//! - Expressions: numbers, identifiers, calls, negation, `+ - * / **`,
//!   bracketed groups and tuples `(a, b, ...)`
//! - Keywords and identifiers are case-insensitive; `//` and `--` start
//!   line comments
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies. `Display` on the AST
//! pretty-prints canonical source.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod outline;
pub mod parse;
mod printer;
mod statements;

pub use parse::{parse, parse_expression_source, parse_source, ParseError, Parser, SyntaxError};
