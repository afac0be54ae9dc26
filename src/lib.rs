//! # Introduction
//!
//! icelang is the front end of a small drawing-script language: a lexer, a
//! recursive descent parser and the AST it produces. Drawing itself is left
//! to a [`runtime::Runtime`] implementation supplied by the host.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → (outline, symbols, printer, runtime)
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds an AST; `Display` on the
//!    AST prints canonical source.
//! 2. [`symbols`] — case-insensitive index of every name and how it is used.
//! 3. [`runtime`] — the collaborator interface a drawing runtime implements,
//!    plus [`runtime::Session`], which caches the AST between runs.
//! 4. [`ui`] — read-only ratatui inspector; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use icelang::parser::parse_source;
//!
//! let program = parse_source("FOR i FROM 1 TO 3 draw(i, i ** 2);").unwrap();
//! assert_eq!(
//!     program.to_string(),
//!     "for i from 1 to 3 {\n    draw(i, i ** 2);\n}\n"
//! );
//! ```

pub mod parser;
pub mod runtime;
pub mod symbols;
pub mod ui;
