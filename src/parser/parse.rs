//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the parse entry points.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent parser without backtracking:
//! - This module: Parser struct, token helpers, and entry points
//! - `statements`: statement lists, blocks, `for`, assignments and calls
//! - `expressions`: expressions with precedence climbing
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! sharing the borrowed [`Lexer`]. The parser holds no state of its own beyond
//! that borrow, so a parse is fully described by the lexer's position.
//!
//! Probing helpers (`match_token`, `check`) never report grammar errors: they
//! return whether the token was there and only fail if the lexer itself fails
//! while advancing.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token};
use thiserror::Error;

/// A grammar production could not be satisfied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at {location}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub location: SourceLocation,
}

impl SyntaxError {
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Either kind of failure that aborts a parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lexical(e) => e.location,
            ParseError::Syntax(e) => e.location,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ParseError::Lexical(e) => &e.message,
            ParseError::Syntax(e) => &e.message,
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::Lexical(_))
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, ParseError::Syntax(_))
    }
}

/// Parse a whole program from a fresh lexer.
pub fn parse(lexer: &mut Lexer) -> Result<StatementList, ParseError> {
    Parser::new(lexer).parse_program()
}

/// Parse a whole program from source text.
pub fn parse_source(source: &str) -> Result<StatementList, ParseError> {
    let mut lexer = Lexer::new(source);
    parse(&mut lexer)
}

/// Parse a single expression that must span the whole input.
pub fn parse_expression_source(source: &str) -> Result<Expression, ParseError> {
    let mut lexer = Lexer::new(source);
    Parser::new(&mut lexer).parse_standalone_expression()
}

/// Recursive descent parser over a borrowed lexer
pub struct Parser<'l> {
    pub(crate) lexer: &'l mut Lexer,
}

impl<'l> Parser<'l> {
    pub fn new(lexer: &'l mut Lexer) -> Self {
        Parser { lexer }
    }

    /// Parse the entire program: statements up to end of input.
    ///
    /// Primes the lexer, so it must be freshly constructed.
    pub fn parse_program(&mut self) -> Result<StatementList, ParseError> {
        self.advance()?;

        let program = self.parse_statement_list()?;

        if !self.lexer.is_at_end() {
            return Err(self.error(format!(
                "expected statement or end of input, found {}",
                self.lexer.token()
            )));
        }

        Ok(program)
    }

    /// Parse one expression followed by end of input.
    pub fn parse_standalone_expression(&mut self) -> Result<Expression, ParseError> {
        self.advance()?;

        let expr = self.parse_expression()?;
        self.expect_token(&Token::Eof, "after expression")?;

        Ok(expr)
    }

    // ===== Helper methods =====

    pub(crate) fn advance(&mut self) -> Result<(), ParseError> {
        self.lexer.advance()?;
        Ok(())
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        self.lexer.token().same_kind(token)
    }

    /// Consume `token` if it is next; report whether it was.
    pub(crate) fn match_token(&mut self, token: &Token) -> Result<bool, ParseError> {
        if self.check(token) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn current_line(&self) -> usize {
        self.lexer.line()
    }

    pub(crate) fn error(&self, message: String) -> ParseError {
        ParseError::Syntax(SyntaxError {
            message,
            location: self.lexer.location(),
        })
    }

    pub(crate) fn expect_token(&mut self, token: &Token, ctx: &str) -> Result<(), ParseError> {
        if self.match_token(token)? {
            Ok(())
        } else {
            Err(self.error(format!(
                "expected {} {}, found {}",
                token,
                ctx,
                self.lexer.token()
            )))
        }
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<Identifier, ParseError> {
        if let Token::Ident(id) = self.lexer.token() {
            let id = id.clone();
            self.advance()?;
            Ok(id)
        } else {
            Err(self.error(format!(
                "expected identifier {}, found {}",
                ctx,
                self.lexer.token()
            )))
        }
    }
}
