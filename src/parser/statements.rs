//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Assignments: `x is 1 + 2;`
//! - Calls: `draw(x, y);`
//! - Loops: `for i from 1 to 10 step 2 { ... }`
//!
//! # Grammar
//!
//! ```text
//! statement_list ::= statement*
//! statement      ::= for_stmt | assignment | call
//! for_stmt       ::= "for" IDENT "from" expr "to" expr ("step" expr)? block
//! block          ::= "{" statement_list "}" | statement
//! assignment     ::= IDENT "is" expr ";"
//! call           ::= IDENT "(" arg_list? ")" ";"
//! ```
//!
//! A statement list ends at the first token that cannot start a statement;
//! the caller decides whether that token is acceptable (`}` or end of input).

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser<'_> {
    /// Parse statements until a token that cannot start one
    pub(crate) fn parse_statement_list(&mut self) -> Result<StatementList, ParseError> {
        let mut list = StatementList::new(self.current_line());

        while let Some(statement) = self.parse_statement()? {
            list.statements.push(statement);
        }

        Ok(list)
    }

    /// Parse a statement, or return `None` if the current token cannot start one
    pub(crate) fn parse_statement(&mut self) -> Result<Option<Statement>, ParseError> {
        match self.lexer.token() {
            Token::For => self.parse_for_statement().map(Some),
            Token::Ident(_) => self.parse_assignment_or_call().map(Some),
            _ => Ok(None),
        }
    }

    /// Parse a loop body: a braced list or exactly one statement
    fn parse_block(&mut self) -> Result<StatementList, ParseError> {
        let line = self.current_line();

        if self.match_token(&Token::LBrace)? {
            let mut body = self.parse_statement_list()?;
            body.line = line;
            self.expect_token(&Token::RBrace, "to close block")?;
            return Ok(body);
        }

        match self.parse_statement()? {
            Some(statement) => Ok(StatementList {
                statements: vec![statement],
                line,
            }),
            None => Err(self.error(format!(
                "expected '{{' or statement, found {}",
                self.lexer.token()
            ))),
        }
    }

    /// Parse for statement
    fn parse_for_statement(&mut self) -> Result<Statement, ParseError> {
        let line = self.current_line();

        self.expect_token(&Token::For, "to start loop")?;
        let variable = self.expect_identifier("after 'for'")?;
        self.expect_token(&Token::From, "after loop variable")?;
        let from = self.parse_expression()?;
        self.expect_token(&Token::To, "after loop start")?;
        let to = self.parse_expression()?;

        let step = if self.match_token(&Token::Step)? {
            Some(self.parse_expression()?)
        } else {
            None
        };

        let body = self.parse_block()?;

        Ok(Statement::For {
            variable,
            from,
            to,
            step,
            body,
            line,
        })
    }

    /// Parse `name is expr;` or `name(args);`
    fn parse_assignment_or_call(&mut self) -> Result<Statement, ParseError> {
        let line = self.current_line();
        let name = self.expect_identifier("at start of statement")?;

        if self.match_token(&Token::LParen)? {
            let args = self.parse_argument_list()?;
            self.expect_token(&Token::RParen, "after call arguments")?;
            self.expect_token(&Token::Semicolon, "after call")?;
            return Ok(Statement::Call {
                callee: name,
                args,
                line,
            });
        }

        if self.match_token(&Token::Is)? {
            let value = self.parse_expression()?;
            self.expect_token(&Token::Semicolon, "after assignment")?;
            return Ok(Statement::Assignment {
                target: name,
                value,
                line,
            });
        }

        Err(self.error(format!(
            "expected keyword 'is' or '(' after '{}', found {}",
            name,
            self.lexer.token()
        )))
    }
}
