//! Expression parsing implementation
//!
//! This module handles parsing of expressions using precedence climbing
//! for binary operators and recursive descent for everything else.
//!
//! # Supported Expressions
//!
//! - Number literals: `12`, `0.5`
//! - Symbols: `x`
//! - Calls used as values: `sin(a)`
//! - Negation: `-x`, `-(a + b)`
//! - Binary operators: `+ - * / **`
//! - Brackets: `(a)` groups, `(a, b, ...)` builds a tuple
//!
//! # Precedence
//!
//! Each binary operator has a rank; rank 1 binds tightest. `parse_binary(r)`
//! parses operands at rank `r - 1` and folds every operator of rank `r` it
//! meets into a left-leaning tree, so all operators, `**` included, are
//! left-associative: `2 ** 3 ** 2` is `(2 ** 3) ** 2`.
//!
//! Negation applies to a single atom, so `-2 ** 2` is `(-2) ** 2`.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser<'_> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_binary(MAX_RANK)
    }

    /// Parse binary operators of `rank`, recursing into tighter ranks
    fn parse_binary(&mut self, rank: u8) -> Result<Expression, ParseError> {
        if rank == 0 {
            return self.parse_unary();
        }

        let mut left = self.parse_binary(rank - 1)?;

        while let Some(op) = self.peek_binary_op().filter(|op| op.rank() == rank) {
            self.advance()?;
            let right = self.parse_binary(rank - 1)?;
            let line = left.line();
            left = Expression::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                line,
            };
        }

        Ok(left)
    }

    fn peek_binary_op(&self) -> Option<BinOp> {
        match self.lexer.token() {
            Token::Plus => Some(BinOp::Add),
            Token::Minus => Some(BinOp::Sub),
            Token::Star => Some(BinOp::Mul),
            Token::Slash => Some(BinOp::Div),
            Token::Power => Some(BinOp::Pow),
            _ => None,
        }
    }

    /// Parse unary (-)
    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        let line = self.current_line();

        if self.match_token(&Token::Minus)? {
            let operand = Box::new(self.parse_atom()?);
            return Ok(Expression::Unary {
                op: UnOp::Neg,
                operand,
                line,
            });
        }

        self.parse_atom()
    }

    /// Parse atom (literals, symbols, calls, bracket expressions)
    fn parse_atom(&mut self) -> Result<Expression, ParseError> {
        let line = self.current_line();

        match self.lexer.token() {
            Token::Number(value) => {
                let value = *value;
                let digits = self.lexer.number_digits().unwrap_or_default().to_string();
                self.advance()?;
                Ok(Expression::Digit {
                    value,
                    digits,
                    line,
                })
            }
            Token::Ident(_) => {
                let name = self.expect_identifier("in expression")?;

                if self.match_token(&Token::LParen)? {
                    let args = self.parse_argument_list()?;
                    self.expect_token(&Token::RParen, "after call arguments")?;
                    return Ok(Expression::Call {
                        callee: name,
                        args,
                        line,
                    });
                }

                Ok(Expression::Symbol { name, line })
            }
            Token::LParen => {
                self.advance()?;
                let expr = self.parse_bracket_expression(line)?;
                self.expect_token(&Token::RParen, "to close bracket")?;
                Ok(expr)
            }
            other => Err(self.error(format!("expected expression, found {}", other))),
        }
    }

    /// Parse argument list up to (not including) the closing ')'
    pub(crate) fn parse_argument_list(&mut self) -> Result<ArgList, ParseError> {
        let mut args = ArgList::new(self.current_line());

        if self.check(&Token::RParen) {
            return Ok(args);
        }

        loop {
            args.args.push(self.parse_expression()?);

            if self.match_token(&Token::Comma)? {
                continue;
            }
            if self.check(&Token::RParen) {
                break;
            }
            return Err(self.error(format!(
                "expected ',' or ')' in argument list, found {}",
                self.lexer.token()
            )));
        }

        Ok(args)
    }

    /// Parse the inside of `( ... )`: one element groups, several make a tuple
    fn parse_bracket_expression(&mut self, line: usize) -> Result<Expression, ParseError> {
        let first = self.parse_expression()?;

        if self.check(&Token::RParen) {
            return Ok(first);
        }

        let mut elements = vec![first];

        loop {
            self.expect_token(&Token::Comma, "between tuple elements")?;
            elements.push(self.parse_expression()?);

            if self.check(&Token::Comma) {
                continue;
            }
            if self.check(&Token::RParen) {
                break;
            }
            return Err(self.error(format!(
                "expected ',' or ')' in tuple, found {}",
                self.lexer.token()
            )));
        }

        Ok(Expression::Tuple { elements, line })
    }
}
