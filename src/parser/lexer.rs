//! Lexer (tokenizer) for drawing scripts
//!
//! The lexer keeps exactly one token of lookahead. [`Lexer::advance`] discards
//! the current token and decodes the next one eagerly, so the numeric value or
//! identifier text of the current token is always available without further
//! scanning. Whitespace and line comments (`//` or `--` up to the end of the
//! line) are skipped between tokens.
//!
//! Keywords are ordinary identifiers whose case-folded spelling appears in the
//! keyword table, so `FOR`, `For` and `for` are the same token.

use super::ast::{Identifier, SourceLocation};
use std::fmt;
use thiserror::Error;

/// All token variants produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // End of input
    Eof,

    // Punctuation
    Semicolon, // ;
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Comma,     // ,

    // Operators
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /
    Power, // **

    // Literals
    Number(f64),

    // Identifiers
    Ident(Identifier),

    // Keywords
    Is,
    For,
    From,
    To,
    Step,
}

impl Token {
    /// The keyword this token stands for, if any.
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Token::Is => Some(Keyword::Is),
            Token::For => Some(Keyword::For),
            Token::From => Some(Keyword::From),
            Token::To => Some(Keyword::To),
            Token::Step => Some(Keyword::Step),
            _ => None,
        }
    }

    /// True when both tokens are the same kind, ignoring payloads.
    pub fn same_kind(&self, other: &Token) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Eof => write!(f, "end of input"),
            Token::Semicolon => write!(f, "';'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::Comma => write!(f, "','"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::Power => write!(f, "'**'"),
            Token::Number(n) => write!(f, "number {}", n),
            Token::Ident(id) => write!(f, "identifier '{}'", id),
            Token::Is => write!(f, "keyword 'is'"),
            Token::For => write!(f, "keyword 'for'"),
            Token::From => write!(f, "keyword 'from'"),
            Token::To => write!(f, "keyword 'to'"),
            Token::Step => write!(f, "keyword 'step'"),
        }
    }
}

/// Reserved words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Is,
    For,
    From,
    To,
    Step,
}

/// Keyword table, matched against the case-folded identifier
const KEYWORDS: [(&str, Keyword); 5] = [
    ("is", Keyword::Is),
    ("for", Keyword::For),
    ("from", Keyword::From),
    ("to", Keyword::To),
    ("step", Keyword::Step),
];

impl Keyword {
    /// Look up a case-folded identifier in the keyword table.
    pub fn lookup(folded: &str) -> Option<Keyword> {
        KEYWORDS
            .iter()
            .find(|(text, _)| *text == folded)
            .map(|(_, kw)| *kw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Is => "is",
            Keyword::For => "for",
            Keyword::From => "from",
            Keyword::To => "to",
            Keyword::Step => "step",
        }
    }

    pub fn token(self) -> Token {
        match self {
            Keyword::Is => Token::Is,
            Keyword::For => Token::For,
            Keyword::From => Token::From,
            Keyword::To => Token::To,
            Keyword::Step => Token::Step,
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lexical error at {location}: {message}")]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch as u32 >= 128
}

fn is_identifier_char(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_ascii_digit()
}

/// Printable form of a character for diagnostics
fn describe_char(ch: char) -> String {
    if ch.is_control() {
        format!("\\x{:02X}", ch as u32)
    } else {
        ch.to_string()
    }
}

/// Single-lookahead lexer for drawing scripts
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,

    current: Token,
    current_ident: Identifier,
    current_digits: String,
    comments: usize,
    token_start: SourceLocation,
}

impl Lexer {
    /// Create a lexer over `input`. Call [`Lexer::advance`] once before
    /// reading the first token.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            current: Token::Eof,
            current_ident: Identifier::default(),
            current_digits: String::new(),
            comments: 0,
            token_start: SourceLocation::new(0, 1, 1),
        }
    }

    /// Number of `//` and `--` comments in `input`
    pub fn count_comments(input: &str) -> Result<usize, LexError> {
        let mut lexer = Lexer::new(input);
        loop {
            lexer.advance()?;
            if lexer.is_at_end() {
                return Ok(lexer.comments);
            }
        }
    }

    /// Lex the whole input, returning every token with its start location.
    /// The final entry is always [`Token::Eof`].
    pub fn tokenize(input: &str) -> Result<Vec<(Token, SourceLocation)>, LexError> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();

        loop {
            lexer.advance()?;
            tokens.push((lexer.token().clone(), lexer.location()));
            if lexer.is_at_end() {
                break;
            }
        }

        Ok(tokens)
    }

    /// Discard the current token and decode the next one.
    ///
    /// After an error the lexer is left mid-token and must not be reused.
    pub fn advance(&mut self) -> Result<(), LexError> {
        self.skip_whitespace_and_comments();
        self.token_start = self.current_location();

        let ch = match self.peek() {
            Some(ch) => ch,
            None => {
                self.current = Token::Eof;
                return Ok(());
            }
        };

        self.current = match ch {
            '0'..='9' => Token::Number(self.number_literal()?),
            c if is_identifier_start(c) => self.identifier_or_keyword(),
            _ => self.symbol(ch)?,
        };

        Ok(())
    }

    /// The current (lookahead) token
    pub fn token(&self) -> &Token {
        &self.current
    }

    /// Value of the current numeric literal
    pub fn number(&self) -> Option<f64> {
        match self.current {
            Token::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Canonical spelling of the current numeric literal (`007.50` is `7.5`)
    pub fn number_digits(&self) -> Option<&str> {
        match self.current {
            Token::Number(_) => Some(&self.current_digits),
            _ => None,
        }
    }

    /// Text of the current identifier or keyword
    pub fn identifier(&self) -> Option<&Identifier> {
        match self.current {
            Token::Ident(ref id) => Some(id),
            _ if self.current.keyword().is_some() => Some(&self.current_ident),
            _ => None,
        }
    }

    /// Where the current token begins
    pub fn location(&self) -> SourceLocation {
        self.token_start
    }

    pub fn position(&self) -> usize {
        self.token_start.offset
    }

    pub fn line(&self) -> usize {
        self.token_start.line
    }

    pub fn column(&self) -> usize {
        self.token_start.column
    }

    /// Line comments skipped so far
    pub fn comment_count(&self) -> usize {
        self.comments
    }

    pub fn is_at_end(&self) -> bool {
        matches!(self.current, Token::Eof)
    }

    /// Parse numeric literal: digits, optionally `.` and more digits
    fn number_literal(&mut self) -> Result<f64, LexError> {
        let start = self.current_location();
        let mut value = 0.0_f64;
        let mut int_digits = String::new();
        let mut frac_digits = String::new();

        while let Some(ch) = self.peek().filter(|c| c.is_ascii_digit()) {
            value = value * 10.0 + f64::from(ch as u8 - b'0');
            int_digits.push(ch);
            self.bump();
        }

        if !value.is_finite() {
            return Err(LexError {
                message: "numeric literal out of range".to_string(),
                location: start,
            });
        }

        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            self.bump(); // '.'
            let mut weight = 1.0_f64;
            while let Some(ch) = self.peek().filter(|c| c.is_ascii_digit()) {
                weight /= 10.0;
                value += f64::from(ch as u8 - b'0') * weight;
                frac_digits.push(ch);
                self.bump();
            }
        }

        // Leading integer zeros and trailing fraction zeros add nothing to
        // the scanned value, so dropping them keeps it identical
        let int_part = int_digits.trim_start_matches('0');
        let frac_part = frac_digits.trim_end_matches('0');
        self.current_digits.clear();
        self.current_digits
            .push_str(if int_part.is_empty() { "0" } else { int_part });
        if !frac_part.is_empty() {
            self.current_digits.push('.');
            self.current_digits.push_str(frac_part);
        }

        // `1a` must not silently split into a number and an identifier
        if let Some(ch) = self.peek() {
            if is_identifier_char(ch) {
                return Err(LexError {
                    message: format!(
                        "invalid character '{}' after numeric literal",
                        describe_char(ch)
                    ),
                    location: self.current_location(),
                });
            }
        }

        Ok(value)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) -> Token {
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            if is_identifier_char(ch) {
                text.push(ch);
                self.bump();
            } else {
                break;
            }
        }

        let ident = Identifier::new(text);
        match Keyword::lookup(ident.folded()) {
            Some(kw) => {
                self.current_ident = ident;
                kw.token()
            }
            None => Token::Ident(ident),
        }
    }

    /// Punctuation and operators
    fn symbol(&mut self, ch: char) -> Result<Token, LexError> {
        let token = match ch {
            ';' => Token::Semicolon,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            ',' => Token::Comma,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '/' => Token::Slash,
            '*' => {
                if self.peek_ahead(1) == Some('*') {
                    self.bump();
                    Token::Power
                } else {
                    Token::Star
                }
            }
            _ => {
                return Err(LexError {
                    message: format!("unexpected character '{}'", describe_char(ch)),
                    location: self.current_location(),
                });
            }
        };

        self.bump();
        Ok(token)
    }

    /// Skip whitespace and line comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.bump();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => self.skip_line_comment(),
                Some('-') if self.peek_ahead(1) == Some('-') => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    /// Skip a comment up to and including the newline
    fn skip_line_comment(&mut self) {
        self.comments += 1;
        while let Some(ch) = self.bump() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Consume one character, keeping line and column in step
    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.position, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        Lexer::tokenize(source)
            .unwrap()
            .into_iter()
            .map(|(t, _)| t)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = kinds("x is (1, 2);");

        assert!(matches!(tokens[0], Token::Ident(ref id) if id.as_str() == "x"));
        assert!(matches!(tokens[1], Token::Is));
        assert!(matches!(tokens[2], Token::LParen));
        assert!(matches!(tokens[3], Token::Number(n) if n == 1.0));
        assert!(matches!(tokens[4], Token::Comma));
        assert!(matches!(tokens[5], Token::Number(n) if n == 2.0));
        assert!(matches!(tokens[6], Token::RParen));
        assert!(matches!(tokens[7], Token::Semicolon));
        assert!(matches!(tokens[8], Token::Eof));
    }

    #[test]
    fn test_operators() {
        let tokens = kinds("+ - * / ** ***");

        assert_eq!(
            tokens,
            vec![
                Token::Plus,
                Token::Minus,
                Token::Star,
                Token::Slash,
                Token::Power,
                Token::Power,
                Token::Star,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        let tokens = kinds("a // slash comment\nb -- dash comment\nc -- at end");

        assert_eq!(tokens.len(), 4);
        assert!(matches!(tokens[0], Token::Ident(ref id) if id.as_str() == "a"));
        assert!(matches!(tokens[1], Token::Ident(ref id) if id.as_str() == "b"));
        assert!(matches!(tokens[2], Token::Ident(ref id) if id.as_str() == "c"));
        assert!(matches!(tokens[3], Token::Eof));
    }

    #[test]
    fn test_single_dash_and_slash_are_operators() {
        assert_eq!(
            kinds("1 - 2 / 3"),
            vec![
                Token::Number(1.0),
                Token::Minus,
                Token::Number(2.0),
                Token::Slash,
                Token::Number(3.0),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(kinds("12.5")[0], Token::Number(12.5));
        assert_eq!(kinds("0")[0], Token::Number(0.0));
        assert_eq!(kinds("007")[0], Token::Number(7.0));
        assert_eq!(kinds("3.25")[0], Token::Number(3.25));
    }

    #[test]
    fn test_trailing_dot_is_not_part_of_number() {
        let err = Lexer::tokenize("1.").unwrap_err();
        assert_eq!(err.message, "unexpected character '.'");
        assert_eq!(err.location.offset, 1);
    }

    #[test]
    fn test_number_digits_are_canonical() {
        for (source, digits) in [
            ("12.5", "12.5"),
            ("007", "7"),
            ("0.50", "0.5"),
            ("3.000", "3"),
            ("0", "0"),
            ("0.3", "0.3"),
        ] {
            let mut lexer = Lexer::new(source);
            lexer.advance().unwrap();
            assert_eq!(lexer.number_digits(), Some(digits), "digits of {}", source);
        }

        let mut lexer = Lexer::new("x");
        lexer.advance().unwrap();
        assert_eq!(lexer.number_digits(), None);
    }

    #[test]
    fn test_huge_literal_is_out_of_range() {
        let source = format!("x is 1{};", "0".repeat(400));
        let err = Lexer::tokenize(&source).unwrap_err();

        assert_eq!(err.message, "numeric literal out of range");
        assert_eq!(err.location, SourceLocation::new(5, 1, 6));

        let source = format!("1{}", "0".repeat(300));
        assert!(Lexer::tokenize(&source).is_ok());
    }

    #[test]
    fn test_comments_are_counted() {
        let mut lexer = Lexer::new("// a\nx is 1; -- b\n-- c\n");
        loop {
            lexer.advance().unwrap();
            if lexer.is_at_end() {
                break;
            }
        }
        assert_eq!(lexer.comment_count(), 3);
    }

    #[test]
    fn test_count_comments_over_whole_input() {
        assert_eq!(Lexer::count_comments("x is 1;").unwrap(), 0);
        assert_eq!(
            Lexer::count_comments("// head\nfor i from 0 to 2 -- tail\n  dot(i, i);\n").unwrap(),
            2
        );
        assert!(Lexer::count_comments("// ok\nx is 1a;").is_err());
    }

    #[test]
    fn test_number_followed_by_identifier_fails() {
        let err = Lexer::tokenize("1a").unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 1, 2));
        assert!(err.message.contains("'a'"));

        assert!(Lexer::tokenize("2.5_").is_err());
        assert!(Lexer::tokenize("3é").is_err());
    }

    #[test]
    fn test_keywords_fold_case() {
        let tokens = kinds("FOR For for IS From TO sTeP");

        assert_eq!(
            tokens,
            vec![
                Token::For,
                Token::For,
                Token::For,
                Token::Is,
                Token::From,
                Token::To,
                Token::Step,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_text_is_available() {
        let mut lexer = Lexer::new("FROM");
        lexer.advance().unwrap();

        assert_eq!(lexer.token(), &Token::From);
        let id = lexer.identifier().unwrap();
        assert_eq!(id.as_str(), "FROM");
        assert_eq!(id.folded(), "from");
    }

    #[test]
    fn test_identifier_keeps_spelling() {
        let mut lexer = Lexer::new("DrawLine");
        lexer.advance().unwrap();

        let id = lexer.identifier().unwrap();
        assert_eq!(id.as_str(), "DrawLine");
        assert_eq!(id.folded(), "drawline");
        assert_eq!(lexer.number(), None);
    }

    #[test]
    fn test_non_ascii_identifiers() {
        let tokens = kinds("画 is 1;");
        assert!(matches!(tokens[0], Token::Ident(ref id) if id.as_str() == "画"));
        assert!(matches!(tokens[1], Token::Is));
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::tokenize("x is 1;\n  y is $;").unwrap_err();
        assert_eq!(err.message, "unexpected character '$'");
        assert_eq!(err.location, SourceLocation::new(15, 2, 8));
    }

    #[test]
    fn test_control_character_is_escaped_in_message() {
        let err = Lexer::tokenize("\u{7}").unwrap_err();
        assert_eq!(err.message, "unexpected character '\\x07'");
    }

    #[test]
    fn test_locations_track_lines_and_columns() {
        let tokens = Lexer::tokenize("a\n  bb is\r\n\t3;").unwrap();

        assert_eq!(tokens[0].1, SourceLocation::new(0, 1, 1));
        assert_eq!(tokens[1].1, SourceLocation::new(4, 2, 3));
        assert_eq!(tokens[2].1, SourceLocation::new(7, 2, 6));
        assert_eq!(tokens[3].1, SourceLocation::new(12, 3, 2));
        assert_eq!(tokens[4].1, SourceLocation::new(13, 3, 3));
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("  ");
        lexer.advance().unwrap();
        assert!(lexer.is_at_end());
        lexer.advance().unwrap();
        assert!(lexer.is_at_end());
    }
}
