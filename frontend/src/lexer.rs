//! Hand-written lexer for the C subset.
//!
//! Turns source text into the `{kind, text}` tokens the parser consumes.
//! Whitespace and comments are dropped; two-character operators are matched
//! before their one-character prefixes.

use crate::token::{Kind, Token};
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {line}:{column}")]
    UnexpectedChar { ch: char, line: usize, column: usize },
    #[error("unterminated block comment starting at {line}:{column}")]
    UnterminatedComment { line: usize, column: usize },
}

pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            chars: source.chars().peekable(),
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn peek_next(&self) -> Option<char> {
        let mut rest = self.source[self.offset..].chars();
        rest.next();
        rest.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('/') => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                Some('/') if self.peek_next() == Some('*') => {
                    let (line, column) = (self.line, self.column);
                    self.advance();
                    self.advance();
                    loop {
                        match self.advance() {
                            Some('*') if self.peek() == Some('/') => {
                                self.advance();
                                break;
                            }
                            Some(_) => {}
                            None => return Err(LexError::UnterminatedComment { line, column }),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn take_while(&mut self, start: usize, pred: impl Fn(char) -> bool) -> &'a str {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
        let source = self.source;
        &source[start..self.offset]
    }

    /// Returns the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_trivia()?;
        let start = self.offset;
        let (line, column) = (self.line, self.column);
        let c = match self.advance() {
            Some(c) => c,
            None => return Ok(None),
        };

        if c.is_ascii_alphabetic() || c == '_' {
            let word = self.take_while(start, |c| c.is_ascii_alphanumeric() || c == '_');
            let kind = Kind::keyword(word).unwrap_or(Kind::Identifier);
            return Ok(Some(Token::new(kind, word)));
        }
        if c.is_ascii_digit() {
            let digits = self.take_while(start, |c| c.is_ascii_digit());
            return Ok(Some(Token::new(Kind::Number, digits)));
        }

        let kind = match c {
            '+' => Kind::IAdd,
            '-' => Kind::ISub,
            '*' => Kind::IMul,
            '/' => Kind::IDiv,
            '%' => Kind::IMod,
            '(' => Kind::ParenOpen,
            ')' => Kind::ParenClose,
            '{' => Kind::BraceOpen,
            '}' => Kind::BraceClose,
            ';' => Kind::Semicolon,
            ':' => Kind::Colon,
            ',' => Kind::Comma,
            '<' if self.match_char('=') => Kind::LE,
            '<' => Kind::LT,
            '>' if self.match_char('=') => Kind::GE,
            '>' => Kind::GT,
            '=' if self.match_char('=') => Kind::EQ,
            '=' => Kind::Equal,
            '!' if self.match_char('=') => Kind::NE,
            ch => return Err(LexError::UnexpectedChar { ch, line, column }),
        };
        Ok(Some(Token::new(kind, &self.source[start..self.offset])))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Tokenizes a whole source string, stopping at the first lexical error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(source).collect::<Result<Vec<_>, _>>()?;
    log::debug!(
        "Output from Lexer stage: [{}]",
        tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", ")
    );
    Ok(tokens)
}
