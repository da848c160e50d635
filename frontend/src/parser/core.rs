use crate::ast::*;
use crate::token::{Kind, Token};
use super::error::{Expected, ParserError, ParserResult};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Statements and expressions may nest this deep before the parser gives up.
pub const MAX_NESTING_DEPTH: usize = 128;

pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
    pub string_interner: DefaultStringInterner,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
            string_interner: DefaultStringInterner::new(),
        }
    }

    pub fn peek(&self) -> Option<&'t Kind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    pub fn peek_token(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    pub fn next(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Consumes the current token if it has kind `accept`.
    pub fn expect(&mut self, accept: Kind) -> ParserResult<&'t Token> {
        match self.peek_token() {
            Some(token) if token.kind == accept => {
                self.next();
                Ok(token)
            }
            _ => Err(self.unexpected(Expected::Token(accept))),
        }
    }

    /// Error describing the current token (or end of input) as not what was wanted.
    pub fn unexpected(&self, expected: Expected) -> ParserError {
        let found = self.peek_token().map(|t| t.text.clone());
        ParserError::unexpected_token(self.pos, expected, found)
    }

    pub fn expect_identifier(&mut self) -> ParserResult<DefaultSymbol> {
        let token = self.expect(Kind::Identifier)?;
        Ok(self.string_interner.get_or_intern(&token.text))
    }

    pub fn check_and_increment_recursion(&mut self) -> ParserResult<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParserError::nesting_too_deep(self.pos, MAX_NESTING_DEPTH));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn decrement_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Runs `rule` one nesting level deeper.
    pub fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> ParserResult<T>) -> ParserResult<T> {
        self.check_and_increment_recursion()?;
        let result = rule(self);
        self.decrement_recursion();
        result
    }

    // program := statement*
    pub fn parse_program(mut self) -> ParserResult<Program> {
        let mut statements = vec![];
        while !self.is_at_end() {
            statements.push(self.parse_stmt()?);
        }

        let program = Program {
            statements,
            string_interner: self.string_interner,
        };
        log::debug!("Output from Parser stage:\n{}", program.dump());
        Ok(program)
    }
}

/// Parses a complete token sequence into a program.
pub fn parse(tokens: &[Token]) -> ParserResult<Program> {
    Parser::new(tokens).parse_program()
}
