use crate::ast::*;
use crate::token::Kind;
use super::core::Parser;
use super::error::{Expected, ParserResult};
use super::expr::{parse_comparison, parse_expression, parse_factor};

impl<'t> Parser<'t> {
    pub fn parse_stmt(&mut self) -> ParserResult<Stmt> {
        self.nested(parse_stmt)
    }
}

// stmt := declaration | assignment | for | while | do_while
//       | if | switch | break | block
fn parse_stmt(parser: &mut Parser) -> ParserResult<Stmt> {
    log::trace!("parse_stmt at token {}", parser.position());
    match parser.peek() {
        Some(Kind::Int) => parse_declaration(parser),
        Some(Kind::Identifier) => parse_assignment(parser),
        Some(Kind::For) => parse_for(parser),
        Some(Kind::While) => parse_while(parser),
        Some(Kind::Do) => parse_do_while(parser),
        Some(Kind::If) => parse_if(parser),
        Some(Kind::Switch) => parse_switch(parser),
        Some(Kind::Break) => {
            parser.next();
            parser.expect(Kind::Semicolon)?;
            Ok(Stmt::Break)
        }
        Some(Kind::BraceOpen) => parse_block(parser),
        _ => Err(parser.unexpected(Expected::Statement)),
    }
}

// declaration := "int" IDENT "=" expression ";"
fn parse_declaration(parser: &mut Parser) -> ParserResult<Stmt> {
    parser.expect(Kind::Int)?;
    let name = parser.expect_identifier()?;
    parser.expect(Kind::Equal)?;
    let init = parse_expression(parser)?;
    parser.expect(Kind::Semicolon)?;
    Ok(Stmt::Declaration { name, init })
}

// assignment := IDENT "=" expression ";"
fn parse_assignment(parser: &mut Parser) -> ParserResult<Stmt> {
    let name = parser.expect_identifier()?;
    parser.expect(Kind::Equal)?;
    let value = parse_expression(parser)?;
    parser.expect(Kind::Semicolon)?;
    Ok(Stmt::Assignment(Assignment { name, value: Box::new(value) }))
}

// for := "for" "(" stmt comparison ";" factor ")" stmt
fn parse_for(parser: &mut Parser) -> ParserResult<Stmt> {
    parser.expect(Kind::For)?;
    parser.expect(Kind::ParenOpen)?;
    let init = parser.parse_stmt()?;
    let condition = parse_comparison(parser)?;
    parser.expect(Kind::Semicolon)?;
    let update = parse_factor(parser)?;
    parser.expect(Kind::ParenClose)?;
    let body = parser.parse_stmt()?;
    Ok(Stmt::For {
        init: Box::new(init),
        condition,
        update,
        body: Box::new(body),
    })
}

// while := "while" "(" comparison ")" stmt
fn parse_while(parser: &mut Parser) -> ParserResult<Stmt> {
    parser.expect(Kind::While)?;
    let condition = parse_condition(parser)?;
    let body = parser.parse_stmt()?;
    Ok(Stmt::While { condition, body: Box::new(body) })
}

// do_while := "do" stmt "while" "(" comparison ")" ";"
fn parse_do_while(parser: &mut Parser) -> ParserResult<Stmt> {
    parser.expect(Kind::Do)?;
    let body = parser.parse_stmt()?;
    parser.expect(Kind::While)?;
    let condition = parse_condition(parser)?;
    parser.expect(Kind::Semicolon)?;
    Ok(Stmt::DoWhile { body: Box::new(body), condition })
}

// if := "if" "(" comparison ")" stmt ("else" stmt)?
fn parse_if(parser: &mut Parser) -> ParserResult<Stmt> {
    parser.expect(Kind::If)?;
    let condition = parse_condition(parser)?;
    let then_branch = parser.parse_stmt()?;
    let else_branch = match parser.peek() {
        Some(Kind::Else) => {
            parser.next();
            Some(Box::new(parser.parse_stmt()?))
        }
        _ => None,
    };
    Ok(Stmt::If {
        condition,
        then_branch: Box::new(then_branch),
        else_branch,
    })
}

fn parse_condition(parser: &mut Parser) -> ParserResult<Expr> {
    parser.expect(Kind::ParenOpen)?;
    let condition = parse_comparison(parser)?;
    parser.expect(Kind::ParenClose)?;
    Ok(condition)
}

// switch := "switch" "(" expression ")" "{" (case | default)* "}"
// case := "case" expression ":" stmt*
// default := "default" ":" stmt*
fn parse_switch(parser: &mut Parser) -> ParserResult<Stmt> {
    parser.expect(Kind::Switch)?;
    parser.expect(Kind::ParenOpen)?;
    let discriminant = parse_expression(parser)?;
    parser.expect(Kind::ParenClose)?;
    parser.expect(Kind::BraceOpen)?;

    let mut arms = vec![];
    loop {
        match parser.peek() {
            Some(Kind::Case) => {
                parser.next();
                let value = parse_expression(parser)?;
                parser.expect(Kind::Colon)?;
                let body = parse_arm_body(parser)?;
                arms.push(SwitchArm::Case { value, body });
            }
            Some(Kind::Default) => {
                parser.next();
                parser.expect(Kind::Colon)?;
                let body = parse_arm_body(parser)?;
                arms.push(SwitchArm::Default { body });
            }
            Some(Kind::BraceClose) => break,
            _ => return Err(parser.unexpected(Expected::CaseOrDefault)),
        }
    }
    parser.expect(Kind::BraceClose)?;
    Ok(Stmt::Switch { discriminant, arms })
}

fn parse_arm_body(parser: &mut Parser) -> ParserResult<Vec<Stmt>> {
    let mut body = vec![];
    while let Some(kind) = parser.peek() {
        if matches!(kind, Kind::Case | Kind::Default | Kind::BraceClose) {
            break;
        }
        body.push(parser.parse_stmt()?);
    }
    Ok(body)
}

// block := "{" stmt* "}"
fn parse_block(parser: &mut Parser) -> ParserResult<Stmt> {
    parser.expect(Kind::BraceOpen)?;
    let mut statements = vec![];
    while parser.peek().is_some_and(|kind| *kind != Kind::BraceClose) {
        statements.push(parser.parse_stmt()?);
    }
    parser.expect(Kind::BraceClose)?;
    Ok(Stmt::Block(statements))
}
