use crate::ast::*;
use crate::token::Kind;
use super::core::Parser;
use super::error::{Expected, ParserError, ParserResult};

/// One precedence tier: the operators it accepts and the tier that binds tighter.
pub struct OperatorGroup<'t> {
    pub tokens: &'static [(Kind, Operator)],
    pub next_precedence: fn(&mut Parser<'t>) -> ParserResult<Expr>,
}

const ADDITIVE: &[(Kind, Operator)] = &[(Kind::IAdd, Operator::IAdd), (Kind::ISub, Operator::ISub)];
const MULTIPLICATIVE: &[(Kind, Operator)] = &[
    (Kind::IMul, Operator::IMul),
    (Kind::IDiv, Operator::IDiv),
    (Kind::IMod, Operator::IMod),
];

impl<'t> Parser<'t> {
    pub fn parse_expression(&mut self) -> ParserResult<Expr> {
        parse_expression(self)
    }
}

// Every operator in a chain deepens the left-nested tree by one level, so it
// counts toward the nesting limit like a parenthesis does.
fn parse_binary<'t>(parser: &mut Parser<'t>, group: OperatorGroup<'t>) -> ParserResult<Expr> {
    let mut levels = 0;
    let result = parse_binary_chain(parser, &group, &mut levels);
    for _ in 0..levels {
        parser.decrement_recursion();
    }
    result
}

fn parse_binary_chain<'t>(
    parser: &mut Parser<'t>,
    group: &OperatorGroup<'t>,
    levels: &mut usize,
) -> ParserResult<Expr> {
    let mut lhs = (group.next_precedence)(parser)?;
    while let Some(kind) = parser.peek() {
        let Some((_, op)) = group.tokens.iter().find(|(k, _)| k == kind) else {
            break;
        };
        parser.check_and_increment_recursion()?;
        *levels += 1;
        parser.next();
        let rhs = (group.next_precedence)(parser)?;
        lhs = Expr::Binary(*op, Box::new(lhs), Box::new(rhs));
    }
    Ok(lhs)
}

// expression := term (("+" | "-") term)*
pub fn parse_expression<'t>(parser: &mut Parser<'t>) -> ParserResult<Expr> {
    parse_binary(parser, OperatorGroup { tokens: ADDITIVE, next_precedence: parse_term })
}

// term := factor (("*" | "/" | "%") factor)*
pub fn parse_term<'t>(parser: &mut Parser<'t>) -> ParserResult<Expr> {
    parse_binary(parser, OperatorGroup { tokens: MULTIPLICATIVE, next_precedence: parse_factor })
}

// factor := NUMBER | IDENT ("=" expression)? | "(" expression ")"
pub fn parse_factor(parser: &mut Parser) -> ParserResult<Expr> {
    parser.nested(|parser| {
        log::trace!("parse_factor at token {}", parser.position());
        match parser.peek() {
            Some(Kind::Number) => {
                let token = parser.expect(Kind::Number)?;
                Ok(Expr::Number(token.text.clone()))
            }
            Some(Kind::Identifier) => {
                let name = parser.expect_identifier()?;
                if parser.peek() == Some(&Kind::Equal) {
                    parser.next();
                    let value = parse_expression(parser)?;
                    return Ok(Expr::Assign(Assignment { name, value: Box::new(value) }));
                }
                Ok(Expr::Identifier(name))
            }
            Some(Kind::ParenOpen) => {
                parser.next();
                let expr = parse_expression(parser)?;
                parser.expect(Kind::ParenClose)?;
                Ok(expr)
            }
            _ => Err(parser.unexpected(Expected::Factor)),
        }
    })
}

fn relation(kind: &Kind) -> Option<Relation> {
    let rel = match kind {
        Kind::LT => Relation::LT,
        Kind::GT => Relation::GT,
        Kind::LE => Relation::LE,
        Kind::GE => Relation::GE,
        Kind::EQ => Relation::EQ,
        Kind::NE => Relation::NE,
        _ => return None,
    };
    Some(rel)
}

// comparison := expression (RELOP expression)?
//
// At most one relational operator: `a < b < c` is rejected here rather than
// being left to fail on whatever token the caller expects next.
pub fn parse_comparison(parser: &mut Parser) -> ParserResult<Expr> {
    let lhs = parse_expression(parser)?;
    let Some(rel) = parser.peek().and_then(relation) else {
        return Ok(lhs);
    };
    parser.next();
    let rhs = parse_expression(parser)?;

    if let Some(token) = parser.peek_token().filter(|t| t.kind.is_relational()) {
        return Err(ParserError::chained_comparison(parser.position(), token.text.clone()));
    }
    Ok(Expr::Compare(rel, Box::new(lhs), Box::new(rhs)))
}
