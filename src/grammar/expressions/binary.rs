use chumsky::prelude::*;

use crate::grammar::lexer::{
    Keyword,
    TokenKind,
};
use crate::grammar::parser::{
    keyword,
    punct,
};
use crate::grammar::{
    BinaryOperation,
    BslParser,
    Expression,
    Spanned,
    UnaryOperation,
};

fn fold_binary(
    lhs: Spanned<Expression>,
    (op, rhs): (BinaryOperation, Spanned<Expression>),
) -> Spanned<Expression> {
    let span = SimpleSpan::from(lhs.1.start..rhs.1.end);

    (Expression::Binary(op, Box::new(lhs), Box::new(rhs)), span)
}

pub fn unary_parser<'a>(
    operand: impl BslParser<'a, Spanned<Expression>> + 'a,
) -> impl BslParser<'a, Spanned<Expression>> {
    choice((
        punct(TokenKind::Minus).to(UnaryOperation::Minus),
        punct(TokenKind::Plus).to(UnaryOperation::Plus),
    ))
    .repeated()
    .collect::<Vec<_>>()
    .then(operand)
    .map(|(ops, exp)| {
        ops.into_iter().rev().fold(exp, |exp, op| {
            let span = exp.1;
            (Expression::Unary(op, Box::new(exp)), span)
        })
    })
    .boxed()
}

pub fn product_parser<'a>(
    operand: impl BslParser<'a, Spanned<Expression>> + 'a,
) -> impl BslParser<'a, Spanned<Expression>> {
    operand
        .clone()
        .foldl(
            choice((
                punct(TokenKind::Star).to(BinaryOperation::Multiply),
                punct(TokenKind::Slash).to(BinaryOperation::Divide),
                punct(TokenKind::Percent).to(BinaryOperation::Modulo),
            ))
            .then(operand)
            .repeated(),
            fold_binary,
        )
        .boxed()
}

pub fn sum_parser<'a>(
    operand: impl BslParser<'a, Spanned<Expression>> + 'a,
) -> impl BslParser<'a, Spanned<Expression>> {
    operand
        .clone()
        .foldl(
            choice((
                punct(TokenKind::Plus).to(BinaryOperation::Plus),
                punct(TokenKind::Minus).to(BinaryOperation::Minus),
            ))
            .then(operand)
            .repeated(),
            fold_binary,
        )
        .boxed()
}

pub fn comparison_parser<'a>(
    operand: impl BslParser<'a, Spanned<Expression>> + 'a,
) -> impl BslParser<'a, Spanned<Expression>> {
    operand
        .clone()
        .foldl(
            choice((
                punct(TokenKind::NotEquals).to(BinaryOperation::NotEqual),
                punct(TokenKind::LessEquals).to(BinaryOperation::LessOrEqual),
                punct(TokenKind::GreaterEquals).to(BinaryOperation::GreaterOrEqual),
                punct(TokenKind::Less).to(BinaryOperation::Less),
                punct(TokenKind::Greater).to(BinaryOperation::Greater),
                punct(TokenKind::Equals).to(BinaryOperation::Equal),
            ))
            .then(operand)
            .repeated(),
            fold_binary,
        )
        .boxed()
}

/// `Not` binds looser than comparison: `Not A = B` negates the comparison.
fn not_parser<'a>(
    operand: impl BslParser<'a, Spanned<Expression>> + 'a,
) -> impl BslParser<'a, Spanned<Expression>> {
    keyword(Keyword::Not)
        .repeated()
        .collect::<Vec<_>>()
        .then(operand)
        .map(|(nots, exp)| {
            nots.into_iter().fold(exp, |exp, _| {
                let span = exp.1;
                (Expression::Unary(UnaryOperation::Not, Box::new(exp)), span)
            })
        })
        .boxed()
}

pub fn and_parser<'a>(
    operand: impl BslParser<'a, Spanned<Expression>> + 'a,
) -> impl BslParser<'a, Spanned<Expression>> {
    let operand = not_parser(operand);

    operand
        .clone()
        .foldl(
            keyword(Keyword::And)
                .to(BinaryOperation::And)
                .then(operand)
                .repeated(),
            fold_binary,
        )
        .boxed()
}

pub fn or_parser<'a>(
    operand: impl BslParser<'a, Spanned<Expression>> + 'a,
) -> impl BslParser<'a, Spanned<Expression>> {
    operand
        .clone()
        .foldl(
            keyword(Keyword::Or)
                .to(BinaryOperation::Or)
                .then(operand)
                .repeated(),
            fold_binary,
        )
        .boxed()
}
