use chumsky::prelude::*;

use crate::grammar::expressions::expression_parser;
use crate::grammar::expressions::postfix::postfix_parser;
use crate::grammar::lexer::{
    Keyword,
    TokenKind,
};
use crate::grammar::parser::{
    default_recovery,
    keyword,
    punct,
    spanned_ident,
};
use crate::grammar::{
    Block,
    BslParser,
    Expression,
    SimpleStatement,
    Spanned,
    StaticFeatureAccess,
    Statement,
    TokenSpans,
};

pub mod control;
pub mod method;

pub use method::{
    method_parser,
    var_declaration_parser,
};

fn simple_statement_parser<'a>(
    spans: TokenSpans<'a>,
    expr: impl BslParser<'a, Spanned<Expression>> + 'a,
) -> impl BslParser<'a, Statement> {
    postfix_parser(spans, expr.clone())
        .then(punct(TokenKind::Equals).ignore_then(expr).or_not())
        .map(|(left, right)| Statement::Simple(SimpleStatement { left, right }))
        .boxed()
}

/// A loop or assignment target written as a bare name.
pub fn variable_parser<'a>(spans: TokenSpans<'a>) -> impl BslParser<'a, Spanned<Expression>> {
    spanned_ident(spans).map(|(name, span)| {
        (
            Expression::Static(StaticFeatureAccess {
                name,
                implicit: false,
            }),
            span,
        )
    })
}

pub fn statement_parser<'a>(spans: TokenSpans<'a>) -> impl BslParser<'a, Spanned<Statement>> {
    recursive(|stmnt| {
        let expr = expression_parser(spans);
        let block = stmnt
            .repeated()
            .collect::<Block>()
            .boxed();

        let jump = choice((
            keyword(Keyword::Return)
                .ignore_then(expr.clone().or_not())
                .map(Statement::Return),
            keyword(Keyword::Raise)
                .ignore_then(expr.clone().or_not())
                .map(Statement::Raise),
            keyword(Keyword::Break).to(Statement::Break),
            keyword(Keyword::Continue).to(Statement::Continue),
        ));

        let local_var = keyword(Keyword::Var)
            .ignore_then(
                spanned_ident(spans)
                    .separated_by(punct(TokenKind::Comma))
                    .at_least(1)
                    .collect::<Vec<_>>(),
            )
            .map(Statement::Var);

        choice((
            control::if_parser(expr.clone(), block.clone()),
            control::while_parser(expr.clone(), block.clone()),
            control::for_each_parser(spans, expr.clone(), block.clone()),
            control::for_to_parser(spans, expr.clone(), block.clone()),
            control::try_parser(block),
            jump,
            local_var,
            simple_statement_parser(spans, expr),
        ))
        .map_with(move |stmnt, e| (stmnt, spans.bytes(e.span())))
        .then_ignore(punct(TokenKind::Semicolon).or_not())
        .recover_with(via_parser(
            default_recovery().map_with(move |_, e| (Statement::Error, spans.bytes(e.span()))),
        ))
        .boxed()
    })
    .labelled("statement")
}
