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
    Block,
    BslParser,
    Expression,
    Spanned,
    Statement,
    TokenSpans,
};

use super::variable_parser;

pub fn if_parser<'a>(
    expr: impl BslParser<'a, Spanned<Expression>> + 'a,
    block: impl BslParser<'a, Block> + 'a,
) -> impl BslParser<'a, Statement> {
    let branch = expr.then_ignore(keyword(Keyword::Then)).then(block.clone());

    keyword(Keyword::If)
        .ignore_then(branch.clone())
        .then(
            keyword(Keyword::ElsIf)
                .ignore_then(branch)
                .repeated()
                .collect::<Vec<_>>(),
        )
        .then(keyword(Keyword::Else).ignore_then(block).or_not())
        .then_ignore(keyword(Keyword::EndIf))
        .map(|((first, rest), otherwise)| {
            let mut branches = vec![first];
            branches.extend(rest);

            Statement::If {
                branches,
                otherwise,
            }
        })
        .boxed()
        .labelled("if")
}

pub fn while_parser<'a>(
    expr: impl BslParser<'a, Spanned<Expression>> + 'a,
    block: impl BslParser<'a, Block> + 'a,
) -> impl BslParser<'a, Statement> {
    keyword(Keyword::While)
        .ignore_then(expr)
        .then_ignore(keyword(Keyword::Do))
        .then(block)
        .then_ignore(keyword(Keyword::EndDo))
        .map(|(condition, body)| Statement::While { condition, body })
        .boxed()
}

pub fn for_each_parser<'a>(
    spans: TokenSpans<'a>,
    expr: impl BslParser<'a, Spanned<Expression>> + 'a,
    block: impl BslParser<'a, Block> + 'a,
) -> impl BslParser<'a, Statement> {
    keyword(Keyword::For)
        .ignore_then(keyword(Keyword::Each))
        .ignore_then(variable_parser(spans))
        .then_ignore(keyword(Keyword::In))
        .then(expr)
        .then_ignore(keyword(Keyword::Do))
        .then(block)
        .then_ignore(keyword(Keyword::EndDo))
        .map(|((variable, collection), body)| Statement::ForEach {
            variable,
            collection,
            body,
        })
        .boxed()
}

pub fn for_to_parser<'a>(
    spans: TokenSpans<'a>,
    expr: impl BslParser<'a, Spanned<Expression>> + 'a,
    block: impl BslParser<'a, Block> + 'a,
) -> impl BslParser<'a, Statement> {
    keyword(Keyword::For)
        .ignore_then(variable_parser(spans))
        .then_ignore(punct(TokenKind::Equals))
        .then(expr.clone())
        .then_ignore(keyword(Keyword::To))
        .then(expr)
        .then_ignore(keyword(Keyword::Do))
        .then(block)
        .then_ignore(keyword(Keyword::EndDo))
        .map(|(((variable, from), to), body)| Statement::ForTo {
            variable,
            from,
            to,
            body,
        })
        .boxed()
}

pub fn try_parser<'a>(block: impl BslParser<'a, Block> + 'a) -> impl BslParser<'a, Statement> {
    keyword(Keyword::Try)
        .ignore_then(block.clone())
        .then_ignore(keyword(Keyword::Except))
        .then(block)
        .then_ignore(keyword(Keyword::EndTry))
        .map(|(body, except)| Statement::Try { body, except })
        .boxed()
}
