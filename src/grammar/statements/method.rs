use chumsky::prelude::*;

use crate::grammar::expressions::expression_parser;
use crate::grammar::lexer::{
    Keyword,
    TokenKind,
};
use crate::grammar::parser::{
    keyword,
    punct,
    spanned_ident,
};
use crate::grammar::{
    BslParser,
    Method,
    MethodKind,
    Parameter,
    Spanned,
    Statement,
    Token,
    TokenSpans,
};

/// Module-level `Var A, B Export;`.
pub fn var_declaration_parser<'a>(
    spans: TokenSpans<'a>,
) -> impl BslParser<'a, Vec<Spanned<String>>> {
    keyword(Keyword::Var)
        .ignore_then(
            spanned_ident(spans)
                .then_ignore(keyword(Keyword::Export).or_not())
                .separated_by(punct(TokenKind::Comma))
                .at_least(1)
                .collect::<Vec<_>>(),
        )
        .then_ignore(punct(TokenKind::Semicolon).or_not())
        .boxed()
}

fn parameter_parser<'a>(spans: TokenSpans<'a>) -> impl BslParser<'a, Parameter> {
    keyword(Keyword::Val)
        .or_not()
        .then(spanned_ident(spans))
        .then(
            punct(TokenKind::Equals)
                .ignore_then(expression_parser(spans))
                .or_not(),
        )
        .map(|((by_value, name), default)| Parameter {
            name,
            by_value: by_value.is_some(),
            default,
        })
}

pub fn method_parser<'a>(
    spans: TokenSpans<'a>,
    stmnt: impl BslParser<'a, Spanned<Statement>> + 'a,
) -> impl BslParser<'a, Method> {
    let directives = punct(TokenKind::Directive)
        .map_with(move |t: Token, e| (t.text, spans.bytes(e.span())))
        .repeated()
        .collect::<Vec<_>>();

    let header = choice((
        keyword(Keyword::Procedure).to(MethodKind::Procedure),
        keyword(Keyword::Function).to(MethodKind::Function),
    ))
    .then(spanned_ident(spans))
    .then(
        parameter_parser(spans)
            .separated_by(punct(TokenKind::Comma))
            .collect::<Vec<_>>()
            .delimited_by(punct(TokenKind::OpenParen), punct(TokenKind::CloseParen)),
    )
    .then(keyword(Keyword::Export).or_not().map(|export| export.is_some()));

    let footer = choice((
        keyword(Keyword::EndProcedure),
        keyword(Keyword::EndFunction),
    ));

    directives
        .then(header)
        .then(stmnt.repeated().collect::<Vec<_>>())
        .then_ignore(footer)
        .map(
            |((directives, (((kind, name), params), export)), body)| Method {
                kind,
                name,
                directives,
                params,
                export,
                body,
            },
        )
        .boxed()
        .labelled("method")
}
