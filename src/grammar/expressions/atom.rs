use chumsky::prelude::*;

use crate::grammar::lexer::{
    string_lines,
    Keyword,
    TokenKind,
};
use crate::grammar::parser::{
    ident,
    keyword,
    member_name,
    punct,
};
use crate::grammar::{
    BslParser,
    Expression,
    OperatorStyleCreator,
    Spanned,
    StaticFeatureAccess,
    StringLiteral,
    Token,
    TokenSpans,
};

/// `(a, , b)` with omitted arguments kept as `None`.
pub fn arguments_parser<'a>(
    expr: impl BslParser<'a, Spanned<Expression>> + 'a,
) -> impl BslParser<'a, Vec<Option<Spanned<Expression>>>> {
    expr.or_not()
        .separated_by(punct(TokenKind::Comma))
        .collect::<Vec<_>>()
        .delimited_by(punct(TokenKind::OpenParen), punct(TokenKind::CloseParen))
        .map(|args| {
            if args.len() == 1 && args[0].is_none() {
                vec![]
            } else {
                args
            }
        })
        .boxed()
}

fn literal_parser<'a>() -> impl BslParser<'a, Expression> {
    choice((
        punct(TokenKind::String).map(|t: Token| {
            Expression::String(StringLiteral {
                lines: string_lines(&t.text),
                raw: t.text,
            })
        }),
        punct(TokenKind::Number).map(|t: Token| Expression::Number(t.text)),
        punct(TokenKind::Date).map(|t: Token| Expression::Date(t.text.trim_matches('\'').to_string())),
        keyword(Keyword::True).to(Expression::Boolean(true)),
        keyword(Keyword::False).to(Expression::Boolean(false)),
        keyword(Keyword::Undefined).to(Expression::Undefined),
        keyword(Keyword::Null).to(Expression::Null),
    ))
    .labelled("literal")
}

fn creator_parser<'a>(
    spans: TokenSpans<'a>,
    expr: impl BslParser<'a, Spanned<Expression>> + 'a,
) -> impl BslParser<'a, Expression> {
    keyword(Keyword::New)
        .ignore_then(member_name().map_with(move |name, e| (name, spans.bytes(e.span()))))
        .then(arguments_parser(expr).or_not())
        .map(|(type_name, params)| {
            Expression::New(OperatorStyleCreator {
                type_name,
                params: params.unwrap_or_default(),
            })
        })
        .labelled("constructor")
}

fn ternary_parser<'a>(
    expr: impl BslParser<'a, Spanned<Expression>> + 'a,
) -> impl BslParser<'a, Expression> {
    punct(TokenKind::Question)
        .ignore_then(arguments_parser(expr))
        .map(|args| {
            let mut args = args.into_iter();
            match (args.next(), args.next(), args.next(), args.next()) {
                (Some(Some(cond)), Some(Some(then)), Some(Some(otherwise)), None) => {
                    Expression::Ternary(Box::new(cond), Box::new(then), Box::new(otherwise))
                }
                _ => Expression::Error,
            }
        })
}

pub fn atom_parser<'a>(
    spans: TokenSpans<'a>,
    expr: impl BslParser<'a, Spanned<Expression>> + 'a,
) -> impl BslParser<'a, Spanned<Expression>> {
    let parenthesized = expr
        .clone()
        .delimited_by(punct(TokenKind::OpenParen), punct(TokenKind::CloseParen));

    let spanned = choice((
        literal_parser(),
        creator_parser(spans, expr.clone()),
        ternary_parser(expr),
        ident().map(|name| {
            Expression::Static(StaticFeatureAccess {
                name,
                implicit: false,
            })
        }),
    ))
    .map_with(move |exp, e| (exp, spans.bytes(e.span())));

    choice((spanned, parenthesized)).boxed()
}
