use chumsky::prelude::*;

use crate::grammar::lexer::TokenKind;
use crate::grammar::parser::{
    member_name,
    punct,
};
use crate::grammar::{
    BslParser,
    DynamicFeatureAccess,
    Expression,
    Invocation,
    Span,
    Spanned,
    TokenSpans,
};

use super::atom::{
    arguments_parser,
    atom_parser,
};

#[derive(Debug, Clone)]
enum Suffix {
    Member(Spanned<String>),
    Call(Vec<Option<Spanned<Expression>>>),
    Index(Spanned<Expression>),
}

/// Feature access chains: `a.b(c)[d].e`.
pub fn postfix_parser<'a>(
    spans: TokenSpans<'a>,
    expr: impl BslParser<'a, Spanned<Expression>> + 'a,
) -> impl BslParser<'a, Spanned<Expression>> {
    let member = punct(TokenKind::Dot)
        .ignore_then(member_name().map_with(move |name, e| (name, spans.bytes(e.span()))))
        .map(Suffix::Member);

    let call = arguments_parser(expr.clone()).map(Suffix::Call);

    let index = expr
        .clone()
        .delimited_by(punct(TokenKind::OpenBracket), punct(TokenKind::CloseBracket))
        .map(Suffix::Index);

    atom_parser(spans, expr)
        .foldl(
            choice((member, call, index))
                .map_with(move |suffix, e| (suffix, spans.bytes(e.span())))
                .repeated(),
            |lhs, (suffix, suffix_span): (Suffix, Span)| {
                let span = SimpleSpan::from(lhs.1.start..suffix_span.end);
                let exp = match suffix {
                    Suffix::Member(name) => Expression::Dynamic(DynamicFeatureAccess {
                        source: Box::new(lhs),
                        name,
                    }),
                    Suffix::Call(params) => Expression::Invocation(Invocation {
                        method_access: Box::new(lhs),
                        params,
                    }),
                    Suffix::Index(index) => Expression::Index(Box::new(lhs), Box::new(index)),
                };

                (exp, span)
            },
        )
        .boxed()
}
