use chumsky::prelude::*;

use crate::grammar::{
    BslParser,
    Expression,
    Spanned,
    TokenSpans,
};

pub mod atom;
pub mod binary;
pub mod postfix;

use binary::{
    and_parser,
    comparison_parser,
    or_parser,
    product_parser,
    sum_parser,
    unary_parser,
};
use postfix::postfix_parser;

pub fn expression_parser<'a>(spans: TokenSpans<'a>) -> impl BslParser<'a, Spanned<Expression>> {
    recursive(|expr| {
        let postfix = postfix_parser(spans, expr.clone());
        let unary = unary_parser(postfix);
        let product = product_parser(unary);
        let sum = sum_parser(product);
        let comparison = comparison_parser(sum);
        let and = and_parser(comparison);

        or_parser(and)
    })
    .boxed()
    .labelled("expression")
}
