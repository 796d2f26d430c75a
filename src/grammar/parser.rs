use std::borrow::Borrow;

use chumsky::prelude::*;

use crate::symbol_table::link_module;

use super::lexer::{
    self,
    Keyword,
    TokenKind,
};
use super::statements::{
    method_parser,
    statement_parser,
    var_declaration_parser,
};
use super::{
    BslAnalysis,
    BslParser,
    Module,
    ModuleItem,
    ParseDiagnostic,
    ParserResponse,
    Spanned,
    Statement,
    Token,
    TokenSpans,
};

fn token_of<T: Borrow<Token>>(token: &T) -> &Token {
    token.borrow()
}

/// Any single token.
pub fn token<'a>() -> impl BslParser<'a, Token> {
    any().map(|t| token_of(&t).clone())
}

pub fn punct<'a>(kind: TokenKind) -> impl BslParser<'a, Token> {
    token().filter(move |t: &Token| t.kind == kind)
}

pub fn keyword<'a>(kw: Keyword) -> impl BslParser<'a, Token> {
    token().filter(move |t: &Token| t.keyword == Some(kw))
}

/// An identifier that is not a reserved word.
pub fn ident<'a>() -> impl BslParser<'a, String> {
    token()
        .filter(|t: &Token| t.kind == TokenKind::Identifier && t.keyword.is_none())
        .map(|t| t.text)
        .labelled("identifier")
}

/// A name after `.` or `New`, where reserved words are allowed.
pub fn member_name<'a>() -> impl BslParser<'a, String> {
    token()
        .filter(|t: &Token| t.kind == TokenKind::Identifier)
        .map(|t| t.text)
        .labelled("name")
}

pub fn spanned_ident<'a>(spans: TokenSpans<'a>) -> impl BslParser<'a, Spanned<String>> {
    ident().map_with(move |name, e| (name, spans.bytes(e.span())))
}

/// Tokens that close or open a block; statement recovery never skips past them.
pub fn is_block_boundary(token: &Token) -> bool {
    matches!(
        token.keyword,
        Some(
            Keyword::Procedure
                | Keyword::EndProcedure
                | Keyword::Function
                | Keyword::EndFunction
                | Keyword::EndIf
                | Keyword::ElsIf
                | Keyword::Else
                | Keyword::EndDo
                | Keyword::Except
                | Keyword::EndTry
        )
    ) || token.kind == TokenKind::Directive
}

pub fn default_recovery<'a>() -> impl BslParser<'a, Vec<Token>> {
    token()
        .filter(|t: &Token| t.kind != TokenKind::Semicolon && !is_block_boundary(t))
        .repeated()
        .at_least(1)
        .collect::<Vec<Token>>()
        .then_ignore(punct(TokenKind::Semicolon).or_not())
}

fn module_parser<'a>(spans: TokenSpans<'a>) -> impl BslParser<'a, Vec<Spanned<ModuleItem>>> {
    let stmnt = statement_parser(spans);

    choice((
        method_parser(spans, stmnt.clone()).map(ModuleItem::Method),
        var_declaration_parser(spans).map(ModuleItem::Var),
        stmnt.map(|(stmnt, _)| ModuleItem::Statement(stmnt)),
    ))
    .map_with(move |item, e| (item, spans.bytes(e.span())))
    .recover_with(via_parser(token().map_with(move |_, e| {
        (ModuleItem::Statement(Statement::Error), spans.bytes(e.span()))
    })))
    .repeated()
    .collect()
    .then_ignore(end())
}

#[derive(Debug, Default)]
pub struct BslCompiler {}

impl BslCompiler {
    pub fn new() -> Self {
        BslCompiler {}
    }
}

impl BslAnalysis for BslCompiler {
    fn tokenize(&self, input: &str) -> Vec<Token> {
        lexer::tokenize(input)
    }

    #[tracing::instrument(skip_all, fields(module = name))]
    fn parse(&self, input: &str, tokens: &[Token], name: &str, uri: &str) -> ParserResponse {
        let spans = TokenSpans::new(tokens, input.len());
        let (items, errors) = module_parser(spans).parse(tokens).into_output_errors();

        let errors: Vec<ParseDiagnostic> = errors
            .into_iter()
            .map(|err| ParseDiagnostic {
                message: err.to_string(),
                span: spans.bytes(*err.span()),
            })
            .collect();

        if !errors.is_empty() {
            tracing::debug!("{} parse errors in {}", errors.len(), uri);
        }

        let mut module = Module::new(name, uri, items.unwrap_or_default());
        link_module(&mut module);

        ParserResponse { module, errors }
    }
}
