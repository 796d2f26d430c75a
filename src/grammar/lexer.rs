use chumsky::span::SimpleSpan;
use logos::Logos;

use super::Token;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    #[token("<>")]
    NotEquals,
    #[token("<=")]
    LessEquals,
    #[token(">=")]
    GreaterEquals,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("=")]
    Equals,
    #[token("?")]
    Question,

    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,

    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("~")]
    Tilde,

    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    // Preprocessor instructions and regions
    #[regex(r"#[^\n]*", logos::skip)]
    Preprocessor,

    #[regex(r"&[a-zA-Zа-яА-ЯёЁ_][a-zA-Z0-9а-яА-ЯёЁ_]*")]
    Directive,

    #[regex(r"[a-zA-Zа-яА-ЯёЁ_][a-zA-Z0-9а-яА-ЯёЁ_]*")]
    Identifier,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r#""([^"]|"")*""#)]
    String,

    #[regex(r"'[^'\n]*'")]
    Date,

    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Procedure,
    EndProcedure,
    Function,
    EndFunction,
    Export,
    Val,
    Var,
    If,
    Then,
    ElsIf,
    Else,
    EndIf,
    For,
    Each,
    In,
    To,
    Do,
    EndDo,
    While,
    Return,
    Try,
    Except,
    EndTry,
    Raise,
    Break,
    Continue,
    New,
    And,
    Or,
    Not,
    True,
    False,
    Undefined,
    Null,
}

static KEYWORDS: phf::Map<&'static str, Keyword> = phf::phf_map! {
    "procedure" => Keyword::Procedure,
    "процедура" => Keyword::Procedure,
    "endprocedure" => Keyword::EndProcedure,
    "конецпроцедуры" => Keyword::EndProcedure,
    "function" => Keyword::Function,
    "функция" => Keyword::Function,
    "endfunction" => Keyword::EndFunction,
    "конецфункции" => Keyword::EndFunction,
    "export" => Keyword::Export,
    "экспорт" => Keyword::Export,
    "val" => Keyword::Val,
    "знач" => Keyword::Val,
    "var" => Keyword::Var,
    "перем" => Keyword::Var,
    "if" => Keyword::If,
    "если" => Keyword::If,
    "then" => Keyword::Then,
    "тогда" => Keyword::Then,
    "elsif" => Keyword::ElsIf,
    "иначеесли" => Keyword::ElsIf,
    "else" => Keyword::Else,
    "иначе" => Keyword::Else,
    "endif" => Keyword::EndIf,
    "конецесли" => Keyword::EndIf,
    "for" => Keyword::For,
    "для" => Keyword::For,
    "each" => Keyword::Each,
    "каждого" => Keyword::Each,
    "in" => Keyword::In,
    "из" => Keyword::In,
    "to" => Keyword::To,
    "по" => Keyword::To,
    "do" => Keyword::Do,
    "цикл" => Keyword::Do,
    "enddo" => Keyword::EndDo,
    "конеццикла" => Keyword::EndDo,
    "while" => Keyword::While,
    "пока" => Keyword::While,
    "return" => Keyword::Return,
    "возврат" => Keyword::Return,
    "try" => Keyword::Try,
    "попытка" => Keyword::Try,
    "except" => Keyword::Except,
    "исключение" => Keyword::Except,
    "endtry" => Keyword::EndTry,
    "конецпопытки" => Keyword::EndTry,
    "raise" => Keyword::Raise,
    "вызватьисключение" => Keyword::Raise,
    "break" => Keyword::Break,
    "прервать" => Keyword::Break,
    "continue" => Keyword::Continue,
    "продолжить" => Keyword::Continue,
    "new" => Keyword::New,
    "новый" => Keyword::New,
    "and" => Keyword::And,
    "и" => Keyword::And,
    "or" => Keyword::Or,
    "или" => Keyword::Or,
    "not" => Keyword::Not,
    "не" => Keyword::Not,
    "true" => Keyword::True,
    "истина" => Keyword::True,
    "false" => Keyword::False,
    "ложь" => Keyword::False,
    "undefined" => Keyword::Undefined,
    "неопределено" => Keyword::Undefined,
    "null" => Keyword::Null,
};

pub fn keyword(word: &str) -> Option<Keyword> {
    KEYWORDS.get(word.to_lowercase().as_str()).copied()
}

pub fn tokenize(source: &str) -> Vec<Token> {
    let offset = if source.starts_with('\u{feff}') {
        '\u{feff}'.len_utf8()
    } else {
        0
    };

    let mut lex = TokenKind::lexer(&source[offset..]);
    let mut tokens = vec![];

    while let Some(result) = lex.next() {
        let range = lex.span();
        let text = lex.slice().to_string();
        let kind = result.unwrap_or(TokenKind::Error);
        let keyword = match kind {
            TokenKind::Identifier => keyword(&text),
            _ => None,
        };

        tokens.push(Token {
            kind,
            keyword,
            text,
            span: SimpleSpan::from(offset + range.start..offset + range.end),
        });
    }

    tokens
}

/// Splits the raw text of a string token into its lines.
pub fn string_lines(raw: &str) -> Vec<String> {
    let inner = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw);

    inner
        .split('\n')
        .enumerate()
        .map(|(index, line)| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let line = if index == 0 {
                line
            } else {
                let trimmed = line.trim_start();
                trimmed.strip_prefix('|').unwrap_or(trimmed)
            };
            line.replace("\"\"", "\"")
        })
        .collect()
}
