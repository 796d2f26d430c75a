use chumsky::error::Rich;
use chumsky::input::Input;
use chumsky::prelude::*;
use rangemap::RangeInclusiveMap;
use std::fmt::{
    self,
    Debug,
    Display,
};

pub mod expressions;
pub mod lexer;
pub mod parser;
pub mod statements;

pub use lexer::{
    Keyword,
    TokenKind,
};

pub type Span = SimpleSpan;
pub type Spanned<T> = (T, Span);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub keyword: Option<Keyword>,
    pub text: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

pub type ParserInput<'a> = &'a [Token];
pub type ParserError<'a> = Rich<'a, <ParserInput<'a> as Input<'a>>::Token>;

pub trait BslParser<'a, O>:
    Parser<'a, ParserInput<'a>, O, extra::Err<ParserError<'a>>> + Clone
{
}

impl<'a, O, P> BslParser<'a, O> for P where
    P: Parser<'a, ParserInput<'a>, O, extra::Err<ParserError<'a>>> + Clone
{
}

/// Translates token-index spans produced by the parser into byte spans.
#[derive(Debug, Clone, Copy)]
pub struct TokenSpans<'a> {
    tokens: &'a [Token],
    source_len: usize,
}

impl<'a> TokenSpans<'a> {
    pub fn new(tokens: &'a [Token], source_len: usize) -> Self {
        TokenSpans { tokens, source_len }
    }

    pub fn bytes(&self, span: SimpleSpan) -> Span {
        let start = self
            .tokens
            .get(span.start)
            .map(|t| t.span.start)
            .unwrap_or(self.source_len);
        let end = if span.end > span.start {
            self.tokens
                .get(span.end - 1)
                .map(|t| t.span.end)
                .unwrap_or(self.source_len)
        } else {
            start
        };

        SimpleSpan::from(start..end)
    }
}

// ─── Expressions ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    /// Text lines with quotes, `""` escapes and `|` continuation markers removed.
    pub lines: Vec<String>,
    /// Token text as written in the source.
    pub raw: String,
}

impl StringLiteral {
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaticFeatureAccess {
    pub name: String,
    /// Set by the linker on the left side of the assignment that first introduces a variable.
    pub implicit: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DynamicFeatureAccess {
    pub source: Box<Spanned<Expression>>,
    pub name: Spanned<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub method_access: Box<Spanned<Expression>>,
    /// `None` stands for an omitted argument, as in `F(a, , b)`.
    pub params: Vec<Option<Spanned<Expression>>>,
}

impl Invocation {
    pub fn param(&self, index: usize) -> Option<&Spanned<Expression>> {
        self.params.get(index).and_then(Option::as_ref)
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Name of the called method, whether accessed statically or through a receiver.
    pub fn method_name(&self) -> Option<&str> {
        match &self.method_access.0 {
            Expression::Static(access) => Some(&access.name),
            Expression::Dynamic(access) => Some(&access.name.0),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperatorStyleCreator {
    pub type_name: Spanned<String>,
    pub params: Vec<Option<Spanned<Expression>>>,
}

impl OperatorStyleCreator {
    pub fn param(&self, index: usize) -> Option<&Spanned<Expression>> {
        self.params.get(index).and_then(Option::as_ref)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperation {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperation {
    Minus,
    Plus,
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    String(StringLiteral),
    Number(String),
    Date(String),
    Boolean(bool),
    Undefined,
    Null,
    Static(StaticFeatureAccess),
    Dynamic(DynamicFeatureAccess),
    Invocation(Invocation),
    Index(Box<Spanned<Expression>>, Box<Spanned<Expression>>),
    New(OperatorStyleCreator),
    Binary(BinaryOperation, Box<Spanned<Expression>>, Box<Spanned<Expression>>),
    Unary(UnaryOperation, Box<Spanned<Expression>>),
    Ternary(
        Box<Spanned<Expression>>,
        Box<Spanned<Expression>>,
        Box<Spanned<Expression>>,
    ),
    Error,
}

impl Expression {
    pub fn as_static(&self) -> Option<&StaticFeatureAccess> {
        match self {
            Expression::Static(access) => Some(access),
            _ => None,
        }
    }

    pub fn as_string_literal(&self) -> Option<&StringLiteral> {
        match self {
            Expression::String(literal) => Some(literal),
            _ => None,
        }
    }

    /// Direct sub-expressions in source order.
    pub fn children(&self) -> Vec<&Spanned<Expression>> {
        match self {
            Expression::Dynamic(access) => vec![access.source.as_ref()],
            Expression::Invocation(inv) => std::iter::once(inv.method_access.as_ref())
                .chain(inv.params.iter().flatten())
                .collect(),
            Expression::Index(source, index) => vec![source.as_ref(), index.as_ref()],
            Expression::New(creator) => creator.params.iter().flatten().collect(),
            Expression::Binary(_, lhs, rhs) => vec![lhs.as_ref(), rhs.as_ref()],
            Expression::Unary(_, exp) => vec![exp.as_ref()],
            Expression::Ternary(cond, then, otherwise) => {
                vec![cond.as_ref(), then.as_ref(), otherwise.as_ref()]
            }
            _ => vec![],
        }
    }
}

// ─── Statements ─────────────────────────────────────────────────────────────

/// Assignment (`left = right`) or a bare call statement (`left` only).
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleStatement {
    pub left: Spanned<Expression>,
    pub right: Option<Spanned<Expression>>,
}

pub type Block = Vec<Spanned<Statement>>;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Simple(SimpleStatement),
    If {
        branches: Vec<(Spanned<Expression>, Block)>,
        otherwise: Option<Block>,
    },
    While {
        condition: Spanned<Expression>,
        body: Block,
    },
    ForEach {
        variable: Spanned<Expression>,
        collection: Spanned<Expression>,
        body: Block,
    },
    ForTo {
        variable: Spanned<Expression>,
        from: Spanned<Expression>,
        to: Spanned<Expression>,
        body: Block,
    },
    Try {
        body: Block,
        except: Block,
    },
    Return(Option<Spanned<Expression>>),
    Raise(Option<Spanned<Expression>>),
    Var(Vec<Spanned<String>>),
    Break,
    Continue,
    Error,
}

impl Statement {
    pub fn as_simple(&self) -> Option<&SimpleStatement> {
        match self {
            Statement::Simple(simple) => Some(simple),
            _ => None,
        }
    }

    /// Nested statement blocks in source order.
    pub fn blocks(&self) -> Vec<&Block> {
        match self {
            Statement::If {
                branches,
                otherwise,
            } => branches
                .iter()
                .map(|(_, body)| body)
                .chain(otherwise.iter())
                .collect(),
            Statement::While { body, .. }
            | Statement::ForEach { body, .. }
            | Statement::ForTo { body, .. } => vec![body],
            Statement::Try { body, except } => vec![body, except],
            _ => vec![],
        }
    }

    /// Expressions owned directly by this statement, in source order.
    pub fn expressions(&self) -> Vec<&Spanned<Expression>> {
        match self {
            Statement::Simple(simple) => std::iter::once(&simple.left)
                .chain(simple.right.iter())
                .collect(),
            Statement::If { branches, .. } => branches.iter().map(|(cond, _)| cond).collect(),
            Statement::While { condition, .. } => vec![condition],
            Statement::ForEach {
                variable,
                collection,
                ..
            } => vec![variable, collection],
            Statement::ForTo { variable, from, to, .. } => vec![variable, from, to],
            Statement::Return(exp) | Statement::Raise(exp) => exp.iter().collect(),
            _ => vec![],
        }
    }
}

// ─── Module ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Client,
    Server,
    ExternalConnection,
    MobileApp,
}

/// Execution contexts an expression must be typed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Environments(pub Vec<Environment>);

impl Environments {
    pub fn all() -> Self {
        Environments(vec![
            Environment::Client,
            Environment::Server,
            Environment::ExternalConnection,
            Environment::MobileApp,
        ])
    }

    pub fn contains(&self, env: Environment) -> bool {
        self.0.contains(&env)
    }
}

impl Default for Environments {
    fn default() -> Self {
        Environments::all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Procedure,
    Function,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Spanned<String>,
    pub by_value: bool,
    pub default: Option<Spanned<Expression>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub kind: MethodKind,
    pub name: Spanned<String>,
    pub directives: Vec<Spanned<String>>,
    pub params: Vec<Parameter>,
    pub export: bool,
    pub body: Block,
}

impl Method {
    /// Environments implied by the compilation directives, or `None` when the method has none.
    pub fn environments(&self) -> Option<Environments> {
        let mut envs = vec![];
        for (directive, _) in self.directives.iter() {
            let directive = directive.trim_start_matches('&').to_lowercase();
            let implied: &[Environment] = match directive.as_str() {
                "atclient" | "наклиенте" => &[Environment::Client],
                "atserver" | "насервере" | "atservernocontext" | "насерверебезконтекста" => {
                    &[Environment::Server]
                }
                "atclientatservernocontext"
                | "наклиентенасерверебезконтекста"
                | "atclientatserver"
                | "наклиентенасервере" => &[Environment::Client, Environment::Server],
                _ => &[],
            };
            for env in implied {
                if !envs.contains(env) {
                    envs.push(*env);
                }
            }
        }

        if envs.is_empty() {
            None
        } else {
            Some(Environments(envs))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModuleItem {
    Var(Vec<Spanned<String>>),
    Method(Method),
    Statement(Statement),
}

#[derive(Debug, Clone)]
pub struct Module {
    /// Owner name, e.g. `ОбщегоНазначения` for a common module.
    pub name: String,
    pub uri: String,
    pub variables: Vec<Spanned<String>>,
    pub methods: Vec<Spanned<Method>>,
    pub statements: Block,
    pub environments: Environments,
    /// Byte range of each method mapped to its index in `methods`. Filled in by the linker.
    pub scopes: RangeInclusiveMap<usize, usize>,
}

impl Module {
    pub fn new(name: &str, uri: &str, items: Vec<Spanned<ModuleItem>>) -> Self {
        let mut module = Module {
            name: name.to_string(),
            uri: uri.to_string(),
            variables: vec![],
            methods: vec![],
            statements: vec![],
            environments: Environments::default(),
            scopes: RangeInclusiveMap::new(),
        };

        for (item, span) in items {
            match item {
                ModuleItem::Var(names) => module.variables.extend(names),
                ModuleItem::Method(method) => module.methods.push((method, span)),
                ModuleItem::Statement(stmnt) => module.statements.push((stmnt, span)),
            }
        }

        module
    }

    pub fn method_at(&self, offset: usize) -> Option<&Spanned<Method>> {
        self.scopes
            .get(&offset)
            .and_then(|index| self.methods.get(*index))
    }

    pub fn environments_at(&self, offset: usize) -> Environments {
        self.method_at(offset)
            .and_then(|(method, _)| method.environments())
            .unwrap_or_else(|| self.environments.clone())
    }
}

impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.uri == other.uri
            && self.variables == other.variables
            && self.methods == other.methods
            && self.statements == other.statements
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseDiagnostic {
    pub message: String,
    pub span: Span,
}

#[derive(Debug)]
pub struct ParserResponse {
    pub module: Module,
    pub errors: Vec<ParseDiagnostic>,
}

pub trait BslAnalysis: Sync + Send + Debug {
    fn tokenize(&self, input: &str) -> Vec<Token>;
    fn parse(&self, input: &str, tokens: &[Token], name: &str, uri: &str) -> ParserResponse;
}

/// Tokenizes, parses and links a module in one go.
pub fn parse_module(input: &str, name: &str, uri: &str) -> ParserResponse {
    let compiler = parser::BslCompiler::new();
    let tokens = compiler.tokenize(input);
    compiler.parse(input, &tokens, name, uri)
}
