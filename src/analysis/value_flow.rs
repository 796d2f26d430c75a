//! Statically known content of string, array and structure valued expressions.
//!
//! Resolution walks the statements returned by [`statements_in_scope`]
//! backward to find the assignment a variable reference reads, then the
//! flattened [`simple_statements_in_scope`] forward from that assignment to
//! collect `Add`/`Insert` calls made on the variable before the reference.
//! Branches and loops are not reasoned about; the nearest preceding
//! assignment wins. Hitting the depth bound abandons the whole resolution.

use indexmap::IndexMap;
use tracing::trace;

use crate::grammar::{
    BinaryOperation,
    Environments,
    Expression,
    Invocation,
    Module,
    OperatorStyleCreator,
    SimpleStatement,
    Span,
    Spanned,
    Statement,
    StaticFeatureAccess,
};
use crate::host::BaseTypeComputer;
use crate::types::{
    has_kind,
    TypeKind,
};
use crate::utils::eq_ignore_case;

use super::scanner::{
    simple_statements,
    simple_statements_in_scope,
    statements_in_scope,
};

const INSERT: [&str; 2] = ["Insert", "Вставить"];
const ADD: [&str; 2] = ["Add", "Добавить"];

/// A string literal that contributed to resolved content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLiteral {
    pub span: Span,
    pub content: String,
    /// Source text of the literal, quotes included.
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedValue {
    pub content: String,
    /// Literals whose text makes up `content`, in source order.
    pub provenance: Vec<SourceLiteral>,
}

/// One key contributed to a structure by its constructor or an `Insert` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    pub key: String,
    pub key_literal: Option<SourceLiteral>,
    /// Content of the value argument, or the key itself when there is none.
    pub value: String,
    pub value_literal: Option<SourceLiteral>,
}

/// Keys in first-insertion order; a repeated key replaces the earlier entry.
pub type StructureContent = IndexMap<String, KeyEntry>;

/// One element contributed to an array by its constructor or an `Add` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayEntry {
    pub content: String,
    pub literal: Option<SourceLiteral>,
}

fn literal_of(expr: &Spanned<Expression>) -> Option<SourceLiteral> {
    expr.0.as_string_literal().map(|literal| SourceLiteral {
        span: expr.1,
        content: literal.content(),
        raw: literal.raw.clone(),
    })
}

fn assigns_to(simple: &SimpleStatement, name: &str) -> bool {
    simple.right.is_some()
        && matches!(&simple.left.0, Expression::Static(access) if eq_ignore_case(&access.name, name))
}

/// `Name.Method(...)` call statements, matched in either spelling.
fn call_on<'m>(stmnt: &'m Statement, name: &str, methods: &[&str]) -> Option<&'m Invocation> {
    let simple = stmnt.as_simple()?;
    if simple.right.is_some() {
        return None;
    }
    let Expression::Invocation(inv) = &simple.left.0 else {
        return None;
    };
    let Expression::Dynamic(access) = &inv.method_access.0 else {
        return None;
    };
    let receiver = access.source.0.as_static()?;

    let matches = eq_ignore_case(&receiver.name, name)
        && methods.iter().any(|method| eq_ignore_case(method, &access.name.0));
    matches.then_some(inv)
}

/// Resolution stopped at the depth bound. Whatever was gathered so far is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DepthExceeded;

type Resolution<T> = Result<T, DepthExceeded>;

/// Operands of a `+` chain in source order, however the chain is nested.
fn concatenated<'m>(expr: &'m Spanned<Expression>) -> Vec<&'m Spanned<Expression>> {
    let mut operands = vec![];
    let mut pending = vec![expr];
    while let Some(next) = pending.pop() {
        match &next.0 {
            Expression::Binary(BinaryOperation::Plus, lhs, rhs) => {
                pending.push(rhs.as_ref());
                pending.push(lhs.as_ref());
            }
            _ => operands.push(next),
        }
    }
    operands
}

pub struct ValueFlowResolver<'m, 'c> {
    module: &'m Module,
    types: &'c dyn BaseTypeComputer,
    envs: Environments,
    max_depth: usize,
}

impl<'m, 'c> ValueFlowResolver<'m, 'c> {
    pub fn new(
        module: &'m Module,
        types: &'c dyn BaseTypeComputer,
        envs: Environments,
        max_depth: usize,
    ) -> Self {
        ValueFlowResolver {
            module,
            types,
            envs,
            max_depth,
        }
    }

    /// Content of a string valued expression. Accepts variable reads as well
    /// as the access that implicitly declares a variable.
    pub fn resolve_value(&self, expr: &'m Spanned<Expression>) -> Option<ResolvedValue> {
        self.value(expr, 0).unwrap_or_default()
    }

    pub fn resolve_structure(&self, expr: &'m Spanned<Expression>) -> StructureContent {
        self.structure(expr, 0).unwrap_or_default()
    }

    pub fn resolve_array(&self, expr: &'m Spanned<Expression>) -> Vec<ArrayEntry> {
        self.array(expr, 0).unwrap_or_default()
    }

    fn is(&self, expr: &Spanned<Expression>, predicate: impl Fn(TypeKind) -> bool) -> bool {
        let types = self.types.compute_types(self.module, expr, &self.envs);
        has_kind(&types, predicate)
    }

    fn check_depth(&self, expr: &Spanned<Expression>, depth: usize) -> Resolution<()> {
        if depth > self.max_depth {
            trace!("Resolution depth exceeded at {:?}", expr.1);
            return Err(DepthExceeded);
        }
        Ok(())
    }

    /// Only variable hops and constructor arguments count towards `depth`,
    /// the length of a `+` chain does not.
    fn value(&self, expr: &'m Spanned<Expression>, depth: usize) -> Resolution<Option<ResolvedValue>> {
        self.check_depth(expr, depth)?;

        match &expr.0 {
            Expression::String(literal) => {
                let content = literal.content();
                Ok(Some(ResolvedValue {
                    content: content.clone(),
                    provenance: vec![SourceLiteral {
                        span: expr.1,
                        content,
                        raw: literal.raw.clone(),
                    }],
                }))
            }
            Expression::Binary(BinaryOperation::Plus, _, _) => {
                let mut resolved = ResolvedValue {
                    content: String::new(),
                    provenance: vec![],
                };
                // An operand with unknown content counts as empty.
                for operand in concatenated(expr) {
                    if let Some(side) = self.value(operand, depth)? {
                        resolved.content.push_str(&side.content);
                        resolved.provenance.extend(side.provenance);
                    }
                }
                Ok(Some(resolved))
            }
            Expression::Static(access) => {
                if !self.is(expr, |kind| kind == TypeKind::String) {
                    trace!("'{}' is not a string", access.name);
                    return Ok(None);
                }
                let Some((initializer, _)) = self.initializer(access, expr.1) else {
                    trace!("No assignment of '{}' precedes {:?}", access.name, expr.1);
                    return Ok(None);
                };
                match initializer.right.as_ref() {
                    Some(right) => self.value(right, depth + 1),
                    None => Ok(None),
                }
            }
            _ => Ok(None),
        }
    }

    /// The assignment a variable reference reads: its own declaration site when
    /// the reference is one, otherwise the nearest assignment ending before it.
    fn initializer(
        &self,
        access: &StaticFeatureAccess,
        span: Span,
    ) -> Option<(&'m SimpleStatement, &'m Spanned<Statement>)> {
        if access.implicit {
            let declaration = simple_statements_in_scope(self.module, span.start)
                .into_iter()
                .find_map(|stmnt| match &stmnt.0 {
                    Statement::Simple(simple) if simple.left.1 == span && simple.right.is_some() => {
                        Some((simple, stmnt))
                    }
                    _ => None,
                });
            if declaration.is_some() {
                return declaration;
            }
        }

        nearest_assignment(&statements_in_scope(self.module, span.start), &access.name, span.start)
    }

    /// Calls to `methods` on `name` that follow `initializer` and precede `offset`.
    fn appended(
        &self,
        name: &str,
        initializer: &'m Spanned<Statement>,
        offset: usize,
        methods: &[&str],
    ) -> Vec<&'m Invocation> {
        let statements = simple_statements_in_scope(self.module, offset);
        let Some(index) = statements
            .iter()
            .position(|stmnt| std::ptr::eq(*stmnt, initializer))
        else {
            trace!("Assignment of '{name}' is outside the scanned statements");
            return vec![];
        };

        statements[index + 1..]
            .iter()
            .take_while(|(_, span)| span.start < offset)
            .filter_map(|stmnt| call_on(&stmnt.0, name, methods))
            .collect()
    }

    fn structure(&self, expr: &'m Spanned<Expression>, depth: usize) -> Resolution<StructureContent> {
        self.check_depth(expr, depth)?;

        match &expr.0 {
            Expression::New(creator) if TypeKind::from_name(&creator.type_name.0).is_structure() => {
                self.structure_from_creator(creator, depth)
            }
            Expression::Static(access) => {
                if !self.is(expr, |kind| kind.is_structure()) {
                    return Ok(StructureContent::default());
                }
                let Some((initializer, stmnt)) = self.initializer(access, expr.1) else {
                    trace!("No assignment of '{}' precedes {:?}", access.name, expr.1);
                    return Ok(StructureContent::default());
                };

                let mut content = match initializer.right.as_ref() {
                    Some(right) => self.structure(right, depth + 1)?,
                    None => StructureContent::default(),
                };
                for inv in self.appended(&access.name, stmnt, expr.1.start, &INSERT) {
                    if let Some(entry) = self.inserted(inv, depth)? {
                        content.insert(entry.key.clone(), entry);
                    }
                }
                Ok(content)
            }
            _ => Ok(StructureContent::default()),
        }
    }

    fn structure_from_creator(
        &self,
        creator: &'m OperatorStyleCreator,
        depth: usize,
    ) -> Resolution<StructureContent> {
        let mut content = StructureContent::default();
        let Some(keys) = creator.param(0) else {
            return Ok(content);
        };

        // Copy constructor: `New Structure(Other)`.
        if creator.params.len() == 1
            && matches!(keys.0, Expression::Static(_))
            && self.is(keys, |kind| kind.is_structure())
        {
            return self.structure(keys, depth + 1);
        }

        let Some(resolved) = self.value(keys, depth + 1)? else {
            return Ok(content);
        };
        let key_literal = literal_of(keys);
        let cleaned: String = resolved
            .content
            .chars()
            .filter(|c| !matches!(c, '\r' | '\n' | ' ' | '\t'))
            .collect();

        for (index, piece) in cleaned.split(',').enumerate() {
            if piece.is_empty() {
                continue;
            }
            let key = piece.replace('.', "");
            let mut entry = KeyEntry {
                key: key.clone(),
                key_literal: key_literal.clone(),
                value: piece.to_string(),
                value_literal: None,
            };
            if let Some(param) = creator.param(index + 1) {
                if let Some(value) = self.value(param, depth + 1)? {
                    entry.value = value.content.trim().to_string();
                    entry.value_literal = literal_of(param);
                }
            }
            content.insert(key, entry);
        }

        Ok(content)
    }

    fn inserted(&self, inv: &'m Invocation, depth: usize) -> Resolution<Option<KeyEntry>> {
        let Some(key_param) = inv.param(0) else {
            return Ok(None);
        };
        let Some(key) = self.value(key_param, depth + 1)? else {
            return Ok(None);
        };
        let key = key.content.trim().to_string();
        if key.is_empty() {
            return Ok(None);
        }

        let mut entry = KeyEntry {
            key: key.clone(),
            key_literal: literal_of(key_param),
            value: key,
            value_literal: None,
        };
        if let Some(param) = inv.param(1) {
            if let Some(value) = self.value(param, depth + 1)? {
                entry.value = value.content.trim().to_string();
                entry.value_literal = literal_of(param);
            }
        }
        Ok(Some(entry))
    }

    fn array(&self, expr: &'m Spanned<Expression>, depth: usize) -> Resolution<Vec<ArrayEntry>> {
        self.check_depth(expr, depth)?;

        match &expr.0 {
            Expression::New(creator) => match TypeKind::from_name(&creator.type_name.0) {
                TypeKind::Array => self.array_from_creator(creator, depth),
                TypeKind::FixedArray => match creator.param(0) {
                    Some(source) => self.array(source, depth + 1),
                    None => Ok(vec![]),
                },
                _ => Ok(vec![]),
            },
            Expression::Static(access) => {
                if !self.is(expr, |kind| kind.is_array()) {
                    return Ok(vec![]);
                }
                let Some((initializer, stmnt)) = self.initializer(access, expr.1) else {
                    trace!("No assignment of '{}' precedes {:?}", access.name, expr.1);
                    return Ok(vec![]);
                };

                let mut entries = match initializer.right.as_ref() {
                    Some(right) => self.array(right, depth + 1)?,
                    None => vec![],
                };
                for inv in self.appended(&access.name, stmnt, expr.1.start, &ADD) {
                    let Some(param) = inv.param(0) else {
                        continue;
                    };
                    if let Some(value) = self.value(param, depth + 1)? {
                        entries.push(ArrayEntry {
                            content: value.content,
                            literal: literal_of(param),
                        });
                    }
                }
                Ok(entries)
            }
            _ => Ok(vec![]),
        }
    }

    fn array_from_creator(
        &self,
        creator: &'m OperatorStyleCreator,
        depth: usize,
    ) -> Resolution<Vec<ArrayEntry>> {
        if let [Some(source)] = creator.params.as_slice() {
            if matches!(source.0, Expression::Static(_)) {
                if self.is(source, |kind| kind == TypeKind::String) {
                    let entries = self
                        .value(source, depth + 1)?
                        .map(|value| {
                            let literal = match value.provenance.as_slice() {
                                [single] => Some(single.clone()),
                                _ => None,
                            };
                            vec![ArrayEntry {
                                content: value.content,
                                literal,
                            }]
                        })
                        .unwrap_or_default();
                    return Ok(entries);
                }
                if self.is(source, |kind| kind.is_array()) {
                    return self.array(source, depth + 1);
                }
            }
        }

        let mut entries = vec![];
        for param in creator.params.iter().flatten() {
            if let Some(value) = self.value(param, depth + 1)? {
                entries.push(ArrayEntry {
                    content: value.content,
                    literal: literal_of(param),
                });
            }
        }
        Ok(entries)
    }
}

/// Backward scan for the last assignment to `name` that ends before `offset`.
fn nearest_assignment<'m>(
    statements: &[&'m Spanned<Statement>],
    name: &str,
    offset: usize,
) -> Option<(&'m SimpleStatement, &'m Spanned<Statement>)> {
    for stmnt in statements.iter().rev() {
        match &stmnt.0 {
            Statement::Simple(simple) => {
                if stmnt.1.end < offset && assigns_to(simple, name) {
                    return Some((simple, *stmnt));
                }
            }
            compound => {
                let nested: Vec<&'m Spanned<Statement>> = compound
                    .blocks()
                    .into_iter()
                    .flat_map(simple_statements)
                    .collect();
                if let Some(found) = nearest_assignment(&nested, name, offset) {
                    return Some(found);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_module;
    use crate::host::MemoryHost;
    use crate::host::PlatformTemplates;
    use crate::types::{
        Type,
        ARRAY,
        STRING,
        STRUCTURE,
    };

    fn host() -> MemoryHost {
        MemoryHost::with_templates(PlatformTemplates::embedded().expect("templates"))
    }

    /// The first argument of the last call statement in the module body.
    fn last_argument(module: &Module) -> &Spanned<Expression> {
        module
            .statements
            .iter()
            .rev()
            .find_map(|(stmnt, _)| match &stmnt.as_simple()?.left.0 {
                Expression::Invocation(inv) if inv.method_name() == Some("Использовать") => {
                    inv.param(0)
                }
                _ => None,
            })
            .expect("call")
    }

    #[test]
    fn test_concatenation() {
        let source = "Использовать(\"ab\" + \"cd\");";
        let module = parse_module(source, "Test", "test.bsl").module;
        let host = host();
        let resolver = ValueFlowResolver::new(&module, &host, Environments::all(), 16);

        let resolved = resolver.resolve_value(last_argument(&module)).expect("content");

        assert_eq!(resolved.content, "abcd");
        let provenance: Vec<&str> = resolved.provenance.iter().map(|l| l.content.as_str()).collect();
        assert_eq!(provenance, vec!["ab", "cd"]);
    }

    #[test]
    fn test_other_operators_are_unresolved() {
        let source = "Использовать(\"ab\" - \"cd\");";
        let module = parse_module(source, "Test", "test.bsl").module;
        let host = host();
        let resolver = ValueFlowResolver::new(&module, &host, Environments::all(), 16);

        assert_eq!(resolver.resolve_value(last_argument(&module)), None);
    }

    #[test]
    fn test_nearest_assignment_wins() {
        let source = "Х = \"A\";\nХ = \"B\";\nИспользовать(Х);";
        let module = parse_module(source, "Test", "test.bsl").module;
        let host = host();
        let resolver = ValueFlowResolver::new(&module, &host, Environments::all(), 16);

        let resolved = resolver.resolve_value(last_argument(&module)).expect("content");

        assert_eq!(resolved.content, "B");
    }

    #[test]
    fn test_self_referencing_concatenation() {
        let source = "Товар = \"Код\";\nТовар = Товар + \", Наименование\";\nИспользовать(Товар);";
        let module = parse_module(source, "Test", "test.bsl").module;
        let host = host();
        let resolver = ValueFlowResolver::new(&module, &host, Environments::all(), 16);

        let resolved = resolver.resolve_value(last_argument(&module)).expect("content");

        assert_eq!(resolved.content, "Код, Наименование");
        assert_eq!(resolved.provenance.len(), 2);
    }

    #[test]
    fn test_non_string_variable_is_unresolved() {
        let source = "Х = 1;\nИспользовать(Х);";
        let module = parse_module(source, "Test", "test.bsl").module;
        let host = host();
        let resolver = ValueFlowResolver::new(&module, &host, Environments::all(), 16);

        assert_eq!(resolver.resolve_value(last_argument(&module)), None);
    }

    #[test]
    fn test_array_append_order() {
        let source = "М = Новый Массив;\nМ.Добавить(\"p\");\nМ.Добавить(\"q\");\nМ.Добавить(\"r\");\nИспользовать(М);";
        let module = parse_module(source, "Test", "test.bsl").module;
        let host = host();
        let resolver = ValueFlowResolver::new(&module, &host, Environments::all(), 16);

        let entries = resolver.resolve_array(last_argument(&module));
        let contents: Vec<&str> = entries.iter().map(|e| e.content.as_str()).collect();

        assert_eq!(contents, vec!["p", "q", "r"]);
        assert!(entries.iter().all(|e| e.literal.is_some()));
    }

    #[test]
    fn test_array_appends_after_reference_are_ignored() {
        let source = "М = Новый Массив;\nМ.Добавить(\"p\");\nИспользовать(М);\nМ.Добавить(\"q\");";
        let module = parse_module(source, "Test", "test.bsl").module;
        let host = host().with_variable("М", vec![Type::named(ARRAY)]);
        let resolver = ValueFlowResolver::new(&module, &host, Environments::all(), 16);

        let entries = resolver.resolve_array(last_argument(&module));

        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_structure_insert_overwrites() {
        let source = "С = Новый Структура;\nС.Вставить(\"k\", \"1\");\nС.Вставить(\"k\", \"2\");\nИспользовать(С);";
        let module = parse_module(source, "Test", "test.bsl").module;
        let host = host();
        let resolver = ValueFlowResolver::new(&module, &host, Environments::all(), 16);

        let content = resolver.resolve_structure(last_argument(&module));

        assert_eq!(content.len(), 1);
        assert_eq!(content["k"].value, "2");
    }

    #[test]
    fn test_structure_constructor_keys() {
        let source = "С = Новый Структура(\"Код, Владелец.Наименование\", , \"Владелец.Код\");\nИспользовать(С);";
        let module = parse_module(source, "Test", "test.bsl").module;
        let host = host().with_variable("С", vec![Type::named(STRUCTURE)]);
        let resolver = ValueFlowResolver::new(&module, &host, Environments::all(), 16);

        let content = resolver.resolve_structure(last_argument(&module));
        let keys: Vec<&str> = content.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["Код", "ВладелецНаименование"]);
        assert_eq!(content["Код"].value, "Код");
        assert_eq!(content["ВладелецНаименование"].value, "Владелец.Код");
        assert!(content["ВладелецНаименование"].value_literal.is_some());
    }

    #[test]
    fn test_long_concatenation_keeps_every_operand() {
        let literals: Vec<String> = (0..40).map(|i| format!("\"П{i},\"")).collect();
        let source = format!("Использовать({});", literals.join(" + "));
        let module = parse_module(&source, "Test", "test.bsl").module;
        let host = host();
        let resolver = ValueFlowResolver::new(&module, &host, Environments::all(), 32);

        let resolved = resolver.resolve_value(last_argument(&module)).expect("content");
        let expected: String = (0..40).map(|i| format!("П{i},")).collect();

        assert_eq!(resolved.content, expected);
        assert_eq!(resolved.provenance.len(), 40);
    }

    #[test]
    fn test_repeated_self_concatenation() {
        let mut source = String::from("Поля = \"Ф0\";\n");
        for i in 1..20 {
            source.push_str(&format!("Поля = Поля + \", Ф{i}\";\n"));
        }
        source.push_str("Использовать(Поля);");
        let module = parse_module(&source, "Test", "test.bsl").module;
        let host = host().with_variable("Поля", vec![Type::named(STRING)]);
        let resolver = ValueFlowResolver::new(&module, &host, Environments::all(), 32);

        let resolved = resolver.resolve_value(last_argument(&module)).expect("content");
        let expected = (0..20).map(|i| format!("Ф{i}")).collect::<Vec<_>>().join(", ");

        assert_eq!(resolved.content, expected);
    }

    #[test]
    fn test_depth_limit_gives_up_entirely() {
        let source = "Поля = \"Код\";\nПоля = Поля + \", Имя\";\nПоля = Поля + \", Цена\";\nПоля = Поля + \", Вес\";\nИспользовать(Поля);";
        let module = parse_module(source, "Test", "test.bsl").module;
        let host = host().with_variable("Поля", vec![Type::named(STRING)]);
        let resolver = ValueFlowResolver::new(&module, &host, Environments::all(), 2);

        assert_eq!(resolver.resolve_value(last_argument(&module)), None);
    }

    #[test]
    fn test_module_level_reinitialization_in_branch() {
        let source = "М = Новый Массив;\nМ.Добавить(\"a\");\nЕсли Истина Тогда\n  М = Новый Массив;\nКонецЕсли;\nМ.Добавить(\"b\");\nИспользовать(М);";
        let module = parse_module(source, "Test", "test.bsl").module;
        let host = host().with_variable("М", vec![Type::named(ARRAY)]);
        let resolver = ValueFlowResolver::new(&module, &host, Environments::all(), 16);

        let entries = resolver.resolve_array(last_argument(&module));
        let contents: Vec<&str> = entries.iter().map(|e| e.content.as_str()).collect();

        assert_eq!(contents, vec!["b"]);
    }

    #[test]
    fn test_module_level_appends_inside_blocks() {
        let source = "С = Новый Структура;\nЕсли Истина Тогда\n  С.Вставить(\"Код\");\nКонецЕсли;\nИспользовать(С);";
        let module = parse_module(source, "Test", "test.bsl").module;
        let host = host().with_variable("С", vec![Type::named(STRUCTURE)]);
        let resolver = ValueFlowResolver::new(&module, &host, Environments::all(), 16);

        let content = resolver.resolve_structure(last_argument(&module));

        let keys: Vec<&str> = content.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["Код"]);
    }

    #[test]
    fn test_declaration_site_reads_its_own_initializer() {
        let source = "Поля = \"Код\" + \", Имя\";\nПоля = \"Цена\";";
        let module = parse_module(source, "Test", "test.bsl").module;
        let host = host().with_variable("Поля", vec![Type::named(STRING)]);
        let resolver = ValueFlowResolver::new(&module, &host, Environments::all(), 16);
        let declaration = &module.statements[0].0.as_simple().expect("assignment").left;

        assert!(matches!(&declaration.0, Expression::Static(access) if access.implicit));
        let resolved = resolver.resolve_value(declaration).expect("content");

        assert_eq!(resolved.content, "Код, Имя");
    }
}
