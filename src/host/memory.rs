use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::grammar::{
    BinaryOperation,
    Block,
    Environments,
    Expression,
    Module,
    Spanned,
    Statement,
};
use crate::types::{
    DerivedSource,
    Property,
    RuntimeVersion,
    Type,
    TypeKind,
    BOOLEAN,
    DATE,
    NULL,
    NUMBER,
    STRING,
    UNDEFINED,
};
use crate::utils::eq_ignore_case;

use super::{
    BaseTypeComputer,
    PlatformTemplates,
    PropertyUniverse,
    ScopeResolver,
    TemplateRegistry,
    VariablesScope,
};

/// Gives metadata-style names (`CatalogRef.Items`) their category, recursively.
pub fn normalize(mut ty: Type) -> Type {
    if ty.category.is_none() && ty.name.contains('.') {
        ty.category = Type::reference(&ty.name).category;
    }
    ty.element_types = ty.element_types.into_iter().map(normalize).collect();
    for property in ty.properties.iter_mut() {
        property.types = std::mem::take(&mut property.types)
            .into_iter()
            .map(normalize)
            .collect();
    }
    ty
}

fn push_unique(types: &mut Vec<Type>, ty: Type) {
    if !types.contains(&ty) {
        types.push(ty);
    }
}

/// An in-memory stand-in for configuration metadata and the platform type system.
#[derive(Debug)]
pub struct MemoryHost {
    templates: PlatformTemplates,
    version: RuntimeVersion,
    objects: FxHashMap<String, Vec<Property>>,
    managers: FxHashMap<String, Type>,
    common_modules: FxHashMap<String, Property>,
    variables: FxHashMap<String, Vec<Type>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        MemoryHost::with_templates(PlatformTemplates::load())
    }

    pub fn with_templates(templates: PlatformTemplates) -> Self {
        MemoryHost {
            templates,
            version: RuntimeVersion::LATEST,
            objects: FxHashMap::default(),
            managers: FxHashMap::default(),
            common_modules: FxHashMap::default(),
            variables: FxHashMap::default(),
        }
    }

    pub fn version(&self) -> RuntimeVersion {
        self.version
    }

    pub fn with_version(mut self, version: RuntimeVersion) -> Self {
        self.version = version;
        self
    }

    /// Registers a metadata object's ref type with its attributes.
    pub fn with_object(mut self, type_name: &str, properties: Vec<Property>) -> Self {
        let properties = properties
            .into_iter()
            .map(|mut p| {
                p.types = p.types.into_iter().map(normalize).collect();
                p
            })
            .collect();
        self.objects.insert(type_name.to_lowercase(), properties);
        self
    }

    pub fn with_manager(mut self, fqn: &str) -> Self {
        self.managers
            .insert(fqn.to_lowercase(), Type::reference(fqn));
        self
    }

    pub fn with_common_module(mut self, name: &str) -> Self {
        let fqn = format!("CommonModule.{name}");
        let property = Property::derived(
            name,
            name,
            vec![Type::reference(&fqn)],
            Some(DerivedSource::Metadata { id: fqn.clone() }),
        );
        self.common_modules.insert(name.to_lowercase(), property);
        self
    }

    /// Pins the types of a variable regardless of its assignments.
    pub fn with_variable(mut self, name: &str, types: Vec<Type>) -> Self {
        self.variables
            .insert(name.to_lowercase(), types.into_iter().map(normalize).collect());
        self
    }

    fn template_or_named(&self, name: &str) -> Type {
        self.templates
            .template(name, self.version)
            .map(|t| (*t).clone())
            .unwrap_or_else(|| Type::named(name))
    }

    fn types_of(
        &self,
        module: &Module,
        expr: &Spanned<Expression>,
        envs: &Environments,
        visiting: &mut Vec<String>,
    ) -> Vec<Type> {
        let (exp, span) = expr;
        match exp {
            Expression::String(_) => vec![Type::named(STRING)],
            Expression::Number(_) => vec![Type::named(NUMBER)],
            Expression::Date(_) => vec![Type::named(DATE)],
            Expression::Boolean(_) => vec![Type::named(BOOLEAN)],
            Expression::Undefined => vec![Type::named(UNDEFINED)],
            Expression::Null => vec![Type::named(NULL)],
            Expression::New(creator) => vec![self.template_or_named(&creator.type_name.0)],
            Expression::Static(access) => {
                if let Some(types) = self.variables.get(&access.name.to_lowercase()) {
                    return types.clone();
                }
                self.variable_types(module, &access.name, span.start, envs, visiting)
            }
            Expression::Dynamic(access) => {
                let source = self.types_of(module, &access.source, envs, visiting);
                let mut types = vec![];
                for (properties, _) in self.all_properties(&source) {
                    for property in properties.iter().filter(|p| p.is_named(&access.name.0)) {
                        for ty in property.types.iter() {
                            push_unique(&mut types, ty.clone());
                        }
                    }
                }
                types
            }
            Expression::Invocation(inv) => {
                let Expression::Dynamic(access) = &inv.method_access.0 else {
                    return vec![];
                };
                let source = self.types_of(module, &access.source, envs, visiting);
                let mut types = vec![];
                for ty in source.iter() {
                    if let Some(method) = ty.method(&access.name.0) {
                        for ret in method.return_types.iter() {
                            push_unique(&mut types, ret.clone());
                        }
                    }
                }
                types
            }
            Expression::Index(source, _) => {
                let source = self.types_of(module, source, envs, visiting);
                let mut types = vec![];
                for ty in source.iter().filter(|t| t.kind().is_array()) {
                    for element in ty.element_types.iter() {
                        push_unique(&mut types, element.clone());
                    }
                }
                types
            }
            Expression::Binary(op, lhs, rhs) => match op {
                BinaryOperation::Plus => {
                    let lhs = self.types_of(module, lhs, envs, visiting);
                    let rhs = self.types_of(module, rhs, envs, visiting);
                    let is_string = lhs.iter().chain(rhs.iter()).any(|t| t.kind() == TypeKind::String);
                    if is_string {
                        vec![Type::named(STRING)]
                    } else {
                        vec![Type::named(NUMBER)]
                    }
                }
                BinaryOperation::Minus
                | BinaryOperation::Multiply
                | BinaryOperation::Divide
                | BinaryOperation::Modulo => vec![Type::named(NUMBER)],
                _ => vec![Type::named(BOOLEAN)],
            },
            Expression::Unary(_, exp) => self.types_of(module, exp, envs, visiting),
            Expression::Ternary(_, then, otherwise) => {
                let mut types = self.types_of(module, then, envs, visiting);
                for ty in self.types_of(module, otherwise, envs, visiting) {
                    push_unique(&mut types, ty);
                }
                types
            }
            Expression::Error => vec![],
        }
    }

    /// Flow-insensitive: the union of everything assigned to the name in the same scope.
    fn variable_types(
        &self,
        module: &Module,
        name: &str,
        offset: usize,
        envs: &Environments,
        visiting: &mut Vec<String>,
    ) -> Vec<Type> {
        let key = name.to_lowercase();
        if visiting.contains(&key) {
            return vec![];
        }
        visiting.push(key);

        let block = match module.method_at(offset) {
            Some((method, _)) => &method.body,
            None => &module.statements,
        };

        let mut sources = vec![];
        collect_sources(block, name, &mut sources);

        let mut types = vec![];
        for source in sources {
            let found = match source {
                Source::Assigned(exp) => self.types_of(module, exp, envs, visiting),
                Source::Iterated(exp) => {
                    let mut elements = vec![];
                    for collection in self.types_of(module, exp, envs, visiting) {
                        for element in collection.element_types {
                            push_unique(&mut elements, element);
                        }
                    }
                    elements
                }
            };
            for ty in found {
                push_unique(&mut types, ty);
            }
        }

        visiting.pop();
        trace!("{name} at {offset}: {types:?}");
        types
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        MemoryHost::new()
    }
}

enum Source<'m> {
    Assigned(&'m Spanned<Expression>),
    Iterated(&'m Spanned<Expression>),
}

fn collect_sources<'m>(block: &'m Block, name: &str, sources: &mut Vec<Source<'m>>) {
    for (stmnt, _) in block.iter() {
        match stmnt {
            Statement::Simple(simple) => {
                let assigns = matches!(
                    &simple.left.0,
                    Expression::Static(access) if eq_ignore_case(&access.name, name)
                );
                if let (true, Some(right)) = (assigns, simple.right.as_ref()) {
                    sources.push(Source::Assigned(right));
                }
            }
            Statement::ForEach {
                variable,
                collection,
                ..
            } => {
                if matches!(&variable.0, Expression::Static(access) if eq_ignore_case(&access.name, name))
                {
                    sources.push(Source::Iterated(collection));
                }
            }
            _ => {}
        }
        for nested in stmnt.blocks() {
            collect_sources(nested, name, sources);
        }
    }
}

impl BaseTypeComputer for MemoryHost {
    fn compute_types(
        &self,
        module: &Module,
        expr: &Spanned<Expression>,
        envs: &Environments,
    ) -> Vec<Type> {
        self.types_of(module, expr, envs, &mut vec![])
    }
}

impl PropertyUniverse for MemoryHost {
    fn all_properties(&self, types: &[Type]) -> Vec<(Vec<Property>, Type)> {
        types
            .iter()
            .filter_map(|ty| {
                if !ty.properties.is_empty() {
                    return Some((ty.properties.clone(), ty.clone()));
                }
                self.objects
                    .get(&ty.name.to_lowercase())
                    .map(|properties| (properties.clone(), ty.clone()))
            })
            .collect()
    }
}

impl ScopeResolver for MemoryHost {
    fn type_by_fqn(&self, fqn: &str) -> Option<Type> {
        self.managers.get(&fqn.to_lowercase()).cloned()
    }

    fn derived_property(&self, name: &str, _scope: &VariablesScope) -> Option<Property> {
        self.common_modules.get(&name.to_lowercase()).cloned()
    }
}

impl TemplateRegistry for MemoryHost {
    fn template(&self, name: &str, version: RuntimeVersion) -> Option<Arc<Type>> {
        self.templates.template(name, version)
    }
}
