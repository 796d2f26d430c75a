//! Result-type inference for calls to common module functions.
//!
//! The entry point is [`TypeInference`]: it attributes a call to a module and
//! function, dispatches to the matching computer and returns the types the
//! call produces. An empty result means no opinion; the caller keeps whatever
//! the base type computer inferred.

use serde::Serialize;
use tracing::{
    debug,
    trace,
};

use crate::grammar::{
    Block,
    Environments,
    Expression,
    Invocation,
    Module,
    Span,
    Spanned,
};
use crate::host::{
    BaseTypeComputer,
    Host,
    PropertyUniverse,
    ScopeResolver,
    VariablesScope,
};
use crate::types::{
    RuntimeVersion,
    Type,
};

pub mod computers;
pub mod property_path;
pub mod scanner;
pub mod synthesizer;
pub mod templates;
pub mod value_flow;

use computers::{
    call_identity,
    ComputerRegistry,
};
use property_path::PropertyPathResolver;
use synthesizer::TypeSynthesizer;
use templates::TypeTemplates;
use value_flow::ValueFlowResolver;

/// Why a call produced no types. Logged, never surfaced to callers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    #[error("Content at {0:?} is not statically known")]
    UnresolvableContent(Span),
    #[error("No property matches path segment '{0}'")]
    UnknownPathSegment(String),
    #[error("Template '{0}' is not available for {1}")]
    MissingTemplate(String, RuntimeVersion),
    #[error("Template '{0}' has no '{1}' property")]
    MissingProperty(String, String),
    #[error("'{0}' needs at least one element type")]
    EmptyElementTypes(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub runtime_version: RuntimeVersion,
    /// Bound on nested variable and constructor lookups during value flow.
    pub max_resolution_depth: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            runtime_version: RuntimeVersion::LATEST,
            max_resolution_depth: 32,
        }
    }
}

/// Collaborators and settings shared by every computer.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'h> {
    pub types: &'h dyn BaseTypeComputer,
    pub properties: &'h dyn PropertyUniverse,
    pub scope: &'h dyn ScopeResolver,
    pub templates: TypeTemplates<'h>,
    pub config: AnalysisConfig,
}

impl<'h> AnalysisContext<'h> {
    pub fn new<H: Host>(host: &'h H, config: AnalysisConfig) -> Self {
        AnalysisContext {
            types: host,
            properties: host,
            scope: host,
            templates: TypeTemplates::new(host, config.runtime_version),
            config,
        }
    }

    pub fn types_of(&self, call: &CallSite, expr: &Spanned<Expression>) -> Vec<Type> {
        self.types
            .compute_types(call.module, expr, &call.environments())
    }

    pub fn value_flow<'m>(&self, call: &CallSite<'m>) -> ValueFlowResolver<'m, 'h> {
        ValueFlowResolver::new(
            call.module,
            self.types,
            call.environments(),
            self.config.max_resolution_depth,
        )
    }

    pub fn paths(&self) -> PropertyPathResolver<'h> {
        PropertyPathResolver::new(self.properties)
    }

    pub fn synthesizer(&self) -> TypeSynthesizer<'h> {
        TypeSynthesizer::new(self.templates, self.properties)
    }
}

/// An invocation together with the module it appears in.
#[derive(Debug, Clone, Copy)]
pub struct CallSite<'m> {
    pub module: &'m Module,
    pub invocation: &'m Invocation,
    pub span: Span,
}

impl<'m> CallSite<'m> {
    pub fn new(module: &'m Module, invocation: &'m Invocation, span: Span) -> Self {
        CallSite {
            module,
            invocation,
            span,
        }
    }

    pub fn param(&self, index: usize) -> Option<&'m Spanned<Expression>> {
        self.invocation.param(index)
    }

    pub fn param_count(&self) -> usize {
        self.invocation.param_count()
    }

    pub fn environments(&self) -> Environments {
        self.module.environments_at(self.span.start)
    }

    pub fn scope(&self) -> VariablesScope<'m> {
        VariablesScope {
            module: self.module,
            method_name: self
                .module
                .method_at(self.span.start)
                .map(|(method, _)| method.name.0.as_str()),
            environments: self.environments(),
        }
    }

    /// The call target as written, e.g. `ОбщегоНазначения.ЗначениеРеквизитаОбъекта`.
    pub fn callee(&self) -> String {
        match &self.invocation.method_access.0 {
            Expression::Dynamic(access) => match &access.source.0 {
                Expression::Static(source) => format!("{}.{}", source.name, access.name.0),
                _ => access.name.0.clone(),
            },
            Expression::Static(access) => access.name.clone(),
            _ => String::new(),
        }
    }
}

/// A call whose result type was inferred.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferredCall {
    pub start: usize,
    pub end: usize,
    pub callee: String,
    pub types: Vec<Type>,
}

#[derive(Debug)]
pub struct TypeInference<'h> {
    context: AnalysisContext<'h>,
    registry: ComputerRegistry,
}

impl<'h> TypeInference<'h> {
    pub fn new<H: Host>(host: &'h H, config: AnalysisConfig) -> Self {
        TypeInference::with_registry(host, config, ComputerRegistry::standard())
    }

    pub fn with_registry<H: Host>(host: &'h H, config: AnalysisConfig, registry: ComputerRegistry) -> Self {
        TypeInference {
            context: AnalysisContext::new(host, config),
            registry,
        }
    }

    pub fn context(&self) -> &AnalysisContext<'h> {
        &self.context
    }

    /// Result types of a single call; empty when the call is not recognized
    /// or nothing could be inferred.
    #[tracing::instrument(skip_all, fields(start = call.span.start))]
    pub fn infer_call(&self, call: &CallSite) -> Vec<Type> {
        let Some((module, function)) = call_identity(call) else {
            return vec![];
        };
        let Some(computer) = self.registry.lookup(&module, &function) else {
            return vec![];
        };
        if !computer.accepts(call) {
            trace!("{} rejected the call shape", call.callee());
            return vec![];
        }

        let types = computer.compute(call, &self.context);
        debug!("{} -> {types:?}", call.callee());
        types
    }

    /// Every call in the module that produced types, in document order.
    #[tracing::instrument(skip_all, fields(module = %module.name))]
    pub fn infer_module(&self, module: &Module) -> Vec<InferredCall> {
        let mut calls = vec![];
        collect_calls(&module.statements, &mut calls);
        for (method, _) in module.methods.iter() {
            collect_calls(&method.body, &mut calls);
        }
        calls.sort_by_key(|(_, span)| span.start);

        calls
            .into_iter()
            .filter_map(|(invocation, span)| {
                let call = CallSite::new(module, invocation, span);
                let types = self.infer_call(&call);
                if types.is_empty() {
                    return None;
                }
                Some(InferredCall {
                    start: span.start,
                    end: span.end,
                    callee: call.callee(),
                    types,
                })
            })
            .collect()
    }
}

fn collect_calls<'m>(block: &'m Block, calls: &mut Vec<(&'m Invocation, Span)>) {
    for (stmnt, _) in block.iter() {
        for expr in stmnt.expressions() {
            collect_expression_calls(expr, calls);
        }
        for nested in stmnt.blocks() {
            collect_calls(nested, calls);
        }
    }
}

fn collect_expression_calls<'m>(expr: &'m Spanned<Expression>, calls: &mut Vec<(&'m Invocation, Span)>) {
    if let Expression::Invocation(invocation) = &expr.0 {
        calls.push((invocation, expr.1));
    }
    for child in expr.0.children() {
        collect_expression_calls(child, calls);
    }
}
