//! Collaborators the inference engine consumes, and an in-memory host implementing them.

use std::fmt::Debug;
use std::sync::Arc;

use crate::grammar::{
    Environments,
    Expression,
    Module,
    Spanned,
};
use crate::types::{
    Property,
    RuntimeVersion,
    Type,
};

pub mod fixture;
pub mod memory;
pub mod platform;

pub use fixture::FixtureError;
pub use memory::MemoryHost;
pub use platform::PlatformTemplates;

/// Assigns types to arbitrary expressions.
pub trait BaseTypeComputer: Sync + Send + Debug {
    fn compute_types(
        &self,
        module: &Module,
        expr: &Spanned<Expression>,
        envs: &Environments,
    ) -> Vec<Type>;
}

/// Enumerates the properties available on a set of types.
pub trait PropertyUniverse: Sync + Send + Debug {
    /// One entry per owning type, with the properties it declares or computes.
    fn all_properties(&self, types: &[Type]) -> Vec<(Vec<Property>, Type)>;
}

/// Where a name lookup happens.
#[derive(Debug, Clone)]
pub struct VariablesScope<'m> {
    pub module: &'m Module,
    pub method_name: Option<&'m str>,
    pub environments: Environments,
}

/// Maps qualified names to metadata and module symbols.
pub trait ScopeResolver: Sync + Send + Debug {
    fn type_by_fqn(&self, fqn: &str) -> Option<Type>;
    fn derived_property(&self, name: &str, scope: &VariablesScope) -> Option<Property>;
}

/// Canonical type templates, versioned by runtime.
pub trait TemplateRegistry: Sync + Send + Debug {
    fn template(&self, name: &str, version: RuntimeVersion) -> Option<Arc<Type>>;
}

/// A host that provides every collaborator.
pub trait Host: BaseTypeComputer + PropertyUniverse + ScopeResolver + TemplateRegistry {}

impl<T> Host for T where T: BaseTypeComputer + PropertyUniverse + ScopeResolver + TemplateRegistry {}
