use crate::host::TemplateRegistry;
use crate::types::{
    RuntimeVersion,
    Type,
};

use super::InferenceError;

/// Names a canonical template without materializing it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateRef {
    pub name: String,
    pub version: RuntimeVersion,
}

/// Hands out owned copies of registry templates for the configured runtime.
#[derive(Debug, Clone, Copy)]
pub struct TypeTemplates<'h> {
    registry: &'h dyn TemplateRegistry,
    version: RuntimeVersion,
}

impl<'h> TypeTemplates<'h> {
    pub fn new(registry: &'h dyn TemplateRegistry, version: RuntimeVersion) -> Self {
        TypeTemplates { registry, version }
    }

    pub fn template(&self, kind: &str) -> TemplateRef {
        TemplateRef {
            name: kind.to_string(),
            version: self.version,
        }
    }

    /// A fresh instance: mutating it never affects the registry or other callers.
    pub fn materialize(&self, proxy: &TemplateRef) -> Result<Type, InferenceError> {
        self.registry
            .template(&proxy.name, proxy.version)
            .map(|template| Type::clone(&template))
            .ok_or_else(|| InferenceError::MissingTemplate(proxy.name.clone(), proxy.version))
    }

    pub fn fresh(&self, kind: &str) -> Result<Type, InferenceError> {
        self.materialize(&self.template(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PlatformTemplates;
    use crate::types::{
        Property,
        STRUCTURE,
    };

    #[test]
    fn test_instances_are_independent() {
        let registry = PlatformTemplates::embedded().expect("templates");
        let templates = TypeTemplates::new(&registry, RuntimeVersion::LATEST);

        let mut first = templates.fresh(STRUCTURE).expect("Structure");
        first.properties.push(Property::new("Code", "Код", vec![]));
        let second = templates.fresh(STRUCTURE).expect("Structure");

        assert!(second.properties.is_empty());
    }

    #[test]
    fn test_missing_template() {
        let registry = PlatformTemplates::default();
        let templates = TypeTemplates::new(&registry, RuntimeVersion::V8_3_20);

        assert_eq!(
            templates.fresh(STRUCTURE),
            Err(InferenceError::MissingTemplate(
                STRUCTURE.to_string(),
                RuntimeVersion::V8_3_20
            ))
        );
    }
}
