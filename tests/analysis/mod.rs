use bsl_ssl_types::analysis::{
    AnalysisConfig,
    InferredCall,
    TypeInference,
};
use bsl_ssl_types::grammar::{
    parse_module,
    Module,
};
use bsl_ssl_types::host::{
    MemoryHost,
    PlatformTemplates,
};
use bsl_ssl_types::types::{
    Property,
    Type,
    ARRAY,
    NUMBER,
    STRING,
};

mod attributes;
mod collections;
mod invariants;
mod managers;

/// A catalog of goods whose owner is a counterparty, with `Ссылка` typed as a goods ref.
pub fn catalog_host() -> MemoryHost {
    MemoryHost::with_templates(PlatformTemplates::embedded().expect("embedded templates"))
        .with_object(
            "CatalogRef.Товары",
            vec![
                Property::new("Код", "Код", vec![Type::named(STRING)]),
                Property::new("Наименование", "Наименование", vec![Type::named(STRING)]),
                Property::new(
                    "Владелец",
                    "Владелец",
                    vec![Type::reference("CatalogRef.Контрагенты")],
                ),
            ],
        )
        .with_object(
            "CatalogRef.Контрагенты",
            vec![
                Property::new("ИНН", "ИНН", vec![Type::named(STRING)]),
                Property::new("Код", "Код", vec![Type::named(NUMBER)]),
            ],
        )
        .with_variable("Ссылка", vec![Type::reference("CatalogRef.Товары")])
        .with_variable("Ссылки", vec![array_of(Type::reference("CatalogRef.Товары"))])
}

pub fn array_of(element: Type) -> Type {
    Type {
        element_types: vec![element],
        ..Type::named(ARRAY)
    }
}

pub fn parse_in(source: &str, module_name: &str) -> Module {
    let response = parse_module(source, module_name, "test.bsl");
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    response.module
}

pub fn infer(host: &MemoryHost, source: &str) -> Vec<InferredCall> {
    infer_in(host, source, "Test")
}

pub fn infer_in(host: &MemoryHost, source: &str, module_name: &str) -> Vec<InferredCall> {
    let module = parse_in(source, module_name);
    TypeInference::new(host, AnalysisConfig::default()).infer_module(&module)
}

/// `callee: Type | Type` per inferred call.
pub fn rendered(calls: &[InferredCall]) -> Vec<String> {
    calls
        .iter()
        .map(|call| {
            let types = call
                .types
                .iter()
                .map(|ty| ty.to_string())
                .collect::<Vec<String>>()
                .join(" | ");
            format!("{}: {types}", call.callee)
        })
        .collect()
}
