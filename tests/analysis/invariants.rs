use std::sync::Arc;

use pretty_assertions::assert_eq;

use bsl_ssl_types::analysis::computers::{
    ComputerRegistry,
    InvocationTypesComputer,
    Spelling,
    COMMON,
};
use bsl_ssl_types::analysis::{
    AnalysisConfig,
    AnalysisContext,
    CallSite,
    TypeInference,
};
use bsl_ssl_types::host::{
    MemoryHost,
    PlatformTemplates,
    TemplateRegistry,
};
use bsl_ssl_types::types::{
    Property,
    RuntimeVersion,
    Type,
    STRING,
    STRUCTURE,
};

use super::{
    catalog_host,
    infer,
    parse_in,
    rendered,
};

const ATTRIBUTES: &str = "Данные = ОбщегоНазначения.ЗначенияРеквизитовОбъекта(Ссылка, \"Код\");";

#[test]
fn test_templates_are_not_mutated() {
    let host = catalog_host();
    let first = infer(&host, ATTRIBUTES);
    let second = infer(&host, ATTRIBUTES);

    assert_eq!(rendered(&first), rendered(&second));
    let template = host
        .template(STRUCTURE, RuntimeVersion::LATEST)
        .expect("structure template");
    assert!(template.properties.is_empty());
}

#[test]
fn test_results_are_independent_instances() {
    let host = catalog_host();
    let mut calls = infer(&host, ATTRIBUTES);
    calls[0].types[0].properties.clear();

    assert_eq!(
        rendered(&infer(&host, ATTRIBUTES)),
        vec!["ОбщегоНазначения.ЗначенияРеквизитовОбъекта: Structure{Код: String}"]
    );
}

/// Templates where `Structure` only exists from 8.3.22 on.
const LATE_STRUCTURE: &str = r#"{
    "types": [
        { "name": "String", "nameRu": "Строка" },
        { "name": "Structure", "nameRu": "Структура", "since": "8.3.22" }
    ]
}"#;

#[test]
fn test_runtime_version_selects_templates() {
    let templates = PlatformTemplates::from_json(LATE_STRUCTURE).expect("versioned templates");
    let host = MemoryHost::with_templates(templates)
        .with_object(
            "CatalogRef.Товары",
            vec![Property::new("Код", "Код", vec![Type::named(STRING)])],
        )
        .with_variable("Ссылка", vec![Type::reference("CatalogRef.Товары")]);
    let module = parse_in(ATTRIBUTES, "Test");
    let infer_for = |runtime_version| {
        let config = AnalysisConfig {
            runtime_version,
            ..AnalysisConfig::default()
        };
        rendered(&TypeInference::new(&host, config).infer_module(&module))
    };

    assert_eq!(infer_for(RuntimeVersion::V8_3_20), Vec::<String>::new());
    assert_eq!(
        infer_for(RuntimeVersion::V8_3_24),
        vec!["ОбщегоНазначения.ЗначенияРеквизитовОбъекта: Structure{Код: String}"]
    );
}

#[test]
fn test_serialized_result() {
    let calls = infer(&catalog_host(), ATTRIBUTES);
    let json = serde_json::to_value(&calls).expect("serializable");

    assert_eq!(json[0]["callee"], "ОбщегоНазначения.ЗначенияРеквизитовОбъекта");
    assert_eq!(json[0]["types"][0]["name"], STRUCTURE);
    assert_eq!(json[0]["types"][0]["properties"][0]["name"], "Код");
    assert_eq!(json[0]["types"][0]["properties"][0]["derived"], true);
}

#[test]
fn test_fixture_host() {
    let json = r#"{
        "objects": [
            { "type": "CatalogRef.Товары", "properties": [
                { "name": "Код", "nameRu": "Код", "types": [{ "name": "String" }] }
            ] }
        ],
        "variables": { "Ссылка": [{ "name": "CatalogRef.Товары" }] }
    }"#;
    let host = MemoryHost::from_fixture_str(json).expect("valid fixture");

    assert_eq!(
        rendered(&infer(&host, ATTRIBUTES)),
        vec!["ОбщегоНазначения.ЗначенияРеквизитовОбъекта: Structure{Код: String}"]
    );
}

#[derive(Debug)]
struct Constant;

impl InvocationTypesComputer for Constant {
    fn accepts(&self, call: &CallSite) -> bool {
        call.param_count() == 0
    }

    fn compute(&self, _call: &CallSite, _cx: &AnalysisContext) -> Vec<Type> {
        vec![Type::named(STRING)]
    }
}

#[test]
fn test_custom_registry() {
    let mut registry = ComputerRegistry::new();
    registry.register(&[COMMON], Spelling::new("Version", "Версия"), Arc::new(Constant));
    assert_eq!(registry.len(), 4);

    let host = catalog_host();
    let module = parse_in("А = ОбщегоНазначения.Версия();\nБ = Common.VERSION(1);", "Test");
    let calls = TypeInference::with_registry(&host, AnalysisConfig::default(), registry)
        .infer_module(&module);

    assert_eq!(rendered(&calls), vec!["ОбщегоНазначения.Версия: String"]);
}
