use pretty_assertions::assert_eq;

use bsl_ssl_types::types::DerivedSource;

use super::{
    catalog_host,
    infer,
    infer_in,
    rendered,
};

#[test]
fn test_attributes_named_by_concatenated_variable() {
    let source = "Товар = \"Код\";\nТовар = Товар + \", Наименование\";\nРезультат = ОбщегоНазначения.ЗначенияРеквизитовОбъекта(Ссылка, Товар);";
    let calls = infer(&catalog_host(), source);

    assert_eq!(
        rendered(&calls),
        vec!["ОбщегоНазначения.ЗначенияРеквизитовОбъекта: Structure{Код: String, Наименование: String}"]
    );
    let structure = &calls[0].types[0];
    for property in structure.properties.iter() {
        assert!(property.readable && property.writable && property.derived, "{property:?}");
    }
    assert_eq!(calls[0].start, source.find("ОбщегоНазначения").unwrap_or_default());
    assert_eq!(calls[0].end, source.len() - 1);
}

#[test]
fn test_invariant_spelling() {
    let source = "Result = Common.ObjectAttributesValues(Ссылка, \"код\");";

    assert_eq!(
        rendered(&infer(&catalog_host(), source)),
        vec!["Common.ObjectAttributesValues: Structure{Код: String}"]
    );
}

#[test]
fn test_structure_keys_name_nested_paths() {
    let source = "Поля = Новый Структура(\"Код, Владелец.ИНН\");\nДанные = ОбщегоНазначения.ЗначенияРеквизитовОбъекта(Ссылка, Поля);";
    let calls = infer(&catalog_host(), source);

    assert_eq!(
        rendered(&calls),
        vec!["ОбщегоНазначения.ЗначенияРеквизитовОбъекта: Structure{Код: String, ВладелецИНН: String}"]
    );

    let properties = &calls[0].types[0].properties;
    assert_eq!(properties[0].source, None);
    assert_eq!(
        properties[1].source,
        Some(DerivedSource::Literal {
            module_uri: "test.bsl".to_string(),
            method_name: None,
            local_offset: source.find("Владелец.ИНН").unwrap_or_default(),
        })
    );
}

#[test]
fn test_literal_source_spans_continuation_lines() {
    let source = "Поля = Новый Структура(\"Код,\n    |Владелец.ИНН\");\nДанные = ОбщегоНазначения.ЗначенияРеквизитовОбъекта(Ссылка, Поля);";
    let calls = infer(&catalog_host(), source);

    assert_eq!(
        rendered(&calls),
        vec!["ОбщегоНазначения.ЗначенияРеквизитовОбъекта: Structure{Код: String, ВладелецИНН: String}"]
    );
    assert_eq!(
        calls[0].types[0].properties[1].source,
        Some(DerivedSource::Literal {
            module_uri: "test.bsl".to_string(),
            method_name: None,
            local_offset: source.find("Владелец.ИНН").unwrap_or_default(),
        })
    );
}

#[test]
fn test_structure_inserts_after_construction() {
    let source = r#"
Поля = Новый Структура;
Поля.Вставить("Наименование");
Поля.Вставить("ИННВладельца", "Владелец.ИНН");
Данные = ОбщегоНазначения.ЗначенияРеквизитовОбъекта(Ссылка, Поля);
"#;

    assert_eq!(
        rendered(&infer(&catalog_host(), source)),
        vec![
            "ОбщегоНазначения.ЗначенияРеквизитовОбъекта: Structure{Наименование: String, ИННВладельца: String}"
        ]
    );
}

#[test]
fn test_array_of_paths() {
    let source = r#"
Поля = Новый Массив;
Поля.Добавить("Наименование");
Поля.Добавить("Владелец.Код");
Данные = ОбщегоНазначения.ЗначенияРеквизитовОбъекта(Ссылка, Поля);
"#;

    assert_eq!(
        rendered(&infer(&catalog_host(), source)),
        vec!["ОбщегоНазначения.ЗначенияРеквизитовОбъекта: Structure{Наименование: String, ВладелецКод: Number}"]
    );
}

#[test]
fn test_literal_source_is_method_local() {
    let source = r#"Перем Кэш;

Процедура Заполнить()
    Поля = Новый Структура("Владелец.ИНН");
    Данные = ОбщегоНазначения.ЗначенияРеквизитовОбъекта(Ссылка, Поля);
КонецПроцедуры
"#;
    let calls = infer(&catalog_host(), source);

    assert_eq!(
        rendered(&calls),
        vec!["ОбщегоНазначения.ЗначенияРеквизитовОбъекта: Structure{ВладелецИНН: String}"]
    );
    let method_start = source.find("Процедура").unwrap_or_default();
    let path = source.find("Владелец.ИНН").unwrap_or_default();
    assert_eq!(
        calls[0].types[0].properties[0].source,
        Some(DerivedSource::Literal {
            module_uri: "test.bsl".to_string(),
            method_name: Some("Заполнить".to_string()),
            local_offset: path - method_start,
        })
    );
}

#[test]
fn test_unknown_attributes_are_dropped() {
    let source = "Данные = ОбщегоНазначения.ЗначенияРеквизитовОбъекта(Ссылка, \"Код, Артикул\");";

    assert_eq!(
        rendered(&infer(&catalog_host(), source)),
        vec!["ОбщегоНазначения.ЗначенияРеквизитовОбъекта: Structure{Код: String}"]
    );
}

#[test]
fn test_unknown_names_give_no_opinion() {
    let source = "Данные = ОбщегоНазначения.ЗначенияРеквизитовОбъекта(Ссылка, ПолучитьПоля());";

    assert!(infer(&catalog_host(), source).is_empty());
}

#[test]
fn test_single_attribute_path() {
    let source = "ИНН = ОбщегоНазначения.ЗначениеРеквизитаОбъекта(Ссылка, \"Владелец.ИНН\");\nКод = ОбщегоНазначения.ЗначениеРеквизитаОбъекта(Ссылка, \"Владелец.Нет\");";

    assert_eq!(
        rendered(&infer(&catalog_host(), source)),
        vec!["ОбщегоНазначения.ЗначениеРеквизитаОбъекта: String"]
    );
}

#[test]
fn test_attributes_of_many_objects() {
    let source = "Данные = ОбщегоНазначения.ЗначенияРеквизитовОбъектов(Ссылки, \"Код\");\nКоды = ОбщегоНазначения.ЗначениеРеквизитаОбъектов(Ссылки, \"Код\");";

    assert_eq!(
        rendered(&infer(&catalog_host(), source)),
        vec![
            "ОбщегоНазначения.ЗначенияРеквизитовОбъектов: Map<KeyAndValue{Key: CatalogRef.Товары, Value: Structure{Код: String}}>",
            "ОбщегоНазначения.ЗначениеРеквизитаОбъектов: Map<KeyAndValue{Key: CatalogRef.Товары, Value: String}>",
        ]
    );
}

#[test]
fn test_unqualified_call_inside_common_module() {
    let source = "Результат = ЗначенияРеквизитовОбъекта(Ссылка, \"Код\");";

    assert_eq!(
        rendered(&infer_in(&catalog_host(), source, "ОбщегоНазначения")),
        vec!["ЗначенияРеквизитовОбъекта: Structure{Код: String}"]
    );
    assert!(infer_in(&catalog_host(), source, "ДругойМодуль").is_empty());
}

#[test]
fn test_rejected_call_shape() {
    let source = "Данные = ОбщегоНазначения.ЗначенияРеквизитовОбъекта(Ссылка);";

    assert!(infer(&catalog_host(), source).is_empty());
}
