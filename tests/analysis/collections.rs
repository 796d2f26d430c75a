use pretty_assertions::assert_eq;

use bsl_ssl_types::types::{
    Property,
    Type,
    TypeKind,
    FIXED_ARRAY,
    NUMBER,
    STRING,
    VALUE_TABLE,
    VALUE_TABLE_ROW,
};

use super::{
    array_of,
    catalog_host,
    infer,
    rendered,
};

fn goods_row() -> Type {
    Type {
        properties: vec![
            Property::derived(
                "Номенклатура",
                "Номенклатура",
                vec![Type::reference("CatalogRef.Товары")],
                None,
            ),
            Property::derived("Количество", "Количество", vec![Type::named(NUMBER)], None),
        ],
        ..Type::named(VALUE_TABLE_ROW)
    }
}

#[test]
fn test_copy_keeps_the_source_type() {
    let source = "Копия = ОбщегоНазначения.СкопироватьРекурсивно(Ссылки);";

    assert_eq!(
        rendered(&infer(&catalog_host(), source)),
        vec!["ОбщегоНазначения.СкопироватьРекурсивно: Array<CatalogRef.Товары>"]
    );
}

#[test]
fn test_copy_changes_fixedness_on_request() {
    let host = catalog_host().with_variable(
        "Список",
        vec![Type {
            element_types: vec![Type::named(STRING)],
            ..Type::named(FIXED_ARRAY)
        }],
    );
    let source = r#"
Параметры = Новый Структура;
Фикс = ОбщегоНазначенияКлиент.СкопироватьРекурсивно(Параметры, Истина);
Изменяемый = ОбщегоНазначенияКлиентСервер.СкопироватьРекурсивно(Список, Ложь);
"#;

    assert_eq!(
        rendered(&infer(&host, source)),
        vec![
            "ОбщегоНазначенияКлиент.СкопироватьРекурсивно: FixedStructure",
            "ОбщегоНазначенияКлиентСервер.СкопироватьРекурсивно: Array<String>",
        ]
    );
}

#[test]
fn test_fixed_data() {
    let host = catalog_host().with_variable("Имя", vec![Type::named(STRING)]);
    let source = "А = ОбщегоНазначения.ФиксированныеДанные(Ссылки);\nБ = ОбщегоНазначения.ФиксированныеДанные(Имя);";

    assert_eq!(
        rendered(&infer(&host, source)),
        vec!["ОбщегоНазначения.ФиксированныеДанные: FixedArray<CatalogRef.Товары>"]
    );
}

#[test]
fn test_value_in_array_and_collapse() {
    let source = "А = ОбщегоНазначенияКлиентСервер.ЗначениеВМассиве(Ссылка);\nБ = ОбщегоНазначенияКлиентСервер.СвернутьМассив(Ссылки);\nВ = ОбщегоНазначения.ПроверитьПроведенностьДокументов(Ссылки);";

    assert_eq!(
        rendered(&infer(&catalog_host(), source)),
        vec![
            "ОбщегоНазначенияКлиентСервер.ЗначениеВМассиве: Array<CatalogRef.Товары>",
            "ОбщегоНазначенияКлиентСервер.СвернутьМассив: Array<CatalogRef.Товары>",
            "ОбщегоНазначения.ПроверитьПроведенностьДокументов: Array<CatalogRef.Товары>",
        ]
    );
}

#[test]
fn test_unload_column() {
    let table = Type {
        element_types: vec![goods_row()],
        ..Type::named(VALUE_TABLE)
    };
    let host = catalog_host().with_variable("Таблица", vec![table]);
    let source = "Товары = ОбщегоНазначения.ВыгрузитьКолонку(Таблица, \"Номенклатура\");\nНет = ОбщегоНазначения.ВыгрузитьКолонку(Таблица, \"номенклатура\");";

    assert_eq!(
        rendered(&infer(&host, source)),
        vec!["ОбщегоНазначения.ВыгрузитьКолонку: Array<CatalogRef.Товары>"]
    );
}

#[test]
fn test_value_table_row_to_structure() {
    let host = catalog_host().with_variable("Строка", vec![goods_row()]);
    let source = "Данные = ОбщегоНазначения.СтрокаТаблицыЗначенийВСтруктуру(Строка);";

    assert_eq!(
        rendered(&infer(&host, source)),
        vec![
            "ОбщегоНазначения.СтрокаТаблицыЗначенийВСтруктуру: Structure{Номенклатура: CatalogRef.Товары, Количество: Number}"
        ]
    );
}

#[test]
fn test_object_properties_details() {
    let source = "Описание = ОбщегоНазначения.ОписаниеСвойствОбъекта(Ссылка, \"Наименование, Код\");";
    let calls = infer(&catalog_host(), source);

    assert_eq!(calls.len(), 1);
    let table = &calls[0].types[0];
    assert_eq!(table.kind(), TypeKind::ValueTable);

    let row = table
        .element_types
        .iter()
        .find(|ty| ty.kind() == TypeKind::ValueTableRow)
        .expect("row type");
    let row_names: Vec<&str> = row.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(row_names, vec!["Наименование", "Код"]);
    assert!(row.properties.iter().all(|p| p.writable));

    let columns = &table.property("Колонки").expect("columns").types[0];
    let column_names: Vec<&str> = columns.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(column_names, vec!["Наименование", "Код"]);
    for column in columns.properties.iter() {
        assert_eq!(column.types[0].kind(), TypeKind::ValueTableColumn);
        assert!(column.derived && !column.writable);
    }
}

#[test]
fn test_array_helper_matches_host_arrays() {
    let host = catalog_host().with_variable("Числа", vec![array_of(Type::named(NUMBER))]);
    let source = "Копия = ОбщегоНазначения.ФиксированныеДанные(Числа);";

    assert_eq!(
        rendered(&infer(&host, source)),
        vec!["ОбщегоНазначения.ФиксированныеДанные: FixedArray<Number>"]
    );
}
