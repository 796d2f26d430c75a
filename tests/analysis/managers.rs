use pretty_assertions::assert_eq;

use bsl_ssl_types::host::MemoryHost;

use super::{
    catalog_host,
    infer,
    rendered,
};

fn host() -> MemoryHost {
    catalog_host()
        .with_manager("CatalogManager.Товары")
        .with_manager("InformationRegisterManager.Цены")
        .with_common_module("ОбщегоНазначенияКлиентСервер")
}

#[test]
fn test_manager_by_ref() {
    let source = "Менеджер = ОбщегоНазначения.МенеджерОбъектаПоСсылке(Ссылка);";

    assert_eq!(
        rendered(&infer(&host(), source)),
        vec!["ОбщегоНазначения.МенеджерОбъектаПоСсылке: CatalogManager.Товары"]
    );
}

#[test]
fn test_manager_by_full_name() {
    let source = r#"
А = ОбщегоНазначения.МенеджерОбъектаПоПолномуИмени("Справочник.Товары");
Б = Common.ObjectManagerByFullName("InformationRegister.Цены");
В = ОбщегоНазначения.МенеджерОбъектаПоПолномуИмени("Документ.Заказ");
Г = ОбщегоНазначения.МенеджерОбъектаПоПолномуИмени("Справочник.Товары.Реквизит");
"#;

    assert_eq!(
        rendered(&infer(&host(), source)),
        vec![
            "ОбщегоНазначения.МенеджерОбъектаПоПолномуИмени: CatalogManager.Товары",
            "Common.ObjectManagerByFullName: InformationRegisterManager.Цены",
        ]
    );
}

#[test]
fn test_common_module() {
    let source = r#"
Модуль = ОбщегоНазначения.ОбщийМодуль("ОбщегоНазначенияКлиентСервер");
Справочник = ОбщегоНазначенияКлиент.ОбщийМодуль("Справочники.Товары");
Нет = ОбщегоНазначения.ОбщийМодуль("НетТакогоМодуля");
"#;

    assert_eq!(
        rendered(&infer(&host(), source)),
        vec![
            "ОбщегоНазначения.ОбщийМодуль: CommonModule.ОбщегоНазначенияКлиентСервер",
            "ОбщегоНазначенияКлиент.ОбщийМодуль: CatalogManager.Товары",
        ]
    );
}

#[test]
fn test_module_name_from_variable() {
    let source = "Имя = \"Справочники\";\nИмя = Имя + \".Товары\";\nМенеджер = ОбщегоНазначения.ОбщийМодуль(Имя);";

    assert_eq!(
        rendered(&infer(&host(), source)),
        vec!["ОбщегоНазначения.ОбщийМодуль: CatalogManager.Товары"]
    );
}
