//! Manager and common module lookups by metadata name.

use tracing::debug;

use crate::analysis::{
    AnalysisContext,
    CallSite,
    InferenceError,
};
use crate::types::{
    ref_types,
    Type,
};

use super::InvocationTypesComputer;

/// Manager type prefix by reference kind, keyed in lowercase.
static REF_MANAGERS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "catalog" => "CatalogManager",
    "справочник" => "CatalogManager",
    "document" => "DocumentManager",
    "документ" => "DocumentManager",
    "chartofcharacteristictypes" => "ChartsOfCharacteristicTypeManager",
    "планвидовхарактеристик" => "ChartsOfCharacteristicTypeManager",
    "chartofcalculationtypes" => "ChartsOfCalculationTypeManager",
    "планвидоврасчета" => "ChartsOfCalculationTypeManager",
    "exchangeplan" => "ExchangePlanManager",
    "планобмена" => "ExchangePlanManager",
    "enum" => "EnumManager",
    "перечисление" => "EnumManager",
    "task" => "TaskManager",
    "задача" => "TaskManager",
    "businessprocess" => "BusinessProcessManager",
    "бизнеспроцесс" => "BusinessProcessManager",
    "chartofaccounts" => "ChartsOfAccountManager",
    "плансчетов" => "ChartsOfAccountManager",
};

/// Manager type prefix by non-reference kind, keyed in lowercase.
static NON_REF_MANAGERS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "informationregister" => "InformationRegisterManager",
    "регистрсведений" => "InformationRegisterManager",
    "accumulationregister" => "AccumulationRegisterManager",
    "регистрнакопления" => "AccumulationRegisterManager",
    "constant" => "ConstantManager",
    "константа" => "ConstantManager",
    "sequence" => "SequenceManager",
    "последовательность" => "SequenceManager",
    "documentjournal" => "DocumentJournalManager",
    "журналдокументов" => "DocumentJournalManager",
    "report" => "ReportManager",
    "отчет" => "ReportManager",
    "dataprocessor" => "DataProcessorManager",
    "обработка" => "DataProcessorManager",
    "filtercriterion" => "FilterCriterionManager",
    "критерийотбора" => "FilterCriterionManager",
    "settingsstorage" => "SettingsStorageManager",
    "хранилищенастроек" => "SettingsStorageManager",
    "wsreference" => "WSReferenceManager",
    "wsссылка" => "WSReferenceManager",
    "calculationregister" => "CalculationRegisterManager",
    "регистррасчета" => "CalculationRegisterManager",
    "accountingregister" => "AccountingRegisterManager",
    "регистрбухгалтерии" => "AccountingRegisterManager",
};

/// Manager type prefix by the global collection name (`Catalogs`, `Справочники`, ...).
static PLURAL_MANAGERS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "catalogs" => "CatalogManager",
    "справочники" => "CatalogManager",
    "documents" => "DocumentManager",
    "документы" => "DocumentManager",
    "chartsofcharacteristictypes" => "ChartsOfCharacteristicTypeManager",
    "планывидовхарактеристик" => "ChartsOfCharacteristicTypeManager",
    "chartsofcalculationtypes" => "ChartsOfCalculationTypeManager",
    "планывидоврасчета" => "ChartsOfCalculationTypeManager",
    "exchangeplans" => "ExchangePlanManager",
    "планыобмена" => "ExchangePlanManager",
    "enums" => "EnumManager",
    "перечисления" => "EnumManager",
    "informationregisters" => "InformationRegisterManager",
    "регистрысведений" => "InformationRegisterManager",
    "accumulationregisters" => "AccumulationRegisterManager",
    "регистрынакопления" => "AccumulationRegisterManager",
    "constants" => "ConstantManager",
    "константы" => "ConstantManager",
    "sequences" => "SequenceManager",
    "последовательности" => "SequenceManager",
    "documentjournals" => "DocumentJournalManager",
    "журналыдокументов" => "DocumentJournalManager",
    "reports" => "ReportManager",
    "отчеты" => "ReportManager",
    "dataprocessors" => "DataProcessorManager",
    "обработки" => "DataProcessorManager",
    "tasks" => "TaskManager",
    "задачи" => "TaskManager",
    "filtercriteria" => "FilterCriterionManager",
    "критерииотбора" => "FilterCriterionManager",
    "settingsstorages" => "SettingsStorageManager",
    "хранилищанастроек" => "SettingsStorageManager",
    "businessprocesses" => "BusinessProcessManager",
    "бизнеспроцессы" => "BusinessProcessManager",
    "wsreferences" => "WSReferenceManager",
    "wsссылки" => "WSReferenceManager",
};

/// `Kind.Name` split in two, or `None` for any other shape.
fn qualified_name(content: &str) -> Option<(&str, &str)> {
    if content.lines().count() > 1 {
        return None;
    }
    let (kind, name) = content.trim().split_once('.')?;
    if name.contains('.') {
        return None;
    }
    Some((kind, name))
}

fn manager(cx: &AnalysisContext, base: &str, name: &str) -> Option<Type> {
    let fqn = format!("{base}.{name}");
    let found = cx.scope.type_by_fqn(&fqn);
    if found.is_none() {
        debug!("No manager type {fqn}");
    }
    found
}

/// Text of the single argument, when statically known.
fn single_argument(call: &CallSite, cx: &AnalysisContext) -> Option<String> {
    let param = call.param(0)?;
    match cx.value_flow(call).resolve_value(param) {
        Some(resolved) => Some(resolved.content),
        None => {
            debug!("{}", InferenceError::UnresolvableContent(param.1));
            None
        }
    }
}

/// `Common.ObjectManagerByRef(Ref)`: `CatalogManager.Items` for `CatalogRef.Items`.
#[derive(Debug)]
pub struct ObjectManagerByRef;

impl InvocationTypesComputer for ObjectManagerByRef {
    fn accepts(&self, call: &CallSite) -> bool {
        call.param_count() == 1
    }

    fn compute(&self, call: &CallSite, cx: &AnalysisContext) -> Vec<Type> {
        let Some(object) = call.param(0) else {
            return vec![];
        };

        ref_types(&cx.types_of(call, object))
            .iter()
            .filter_map(|ty| {
                let (kind, name) = qualified_name(&ty.name)?;
                let kind = kind.to_lowercase();
                let kind = kind
                    .strip_suffix("ref")
                    .or_else(|| kind.strip_suffix("ссылка"))
                    .unwrap_or(kind.as_str());
                let base = REF_MANAGERS.get(kind)?;
                manager(cx, base, name)
            })
            .collect()
    }
}

/// `Common.ObjectManagerByFullName("Catalog.Items")`
#[derive(Debug)]
pub struct ObjectManagerByFullName;

impl InvocationTypesComputer for ObjectManagerByFullName {
    fn accepts(&self, call: &CallSite) -> bool {
        call.param_count() == 1
    }

    fn compute(&self, call: &CallSite, cx: &AnalysisContext) -> Vec<Type> {
        let Some(content) = single_argument(call, cx) else {
            return vec![];
        };
        let Some((kind, name)) = qualified_name(&content) else {
            return vec![];
        };

        let kind = kind.to_lowercase();
        NON_REF_MANAGERS
            .get(kind.as_str())
            .or_else(|| REF_MANAGERS.get(kind.as_str()))
            .and_then(|base| manager(cx, base, name))
            .into_iter()
            .collect()
    }
}

/// `Common.CommonModule("Name")`: the common module, or a manager for `Catalogs.Items`.
#[derive(Debug)]
pub struct CommonModuleManager;

impl InvocationTypesComputer for CommonModuleManager {
    fn accepts(&self, call: &CallSite) -> bool {
        call.param_count() == 1
    }

    fn compute(&self, call: &CallSite, cx: &AnalysisContext) -> Vec<Type> {
        let Some(content) = single_argument(call, cx) else {
            return vec![];
        };
        if content.lines().count() > 1 {
            return vec![];
        }
        let content = content.trim();

        if !content.contains('.') {
            return cx
                .scope
                .derived_property(content, &call.scope())
                .filter(|property| property.derived)
                .map(|property| property.types)
                .unwrap_or_default();
        }

        let Some((collection, name)) = qualified_name(content) else {
            return vec![];
        };
        PLURAL_MANAGERS
            .get(collection.to_lowercase().as_str())
            .and_then(|base| manager(cx, base, name))
            .into_iter()
            .collect()
    }
}
