//! Result-type computers for common module functions, one per function.

use std::fmt::Debug;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::grammar::Expression;
use crate::types::Type;

use super::{
    AnalysisContext,
    CallSite,
    InferenceError,
};

pub mod attribute_value;
pub mod attributes_values;
pub mod copy_recursive;
pub mod fixed_data;
pub mod managers;
pub mod passthrough;
pub mod value_table;

/// A name in its invariant and Russian spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spelling {
    pub invariant: &'static str,
    pub russian: &'static str,
}

impl Spelling {
    pub const fn new(invariant: &'static str, russian: &'static str) -> Self {
        Spelling { invariant, russian }
    }

    fn keys(&self) -> [String; 2] {
        [self.invariant.to_lowercase(), self.russian.to_lowercase()]
    }
}

pub const COMMON: Spelling = Spelling::new("Common", "ОбщегоНазначения");
pub const COMMON_CLIENT: Spelling = Spelling::new("CommonClient", "ОбщегоНазначенияКлиент");
pub const COMMON_CLIENT_SERVER: Spelling =
    Spelling::new("CommonClientServer", "ОбщегоНазначенияКлиентСервер");

pub trait InvocationTypesComputer: Sync + Send + Debug {
    /// Call shape check; identity is settled by the registry lookup.
    fn accepts(&self, call: &CallSite) -> bool;

    fn compute(&self, call: &CallSite, cx: &AnalysisContext) -> Vec<Type>;
}

/// Module and function a call targets, lowercased.
///
/// `Module.Function(...)` names the module through its receiver; an
/// unqualified call belongs to the module being analyzed.
pub fn call_identity(call: &CallSite) -> Option<(String, String)> {
    match &call.invocation.method_access.0 {
        Expression::Dynamic(access) => {
            let module = access.source.0.as_static()?;
            Some((module.name.to_lowercase(), access.name.0.to_lowercase()))
        }
        Expression::Static(access) => Some((
            call.module.name.to_lowercase(),
            access.name.to_lowercase(),
        )),
        _ => None,
    }
}

/// Collapses a synthesis result into the computer's answer.
pub(crate) fn settle(result: Result<Type, InferenceError>) -> Vec<Type> {
    match result {
        Ok(ty) => vec![ty],
        Err(err) => {
            debug!("{err}");
            vec![]
        }
    }
}

#[derive(Debug, Default)]
pub struct ComputerRegistry {
    computers: FxHashMap<(String, String), Arc<dyn InvocationTypesComputer>>,
}

impl ComputerRegistry {
    pub fn new() -> Self {
        ComputerRegistry::default()
    }

    /// Registers `computer` for every spelling combination of the modules and the function.
    pub fn register(
        &mut self,
        modules: &[Spelling],
        function: Spelling,
        computer: Arc<dyn InvocationTypesComputer>,
    ) {
        for module in modules {
            for module_key in module.keys() {
                for function_key in function.keys() {
                    self.computers
                        .insert((module_key.clone(), function_key), computer.clone());
                }
            }
        }
    }

    pub fn lookup(&self, module: &str, function: &str) -> Option<&Arc<dyn InvocationTypesComputer>> {
        self.computers
            .get(&(module.to_lowercase(), function.to_lowercase()))
    }

    pub fn len(&self) -> usize {
        self.computers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.computers.is_empty()
    }

    /// Every computer this crate ships.
    pub fn standard() -> Self {
        use attribute_value::{
            ObjectAttributeValue,
            ObjectsAttributeValue,
        };
        use attributes_values::{
            ObjectAttributesValues,
            ObjectsAttributesValues,
        };
        use copy_recursive::CopyRecursive;
        use fixed_data::FixedData;
        use managers::{
            CommonModuleManager,
            ObjectManagerByFullName,
            ObjectManagerByRef,
        };
        use passthrough::{
            Passthrough,
            ValueInArray,
        };
        use value_table::{
            ObjectPropertiesDetails,
            UnloadColumn,
            ValueTableRowToStructure,
        };

        let mut registry = ComputerRegistry::new();
        let common = &[COMMON];

        registry.register(
            common,
            Spelling::new("ObjectAttributeValue", "ЗначениеРеквизитаОбъекта"),
            Arc::new(ObjectAttributeValue),
        );
        registry.register(
            common,
            Spelling::new("ObjectsAttributeValue", "ЗначениеРеквизитаОбъектов"),
            Arc::new(ObjectsAttributeValue),
        );
        registry.register(
            common,
            Spelling::new("ObjectAttributesValues", "ЗначенияРеквизитовОбъекта"),
            Arc::new(ObjectAttributesValues),
        );
        registry.register(
            common,
            Spelling::new("ObjectsAttributesValues", "ЗначенияРеквизитовОбъектов"),
            Arc::new(ObjectsAttributesValues),
        );
        registry.register(
            &[COMMON, COMMON_CLIENT, COMMON_CLIENT_SERVER],
            Spelling::new("CopyRecursive", "СкопироватьРекурсивно"),
            Arc::new(CopyRecursive),
        );
        registry.register(
            common,
            Spelling::new("FixedData", "ФиксированныеДанные"),
            Arc::new(FixedData),
        );
        registry.register(
            common,
            Spelling::new("ValueTableRowToStructure", "СтрокаТаблицыЗначенийВСтруктуру"),
            Arc::new(ValueTableRowToStructure),
        );
        registry.register(
            common,
            Spelling::new("UnloadColumn", "ВыгрузитьКолонку"),
            Arc::new(UnloadColumn),
        );
        registry.register(
            common,
            Spelling::new("ObjectPropertiesDetails", "ОписаниеСвойствОбъекта"),
            Arc::new(ObjectPropertiesDetails),
        );
        registry.register(
            common,
            Spelling::new("ObjectManagerByRef", "МенеджерОбъектаПоСсылке"),
            Arc::new(ObjectManagerByRef),
        );
        registry.register(
            common,
            Spelling::new("ObjectManagerByFullName", "МенеджерОбъектаПоПолномуИмени"),
            Arc::new(ObjectManagerByFullName),
        );
        registry.register(
            &[COMMON, COMMON_CLIENT],
            Spelling::new("CommonModule", "ОбщийМодуль"),
            Arc::new(CommonModuleManager),
        );
        registry.register(
            &[COMMON_CLIENT_SERVER],
            Spelling::new("CollapseArray", "СвернутьМассив"),
            Arc::new(Passthrough),
        );
        registry.register(
            common,
            Spelling::new("CheckDocumentsPosting", "ПроверитьПроведенностьДокументов"),
            Arc::new(Passthrough),
        );
        registry.register(
            &[COMMON_CLIENT_SERVER],
            Spelling::new("ValueInArray", "ЗначениеВМассиве"),
            Arc::new(ValueInArray),
        );

        registry
    }
}
