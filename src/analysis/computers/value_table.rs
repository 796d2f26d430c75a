use tracing::debug;

use crate::analysis::{
    AnalysisContext,
    CallSite,
    InferenceError,
};
use crate::grammar::Expression;
use crate::types::{
    Property,
    Type,
    TypeKind,
};

use super::{
    settle,
    InvocationTypesComputer,
};

/// Properties reported for the first owner among `types`.
fn first_properties(cx: &AnalysisContext, types: &[Type]) -> Vec<Property> {
    cx.properties
        .all_properties(types)
        .into_iter()
        .next()
        .map(|(properties, _)| properties)
        .unwrap_or_default()
}

/// `Common.ValueTableRowToStructure(Row)`
#[derive(Debug)]
pub struct ValueTableRowToStructure;

impl InvocationTypesComputer for ValueTableRowToStructure {
    fn accepts(&self, call: &CallSite) -> bool {
        call.param_count() == 1 && matches!(call.param(0), Some((Expression::Static(_), _)))
    }

    fn compute(&self, call: &CallSite, cx: &AnalysisContext) -> Vec<Type> {
        let Some(row) = call.param(0) else {
            return vec![];
        };
        let Some(row) = cx
            .types_of(call, row)
            .into_iter()
            .find(|ty| ty.kind() == TypeKind::ValueTableRow)
        else {
            return vec![];
        };

        let columns: Vec<Property> = first_properties(cx, std::slice::from_ref(&row))
            .into_iter()
            .filter(|p| p.derived)
            .map(|p| Property {
                readable: true,
                ..p
            })
            .collect();
        settle(cx.synthesizer().build_structure(columns.iter(), false))
    }
}

/// `Common.UnloadColumn(Collection, "Column")`: an array of the column's types.
#[derive(Debug)]
pub struct UnloadColumn;

impl InvocationTypesComputer for UnloadColumn {
    fn accepts(&self, call: &CallSite) -> bool {
        (2..=3).contains(&call.param_count())
    }

    fn compute(&self, call: &CallSite, cx: &AnalysisContext) -> Vec<Type> {
        let (Some(collection), Some(column)) = (call.param(0), call.param(1)) else {
            return vec![];
        };
        let types = cx.types_of(call, collection);
        let Some(element) = types.first().and_then(|ty| match ty.element_types.as_slice() {
            [element] => Some(element),
            _ => None,
        }) else {
            return vec![];
        };
        let Some(name) = cx.value_flow(call).resolve_value(column) else {
            debug!("{}", InferenceError::UnresolvableContent(column.1));
            return vec![];
        };

        // Column names are matched exactly, as the platform stores them.
        first_properties(cx, std::slice::from_ref(element))
            .into_iter()
            .find(|p| p.name == name.content)
            .map(|p| settle(cx.synthesizer().build_array(&p.types, false)))
            .unwrap_or_default()
    }
}

/// `Common.ObjectPropertiesDetails(Object, "Code, Description")`: a value table
/// with one row property and one column per named property.
#[derive(Debug)]
pub struct ObjectPropertiesDetails;

impl InvocationTypesComputer for ObjectPropertiesDetails {
    fn accepts(&self, call: &CallSite) -> bool {
        call.param_count() >= 2
    }

    fn compute(&self, call: &CallSite, cx: &AnalysisContext) -> Vec<Type> {
        let (Some(object), Some(names)) = (call.param(0), call.param(1)) else {
            return vec![];
        };
        let Some(owner) = cx.types_of(call, object).into_iter().next() else {
            return vec![];
        };
        let Some(names) = cx.value_flow(call).resolve_value(names) else {
            debug!("{}", InferenceError::UnresolvableContent(names.1));
            return vec![];
        };

        let properties = first_properties(cx, std::slice::from_ref(&owner));
        let mut rows = vec![];
        let mut columns = vec![];
        for name in names.content.trim().split(',').map(str::trim) {
            if let Some(property) = properties.iter().find(|p| p.is_named(name)) {
                rows.push(Property {
                    writable: true,
                    ..property.clone()
                });
                columns.push(property.clone());
            }
        }

        settle(cx.synthesizer().build_value_table(rows, columns))
    }
}
